use analytics::RoiEngine;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use core_types::{CalculatorInputs, CalculatorResults, Feature};
use rust_decimal::Decimal;
use scenarios::{FeatureImpact, ScenarioOutcome};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;

/// The main entry point for the Uplift ROI calculator.
fn main() -> anyhow::Result<()> {
    // Load RUST_LOG and UPLIFT_* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    let tables = configuration::load_config(cli.config.as_deref())
        .context("Failed to load the benchmark tables")?;
    let engine = RoiEngine::new(tables)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Estimate(args) => handle_estimate(&engine, args, cli.json),
        Commands::Compare(args) => handle_compare(&engine, args, cli.json),
        Commands::Benchmarks => handle_benchmarks(&engine, cli.json),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Projects the revenue uplift of email and SMS marketing features.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// A TOML file overriding the built-in benchmark tables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project revenue for one set of inputs and features.
    Estimate(EstimateArgs),
    /// Rank every combination of features for the same inputs.
    Compare(CompareArgs),
    /// Show the benchmark tables the projections are based on.
    Benchmarks,
}

#[derive(Args)]
struct EstimateArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Enable a feature. May be repeated.
    #[arg(long = "feature", value_enum)]
    features: Vec<Feature>,
}

#[derive(Args)]
struct CompareArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Only show the best N combinations.
    #[arg(long)]
    top: Option<usize>,
}

/// Business and funnel figures. Anything not given comes from `--inputs`, or the
/// calculator defaults.
#[derive(Args)]
struct InputArgs {
    /// A TOML file with calculator inputs.
    #[arg(long)]
    inputs: Option<PathBuf>,

    #[arg(long)]
    monthly_revenue: Option<Decimal>,
    #[arg(long)]
    average_order_value: Option<Decimal>,
    #[arg(long)]
    email_list_size: Option<Decimal>,
    #[arg(long)]
    emails_per_month: Option<Decimal>,
    /// Open rate in percent.
    #[arg(long)]
    open_rate: Option<Decimal>,
    /// Click-through rate in percent.
    #[arg(long)]
    click_through_rate: Option<Decimal>,
    /// Conversion rate in percent.
    #[arg(long)]
    conversion_rate: Option<Decimal>,
    /// Deliverability in percent.
    #[arg(long)]
    deliverability: Option<Decimal>,
    #[arg(long)]
    new_subscribers_per_month: Option<Decimal>,
}

impl InputArgs {
    fn resolve(&self) -> anyhow::Result<CalculatorInputs> {
        let mut inputs = match &self.inputs {
            Some(path) => configuration::load_inputs(path)
                .with_context(|| format!("Failed to read inputs from {}", path.display()))?,
            None => CalculatorInputs::default(),
        };

        let overrides = [
            (self.monthly_revenue, &mut inputs.monthly_revenue),
            (self.average_order_value, &mut inputs.average_order_value),
            (self.email_list_size, &mut inputs.email_list_size),
            (self.emails_per_month, &mut inputs.emails_per_month),
            (self.open_rate, &mut inputs.open_rate),
            (self.click_through_rate, &mut inputs.click_through_rate),
            (self.conversion_rate, &mut inputs.conversion_rate),
            (self.deliverability, &mut inputs.deliverability),
            (self.new_subscribers_per_month, &mut inputs.new_subscribers_per_month),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        Ok(inputs)
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

#[derive(Serialize)]
struct EstimateReport<'a> {
    inputs: &'a CalculatorInputs,
    results: &'a CalculatorResults,
    feature_impacts: &'a [FeatureImpact],
}

fn handle_estimate(engine: &RoiEngine, args: EstimateArgs, json: bool) -> anyhow::Result<()> {
    let mut inputs = args.inputs.resolve()?;
    for feature in args.features {
        inputs.features.set(feature, true);
    }
    tracing::info!(features = ?inputs.features.enabled(), "Running estimate.");

    let results = engine.calculate_roi(&inputs);
    let impacts = scenarios::marginal_impacts(engine, &inputs);

    if json {
        let report = EstimateReport {
            inputs: &engine.validate_inputs(&inputs),
            results: &results,
            feature_impacts: &impacts,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", render::funnel_table(&results));
    println!("{}", render::revenue_table(&results));
    println!("{}", render::impact_table(&impacts));
    Ok(())
}

fn handle_compare(engine: &RoiEngine, args: CompareArgs, json: bool) -> anyhow::Result<()> {
    let inputs = args.inputs.resolve()?;
    let mut outcomes: Vec<ScenarioOutcome> = scenarios::compare_combinations(engine, &inputs);
    if let Some(top) = args.top {
        outcomes.truncate(top);
    }
    tracing::info!(shown = outcomes.len(), "Compared feature combinations.");

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!("{}", render::comparison_table(&outcomes));
    }
    Ok(())
}

fn handle_benchmarks(engine: &RoiEngine, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(engine.tables())?);
    } else {
        println!("{}", render::benchmark_table(engine));
    }
    Ok(())
}
