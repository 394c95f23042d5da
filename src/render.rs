//! Terminal tables for the CLI.

use analytics::{
    format_currency, format_percentage, format_roi_multiplier, RoiEngine,
    DEFAULT_PERCENTAGE_DECIMALS,
};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::{CalculatorResults, FunnelMetrics};
use rust_decimal::Decimal;
use scenarios::{FeatureImpact, ScenarioOutcome};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn pct(value: Decimal) -> String {
    format_percentage(value, DEFAULT_PERCENTAGE_DECIMALS)
}

/// Current vs. projected rate for each funnel stage.
pub fn funnel_table(results: &CalculatorResults) -> Table {
    let current = &results.current_metrics;
    let projected = &results.improvements;
    let rows = [
        ("Open rate", current.open_rate, projected.open_rate),
        ("Click-through rate", current.click_through_rate, projected.click_through_rate),
        ("Conversion rate", current.conversion_rate, projected.conversion_rate),
        ("Deliverability", current.deliverability, projected.deliverability),
    ];

    let mut table = new_table(vec!["Metric", "Current", "Projected", "Change"]);
    for (label, now, then) in rows {
        // A stage already above its ceiling is capped down, so the change can be negative.
        let change = then - now;
        let change = if change >= Decimal::ZERO {
            format!("+{}", pct(change))
        } else {
            pct(change)
        };
        table.add_row(vec![label.to_string(), pct(now), pct(then), change]);
    }
    table
}

/// The revenue projection and where it comes from.
pub fn revenue_table(results: &CalculatorResults) -> Table {
    let multiplier = results
        .projected_monthly_revenue
        .checked_div(results.current_monthly_revenue)
        .unwrap_or(Decimal::ONE);
    let breakdown = &results.breakdown;

    let mut table = new_table(vec!["Revenue", "Monthly"]);
    table
        .add_row(vec!["Current revenue".to_string(), format_currency(results.current_monthly_revenue)])
        .add_row(vec!["Projected revenue".to_string(), format_currency(results.projected_monthly_revenue)])
        .add_row(vec!["Revenue increase".to_string(), format_currency(results.revenue_increase)])
        .add_row(vec![
            "Annual revenue increase".to_string(),
            format_currency(results.annual_revenue_increase),
        ])
        .add_row(vec![
            "ROI".to_string(),
            format!(
                "+{} ({})",
                format_percentage(results.monthly_roi_percentage, 0),
                format_roi_multiplier(multiplier)
            ),
        ])
        .add_row(vec![
            "Conversions".to_string(),
            format!("{} -> {}", results.current_metrics.conversions, results.conversions),
        ])
        .add_row(vec!["  from email".to_string(), format_currency(breakdown.email_revenue)])
        .add_row(vec!["  from channel synergy".to_string(), format_currency(breakdown.synergy_uplift)])
        .add_row(vec!["  from SMS".to_string(), format_currency(breakdown.sms_revenue)])
        .add_row(vec![
            "  from new subscribers".to_string(),
            format_currency(breakdown.new_subscriber_revenue),
        ]);
    table
}

/// What each feature adds on top of the current selection.
pub fn impact_table(impacts: &[FeatureImpact]) -> Table {
    let mut table = new_table(vec!["Feature", "Claim", "Selected", "Revenue impact"]);
    for impact in impacts {
        table.add_row(vec![
            impact.feature.title().to_string(),
            impact.feature.headline().to_string(),
            if impact.selected { "yes" } else { "no" }.to_string(),
            format!("+{}", format_currency(impact.revenue_delta)),
        ]);
    }
    table
}

/// Ranked feature combinations.
pub fn comparison_table(outcomes: &[ScenarioOutcome]) -> Table {
    let mut table = new_table(vec!["#", "Features", "Projected revenue", "Increase", "ROI"]);
    for (rank, outcome) in outcomes.iter().enumerate() {
        let enabled = outcome.features.enabled();
        let features = if enabled.is_empty() {
            "Email only".to_string()
        } else {
            enabled.iter().map(|f| f.title()).collect::<Vec<_>>().join(", ")
        };
        table.add_row(vec![
            (rank + 1).to_string(),
            features,
            format_currency(outcome.results.projected_monthly_revenue),
            format_currency(outcome.results.revenue_increase),
            format_percentage(outcome.results.monthly_roi_percentage, 0),
        ]);
    }
    table
}

/// The static benchmark tables.
pub fn benchmark_table(engine: &RoiEngine) -> Table {
    let columns: [(&str, &FunnelMetrics); 4] = [
        ("Email benchmark", engine.email_benchmarks()),
        ("SMS benchmark", engine.sms_benchmarks()),
        ("Platform improvement", engine.platform_improvements()),
        ("Ceiling", &engine.tables().ceilings),
    ];
    let stages: [(&str, fn(&FunnelMetrics) -> Decimal); 4] = [
        ("Open rate", |m| m.open_rate),
        ("Click-through rate", |m| m.click_through_rate),
        ("Conversion rate", |m| m.conversion_rate),
        ("Deliverability", |m| m.deliverability),
    ];

    let mut header = vec!["Stage"];
    header.extend(columns.iter().map(|(name, _)| *name));
    let mut table = new_table(header);
    for (stage, value) in stages {
        let mut row = vec![stage.to_string()];
        row.extend(columns.iter().map(|(_, metrics)| pct(value(metrics))));
        table.add_row(row);
    }

    let synergies = engine.synergies();
    table.add_row(vec![
        "Email + SMS synergy".to_string(),
        format!("reach +{}", pct(synergies.reach_boost)),
        format!("open +{}", pct(synergies.open_rate_boost)),
        format!("click +{}", pct(synergies.click_rate_boost)),
        format!("conversion +{}", pct(synergies.conversion_rate_boost)),
    ]);
    table
}
