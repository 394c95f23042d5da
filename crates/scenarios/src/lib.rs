use analytics::RoiEngine;
use core_types::{CalculatorInputs, CalculatorResults, Feature, FeatureSet};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

pub mod generator;

pub use generator::generate_feature_combinations;

/// One feature selection and what it projects for the same business inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub features: FeatureSet,
    pub results: CalculatorResults,
}

/// How much a single feature moves the projection on top of the other selected features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImpact {
    pub feature: Feature,
    /// Whether the feature is part of the caller's own selection.
    pub selected: bool,
    pub revenue_delta: Decimal,
    pub roi_percentage_delta: Decimal,
}

/// Runs the calculator once per feature combination and ranks the outcomes.
///
/// The caller's own feature selection is ignored. Outcomes are ordered by projected
/// monthly revenue, highest first; equal projections favour the smaller selection.
pub fn compare_combinations(engine: &RoiEngine, inputs: &CalculatorInputs) -> Vec<ScenarioOutcome> {
    let mut outcomes: Vec<ScenarioOutcome> = generate_feature_combinations()
        .into_iter()
        .map(|features| ScenarioOutcome {
            features,
            results: engine.calculate_roi(&inputs.with_features(features)),
        })
        .collect();

    outcomes.sort_by(|a, b| rank(a, b));

    tracing::debug!(
        scenarios = outcomes.len(),
        best = ?outcomes.first().map(|o| o.features.enabled()),
        "Compared feature combinations."
    );

    outcomes
}

/// For each feature, the change in projection from switching it on, keeping every
/// other toggle as the caller set it.
///
/// Features the caller already selected are measured the same way, with-vs-without,
/// so their delta does not depend on whether they are selected.
pub fn marginal_impacts(engine: &RoiEngine, inputs: &CalculatorInputs) -> Vec<FeatureImpact> {
    Feature::ALL
        .into_iter()
        .map(|feature| {
            let without = engine.calculate_roi(&inputs.with_features(inputs.features.with(feature, false)));
            let with = engine.calculate_roi(&inputs.with_features(inputs.features.with(feature, true)));

            FeatureImpact {
                feature,
                selected: inputs.features.is_enabled(feature),
                revenue_delta: with.projected_monthly_revenue - without.projected_monthly_revenue,
                roi_percentage_delta: with.monthly_roi_percentage - without.monthly_roi_percentage,
            }
        })
        .collect()
}

fn rank(a: &ScenarioOutcome, b: &ScenarioOutcome) -> Ordering {
    b.results
        .projected_monthly_revenue
        .cmp(&a.results.projected_monthly_revenue)
        .then_with(|| a.features.count().cmp(&b.features.count()))
}
