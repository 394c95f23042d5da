use core_types::{Feature, FeatureSet};
use itertools::Itertools;

/// Generates every subset of the available features, from none to all.
///
/// Subsets come out smallest first, in `Feature::ALL` order within a size.
pub fn generate_feature_combinations() -> Vec<FeatureSet> {
    Feature::ALL
        .into_iter()
        .powerset()
        .map(|subset| subset.into_iter().collect())
        .collect()
}
