use crate::enums::Feature;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The set of product features the user has toggled on.
///
/// Each flag is independent; the engine decides how they compose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    pub multi_channel: bool,
    pub ai_content: bool,
    pub automation: bool,
    pub segmentation: bool,
    pub ab_testing: bool,
}

impl FeatureSet {
    /// A set with no feature enabled.
    pub fn none() -> Self {
        Self::default()
    }

    /// A set with every feature enabled.
    pub fn all() -> Self {
        Feature::ALL.into_iter().collect()
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::MultiChannel => self.multi_channel,
            Feature::AiContent => self.ai_content,
            Feature::Automation => self.automation,
            Feature::Segmentation => self.segmentation,
            Feature::AbTesting => self.ab_testing,
        }
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let flag = match feature {
            Feature::MultiChannel => &mut self.multi_channel,
            Feature::AiContent => &mut self.ai_content,
            Feature::Automation => &mut self.automation,
            Feature::Segmentation => &mut self.segmentation,
            Feature::AbTesting => &mut self.ab_testing,
        };
        *flag = enabled;
    }

    /// Returns a copy of this set with `feature` switched to `enabled`.
    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.set(feature, enabled);
        self
    }

    /// The enabled features, in `Feature::ALL` order.
    pub fn enabled(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| self.is_enabled(*f))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.enabled().len()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut set = FeatureSet::none();
        for feature in iter {
            set.set(feature, true);
        }
        set
    }
}

/// Everything the user types into the calculator form.
///
/// Percentages are expressed in percent (`25` means 25%), not fractions.
/// Values are taken as-is here; the engine clamps them before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInputs {
    // Business information
    pub monthly_revenue: Decimal,
    pub average_order_value: Decimal,
    pub email_list_size: Decimal,

    // Email marketing metrics
    pub emails_per_month: Decimal,
    pub open_rate: Decimal,
    pub click_through_rate: Decimal,
    pub conversion_rate: Decimal,
    pub deliverability: Decimal,
    pub new_subscribers_per_month: Decimal,

    // Marketing costs. Carried for interface stability; the revenue model does not read them.
    pub email_marketing_costs: Decimal,
    pub staff_hours: Decimal,
    pub hourly_rate: Decimal,

    pub features: FeatureSet,
}

impl CalculatorInputs {
    /// Returns a copy of these inputs with a different feature selection.
    pub fn with_features(&self, features: FeatureSet) -> Self {
        Self {
            features,
            ..self.clone()
        }
    }
}

impl Default for CalculatorInputs {
    /// The values the calculator form is pre-filled with.
    fn default() -> Self {
        Self {
            monthly_revenue: dec!(100000),
            average_order_value: dec!(150),
            email_list_size: dec!(1000),
            emails_per_month: dec!(10000),
            open_rate: dec!(25),
            click_through_rate: dec!(2),
            conversion_rate: dec!(1.5),
            deliverability: dec!(80),
            new_subscribers_per_month: dec!(500),
            email_marketing_costs: dec!(299),
            staff_hours: dec!(40),
            hourly_rate: dec!(50),
            features: FeatureSet::none(),
        }
    }
}
