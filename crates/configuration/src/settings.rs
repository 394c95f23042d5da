use crate::error::ConfigError;
use core_types::FunnelMetrics;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The root configuration structure: every static table the ROI engine reads.
///
/// `Config::default()` holds the published benchmark figures. A TOML file or
/// `UPLIFT_*` environment variables may override individual keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Industry email benchmarks. Display only.
    pub email_benchmarks: FunnelMetrics,
    /// Benchmark rates for the SMS channel.
    pub sms_benchmarks: FunnelMetrics,
    /// Relative improvements every plan gets, regardless of features.
    pub platform_improvements: FunnelMetrics,
    pub synergies: ChannelSynergies,
    pub feature_increments: FeatureIncrements,
    pub input_bounds: InputBounds,
    /// Upper limits for the projected funnel rates.
    pub ceilings: FunnelMetrics,
    pub assumptions: Assumptions,
}

/// Observed effects of running email and SMS together, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSynergies {
    pub reach_boost: Decimal,
    pub open_rate_boost: Decimal,
    pub click_rate_boost: Decimal,
    pub conversion_rate_boost: Decimal,
}

/// Additional relative improvements unlocked by each funnel feature.
///
/// The multi-channel feature has no entry here; it is modelled as a second
/// channel with a synergy multiplier instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureIncrements {
    pub ai_content: FunnelMetrics,
    pub automation: FunnelMetrics,
    pub segmentation: FunnelMetrics,
    pub ab_testing: FunnelMetrics,
}

/// An inclusive `[min, max]` range used for saturating clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: Decimal,
    pub max: Decimal,
}

impl Bound {
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Saturates `value` into the range. Never fails.
    pub fn clamp(&self, value: Decimal) -> Decimal {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Accepted ranges for the calculator inputs. Fields without a bound pass through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub email_list_size: Bound,
    pub monthly_revenue: Bound,
    pub average_order_value: Bound,
    pub emails_per_month: Bound,
    pub email_marketing_costs: Bound,
    pub open_rate: Bound,
    pub click_through_rate: Bound,
    pub conversion_rate: Bound,
    pub deliverability: Bound,
}

/// Fixed modelling assumptions, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Share of the email list that has opted in to SMS.
    pub sms_list_share: Decimal,
    /// SMS sends per email send. The SMS cadence is floored to whole sends.
    pub sms_cadence_ratio: Decimal,
    /// Share of new subscribers converting at full order value within the month.
    pub new_subscriber_conversion: Decimal,
}

// --- Default Implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            email_benchmarks: FunnelMetrics::new(dec!(25), dec!(4), dec!(15), dec!(95)),
            sms_benchmarks: FunnelMetrics::new(dec!(98), dec!(12), dec!(32), dec!(99)),
            platform_improvements: FunnelMetrics::new(dec!(3), dec!(8), dec!(10), dec!(2)),
            synergies: ChannelSynergies::default(),
            feature_increments: FeatureIncrements::default(),
            input_bounds: InputBounds::default(),
            ceilings: FunnelMetrics::new(dec!(60), dec!(15), dec!(40), dec!(99)),
            assumptions: Assumptions::default(),
        }
    }
}

impl Default for ChannelSynergies {
    fn default() -> Self {
        Self {
            reach_boost: dec!(25),
            open_rate_boost: dec!(15),
            click_rate_boost: dec!(35),
            conversion_rate_boost: dec!(40),
        }
    }
}

impl Default for FeatureIncrements {
    fn default() -> Self {
        Self {
            ai_content: FunnelMetrics::new(dec!(2), dec!(0), dec!(0), dec!(0)),
            automation: FunnelMetrics::new(dec!(0), dec!(0), dec!(5), dec!(0)),
            segmentation: FunnelMetrics::new(dec!(0), dec!(3), dec!(3), dec!(0)),
            ab_testing: FunnelMetrics::new(dec!(2), dec!(2), dec!(2), dec!(0)),
        }
    }
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            email_list_size: Bound::new(dec!(100), dec!(1000000)),
            monthly_revenue: Bound::new(dec!(1000), dec!(1000000)),
            average_order_value: Bound::new(dec!(10), dec!(1000)),
            emails_per_month: Bound::new(dec!(1), dec!(30)),
            email_marketing_costs: Bound::new(dec!(50), dec!(50000)),
            open_rate: Bound::new(dec!(10), dec!(80)),
            click_through_rate: Bound::new(dec!(0.5), dec!(10)),
            conversion_rate: Bound::new(dec!(0.5), dec!(8)),
            deliverability: Bound::new(dec!(70), dec!(98)),
        }
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            sms_list_share: dec!(0.30),
            sms_cadence_ratio: dec!(0.5),
            new_subscriber_conversion: dec!(0.20),
        }
    }
}

// --- Validation ---

impl Config {
    /// Checks that the tables describe a computable model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rates("email_benchmarks", &self.email_benchmarks)?;
        check_rates("sms_benchmarks", &self.sms_benchmarks)?;
        check_non_negative("platform_improvements", &self.platform_improvements)?;
        check_non_negative("feature_increments.ai_content", &self.feature_increments.ai_content)?;
        check_non_negative("feature_increments.automation", &self.feature_increments.automation)?;
        check_non_negative("feature_increments.segmentation", &self.feature_increments.segmentation)?;
        check_non_negative("feature_increments.ab_testing", &self.feature_increments.ab_testing)?;

        if self.synergies.conversion_rate_boost < Decimal::ZERO {
            return Err(ConfigError::invalid(
                "synergies",
                "conversion_rate_boost must not be negative",
            ));
        }

        for (name, bound) in self.input_bounds.named() {
            let table = format!("input_bounds.{name}");
            if bound.min < Decimal::ZERO {
                return Err(ConfigError::invalid(&table, "min must not be negative"));
            }
            if bound.min > bound.max {
                return Err(ConfigError::invalid(
                    &table,
                    format!("min ({}) is greater than max ({})", bound.min, bound.max),
                ));
            }
        }

        check_rates("ceilings", &self.ceilings)?;
        for (stage, ceiling) in stages(&self.ceilings) {
            if ceiling <= Decimal::ZERO {
                return Err(ConfigError::invalid(
                    "ceilings",
                    format!("{stage} must be greater than 0"),
                ));
            }
        }

        let shares = [
            ("sms_list_share", self.assumptions.sms_list_share),
            ("sms_cadence_ratio", self.assumptions.sms_cadence_ratio),
            ("new_subscriber_conversion", self.assumptions.new_subscriber_conversion),
        ];
        for (name, share) in shares {
            if share < Decimal::ZERO || share > Decimal::ONE {
                return Err(ConfigError::invalid(
                    "assumptions",
                    format!("{name} must be between 0 and 1, got {share}"),
                ));
            }
        }

        Ok(())
    }
}

impl InputBounds {
    fn named(&self) -> [(&'static str, Bound); 9] {
        [
            ("email_list_size", self.email_list_size),
            ("monthly_revenue", self.monthly_revenue),
            ("average_order_value", self.average_order_value),
            ("emails_per_month", self.emails_per_month),
            ("email_marketing_costs", self.email_marketing_costs),
            ("open_rate", self.open_rate),
            ("click_through_rate", self.click_through_rate),
            ("conversion_rate", self.conversion_rate),
            ("deliverability", self.deliverability),
        ]
    }
}

fn stages(metrics: &FunnelMetrics) -> [(&'static str, Decimal); 4] {
    [
        ("open_rate", metrics.open_rate),
        ("click_through_rate", metrics.click_through_rate),
        ("conversion_rate", metrics.conversion_rate),
        ("deliverability", metrics.deliverability),
    ]
}

fn check_rates(table: &str, metrics: &FunnelMetrics) -> Result<(), ConfigError> {
    for (stage, value) in stages(metrics) {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ConfigError::invalid(
                table,
                format!("{stage} must be a percentage between 0 and 100, got {value}"),
            ));
        }
    }
    Ok(())
}

fn check_non_negative(table: &str, metrics: &FunnelMetrics) -> Result<(), ConfigError> {
    for (stage, value) in stages(metrics) {
        if value < Decimal::ZERO {
            return Err(ConfigError::invalid(
                table,
                format!("{stage} must not be negative, got {value}"),
            ));
        }
    }
    Ok(())
}
