use crate::error::AnalyticsError;
use crate::round::round_half_up;
use configuration::settings::Config;
use configuration::ChannelSynergies;
use core_types::{
    CalculatorInputs, CalculatorResults, CurrentMetrics, FeatureImprovements, FunnelMetrics,
    RevenueBreakdown,
};
use rust_decimal::Decimal;

/// A stateless calculator that projects the revenue uplift of adopting the platform.
///
/// The engine owns its benchmark tables and nothing else, so the same inputs always
/// produce the same results.
#[derive(Debug, Clone, Default)]
pub struct RoiEngine {
    tables: Config,
}

/// Conversions and revenue produced by the SMS channel in one month.
struct SmsProjection {
    conversions: Decimal,
    revenue: Decimal,
}

impl RoiEngine {
    /// Creates an engine over the given tables, rejecting tables that fail validation.
    pub fn new(tables: Config) -> Result<Self, AnalyticsError> {
        tables.validate()?;
        Ok(Self { tables })
    }

    pub fn tables(&self) -> &Config {
        &self.tables
    }

    pub fn email_benchmarks(&self) -> &FunnelMetrics {
        &self.tables.email_benchmarks
    }

    pub fn sms_benchmarks(&self) -> &FunnelMetrics {
        &self.tables.sms_benchmarks
    }

    pub fn platform_improvements(&self) -> &FunnelMetrics {
        &self.tables.platform_improvements
    }

    pub fn synergies(&self) -> &ChannelSynergies {
        &self.tables.synergies
    }

    /// Saturates every bounded field into its accepted range.
    ///
    /// Out-of-range values are never rejected. Fields without a bound are copied unchanged.
    pub fn validate_inputs(&self, inputs: &CalculatorInputs) -> CalculatorInputs {
        let bounds = &self.tables.input_bounds;
        CalculatorInputs {
            email_list_size: bounds.email_list_size.clamp(inputs.email_list_size),
            monthly_revenue: bounds.monthly_revenue.clamp(inputs.monthly_revenue),
            average_order_value: bounds.average_order_value.clamp(inputs.average_order_value),
            emails_per_month: bounds.emails_per_month.clamp(inputs.emails_per_month),
            email_marketing_costs: bounds.email_marketing_costs.clamp(inputs.email_marketing_costs),
            open_rate: bounds.open_rate.clamp(inputs.open_rate),
            click_through_rate: bounds.click_through_rate.clamp(inputs.click_through_rate),
            conversion_rate: bounds.conversion_rate.clamp(inputs.conversion_rate),
            deliverability: bounds.deliverability.clamp(inputs.deliverability),
            ..inputs.clone()
        }
    }

    /// Relative improvement, in percent, for each funnel stage.
    ///
    /// Every plan starts from the platform baseline; each enabled funnel feature adds
    /// its own increments on top. Multi-channel does not appear here.
    pub fn calculate_feature_improvements(&self, inputs: &CalculatorInputs) -> FeatureImprovements {
        let increments = &self.tables.feature_increments;
        let features = &inputs.features;

        let mut total = self.tables.platform_improvements;
        let enabled = [
            (features.ai_content, &increments.ai_content),
            (features.automation, &increments.automation),
            (features.segmentation, &increments.segmentation),
            (features.ab_testing, &increments.ab_testing),
        ];
        for (_, increment) in enabled.into_iter().filter(|(on, _)| *on) {
            total.open_rate += increment.open_rate;
            total.click_through_rate += increment.click_through_rate;
            total.conversion_rate += increment.conversion_rate;
            total.deliverability += increment.deliverability;
        }

        FeatureImprovements {
            open_rate_improvement: total.open_rate,
            click_through_improvement: total.click_through_rate,
            conversion_rate_improvement: total.conversion_rate,
            deliverability_improvement: total.deliverability,
        }
    }

    /// The main entry point: projects monthly revenue with the selected features.
    ///
    /// Total over its input domain. Inputs are clamped first; nothing here fails.
    pub fn calculate_roi(&self, inputs: &CalculatorInputs) -> CalculatorResults {
        let inputs = self.validate_inputs(inputs);
        let current_monthly_revenue = inputs.monthly_revenue;

        // --- Current email funnel ---
        let current = FunnelMetrics::new(
            inputs.open_rate,
            inputs.click_through_rate,
            inputs.conversion_rate,
            inputs.deliverability,
        );
        let current_funnel_rate = current.funnel_rate();
        let email_conversions =
            inputs.email_list_size * inputs.emails_per_month * current_funnel_rate;

        // --- Improved email funnel ---
        let improvements = self.calculate_feature_improvements(&inputs);
        let projected = self.project_funnel(&current, &improvements);
        let factor = improvement_factor(current_funnel_rate, projected.funnel_rate());

        tracing::debug!(
            current_funnel_rate = %current_funnel_rate,
            projected_funnel_rate = %projected.funnel_rate(),
            factor = %factor,
            "Projected email funnel."
        );

        let email_revenue = current_monthly_revenue * factor;
        let projected_email_conversions = email_conversions * factor;

        let mut projected_monthly_revenue = email_revenue;
        let mut total_conversions = projected_email_conversions;
        let mut breakdown = RevenueBreakdown {
            email_revenue: round_half_up(email_revenue, 0),
            ..RevenueBreakdown::default()
        };

        // --- Second channel ---
        if inputs.features.multi_channel {
            let sms = self.project_sms_channel(&inputs);
            let synergy =
                Decimal::ONE + self.tables.synergies.conversion_rate_boost / Decimal::ONE_HUNDRED;
            let boosted_email_revenue = email_revenue * synergy;

            projected_monthly_revenue = boosted_email_revenue + sms.revenue;
            total_conversions = projected_email_conversions * synergy + sms.conversions;

            breakdown.synergy_uplift = round_half_up(boosted_email_revenue - email_revenue, 0);
            breakdown.sms_revenue = round_half_up(sms.revenue, 0);
            breakdown.sms_conversions = round_half_up(sms.conversions, 0);
        }

        // --- New subscribers ---
        let new_subscriber_revenue = inputs.new_subscribers_per_month.saturating_mul(
            inputs.average_order_value * self.tables.assumptions.new_subscriber_conversion,
        );
        projected_monthly_revenue = projected_monthly_revenue.saturating_add(new_subscriber_revenue);
        breakdown.new_subscriber_revenue = round_half_up(new_subscriber_revenue, 0);

        // --- Uplift ---
        let revenue_increase = projected_monthly_revenue.saturating_sub(current_monthly_revenue);
        let roi_percentage = revenue_increase
            .checked_div(current_monthly_revenue)
            .map(|ratio| round_half_up(ratio.saturating_mul(Decimal::ONE_HUNDRED), 0))
            .unwrap_or(Decimal::ZERO);
        let revenue_increase = round_half_up(revenue_increase, 0);

        CalculatorResults {
            current_monthly_revenue: round_half_up(current_monthly_revenue, 0),
            projected_monthly_revenue: round_half_up(projected_monthly_revenue, 0),
            revenue_increase,
            annual_revenue_increase: revenue_increase.saturating_mul(Decimal::from(12)),
            // A lower projection is shown as no uplift, never as a loss.
            monthly_roi_percentage: roi_percentage.max(Decimal::ZERO),
            total_monthly_costs: Decimal::ZERO,
            monthly_roi: Decimal::ZERO,
            annual_roi: Decimal::ZERO,
            cost_savings: Decimal::ZERO,
            conversions: round_half_up(total_conversions, 0),
            email_improvement_factor: round_half_up(factor, 6),
            improvements: FunnelMetrics::new(
                round_half_up(projected.open_rate, 1),
                round_half_up(projected.click_through_rate, 1),
                round_half_up(projected.conversion_rate, 1),
                round_half_up(projected.deliverability, 1),
            ),
            current_metrics: CurrentMetrics {
                open_rate: current.open_rate,
                click_through_rate: current.click_through_rate,
                conversion_rate: current.conversion_rate,
                deliverability: current.deliverability,
                conversions: round_half_up(email_conversions, 0),
            },
            breakdown,
        }
    }

    /// Applies each relative improvement to its stage and caps the result at the stage ceiling.
    fn project_funnel(
        &self,
        current: &FunnelMetrics,
        improvements: &FeatureImprovements,
    ) -> FunnelMetrics {
        let ceilings = &self.tables.ceilings;
        let improve = |rate: Decimal, pct: Decimal, ceiling: Decimal| {
            (rate * (Decimal::ONE + pct / Decimal::ONE_HUNDRED)).min(ceiling)
        };

        FunnelMetrics::new(
            improve(
                current.open_rate,
                improvements.open_rate_improvement,
                ceilings.open_rate,
            ),
            improve(
                current.click_through_rate,
                improvements.click_through_improvement,
                ceilings.click_through_rate,
            ),
            improve(
                current.conversion_rate,
                improvements.conversion_rate_improvement,
                ceilings.conversion_rate,
            ),
            improve(
                current.deliverability,
                improvements.deliverability_improvement,
                ceilings.deliverability,
            ),
        )
    }

    /// Models SMS reaching a share of the email list at a reduced, whole-number cadence.
    fn project_sms_channel(&self, inputs: &CalculatorInputs) -> SmsProjection {
        let assumptions = &self.tables.assumptions;
        let sms_list_size = inputs.email_list_size * assumptions.sms_list_share;
        let sms_per_month = (inputs.emails_per_month * assumptions.sms_cadence_ratio).floor();

        let conversions = sms_list_size * sms_per_month * self.tables.sms_benchmarks.funnel_rate();
        SmsProjection {
            conversions,
            revenue: conversions * inputs.average_order_value,
        }
    }
}

/// Ratio of the projected funnel rate to the current one.
///
/// A zero current rate has no meaningful ratio; the factor then stays at 1 so
/// revenue is carried over unchanged.
fn improvement_factor(current_funnel_rate: Decimal, projected_funnel_rate: Decimal) -> Decimal {
    match projected_funnel_rate.checked_div(current_funnel_rate) {
        Some(factor) => factor,
        None => {
            tracing::warn!(
                current_funnel_rate = %current_funnel_rate,
                "Current funnel rate is zero; using an improvement factor of 1."
            );
            Decimal::ONE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::Bound;
    use core_types::{Feature, FeatureSet};
    use rust_decimal_macros::dec;

    fn default_inputs(features: FeatureSet) -> CalculatorInputs {
        CalculatorInputs::default().with_features(features)
    }

    #[test]
    fn validate_inputs_saturates_out_of_range_fields() {
        let engine = RoiEngine::default();
        let inputs = CalculatorInputs {
            emails_per_month: dec!(10000),
            open_rate: dec!(95),
            click_through_rate: dec!(0.1),
            deliverability: dec!(20),
            monthly_revenue: dec!(-5),
            ..CalculatorInputs::default()
        };

        let clamped = engine.validate_inputs(&inputs);
        assert_eq!(clamped.emails_per_month, dec!(30));
        assert_eq!(clamped.open_rate, dec!(80));
        assert_eq!(clamped.click_through_rate, dec!(0.5));
        assert_eq!(clamped.deliverability, dec!(70));
        assert_eq!(clamped.monthly_revenue, dec!(1000));
    }

    #[test]
    fn validate_inputs_passes_unbounded_fields_through() {
        let engine = RoiEngine::default();
        let inputs = CalculatorInputs {
            new_subscribers_per_month: dec!(-250),
            staff_hours: dec!(9999),
            hourly_rate: dec!(0),
            ..CalculatorInputs::default()
        };

        let clamped = engine.validate_inputs(&inputs);
        assert_eq!(clamped.new_subscribers_per_month, dec!(-250));
        assert_eq!(clamped.staff_hours, dec!(9999));
        assert_eq!(clamped.hourly_rate, dec!(0));
        assert_eq!(clamped.open_rate, dec!(25));
    }

    #[test]
    fn baseline_improvements_apply_without_features() {
        let engine = RoiEngine::default();
        let improvements = engine.calculate_feature_improvements(&default_inputs(FeatureSet::none()));
        assert_eq!(improvements.open_rate_improvement, dec!(3));
        assert_eq!(improvements.click_through_improvement, dec!(8));
        assert_eq!(improvements.conversion_rate_improvement, dec!(10));
        assert_eq!(improvements.deliverability_improvement, dec!(2));
    }

    #[test]
    fn feature_increments_add_up() {
        let engine = RoiEngine::default();
        let improvements = engine.calculate_feature_improvements(&default_inputs(FeatureSet::all()));
        assert_eq!(improvements.open_rate_improvement, dec!(7));
        assert_eq!(improvements.click_through_improvement, dec!(13));
        assert_eq!(improvements.conversion_rate_improvement, dec!(20));
        assert_eq!(improvements.deliverability_improvement, dec!(2));
    }

    #[test]
    fn multi_channel_does_not_change_funnel_improvements() {
        let engine = RoiEngine::default();
        let with_sms = FeatureSet::none().with(Feature::MultiChannel, true);
        assert_eq!(
            engine.calculate_feature_improvements(&default_inputs(with_sms)),
            engine.calculate_feature_improvements(&default_inputs(FeatureSet::none()))
        );
    }

    #[test]
    fn default_inputs_without_features() {
        let engine = RoiEngine::default();
        let results = engine.calculate_roi(&default_inputs(FeatureSet::none()));

        assert_eq!(results.email_improvement_factor, dec!(1.248113));
        assert_eq!(results.current_monthly_revenue, dec!(100000));
        assert_eq!(results.projected_monthly_revenue, dec!(139811));
        assert_eq!(results.revenue_increase, dec!(39811));
        assert_eq!(results.annual_revenue_increase, dec!(477732));
        assert_eq!(results.monthly_roi_percentage, dec!(40));
        assert_eq!(results.conversions, dec!(2));
        assert_eq!(results.current_metrics.conversions, dec!(2));
        assert_eq!(results.improvements.open_rate, dec!(25.8));
        assert_eq!(results.improvements.click_through_rate, dec!(2.2));
        assert_eq!(results.improvements.conversion_rate, dec!(1.7));
        assert_eq!(results.improvements.deliverability, dec!(81.6));
        assert_eq!(results.breakdown.new_subscriber_revenue, dec!(15000));
        assert_eq!(results.breakdown.sms_revenue, dec!(0));
    }

    #[test]
    fn multi_channel_adds_sms_and_synergy() {
        let engine = RoiEngine::default();
        let features = FeatureSet::none().with(Feature::MultiChannel, true);
        let results = engine.calculate_roi(&default_inputs(features));

        assert_eq!(results.projected_monthly_revenue, dec!(214883));
        assert_eq!(results.revenue_increase, dec!(114883));
        assert_eq!(results.monthly_roi_percentage, dec!(115));
        assert_eq!(results.conversions, dec!(171));
        assert_eq!(results.breakdown.sms_revenue, dec!(25148));
        assert_eq!(results.breakdown.sms_conversions, dec!(168));
        assert_eq!(results.breakdown.synergy_uplift, dec!(49925));
    }

    #[test]
    fn all_features_enabled() {
        let engine = RoiEngine::default();
        let results = engine.calculate_roi(&default_inputs(FeatureSet::all()));

        assert_eq!(results.improvements.open_rate, dec!(26.8));
        assert_eq!(results.improvements.click_through_rate, dec!(2.3));
        assert_eq!(results.improvements.conversion_rate, dec!(1.8));
        assert_eq!(results.projected_monthly_revenue, dec!(247339));
        assert_eq!(results.monthly_roi_percentage, dec!(147));
    }

    #[test]
    fn cost_placeholders_are_always_zero() {
        let engine = RoiEngine::default();
        let results = engine.calculate_roi(&default_inputs(FeatureSet::all()));
        assert_eq!(results.total_monthly_costs, Decimal::ZERO);
        assert_eq!(results.monthly_roi, Decimal::ZERO);
        assert_eq!(results.annual_roi, Decimal::ZERO);
        assert_eq!(results.cost_savings, Decimal::ZERO);
    }

    #[test]
    fn projected_rates_stop_at_ceilings() {
        let engine = RoiEngine::default();
        let inputs = CalculatorInputs {
            open_rate: dec!(80),
            deliverability: dec!(98),
            ..default_inputs(FeatureSet::all())
        };

        let results = engine.calculate_roi(&inputs);
        assert_eq!(results.improvements.open_rate, dec!(60));
        assert_eq!(results.improvements.deliverability, dec!(99));
    }

    #[test]
    fn negative_uplift_reports_zero_roi() {
        let engine = RoiEngine::default();
        let inputs = CalculatorInputs {
            new_subscribers_per_month: dec!(-1000),
            ..CalculatorInputs::default()
        };

        let results = engine.calculate_roi(&inputs);
        assert_eq!(results.projected_monthly_revenue, dec!(94811));
        assert_eq!(results.revenue_increase, dec!(-5189));
        assert_eq!(results.monthly_roi_percentage, Decimal::ZERO);
    }

    #[test]
    fn zero_current_funnel_keeps_revenue_flat() {
        let mut tables = Config::default();
        tables.input_bounds.conversion_rate = Bound::new(dec!(0), dec!(8));
        let engine = RoiEngine::new(tables).unwrap();

        let inputs = CalculatorInputs {
            conversion_rate: dec!(0),
            new_subscribers_per_month: dec!(0),
            ..CalculatorInputs::default()
        };

        let results = engine.calculate_roi(&inputs);
        assert_eq!(results.email_improvement_factor, Decimal::ONE);
        assert_eq!(results.projected_monthly_revenue, dec!(100000));
        assert_eq!(results.monthly_roi_percentage, Decimal::ZERO);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let mut tables = Config::default();
        tables.ceilings.open_rate = dec!(0);
        assert!(matches!(
            RoiEngine::new(tables),
            Err(AnalyticsError::InvalidTables(_))
        ));
    }
}
