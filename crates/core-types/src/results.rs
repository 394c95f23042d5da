use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four stages of the email funnel, in percent.
///
/// Also used for the static benchmark tables, where the same four stages apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FunnelMetrics {
    pub open_rate: Decimal,
    pub click_through_rate: Decimal,
    pub conversion_rate: Decimal,
    pub deliverability: Decimal,
}

impl FunnelMetrics {
    pub fn new(
        open_rate: Decimal,
        click_through_rate: Decimal,
        conversion_rate: Decimal,
        deliverability: Decimal,
    ) -> Self {
        Self {
            open_rate,
            click_through_rate,
            conversion_rate,
            deliverability,
        }
    }

    /// The fraction of sent messages that become a sale:
    /// deliverability x open x click x conversion, each as a fraction.
    pub fn funnel_rate(&self) -> Decimal {
        let hundred = Decimal::ONE_HUNDRED;
        (self.deliverability / hundred)
            * (self.open_rate / hundred)
            * (self.click_through_rate / hundred)
            * (self.conversion_rate / hundred)
    }
}

/// Funnel metrics as entered, plus the conversions they produce today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentMetrics {
    pub open_rate: Decimal,
    pub click_through_rate: Decimal,
    pub conversion_rate: Decimal,
    pub deliverability: Decimal,
    pub conversions: Decimal,
}

/// Percent improvements applied to each funnel stage.
///
/// These are relative: an `open_rate_improvement` of 7 turns a 25% open rate into 26.75%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureImprovements {
    pub open_rate_improvement: Decimal,
    pub click_through_improvement: Decimal,
    pub conversion_rate_improvement: Decimal,
    pub deliverability_improvement: Decimal,
}

/// Where the projected revenue comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    /// Current revenue scaled by the email improvement factor.
    pub email_revenue: Decimal,
    /// Extra email revenue from the cross-channel synergy. Zero without SMS.
    pub synergy_uplift: Decimal,
    pub sms_revenue: Decimal,
    pub sms_conversions: Decimal,
    pub new_subscriber_revenue: Decimal,
}

/// The output of one calculator run.
///
/// Currency figures are whole units, percentages have one decimal place and
/// conversions are whole numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResults {
    // I. Revenue
    pub current_monthly_revenue: Decimal,
    pub projected_monthly_revenue: Decimal,
    pub revenue_increase: Decimal,
    pub annual_revenue_increase: Decimal,
    pub monthly_roi_percentage: Decimal,

    // II. Cost placeholders, always zero
    pub total_monthly_costs: Decimal,
    pub monthly_roi: Decimal,
    pub annual_roi: Decimal,
    pub cost_savings: Decimal,

    // III. Funnel
    pub conversions: Decimal,
    pub email_improvement_factor: Decimal,
    pub improvements: FunnelMetrics,
    pub current_metrics: CurrentMetrics,
    pub breakdown: RevenueBreakdown,
}

impl CalculatorResults {
    /// Creates a zeroed-out result.
    pub fn new() -> Self {
        Self {
            current_monthly_revenue: Decimal::ZERO,
            projected_monthly_revenue: Decimal::ZERO,
            revenue_increase: Decimal::ZERO,
            annual_revenue_increase: Decimal::ZERO,
            monthly_roi_percentage: Decimal::ZERO,
            total_monthly_costs: Decimal::ZERO,
            monthly_roi: Decimal::ZERO,
            annual_roi: Decimal::ZERO,
            cost_savings: Decimal::ZERO,
            conversions: Decimal::ZERO,
            email_improvement_factor: Decimal::ONE,
            improvements: FunnelMetrics::default(),
            current_metrics: CurrentMetrics::default(),
            breakdown: RevenueBreakdown::default(),
        }
    }
}

impl Default for CalculatorResults {
    fn default() -> Self {
        Self::new()
    }
}
