pub mod enums;
pub mod error;
pub mod inputs;
pub mod results;

// Re-export the core types to provide a clean public API.
pub use enums::Feature;
pub use error::CoreError;
pub use inputs::{CalculatorInputs, FeatureSet};
pub use results::{
    CalculatorResults, CurrentMetrics, FeatureImprovements, FunnelMetrics, RevenueBreakdown,
};
