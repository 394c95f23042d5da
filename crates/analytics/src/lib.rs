//! # Uplift Analytics Engine
//!
//! This crate turns a set of email-marketing inputs and feature toggles into a
//! projected revenue uplift.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No I/O and no global state. The benchmark tables are handed
//!   to the engine when it is built.
//! - **Total calculation:** `RoiEngine::calculate_roi` never fails. Inputs are
//!   saturated into their accepted ranges rather than rejected.
//!
//! ## Public API
//!
//! - `RoiEngine`: clamps inputs, derives funnel improvements and projects revenue.
//! - `format_*`: the display strings for currency, percentages and multipliers.
//! - `AnalyticsError`: returned only when an engine is built from invalid tables.

pub mod engine;
pub mod error;
pub mod format;
pub mod round;

pub use engine::RoiEngine;
pub use error::AnalyticsError;
pub use format::{
    format_currency, format_percentage, format_roi_multiplier, DEFAULT_PERCENTAGE_DECIMALS,
};
pub use round::round_half_up;
