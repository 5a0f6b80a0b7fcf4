//! Configuration errors.
//!
//! Sub-crates define their own error enums and wrap [`ConfigError`] via
//! `From` where a configuration problem can surface through them.

use thiserror::Error;

/// A configuration value rejected by [`SimConfig::validate`][crate::SimConfig::validate].
///
/// Raised before round 0; fatal to the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("connection range must be > 0 (got {0})")]
    NonPositiveRange(f64),

    #[error("environment size must be > 0 (got {0})")]
    NonPositiveEnvSize(f64),

    #[error("arrival threshold must be > 0 (got {0})")]
    NonPositiveArrivalThreshold(f64),

    #[error("max speed must be >= 0 (got {0})")]
    NegativeSpeed(f64),

    #[error("brownian step must be > 0 (got {0})")]
    NonPositiveBrownianStep(f64),

    #[error("at least one station is required")]
    NoStations,

    #[error("churn ratio must lie in [0, 1] (got {0})")]
    ChurnRatioOutOfRange(f64),

    #[error("TTL must be > 0 when the TTL scenario is selected")]
    NonPositiveTtl,

    #[error("probability {name} must lie in [0, 1] (got {value})")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("Manhattan mobility needs at least 2 parallel streets (got {0})")]
    TooFewStreets(u32),

    #[error("Manhattan street spacing must be > 0 (got {0}); raise env_size or lower the street count")]
    NonPositiveStreetSpacing(f64),

    #[error("round cap must be > 0 when broadcasting is disabled")]
    ZeroRoundCap,
}
