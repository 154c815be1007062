//! Telemetry module
//!
//! Structured logging and calculation metrics

mod logging;
mod metrics;

pub use logging::init_logging;
pub use metrics::{record_calculation, CALCULATIONS_TOTAL};

pub use crate::config::LogFormat;
use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems.
///
/// Metrics go through the `metrics` facade; installing an exporter is left to
/// the embedding application.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
