//! Calculation metrics

use crate::error::CalcError;
use crate::types::Instrument;

/// Counter of calculator invocations, labelled by instrument and outcome
pub const CALCULATIONS_TOTAL: &str = "risk_engine_calculations_total";

/// Count one calculation and log its outcome
pub fn record_calculation<T>(instrument: Instrument, result: &Result<T, CalcError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(err) => err.kind(),
    };

    metrics::counter!(
        CALCULATIONS_TOTAL,
        "instrument" => instrument.as_str(),
        "outcome" => outcome
    )
    .increment(1);

    match result {
        Ok(_) => tracing::debug!(instrument = instrument.as_str(), "calculation succeeded"),
        Err(err) => tracing::debug!(
            instrument = instrument.as_str(),
            outcome,
            error = %err,
            "calculation rejected"
        ),
    }
}
