//! Forward prediction
//!
//! This module projects future cycle windows from the most recent recorded
//! cycle. Each prediction chains off the previous one's end rather than the
//! original anchor, so spacing stays correct over long horizons. Predictions
//! are synthetic and never written back to storage.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::resolver::effective_end;
use crate::types::{CycleRecord, PredictedCycle};
use chrono::Duration;

/// Project `count` future cycle windows beyond `last_cycle`.
///
/// The anchor is the last cycle's recorded end, or its start plus the
/// estimated length when the cycle is still open. The projected period
/// length is the last recorded period's observed duration, defaulting when
/// the flow end was never logged.
pub fn predict_future_cycles(
    last_cycle: &CycleRecord,
    estimated_length: i64,
    count: usize,
    config: &EngineConfig,
) -> Result<Vec<PredictedCycle>, EngineError> {
    if count == 0 {
        return Err(EngineError::InvalidPredictionCount);
    }
    if estimated_length <= 0 {
        return Err(EngineError::InvalidCycleLength(estimated_length));
    }

    let period_length = last_cycle
        .observed_period_length()
        .unwrap_or(config.default_period_length);

    let mut anchor = effective_end(last_cycle, estimated_length);
    let mut predictions = Vec::with_capacity(count);

    for _ in 0..count {
        let period_start = anchor + Duration::days(1);
        let cycle_end = period_start + Duration::days(estimated_length - 1);
        // Period can never outrun its own cycle window
        let period_end = (period_start + Duration::days(period_length - 1)).min(cycle_end);

        predictions.push(PredictedCycle {
            person_id: last_cycle.person_id,
            period_start,
            period_end,
            cycle_end,
            is_prediction: true,
        });

        anchor = cycle_end;
    }

    Ok(predictions)
}
