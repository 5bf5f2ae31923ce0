//! Error types for the cycle engine

use thiserror::Error;

/// Contract violations surfaced by the engine.
///
/// Data-quality problems in user-entered records (overlapping cycles, missing
/// or inverted end dates, implausible gaps) are never errors; they are
/// tolerated by clamping or defaulting. The variants here indicate a caller
/// bug and fail loudly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cycle length must be positive, got {0}")]
    InvalidCycleLength(i64),

    #[error("prediction count must be positive")]
    InvalidPredictionCount,
}
