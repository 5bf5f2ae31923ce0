//! Engine configuration
//!
//! All tunable constants of the engine live here as named parameters so that
//! callers can override them per tracked person or per deployment instead of
//! relying on magic numbers buried in the classification logic.

use serde::{Deserialize, Serialize};

/// Default cycle length in days, used until enough history exists to estimate one.
pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 28;

/// Default period length in days, assumed when a record has no observed end of flow.
pub const DEFAULT_PERIOD_LENGTH_DAYS: i64 = 5;

/// Floor for the estimated ovulation day, guarding very short cycles.
pub const MIN_OVULATION_DAY: i64 = 12;

/// Days between ovulation and the next period start (the luteal phase approximation).
pub const LUTEAL_PHASE_DAYS: i64 = 13;

/// Number of recorded ovulation observations required before the estimator
/// switches from the population fallback to the personal average.
pub const OVULATION_HISTORY_MIN_SAMPLES: usize = 3;

/// Largest start-to-start gap accepted as a real cycle length. Longer gaps are
/// treated as tracking lapses and excluded from the average.
pub const MAX_CYCLE_GAP_DAYS: i64 = 45;

/// Tunable parameters shared by every stage of the engine.
///
/// `Default` wires in the standard clinical approximations; individual fields
/// can be overridden for callers that want different behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cycle length assumed when history is insufficient (days).
    pub default_cycle_length: i64,
    /// Period length assumed when flow end was not recorded (days).
    pub default_period_length: i64,
    /// Lowest day-within-cycle the ovulation estimate may take.
    pub min_ovulation_day: i64,
    /// Ovulation-to-next-period offset used by the fallback estimate (days).
    pub luteal_phase_days: i64,
    /// Observed-ovulation sample count that enables the personal average.
    pub ovulation_history_min_samples: usize,
    /// Largest inter-cycle gap counted as a valid cycle length (days).
    pub max_cycle_gap_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_cycle_length: DEFAULT_CYCLE_LENGTH_DAYS,
            default_period_length: DEFAULT_PERIOD_LENGTH_DAYS,
            min_ovulation_day: MIN_OVULATION_DAY,
            luteal_phase_days: LUTEAL_PHASE_DAYS,
            ovulation_history_min_samples: OVULATION_HISTORY_MIN_SAMPLES,
            max_cycle_gap_days: MAX_CYCLE_GAP_DAYS,
        }
    }
}
