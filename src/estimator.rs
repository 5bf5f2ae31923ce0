//! Parameter estimation
//!
//! This module learns per-person parameters from historical records:
//! - average cycle length from consecutive period start dates
//! - expected ovulation day, refined by prior observed ovulation days
//!
//! Estimates degrade gracefully: with too little history both fall back to
//! the configured population defaults.

use crate::config::EngineConfig;
use crate::types::{CycleRecord, EstimatedParameters};
use chrono::NaiveDate;

/// Average start-to-start cycle length across a person's history.
///
/// Consecutive-pair gaps outside `(0, max_cycle_gap_days]` are treated as
/// tracking lapses or entry errors and excluded. Fewer than two records, or
/// no surviving gaps, yields the configured default.
pub fn estimate_cycle_length(records: &[CycleRecord], config: &EngineConfig) -> i64 {
    let gaps = valid_cycle_gaps(records, config);
    if gaps.is_empty() {
        return config.default_cycle_length;
    }
    mean_rounded(&gaps)
}

/// Expected ovulation day within a cycle of the given length.
///
/// With enough recorded ovulation observations the estimate is their rounded
/// average, converging toward the person's own pattern. Otherwise it falls
/// back to the luteal-phase approximation (ovulation `luteal_phase_days`
/// before the next period), floored at `min_ovulation_day`.
pub fn estimate_ovulation_day(
    cycle_length: i64,
    historical_ovulation_days: &[i64],
    config: &EngineConfig,
) -> i64 {
    if !historical_ovulation_days.is_empty()
        && historical_ovulation_days.len() >= config.ovulation_history_min_samples
    {
        return mean_rounded(historical_ovulation_days);
    }
    config
        .min_ovulation_day
        .max(cycle_length - config.luteal_phase_days)
}

impl EstimatedParameters {
    /// Derive the full parameter set for one person's history.
    pub fn from_history(
        records: &[CycleRecord],
        historical_ovulation_days: &[i64],
        config: &EngineConfig,
    ) -> Self {
        let cycle_samples = valid_cycle_gaps(records, config).len();
        let average_cycle_length = estimate_cycle_length(records, config);
        let estimated_ovulation_day =
            estimate_ovulation_day(average_cycle_length, historical_ovulation_days, config);
        let ovulation_samples = if !historical_ovulation_days.is_empty()
            && historical_ovulation_days.len() >= config.ovulation_history_min_samples
        {
            historical_ovulation_days.len()
        } else {
            0
        };

        Self {
            average_cycle_length,
            estimated_ovulation_day,
            cycle_samples,
            ovulation_samples,
        }
    }
}

/// Start-to-start gaps between chronologically consecutive records, keeping
/// only plausible cycle lengths.
fn valid_cycle_gaps(records: &[CycleRecord], config: &EngineConfig) -> Vec<i64> {
    let mut starts: Vec<NaiveDate> = records.iter().map(|r| r.period_start).collect();
    starts.sort_unstable();

    starts
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .filter(|&gap| gap > 0 && gap <= config.max_cycle_gap_days)
        .collect()
}

fn mean_rounded(values: &[i64]) -> i64 {
    let sum: i64 = values.iter().sum();
    (sum as f64 / values.len() as f64).round() as i64
}
