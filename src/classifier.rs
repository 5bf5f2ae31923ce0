//! Phase classification
//!
//! This module maps a day within a cycle to its physiological phase and
//! sub-phase. Classification is a piecewise function over the integer range
//! `[1, cycle_length]`, ordered so that boundary ties always resolve to the
//! earlier band. Degenerate inputs (very short cycles, long periods) collapse
//! bands instead of erroring.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::estimator::estimate_ovulation_day;
use crate::types::{Phase, PhaseDescriptor, SubPhase};

/// Classify a day within a cycle, estimating the ovulation day from the
/// cycle length alone.
pub fn classify(
    day_in_cycle: i64,
    cycle_length: i64,
    period_length: i64,
    config: &EngineConfig,
) -> Result<PhaseDescriptor, EngineError> {
    let ovulation_day = estimate_ovulation_day(cycle_length, &[], config);
    classify_with_ovulation(
        day_in_cycle,
        cycle_length,
        period_length,
        ovulation_day,
        config,
    )
}

/// Classify a day within a cycle using a caller-supplied ovulation day,
/// typically one learned from the person's observed history.
///
/// A non-positive `cycle_length` is a contract violation. A non-positive
/// `period_length` is user-data quality and falls back to the configured
/// default. Days past `cycle_length` (an over-running recorded cycle)
/// classify as pre-menstrual.
pub fn classify_with_ovulation(
    day_in_cycle: i64,
    cycle_length: i64,
    period_length: i64,
    ovulation_day: i64,
    config: &EngineConfig,
) -> Result<PhaseDescriptor, EngineError> {
    if cycle_length <= 0 {
        return Err(EngineError::InvalidCycleLength(cycle_length));
    }
    let period = if period_length > 0 {
        period_length
    } else {
        config.default_period_length
    };
    let day = day_in_cycle.max(1);
    let ovulation = ovulation_day;
    let mid_luteal = ovulation + (cycle_length - ovulation) / 2;

    let descriptor = if day <= 2 {
        band(Phase::Menstrual, SubPhase::HeavyFlow, 1, 2)
    } else if day <= period {
        band(Phase::Menstrual, SubPhase::LightFlow, 3, period)
    } else if day <= period + 3 {
        band(
            Phase::Follicular,
            SubPhase::EarlyFollicular,
            period + 1,
            period + 3,
        )
    } else if day <= ovulation - 3 {
        band(
            Phase::Follicular,
            SubPhase::LateFollicular,
            period + 4,
            ovulation - 3,
        )
    } else if day <= ovulation - 1 {
        band(
            Phase::Fertile,
            SubPhase::PreOvulation,
            ovulation - 2,
            ovulation - 1,
        )
    } else if day == ovulation {
        band(Phase::Fertile, SubPhase::Ovulation, ovulation, ovulation)
    } else if day <= ovulation + 2 {
        band(
            Phase::Fertile,
            SubPhase::PostOvulation,
            ovulation + 1,
            ovulation + 2,
        )
    } else if day <= mid_luteal {
        band(
            Phase::Luteal,
            SubPhase::EarlyLuteal,
            ovulation + 3,
            mid_luteal,
        )
    } else if day <= cycle_length - 3 {
        band(
            Phase::Luteal,
            SubPhase::MidLuteal,
            mid_luteal + 1,
            cycle_length - 3,
        )
    } else {
        band(
            Phase::Luteal,
            SubPhase::PreMenstrual,
            cycle_length - 2,
            cycle_length,
        )
    };

    Ok(descriptor)
}

/// Build the descriptor for a matched band, clamping inverted ranges that
/// appear when bands collapse on degenerate inputs.
fn band(phase: Phase, sub_phase: SubPhase, start: i64, end: i64) -> PhaseDescriptor {
    let start = start.max(1);
    let end = end.max(start);
    let (profile, recommendations) = band_text(sub_phase);

    PhaseDescriptor {
        phase,
        sub_phase,
        day_range: (start, end),
        hormonal_profile: profile.to_string(),
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
    }
}

/// Fixed presentation text per band.
fn band_text(sub_phase: SubPhase) -> (&'static str, &'static [&'static str]) {
    match sub_phase {
        SubPhase::HeavyFlow => (
            "Estrogen and progesterone at their lowest while prostaglandins peak",
            &[
                "Prioritize rest and warmth",
                "Stay hydrated and favor iron-rich meals",
                "Gentle stretching can ease cramps",
            ],
        ),
        SubPhase::LightFlow => (
            "Hormone levels still low as flow tapers off",
            &[
                "Light movement helps lift energy",
                "Keep up hydration",
            ],
        ),
        SubPhase::EarlyFollicular => (
            "Estrogen beginning to rise",
            &[
                "Energy starts returning",
                "A good window for planning and fresh starts",
            ],
        ),
        SubPhase::LateFollicular => (
            "Estrogen climbing toward its peak",
            &[
                "Energy and focus trend high",
                "Schedule demanding work or training now",
            ],
        ),
        SubPhase::PreOvulation => (
            "LH surge building on near-peak estrogen",
            &[
                "High-fertility window opens",
                "Sociability and drive tend to peak",
            ],
        ),
        SubPhase::Ovulation => (
            "LH surge triggers the release of an egg",
            &[
                "Most fertile day of the cycle",
                "Mild one-sided cramping can be normal",
            ],
        ),
        SubPhase::PostOvulation => (
            "Progesterone beginning to rise",
            &[
                "Fertility window closing",
                "Energy may start to dip",
            ],
        ),
        SubPhase::EarlyLuteal => (
            "Progesterone rising with a small estrogen rebound",
            &[
                "Favor steady-paced work over sprints",
                "Complex carbs help keep mood level",
            ],
        ),
        SubPhase::MidLuteal => (
            "Progesterone at its peak",
            &[
                "Premenstrual symptoms may begin",
                "Prioritize sleep and lighter commitments",
            ],
        ),
        SubPhase::PreMenstrual => (
            "Estrogen and progesterone falling sharply",
            &[
                "Mood may dip; keep plans gentle",
                "Less caffeine and salt can ease symptoms",
                "Period likely within a few days",
            ],
        ),
    }
}
