//! Core types for the cycle engine
//!
//! This module defines the data that flows through each stage of the engine:
//! historical cycle records, the computed phase descriptors, estimated
//! per-person parameters, projected future cycles, and per-day calendar
//! annotations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies whose history a record belongs to.
///
/// The primary user is a sentinel distinct from named connections, and sorts
/// before them so calendar annotations have a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonId {
    /// The primary user of the application.
    Primary,
    /// A tracked connection, keyed by its own identifier.
    Connection(Uuid),
}

/// Observed flow intensity for a recorded period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowIntensity {
    Light,
    Medium,
    Heavy,
}

/// Self-reported mood attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Calm,
    Happy,
    Irritable,
    Low,
    Anxious,
}

/// Self-reported symptom attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Cramps,
    Headache,
    Fatigue,
    Bloating,
    BreastTenderness,
    Acne,
    BackPain,
    Nausea,
}

/// One historical cycle observation for one tracked person.
///
/// `period_start` is the only required date. A missing `period_end` means the
/// flow end was not recorded; a missing `cycle_end` means the cycle is still
/// open (no following period has started yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub id: Uuid,
    pub person_id: PersonId,
    /// Day menstrual flow began; defines day 1 of the cycle.
    pub period_start: NaiveDate,
    /// Last day of observed flow, if recorded.
    pub period_end: Option<NaiveDate>,
    /// Last day of the cycle (the day before the next cycle starts), if known.
    pub cycle_end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_intensity: Option<FlowIntensity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
}

impl CycleRecord {
    /// Create a record with a fresh id and no descriptive metadata.
    pub fn new(person_id: PersonId, period_start: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            person_id,
            period_start,
            period_end: None,
            cycle_end: None,
            flow_intensity: None,
            mood: None,
            symptoms: Vec::new(),
        }
    }

    /// Observed period length in days, when the flow end was recorded and is
    /// not inverted relative to the start.
    pub fn observed_period_length(&self) -> Option<i64> {
        self.period_end.and_then(|end| {
            let days = (end - self.period_start).num_days() + 1;
            (days > 0).then_some(days)
        })
    }

    /// Recorded cycle length in days, when the cycle is closed and the end is
    /// not inverted relative to the start.
    pub fn recorded_cycle_length(&self) -> Option<i64> {
        self.cycle_end.and_then(|end| {
            let days = (end - self.period_start).num_days() + 1;
            (days > 0).then_some(days)
        })
    }
}

/// Coarse physiological phase of a day within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Menstrual,
    Follicular,
    Fertile,
    Luteal,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menstrual => "menstrual",
            Phase::Follicular => "follicular",
            Phase::Fertile => "fertile",
            Phase::Luteal => "luteal",
        }
    }
}

/// Fine-grained sub-phase within a coarse phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubPhase {
    HeavyFlow,
    LightFlow,
    EarlyFollicular,
    LateFollicular,
    PreOvulation,
    Ovulation,
    PostOvulation,
    EarlyLuteal,
    MidLuteal,
    PreMenstrual,
}

impl SubPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubPhase::HeavyFlow => "heavy_flow",
            SubPhase::LightFlow => "light_flow",
            SubPhase::EarlyFollicular => "early_follicular",
            SubPhase::LateFollicular => "late_follicular",
            SubPhase::PreOvulation => "pre_ovulation",
            SubPhase::Ovulation => "ovulation",
            SubPhase::PostOvulation => "post_ovulation",
            SubPhase::EarlyLuteal => "early_luteal",
            SubPhase::MidLuteal => "mid_luteal",
            SubPhase::PreMenstrual => "pre_menstrual",
        }
    }
}

/// Classification of a single day within a cycle.
///
/// Computed fresh on every query and never persisted. `day_range` is the
/// band the day fell into, expressed as inclusive day-within-cycle bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDescriptor {
    pub phase: Phase,
    pub sub_phase: SubPhase,
    /// Inclusive day-within-cycle bounds of the matched band.
    pub day_range: (i64, i64),
    /// Short description of the dominant hormonal picture for the band.
    pub hormonal_profile: String,
    /// Ordered advisory strings for display alongside the phase.
    pub recommendations: Vec<String>,
}

/// Per-person parameters learned from history.
///
/// Recomputed whenever the record set changes; never mutated in place. The
/// sample counts record how much history backed each estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedParameters {
    /// Average start-to-start cycle length in days.
    pub average_cycle_length: i64,
    /// Expected ovulation day within the cycle.
    pub estimated_ovulation_day: i64,
    /// Valid consecutive-cycle gaps that fed the length average.
    pub cycle_samples: usize,
    /// Observed ovulation days that fed the ovulation estimate.
    pub ovulation_samples: usize,
}

impl EstimatedParameters {
    /// Load previously computed parameters from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize parameters to JSON for caller-side caching.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A projected future cycle window.
///
/// Predictions are synthetic: they are generated on demand from the most
/// recent recorded cycle and must never be written to the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedCycle {
    pub person_id: PersonId,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub cycle_end: NaiveDate,
    pub is_prediction: bool,
}

/// A historical cycle that encloses a queried calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCycle<'a> {
    pub record: &'a CycleRecord,
    /// 1-indexed offset of the queried day from the cycle start.
    pub day_in_cycle: i64,
}

/// One person's phase annotation for a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAnnotation {
    pub person_id: PersonId,
    pub phase: Phase,
    pub sub_phase: SubPhase,
    pub day_in_cycle: i64,
    /// True when the annotation came from a projected cycle rather than a
    /// historical record.
    pub predicted: bool,
}
