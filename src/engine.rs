//! Engine façade
//!
//! This module provides the public entry point for callers that hold a
//! storage collaborator. `CycleEngine` binds a configuration to the stage
//! functions, and `RecordSource` is the inbound interface the surrounding
//! application implements over its own persistence.

use crate::aggregator::annotate_day;
use crate::classifier::{classify, classify_with_ovulation};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::predictor::predict_future_cycles;
use crate::resolver::resolve;
use crate::types::{
    CycleRecord, DayAnnotation, EstimatedParameters, PersonId, PhaseDescriptor, PredictedCycle,
    ResolvedCycle,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Storage collaborator supplying cycle history.
///
/// The engine only reads through this interface; it never stores anything
/// back, and predictions in particular must not be written by implementors.
pub trait RecordSource {
    /// All historical records for one person, in any order.
    fn list_cycle_records(&self, person_id: &PersonId) -> Vec<CycleRecord>;

    /// Every person currently tracked, in display order.
    fn list_tracked_persons(&self) -> Vec<PersonId>;
}

/// Configured engine instance.
///
/// All methods are pure functions of their arguments plus the held
/// configuration; the engine keeps no state between calls.
#[derive(Debug, Clone, Default)]
pub struct CycleEngine {
    config: EngineConfig,
}

impl CycleEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom parameters.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Learn per-person parameters from a record set.
    pub fn estimated_parameters(
        &self,
        records: &[CycleRecord],
        historical_ovulation_days: &[i64],
    ) -> EstimatedParameters {
        EstimatedParameters::from_history(records, historical_ovulation_days, &self.config)
    }

    /// Classify a day within a cycle; ovulation day derived from the length.
    pub fn classify(
        &self,
        day_in_cycle: i64,
        cycle_length: i64,
        period_length: i64,
    ) -> Result<PhaseDescriptor, EngineError> {
        classify(day_in_cycle, cycle_length, period_length, &self.config)
    }

    /// Classify a day within a cycle around a learned ovulation day.
    pub fn classify_with_ovulation(
        &self,
        day_in_cycle: i64,
        cycle_length: i64,
        period_length: i64,
        ovulation_day: i64,
    ) -> Result<PhaseDescriptor, EngineError> {
        classify_with_ovulation(
            day_in_cycle,
            cycle_length,
            period_length,
            ovulation_day,
            &self.config,
        )
    }

    /// Find the historical cycle enclosing a calendar day.
    pub fn resolve<'a>(
        &self,
        day: NaiveDate,
        records: &'a [CycleRecord],
    ) -> Option<ResolvedCycle<'a>> {
        resolve(day, records, &self.config)
    }

    /// Project future cycle windows beyond the most recent cycle.
    pub fn predict_future_cycles(
        &self,
        last_cycle: &CycleRecord,
        estimated_length: i64,
        count: usize,
    ) -> Result<Vec<PredictedCycle>, EngineError> {
        predict_future_cycles(last_cycle, estimated_length, count, &self.config)
    }

    /// Annotate a calendar day from a pre-gathered record map.
    pub fn annotate_day(
        &self,
        day: NaiveDate,
        today: NaiveDate,
        tracked_persons: &[PersonId],
        all_records: &HashMap<PersonId, Vec<CycleRecord>>,
    ) -> Vec<DayAnnotation> {
        annotate_day(day, today, tracked_persons, all_records, &self.config)
    }

    /// Annotate a calendar day, gathering history from a storage collaborator.
    pub fn annotate_day_from(
        &self,
        day: NaiveDate,
        today: NaiveDate,
        source: &dyn RecordSource,
    ) -> Vec<DayAnnotation> {
        let tracked = source.list_tracked_persons();
        let all_records: HashMap<PersonId, Vec<CycleRecord>> = tracked
            .iter()
            .map(|person| (*person, source.list_cycle_records(person)))
            .collect();

        annotate_day(day, today, &tracked, &all_records, &self.config)
    }
}
