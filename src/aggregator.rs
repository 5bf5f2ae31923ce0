//! Calendar day aggregation
//!
//! This module merges actual and predicted cycle hits across every tracked
//! person into one annotation list for a calendar day. Output order follows
//! the supplied person order, so rendering is deterministic. `today` is an
//! explicit argument; the engine never reads a clock of its own.

use crate::classifier::classify;
use crate::config::EngineConfig;
use crate::estimator::estimate_cycle_length;
use crate::predictor::predict_future_cycles;
use crate::resolver::{effective_end, resolve};
use crate::types::{CycleRecord, DayAnnotation, PersonId};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Annotate one calendar day across a set of tracked people.
///
/// Each person contributes at most one annotation: their enclosing historical
/// cycle when one exists, otherwise (for today or later) a projected cycle
/// whose period window covers the day. People with no records contribute
/// nothing.
pub fn annotate_day(
    day: NaiveDate,
    today: NaiveDate,
    tracked_persons: &[PersonId],
    all_records: &HashMap<PersonId, Vec<CycleRecord>>,
    config: &EngineConfig,
) -> Vec<DayAnnotation> {
    let mut annotations = Vec::new();

    for person_id in tracked_persons {
        let Some(records) = all_records.get(person_id) else {
            continue;
        };
        if records.is_empty() {
            continue;
        }

        let estimated_length = estimate_cycle_length(records, config);

        if let Some(resolved) = resolve(day, records, config) {
            // A closed cycle classifies at its recorded length; an open one
            // at the estimated length.
            let cycle_length = resolved
                .record
                .recorded_cycle_length()
                .unwrap_or(estimated_length);
            let period_length = resolved
                .record
                .observed_period_length()
                .unwrap_or(config.default_period_length);

            if let Ok(descriptor) =
                classify(resolved.day_in_cycle, cycle_length, period_length, config)
            {
                annotations.push(DayAnnotation {
                    person_id: *person_id,
                    phase: descriptor.phase,
                    sub_phase: descriptor.sub_phase,
                    day_in_cycle: resolved.day_in_cycle,
                    predicted: false,
                });
            }
            continue;
        }

        if day >= today {
            if let Some(annotation) =
                predicted_annotation(day, *person_id, records, estimated_length, config)
            {
                annotations.push(annotation);
            }
        }
    }

    annotations
}

/// Chain predictions from the most recent record far enough to reach `day`
/// and annotate it when it lands inside a projected period window.
fn predicted_annotation(
    day: NaiveDate,
    person_id: PersonId,
    records: &[CycleRecord],
    estimated_length: i64,
    config: &EngineConfig,
) -> Option<DayAnnotation> {
    let last = records.iter().max_by_key(|r| r.period_start)?;
    let anchor = effective_end(last, estimated_length);
    if day <= anchor {
        return None;
    }

    let days_ahead = (day - anchor).num_days();
    let count = (days_ahead / estimated_length.max(1) + 1) as usize;
    let predictions = predict_future_cycles(last, estimated_length, count, config).ok()?;

    let hit = predictions
        .into_iter()
        .find(|p| p.period_start <= day && day <= p.period_end)?;

    let day_in_cycle = (day - hit.period_start).num_days() + 1;
    let period_length = (hit.period_end - hit.period_start).num_days() + 1;
    let descriptor = classify(day_in_cycle, estimated_length, period_length, config).ok()?;

    Some(DayAnnotation {
        person_id,
        phase: descriptor.phase,
        sub_phase: descriptor.sub_phase,
        day_in_cycle,
        predicted: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Phase, SubPhase};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(
        person_id: PersonId,
        start: NaiveDate,
        period_end: Option<NaiveDate>,
        cycle_end: Option<NaiveDate>,
    ) -> CycleRecord {
        let mut record = CycleRecord::new(person_id, start);
        record.period_end = period_end;
        record.cycle_end = cycle_end;
        record
    }

    fn single_person_records() -> HashMap<PersonId, Vec<CycleRecord>> {
        let mut map = HashMap::new();
        map.insert(
            PersonId::Primary,
            vec![record(
                PersonId::Primary,
                date(2024, 1, 1),
                Some(date(2024, 1, 5)),
                None,
            )],
        );
        map
    }

    #[test]
    fn historical_day_annotates_from_the_enclosing_cycle() {
        let config = EngineConfig::default();
        let annotations = annotate_day(
            date(2024, 1, 10),
            date(2024, 6, 1),
            &[PersonId::Primary],
            &single_person_records(),
            &config,
        );

        assert_eq!(annotations.len(), 1);
        let annotation = &annotations[0];
        assert_eq!(annotation.person_id, PersonId::Primary);
        assert_eq!(annotation.phase, Phase::Follicular);
        assert_eq!(annotation.sub_phase, SubPhase::LateFollicular);
        assert_eq!(annotation.day_in_cycle, 10);
        assert!(!annotation.predicted);
    }

    #[test]
    fn closed_cycle_classifies_at_its_recorded_length() {
        let config = EngineConfig::default();
        let mut map = HashMap::new();
        map.insert(
            PersonId::Primary,
            vec![record(
                PersonId::Primary,
                date(2024, 1, 1),
                Some(date(2024, 1, 5)),
                Some(date(2024, 1, 30)), // 30-day cycle, ovulation day 17
            )],
        );

        let annotations = annotate_day(
            date(2024, 1, 17),
            date(2024, 6, 1),
            &[PersonId::Primary],
            &map,
            &config,
        );

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].sub_phase, SubPhase::Ovulation);
    }

    #[test]
    fn future_day_annotates_from_a_projected_period_window() {
        let config = EngineConfig::default();
        // Open cycle Jan 1..Jan 28 (estimated); first projected period is
        // Jan 29..Feb 2
        let annotations = annotate_day(
            date(2024, 2, 1),
            date(2024, 1, 15),
            &[PersonId::Primary],
            &single_person_records(),
            &config,
        );

        assert_eq!(annotations.len(), 1);
        let annotation = &annotations[0];
        assert!(annotation.predicted);
        assert_eq!(annotation.phase, Phase::Menstrual);
        assert_eq!(annotation.sub_phase, SubPhase::LightFlow);
        assert_eq!(annotation.day_in_cycle, 4);
    }

    #[test]
    fn projection_reaches_arbitrarily_far_forward() {
        let config = EngineConfig::default();
        // Several cycles ahead: Jan 29 + 3 * 28 days = Apr 22 starts the
        // fourth projected window
        let annotations = annotate_day(
            date(2024, 4, 22),
            date(2024, 1, 15),
            &[PersonId::Primary],
            &single_person_records(),
            &config,
        );

        assert_eq!(annotations.len(), 1);
        assert!(annotations[0].predicted);
        assert_eq!(annotations[0].day_in_cycle, 1);
        assert_eq!(annotations[0].sub_phase, SubPhase::HeavyFlow);
    }

    #[test]
    fn future_day_between_period_windows_annotates_nothing() {
        let config = EngineConfig::default();
        // Feb 10 falls in the projected cycle but past its period window
        let annotations = annotate_day(
            date(2024, 2, 10),
            date(2024, 1, 15),
            &[PersonId::Primary],
            &single_person_records(),
            &config,
        );
        assert!(annotations.is_empty());
    }

    #[test]
    fn past_day_with_no_enclosing_cycle_annotates_nothing() {
        let config = EngineConfig::default();
        let annotations = annotate_day(
            date(2023, 12, 1),
            date(2024, 6, 1),
            &[PersonId::Primary],
            &single_person_records(),
            &config,
        );
        assert!(annotations.is_empty());
    }

    #[test]
    fn people_without_records_are_skipped() {
        let config = EngineConfig::default();
        let absent = PersonId::Connection(Uuid::new_v4());
        let mut map = single_person_records();
        map.insert(absent, Vec::new());

        let annotations = annotate_day(
            date(2024, 1, 10),
            date(2024, 6, 1),
            &[PersonId::Primary, absent],
            &map,
            &config,
        );
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].person_id, PersonId::Primary);
    }

    #[test]
    fn empty_inputs_produce_an_empty_list() {
        let config = EngineConfig::default();
        let annotations = annotate_day(
            date(2024, 1, 10),
            date(2024, 1, 10),
            &[],
            &HashMap::new(),
            &config,
        );
        assert!(annotations.is_empty());
    }

    #[test]
    fn annotations_follow_the_supplied_person_order() {
        let config = EngineConfig::default();
        let connection = PersonId::Connection(Uuid::new_v4());
        let mut map = single_person_records();
        map.insert(
            connection,
            vec![record(
                connection,
                date(2024, 1, 3),
                Some(date(2024, 1, 7)),
                None,
            )],
        );

        let annotations = annotate_day(
            date(2024, 1, 10),
            date(2024, 6, 1),
            &[connection, PersonId::Primary],
            &map,
            &config,
        );

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].person_id, connection);
        assert_eq!(annotations[1].person_id, PersonId::Primary);
    }
}
