//! Cycle resolution
//!
//! This module locates the historical cycle enclosing a calendar day. Open
//! cycles (no recorded end) are assumed to run for the person's estimated
//! cycle length. Overlapping records are a tolerated data anomaly: the first
//! match in chronological order wins, so repeated queries are deterministic.

use crate::config::EngineConfig;
use crate::estimator::estimate_cycle_length;
use crate::types::{CycleRecord, ResolvedCycle};
use chrono::{Duration, NaiveDate};

/// Find the cycle enclosing `day`, along with the 1-indexed day within it.
///
/// Returns `None` when no record's window contains the day. Callers probe
/// arbitrary calendar days, so an empty result is the normal path, not an
/// error.
pub fn resolve<'a>(
    day: NaiveDate,
    records: &'a [CycleRecord],
    config: &EngineConfig,
) -> Option<ResolvedCycle<'a>> {
    if records.is_empty() {
        return None;
    }

    let estimated_length = estimate_cycle_length(records, config);

    let mut ordered: Vec<&CycleRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.period_start);

    ordered
        .into_iter()
        .find(|record| {
            let end = effective_end(record, estimated_length);
            record.period_start <= day && day <= end
        })
        .map(|record| ResolvedCycle {
            record,
            day_in_cycle: (day - record.period_start).num_days() + 1,
        })
}

/// Last day of a record's window: the recorded cycle end when present, else
/// the start plus the estimated length. An inverted recorded end clamps to
/// the start day.
pub(crate) fn effective_end(record: &CycleRecord, estimated_length: i64) -> NaiveDate {
    match record.cycle_end {
        Some(end) if end >= record.period_start => end,
        Some(_) => record.period_start,
        None => record.period_start + Duration::days(estimated_length.max(1) - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PersonId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(start: NaiveDate, cycle_end: Option<NaiveDate>) -> CycleRecord {
        let mut record = CycleRecord::new(PersonId::Primary, start);
        record.cycle_end = cycle_end;
        record
    }

    #[test]
    fn resolves_day_inside_closed_cycle() {
        let records = vec![record(date(2024, 1, 1), Some(date(2024, 1, 28)))];
        let config = EngineConfig::default();

        let resolved = resolve(date(2024, 1, 10), &records, &config).unwrap();
        assert_eq!(resolved.day_in_cycle, 10);
        assert_eq!(resolved.record.period_start, date(2024, 1, 1));
    }

    #[test]
    fn open_cycle_runs_for_the_estimated_length() {
        // Single record, so the estimate is the 28-day default
        let records = vec![record(date(2024, 1, 1), None)];
        let config = EngineConfig::default();

        let resolved = resolve(date(2024, 1, 28), &records, &config).unwrap();
        assert_eq!(resolved.day_in_cycle, 28);
        assert!(resolve(date(2024, 1, 29), &records, &config).is_none());
    }

    #[test]
    fn day_before_all_records_resolves_to_none() {
        let records = vec![record(date(2024, 1, 1), None)];
        let config = EngineConfig::default();
        assert!(resolve(date(2023, 12, 31), &records, &config).is_none());
    }

    #[test]
    fn empty_history_resolves_to_none() {
        assert!(resolve(date(2024, 1, 1), &[], &EngineConfig::default()).is_none());
    }

    #[test]
    fn overlapping_records_resolve_to_the_chronologically_first() {
        let first = record(date(2024, 1, 1), Some(date(2024, 1, 30)));
        let second = record(date(2024, 1, 20), Some(date(2024, 2, 16)));
        let config = EngineConfig::default();

        // Supply out of order; the earlier start must still win
        let records = vec![second.clone(), first.clone()];
        for _ in 0..3 {
            let resolved = resolve(date(2024, 1, 25), &records, &config).unwrap();
            assert_eq!(resolved.record.id, first.id);
            assert_eq!(resolved.day_in_cycle, 25);
        }
    }

    #[test]
    fn inverted_cycle_end_clamps_to_the_start_day() {
        let records = vec![record(date(2024, 2, 10), Some(date(2024, 2, 1)))];
        let config = EngineConfig::default();

        let resolved = resolve(date(2024, 2, 10), &records, &config).unwrap();
        assert_eq!(resolved.day_in_cycle, 1);
        assert!(resolve(date(2024, 2, 11), &records, &config).is_none());
    }

    #[test]
    fn later_cycles_resolve_with_estimated_tail() {
        let records = vec![
            record(date(2024, 1, 1), Some(date(2024, 1, 28))),
            record(date(2024, 1, 29), None),
        ];
        let config = EngineConfig::default();

        let resolved = resolve(date(2024, 2, 5), &records, &config).unwrap();
        assert_eq!(resolved.record.period_start, date(2024, 1, 29));
        assert_eq!(resolved.day_in_cycle, 8);
    }
}
