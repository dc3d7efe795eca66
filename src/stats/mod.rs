//! Pure projections over alert record sets for dashboard display.
//!
//! Everything here is stateless and side-effect-free; the view layer calls
//! these on every refresh against a snapshot of the store.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::{AlertRecord, AlertStatus, Severity, TargetKind};

/// Optional AND-combined predicates for filtering alert records. Omitted
/// fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub kind: Option<TargetKind>,
    pub severity: Option<Severity>,
    pub status: Option<AlertStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl AlertFilter {
    fn matches(&self, record: &AlertRecord) -> bool {
        self.kind.map_or(true, |k| record.target_kind == k)
            && self.severity.map_or(true, |s| record.severity == s)
            && self.status.map_or(true, |s| record.status == s)
            && self.from.map_or(true, |t| record.timestamp >= t)
            && self.to.map_or(true, |t| record.timestamp <= t)
    }
}

/// Count records per lifecycle status. Counts always sum to `records.len()`.
pub fn count_by_status(records: &[AlertRecord]) -> HashMap<AlertStatus, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.status).or_insert(0) += 1;
    }
    counts
}

/// Count records per severity, for the dashboard severity breakdown.
pub fn count_by_severity(records: &[AlertRecord]) -> HashMap<Severity, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.severity).or_insert(0) += 1;
    }
    counts
}

/// Percentage of records resolved (handled), rounded to the nearest whole
/// number. The empty set is 0, not a division by zero. Ignored records are
/// false alarms and do not count as resolved.
pub fn percent_resolved(records: &[AlertRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let handled = records
        .iter()
        .filter(|r| r.status == AlertStatus::Handled)
        .count();
    (100.0 * handled as f64 / records.len() as f64).round() as u32
}

/// Records matching every provided predicate, in input order.
pub fn filter_records(records: &[AlertRecord], filter: &AlertFilter) -> Vec<AlertRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn record(
        kind: TargetKind,
        severity: Severity,
        status: AlertStatus,
        timestamp: DateTime<Utc>,
    ) -> AlertRecord {
        AlertRecord {
            id: Uuid::new_v4(),
            control_id: Uuid::new_v4(),
            target_id: Uuid::new_v4(),
            target_name: "T".to_string(),
            target_kind: kind,
            location: "North Gate".to_string(),
            timestamp,
            description: "test".to_string(),
            severity,
            status,
        }
    }

    fn sample_set() -> Vec<AlertRecord> {
        let now = Utc::now();
        vec![
            record(TargetKind::Person, Severity::High, AlertStatus::Unhandled, now),
            record(
                TargetKind::Person,
                Severity::High,
                AlertStatus::Handled,
                now - Duration::hours(1),
            ),
            record(
                TargetKind::Vehicle,
                Severity::Medium,
                AlertStatus::Ignored,
                now - Duration::hours(2),
            ),
            record(
                TargetKind::Vehicle,
                Severity::Low,
                AlertStatus::Handled,
                now - Duration::days(2),
            ),
        ]
    }

    #[test]
    fn count_by_status_sums_to_set_size() {
        let records = sample_set();
        let counts = count_by_status(&records);
        assert_eq!(counts.values().sum::<usize>(), records.len());
        assert_eq!(counts[&AlertStatus::Handled], 2);
        assert_eq!(counts[&AlertStatus::Unhandled], 1);
        assert_eq!(counts[&AlertStatus::Ignored], 1);
    }

    #[test]
    fn percent_resolved_rounds_and_ignores_false_alarms() {
        let records = sample_set();
        // 2 handled of 4 total.
        assert_eq!(percent_resolved(&records), 50);

        let one = &records[..3];
        // 1 handled of 3 total, 33.33 rounds down.
        assert_eq!(percent_resolved(one), 33);
    }

    #[test]
    fn percent_resolved_of_empty_set_is_zero() {
        assert_eq!(percent_resolved(&[]), 0);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let records = sample_set();
        let filtered = filter_records(&records, &AlertFilter::default());
        assert_eq!(filtered.len(), records.len());
    }

    #[test]
    fn filter_is_an_and_of_provided_predicates() {
        let records = sample_set();
        let filter = AlertFilter {
            kind: Some(TargetKind::Vehicle),
            status: Some(AlertStatus::Handled),
            ..Default::default()
        };
        let filtered = filter_records(&records, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].severity, Severity::Low);
    }

    #[test]
    fn filter_date_range_is_inclusive() {
        let records = sample_set();
        let filter = AlertFilter {
            from: Some(Utc::now() - Duration::hours(3)),
            to: Some(Utc::now()),
            ..Default::default()
        };
        let filtered = filter_records(&records, &filter);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn filter_is_idempotent() {
        let records = sample_set();
        let filter = AlertFilter {
            severity: Some(Severity::High),
            ..Default::default()
        };
        let once = filter_records(&records, &filter);
        let twice = filter_records(&once, &filter);
        assert_eq!(once.len(), twice.len());
    }
}
