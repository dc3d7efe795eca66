use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::generator::EventGenerator;
use crate::models::{
    AlertRecord, AlertStatus, ControlEntry, ControlFilter, Rule, Severity, Target,
};
use crate::stats::{self, AlertFilter};
use crate::store::{
    new_shared_state, AlertsRepository, CatalogRepository, ControlsRepository, EndOutcome,
    RulesRepository,
};

/// Aggregate counts for the dashboard header, computed over a filtered
/// record set.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total: usize,
    pub by_status: HashMap<AlertStatus, usize>,
    pub by_severity: HashMap<Severity, usize>,
    pub percent_resolved: u32,
}

/// Facade over the repositories: the single boundary the view layer talks to.
#[derive(Clone)]
pub struct OpsService {
    catalog: CatalogRepository,
    controls: ControlsRepository,
    alerts: AlertsRepository,
    rules: RulesRepository,
}

impl OpsService {
    /// Build the service over a fresh store and the given catalog.
    pub fn new(catalog: CatalogRepository) -> Self {
        let state = new_shared_state();
        Self {
            catalog,
            controls: ControlsRepository::new(state.clone()),
            alerts: AlertsRepository::new(state.clone()),
            rules: RulesRepository::new(state),
        }
    }

    pub fn catalog(&self) -> &CatalogRepository {
        &self.catalog
    }

    // Reads

    pub fn list_control_entries(&self, filter: Option<&ControlFilter>) -> Vec<ControlEntry> {
        self.controls.list(filter)
    }

    pub fn get_control_entry(&self, id: &Uuid) -> Result<ControlEntry> {
        self.controls.get(id)
    }

    pub fn list_alert_records(
        &self,
        control_id: &Uuid,
        status: Option<AlertStatus>,
    ) -> Result<Vec<AlertRecord>> {
        self.alerts.list_by_control(control_id, status)
    }

    pub fn list_rules(&self) -> Vec<Rule> {
        self.rules.list()
    }

    /// Counts and resolution percentage over the filtered record set.
    pub fn dashboard(&self, filter: &AlertFilter) -> DashboardSummary {
        let records = self.alerts.all_records(filter);
        DashboardSummary {
            total: records.len(),
            by_status: stats::count_by_status(&records),
            by_severity: stats::count_by_severity(&records),
            percent_resolved: stats::percent_resolved(&records),
        }
    }

    /// Complete filtered record snapshot, the exporter's input.
    pub fn export_records(&self, filter: &AlertFilter) -> Vec<AlertRecord> {
        self.alerts.all_records(filter)
    }

    // Writes

    pub fn create_control_entry(
        &self,
        target: &Target,
        rule: impl Into<String>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<ControlEntry> {
        self.controls.create(target, rule, window_start, window_end)
    }

    pub fn end_control(&self, id: &Uuid) -> Result<EndOutcome> {
        self.controls.end_control(id)
    }

    pub fn transition_alert(&self, record_id: &Uuid, status: AlertStatus) -> Result<AlertRecord> {
        self.alerts.transition(record_id, status)
    }

    pub fn upsert_rule(&self, rule: Rule) -> Result<Rule> {
        self.rules.upsert(rule)
    }

    pub fn remove_rule(&self, id: &Uuid) -> Result<()> {
        self.rules.remove(id)
    }

    /// Manual operator report: append an alert outside the generator path.
    pub fn report_alert(
        &self,
        control_id: &Uuid,
        alert: crate::models::NewAlert,
    ) -> Option<AlertRecord> {
        if let Some(record) = self.alerts.append(control_id, alert) {
            self.controls
                .record_sighting(control_id, &record.location, record.timestamp);
            Some(record)
        } else {
            None
        }
    }

    // Generator wiring

    /// Build a generator over this service's store.
    pub fn generator(&self, config: &GeneratorConfig, seed: Option<u64>) -> EventGenerator {
        match seed {
            Some(seed) => EventGenerator::with_seed(
                self.controls.clone(),
                self.alerts.clone(),
                &self.catalog,
                config,
                seed,
            ),
            None => EventGenerator::new(
                self.controls.clone(),
                self.alerts.clone(),
                &self.catalog,
                config,
            ),
        }
    }

    /// Spawn the generator tick loop; cancel the returned token on teardown.
    pub fn spawn_generator(&self, config: &GeneratorConfig, seed: Option<u64>) -> CancellationToken {
        let cancel = CancellationToken::new();
        tokio::spawn(self.generator(config, seed).run(cancel.clone()));
        cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ControlStatus, TargetKind};
    use chrono::Duration;

    fn service() -> OpsService {
        OpsService::new(CatalogRepository::with_fixtures())
    }

    fn generator_config() -> GeneratorConfig {
        GeneratorConfig {
            tick_secs: 1,
            probability: 1.0,
        }
    }

    // The end-to-end lifecycle scenario: create, two generator appends,
    // handle one, end the entry, then verify a tick cannot touch it.
    #[test]
    fn control_lifecycle_end_to_end() {
        let svc = service();
        let now = Utc::now();
        let target = Target::new("T-001", TargetKind::Person, "test subject");
        let entry = svc
            .create_control_entry(&target, "no entry after hours", now, now + Duration::days(30))
            .unwrap();
        assert_eq!(entry.status, ControlStatus::Active);
        assert_eq!(entry.alert_count, 0);

        // Only this person entry exists, so every fired tick lands on it.
        let mut generator = svc.generator(&generator_config(), Some(11));
        let mut appended = Vec::new();
        let mut tick_time = now;
        while appended.len() < 2 {
            tick_time = tick_time + Duration::seconds(5);
            if let Some(record) = generator.tick(tick_time) {
                appended.push(record);
            }
        }

        let entry = svc.get_control_entry(&entry.id).unwrap();
        assert_eq!(entry.alert_count, 2);
        assert_eq!(entry.last_alert_time, Some(appended[1].timestamp));

        svc.transition_alert(&appended[0].id, AlertStatus::Handled)
            .unwrap();
        let records = svc.list_alert_records(&entry.id, None).unwrap();
        let counts = stats::count_by_status(&records);
        assert_eq!(counts[&AlertStatus::Unhandled], 1);
        assert_eq!(counts[&AlertStatus::Handled], 1);

        assert_eq!(svc.end_control(&entry.id).unwrap(), EndOutcome::Ended);
        let before = svc.get_control_entry(&entry.id).unwrap().alert_count;
        for _ in 0..50 {
            tick_time = tick_time + Duration::seconds(5);
            generator.tick(tick_time);
        }
        let after = svc.get_control_entry(&entry.id).unwrap();
        assert_eq!(after.status, ControlStatus::Ended);
        assert_eq!(after.alert_count, before);
    }

    #[test]
    fn count_invariant_survives_mixed_operations() {
        let svc = service();
        let now = Utc::now();
        for target in svc.catalog().targets().to_vec() {
            svc.create_control_entry(&target, "rule", now, now + Duration::days(7))
                .unwrap();
        }

        let mut generator = svc.generator(&generator_config(), Some(99));
        let mut records = Vec::new();
        for i in 0..40 {
            if let Some(r) = generator.tick(now + Duration::seconds(i)) {
                records.push(r);
            }
        }
        assert!(!records.is_empty());

        // Interleave transitions with more appends.
        for (i, record) in records.iter().enumerate() {
            let status = if i % 2 == 0 {
                AlertStatus::Handled
            } else {
                AlertStatus::Ignored
            };
            svc.transition_alert(&record.id, status).unwrap();
            generator.tick(now + Duration::minutes(i as i64 + 1));
        }

        for entry in svc.list_control_entries(None) {
            assert_eq!(entry.alert_count, entry.records.len());
        }
    }

    #[test]
    fn dashboard_counts_sum_to_total() {
        let svc = service();
        let now = Utc::now();
        let target = svc.catalog().targets()[0].clone();
        svc.create_control_entry(&target, "rule", now, now + Duration::days(7))
            .unwrap();

        let mut generator = svc.generator(&generator_config(), Some(3));
        for i in 0..10 {
            generator.tick(now + Duration::seconds(i));
        }

        let summary = svc.dashboard(&AlertFilter::default());
        assert_eq!(summary.by_status.values().sum::<usize>(), summary.total);
        assert_eq!(summary.by_severity.values().sum::<usize>(), summary.total);
    }

    #[test]
    fn empty_dashboard_is_all_zero() {
        let svc = service();
        let summary = svc.dashboard(&AlertFilter::default());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.percent_resolved, 0);
        assert!(summary.by_status.is_empty());
    }

    #[test]
    fn export_respects_filters() {
        let svc = service();
        let now = Utc::now();
        for target in svc.catalog().targets().to_vec() {
            svc.create_control_entry(&target, "rule", now, now + Duration::days(7))
                .unwrap();
        }
        let mut generator = svc.generator(&generator_config(), Some(21));
        for i in 0..30 {
            generator.tick(now + Duration::seconds(i));
        }

        let all = svc.export_records(&AlertFilter::default());
        let persons = svc.export_records(&AlertFilter {
            kind: Some(TargetKind::Person),
            ..Default::default()
        });
        assert!(persons.len() <= all.len());
        assert!(persons.iter().all(|r| r.target_kind == TargetKind::Person));
    }

    #[test]
    fn manual_report_updates_sighting() {
        let svc = service();
        let now = Utc::now();
        let target = svc.catalog().targets()[0].clone();
        let entry = svc
            .create_control_entry(&target, "rule", now, now + Duration::days(7))
            .unwrap();

        let record = svc
            .report_alert(
                &entry.id,
                crate::models::NewAlert {
                    location: "Loading Dock".to_string(),
                    timestamp: now,
                    description: "operator-reported sighting".to_string(),
                    severity: Severity::Low,
                },
            )
            .unwrap();

        let entry = svc.get_control_entry(&entry.id).unwrap();
        assert_eq!(entry.alert_count, 1);
        assert_eq!(entry.last_location.as_deref(), Some("Loading Dock"));
        assert_eq!(entry.last_seen_time, Some(record.timestamp));
    }
}
