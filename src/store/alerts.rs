use log::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{AlertRecord, AlertStatus, NewAlert};
use crate::stats::{filter_records, AlertFilter};
use crate::store::SharedState;

/// Repository for the append-only alert record collection, scoped per
/// control entry.
#[derive(Clone)]
pub struct AlertsRepository {
    state: SharedState,
}

impl AlertsRepository {
    /// Create a new alerts repository over the shared store.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Append a new alert record to its owning control entry.
    ///
    /// The record starts unhandled; the entry's `alert_count` and
    /// `last_alert_time` are updated in the same locked section. If the entry
    /// does not exist or is terminal the append is a silent no-op and `None`
    /// is returned.
    pub fn append(&self, control_id: &Uuid, alert: NewAlert) -> Option<AlertRecord> {
        let mut state = self.state.write().unwrap();

        let entry = match state.controls.iter_mut().find(|e| e.id == *control_id) {
            Some(entry) => entry,
            None => {
                debug!("Dropping alert for unknown control entry {}", control_id);
                return None;
            }
        };
        if entry.status.is_terminal() {
            debug!(
                "Dropping alert for {} control entry {}",
                entry.status, entry.id
            );
            return None;
        }

        let record = AlertRecord {
            id: Uuid::new_v4(),
            control_id: entry.id,
            target_id: entry.target_id,
            target_name: entry.target_name.clone(),
            target_kind: entry.target_kind,
            location: alert.location,
            timestamp: alert.timestamp,
            description: alert.description,
            severity: alert.severity,
            status: AlertStatus::Unhandled,
        };

        entry.records.push(record.clone());
        entry.alert_count = entry.records.len();
        entry.last_alert_time = Some(record.timestamp);
        Some(record)
    }

    /// Alert records for one entry in insertion order, optionally filtered
    /// by status.
    pub fn list_by_control(
        &self,
        control_id: &Uuid,
        status: Option<AlertStatus>,
    ) -> Result<Vec<AlertRecord>> {
        let state = self.state.read().unwrap();
        let entry = state
            .controls
            .iter()
            .find(|e| e.id == *control_id)
            .ok_or_else(|| Error::NotFound(format!("control entry {}", control_id)))?;

        Ok(entry
            .records
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    /// Move a record forward through its lifecycle.
    ///
    /// Only `unhandled -> handled` and `unhandled -> ignored` are legal;
    /// anything else leaves the record untouched and fails.
    pub fn transition(&self, record_id: &Uuid, new_status: AlertStatus) -> Result<AlertRecord> {
        let mut state = self.state.write().unwrap();
        let record = state
            .controls
            .iter_mut()
            .flat_map(|e| e.records.iter_mut())
            .find(|r| r.id == *record_id)
            .ok_or_else(|| Error::NotFound(format!("alert record {}", record_id)))?;

        if record.status.is_terminal() {
            return Err(Error::InvalidTransition(format!(
                "alert record {} is already {}",
                record.id, record.status
            )));
        }
        if new_status == AlertStatus::Unhandled {
            return Err(Error::InvalidTransition(format!(
                "alert record {} cannot return to unhandled",
                record.id
            )));
        }

        record.status = new_status;
        Ok(record.clone())
    }

    /// Flattened, filtered snapshot across all entries, in entry creation
    /// order with each entry's records chronological. This is the input the
    /// collaborator-owned exporter consumes.
    pub fn all_records(&self, filter: &AlertFilter) -> Vec<AlertRecord> {
        let state = self.state.read().unwrap();
        let all: Vec<AlertRecord> = state
            .controls
            .iter()
            .flat_map(|e| e.records.iter().cloned())
            .collect();
        filter_records(&all, filter)
    }
}
