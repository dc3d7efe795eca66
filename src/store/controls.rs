use chrono::{DateTime, Utc};
use log::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{ControlEntry, ControlFilter, ControlStatus, Target, TargetKind};
use crate::store::SharedState;

/// Outcome of an `end_control` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    /// The entry was active and is now ended.
    Ended,
    /// The entry was already terminal; nothing changed. Callers surface this
    /// as a notice, not an error.
    AlreadyTerminal(ControlStatus),
}

/// Repository for control (watchlist) entries and their lifecycle.
#[derive(Clone)]
pub struct ControlsRepository {
    state: SharedState,
}

impl ControlsRepository {
    /// Create a new controls repository over the shared store.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Create a new control entry for a target. Initial status is always
    /// active with zero counters.
    ///
    /// Overlapping active entries for the same target are allowed; the
    /// generator picks uniformly among matching candidates either way.
    pub fn create(
        &self,
        target: &Target,
        rule: impl Into<String>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<ControlEntry> {
        if window_end <= window_start {
            return Err(Error::Validation {
                missing: vec!["valid window (end must be after start)".to_string()],
            });
        }

        let entry = ControlEntry {
            id: Uuid::new_v4(),
            target_id: target.id,
            target_name: target.name.clone(),
            target_kind: target.kind,
            rule: rule.into(),
            window_start,
            window_end,
            status: ControlStatus::Active,
            alert_count: 0,
            last_alert_time: None,
            last_location: None,
            last_seen_time: None,
            records: Vec::new(),
            created_at: Utc::now(),
        };

        info!(
            "Created control entry {} for target {} ({})",
            entry.id, entry.target_name, entry.target_kind
        );

        let mut state = self.state.write().unwrap();
        state.controls.push(entry.clone());
        Ok(entry)
    }

    /// End an active control entry. Ending an already-terminal entry is a
    /// no-op reported through the outcome.
    pub fn end_control(&self, id: &Uuid) -> Result<EndOutcome> {
        let mut state = self.state.write().unwrap();
        state.expire_overdue(Utc::now());

        let entry = state
            .controls
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or_else(|| Error::NotFound(format!("control entry {}", id)))?;

        if entry.status.is_terminal() {
            return Ok(EndOutcome::AlreadyTerminal(entry.status));
        }

        entry.status = ControlStatus::Ended;
        info!("Ended control entry {} for target {}", entry.id, entry.target_name);
        Ok(EndOutcome::Ended)
    }

    /// Get a single entry by id. Overdue entries read as expired.
    pub fn get(&self, id: &Uuid) -> Result<ControlEntry> {
        let mut state = self.state.write().unwrap();
        state.expire_overdue(Utc::now());
        state
            .controls
            .iter()
            .find(|e| e.id == *id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("control entry {}", id)))
    }

    /// List entries in creation order, optionally filtered.
    pub fn list(&self, filter: Option<&ControlFilter>) -> Vec<ControlEntry> {
        let mut state = self.state.write().unwrap();
        state.expire_overdue(Utc::now());
        state
            .controls
            .iter()
            .filter(|e| match filter {
                Some(f) => {
                    f.status.map_or(true, |s| e.status == s)
                        && f.target_kind.map_or(true, |k| e.target_kind == k)
                }
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Record where and when the target was last seen. Unknown ids are a
    /// no-op, matching the silent-drop semantics of alert appends.
    pub fn record_sighting(&self, id: &Uuid, location: &str, at: DateTime<Utc>) {
        let mut state = self.state.write().unwrap();
        if let Some(entry) = state.controls.iter_mut().find(|e| e.id == *id) {
            entry.last_location = Some(location.to_string());
            entry.last_seen_time = Some(at);
        }
    }

    /// Active entries whose target kind matches, for generator candidate
    /// selection. Ended and expired entries are excluded.
    pub fn active_candidates(&self, kind: TargetKind, now: DateTime<Utc>) -> Vec<Uuid> {
        let mut state = self.state.write().unwrap();
        state.expire_overdue(now);
        state
            .controls
            .iter()
            .filter(|e| e.status == ControlStatus::Active && e.target_kind == kind)
            .map(|e| e.id)
            .collect()
    }
}
