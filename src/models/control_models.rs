use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::alert_models::AlertRecord;
use crate::models::catalog_models::TargetKind;
use crate::models::lifecycle::ControlStatus;

/// An active or historical directive to monitor a target.
///
/// Owns its alert history: `alert_count` always equals `records.len()`.
/// Entries are never deleted, only transitioned to a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlEntry {
    pub id: Uuid,
    pub target_id: Uuid,
    pub target_name: String,
    pub target_kind: TargetKind,
    /// Operator-facing rule description for this watch directive.
    pub rule: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub status: ControlStatus,
    pub alert_count: usize,
    pub last_alert_time: Option<DateTime<Utc>>,
    pub last_location: Option<String>,
    pub last_seen_time: Option<DateTime<Utc>>,
    pub records: Vec<AlertRecord>,
    pub created_at: DateTime<Utc>,
}

impl ControlEntry {
    /// Whether the validity window has passed at `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.window_end
    }
}

/// Optional filters for listing control entries.
#[derive(Debug, Clone, Default)]
pub struct ControlFilter {
    pub status: Option<ControlStatus>,
    pub target_kind: Option<TargetKind>,
}
