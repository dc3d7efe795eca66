use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::models::catalog_models::TargetKind;
use crate::models::lifecycle::AlertStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// One detection event tied to a control entry.
///
/// Identifier, timestamp and target reference are fixed at creation; only
/// `status` may change afterwards, and only forward through the lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: Uuid,
    pub control_id: Uuid,
    pub target_id: Uuid,
    pub target_name: String,
    pub target_kind: TargetKind,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub severity: Severity,
    pub status: AlertStatus,
}

/// Payload for a new alert, before the store assigns ownership fields.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub severity: Severity,
}
