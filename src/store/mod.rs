pub mod alerts;
pub mod catalog;
pub mod controls;
pub mod rules;

pub use alerts::AlertsRepository;
pub use catalog::CatalogRepository;
pub use controls::{ControlsRepository, EndOutcome};
pub use rules::RulesRepository;

use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::models::{ControlEntry, ControlStatus, Rule};

/// In-memory tables behind the repositories.
///
/// One lock guards everything a mutation touches, so each read-modify-write
/// against a control entry is atomic relative to concurrent ticks and
/// display polls.
#[derive(Debug, Default)]
pub struct StoreState {
    /// Control entries in creation order. Entries are never removed.
    pub(crate) controls: Vec<ControlEntry>,
    pub(crate) rules: Vec<Rule>,
}

impl StoreState {
    /// Flip overdue active entries to expired. Expiry is evaluated lazily on
    /// read paths; there is no background sweep.
    pub(crate) fn expire_overdue(&mut self, now: DateTime<Utc>) {
        for entry in &mut self.controls {
            if entry.status == ControlStatus::Active && entry.is_overdue(now) {
                log::debug!("Control {} expired (window ended {})", entry.id, entry.window_end);
                entry.status = ControlStatus::Expired;
            }
        }
    }
}

pub type SharedState = Arc<RwLock<StoreState>>;

/// Create an empty shared store for injecting into the repositories.
pub fn new_shared_state() -> SharedState {
    Arc::new(RwLock::new(StoreState::default()))
}
