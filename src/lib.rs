pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod services;
pub mod stats;
pub mod store;

// Re-export main components for easier use
pub use error::{Error, Result};
pub use models::{
    AlertRecord, AlertStatus, ControlEntry, ControlFilter, ControlStatus, Device, LifecyclePhase,
    NewAlert, Rule, Severity, Target, TargetKind,
};
pub use services::{DashboardSummary, OpsService};
pub use stats::AlertFilter;
pub use store::{CatalogRepository, EndOutcome};
