pub mod ops;

pub use ops::{DashboardSummary, OpsService};
