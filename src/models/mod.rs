pub mod alert_models;
pub mod catalog_models;
pub mod control_models;
pub mod lifecycle;
pub mod rule_models;

pub use alert_models::{AlertRecord, NewAlert, Severity};
pub use catalog_models::{Device, DeviceKind, DeviceStatus, Target, TargetKind};
pub use control_models::{ControlEntry, ControlFilter};
pub use lifecycle::{AlertStatus, ControlStatus, LifecyclePhase};
pub use rule_models::{ResponseAction, Rule, TriggerCategory};
