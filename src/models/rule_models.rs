use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Trigger categories a rule can react to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    PersonDetected,
    VehicleDetected,
    AreaIntrusion,
    DeviceFault,
    Custom(String),
}

impl Display for TriggerCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonDetected => write!(f, "person_detected"),
            Self::VehicleDetected => write!(f, "vehicle_detected"),
            Self::AreaIntrusion => write!(f, "area_intrusion"),
            Self::DeviceFault => write!(f, "device_fault"),
            Self::Custom(name) => write!(f, "custom.{}", name),
        }
    }
}

/// Response actions a rule documents. Display-only; nothing executes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseAction {
    Snapshot,
    Record,
    NotifyOperator,
    SoundAlarm,
    LockDown,
    Custom(String),
}

/// A declarative trigger-to-action mapping shown to operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: Uuid,
    pub name: String,
    pub trigger: TriggerCategory,
    /// Free-text trigger condition as the operator entered it.
    pub condition: String,
    pub actions: Vec<ResponseAction>,
    pub enabled: bool,
    /// 1 is highest.
    pub priority: u8,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        trigger: TriggerCategory,
        condition: impl Into<String>,
        actions: Vec<ResponseAction>,
        priority: u8,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            trigger,
            condition: condition.into(),
            actions,
            enabled: true,
            priority,
        }
    }
}
