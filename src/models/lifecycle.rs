//! Shared lifecycle phases for alert and control statuses.
//!
//! Each entity keeps its own typed status enum, but all of them map onto one
//! two-phase lifecycle so "is this thing still open?" is answered the same
//! way everywhere:
//!
//! | phase  | ControlStatus       | AlertStatus          |
//! |--------|---------------------|----------------------|
//! | Open   | Active              | Unhandled            |
//! | Closed | Ended, Expired      | Handled, Ignored     |
//!
//! Closed is terminal: no transition leaves it.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    Open,
    Closed,
}

/// Lifecycle status of a control (watchlist) entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStatus {
    Active,
    /// Ended manually by an operator.
    Ended,
    /// Validity window passed; flipped lazily on read.
    Expired,
}

impl ControlStatus {
    pub fn phase(&self) -> LifecyclePhase {
        match self {
            Self::Active => LifecyclePhase::Open,
            Self::Ended | Self::Expired => LifecyclePhase::Closed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase() == LifecyclePhase::Closed
    }
}

impl Display for ControlStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Ended => write!(f, "ended"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// Lifecycle status of a single alert record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Unhandled,
    /// Reviewed and resolved by an operator.
    Handled,
    /// Dismissed as a false alarm.
    Ignored,
}

impl AlertStatus {
    pub fn phase(&self) -> LifecyclePhase {
        match self {
            Self::Unhandled => LifecyclePhase::Open,
            Self::Handled | Self::Ignored => LifecyclePhase::Closed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase() == LifecyclePhase::Closed
    }
}

impl Display for AlertStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unhandled => write!(f, "unhandled"),
            Self::Handled => write!(f, "handled"),
            Self::Ignored => write!(f, "ignored"),
        }
    }
}
