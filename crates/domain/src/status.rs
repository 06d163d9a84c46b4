//! Door status — the coop state machine values.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoopError;

/// Discrete state of the coop door.
///
/// `Unknown` is both the initial value and the recovery value after a failed
/// actuation. Every legal actuation passes through one of the two in-flight
/// states (`Opening`, `Closing`) so that concurrent re-entry is observable
/// and rejectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorStatus {
    #[default]
    Unknown,
    Opening,
    Opened,
    Closing,
    Closed,
}

impl DoorStatus {
    /// Whether an actuation is currently in flight.
    #[must_use]
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

impl std::fmt::Display for DoorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Opening => f.write_str("opening"),
            Self::Opened => f.write_str("opened"),
            Self::Closing => f.write_str("closing"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

impl FromStr for DoorStatus {
    type Err = CoopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "opening" => Ok(Self::Opening),
            "opened" => Ok(Self::Opened),
            "closing" => Ok(Self::Closing),
            "closed" => Ok(Self::Closed),
            other => Err(CoopError::InvalidStatus(other.to_string())),
        }
    }
}
