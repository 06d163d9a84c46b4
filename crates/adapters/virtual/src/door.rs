//! Simulated door actuator.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use roost_app::ports::DoorActuator;
use roost_domain::error::ActuationError;

/// Last position the simulated door settled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorPosition {
    Open,
    Closed,
}

struct DoorState {
    position: Option<DoorPosition>,
    fail_next_open: bool,
    fail_next_close: bool,
}

/// In-memory door that stands in for the motor driver.
///
/// Travel is simulated with a timer sleep (zero by default) and failures can
/// be scripted one call ahead, which is how demos and tests exercise the
/// unknown-status recovery path.
pub struct VirtualDoor {
    opening_travel: Duration,
    closing_travel: Duration,
    state: Mutex<DoorState>,
}

impl Default for VirtualDoor {
    fn default() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl VirtualDoor {
    /// Create a door with the given simulated travel durations.
    #[must_use]
    pub fn new(opening_travel: Duration, closing_travel: Duration) -> Self {
        Self {
            opening_travel,
            closing_travel,
            state: Mutex::new(DoorState {
                position: None,
                fail_next_open: false,
                fail_next_close: false,
            }),
        }
    }

    /// Make the next `open` call fail.
    pub fn fail_next_open(&self) {
        self.state().fail_next_open = true;
    }

    /// Make the next `close` call fail.
    pub fn fail_next_close(&self) {
        self.state().fail_next_close = true;
    }

    /// Last settled position, `None` until the first completed actuation.
    #[must_use]
    pub fn position(&self) -> Option<DoorPosition> {
        self.state().position
    }

    fn state(&self) -> MutexGuard<'_, DoorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DoorActuator for VirtualDoor {
    async fn open(&self) -> Result<(), ActuationError> {
        if std::mem::take(&mut self.state().fail_next_open) {
            return Err(ActuationError::new("simulated drive failure while opening"));
        }
        tokio::time::sleep(self.opening_travel).await;
        self.state().position = Some(DoorPosition::Open);
        tracing::debug!(travel = ?self.opening_travel, "virtual door opened");
        Ok(())
    }

    async fn close(&self) -> Result<(), ActuationError> {
        if std::mem::take(&mut self.state().fail_next_close) {
            return Err(ActuationError::new("simulated drive failure while closing"));
        }
        tokio::time::sleep(self.closing_travel).await;
        self.state().position = Some(DoorPosition::Closed);
        tracing::debug!(travel = ?self.closing_travel, "virtual door closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_settle_open_after_open() {
        let door = VirtualDoor::default();
        door.open().await.unwrap();
        assert_eq!(door.position(), Some(DoorPosition::Open));
    }

    #[tokio::test]
    async fn should_settle_closed_after_close() {
        let door = VirtualDoor::default();
        door.close().await.unwrap();
        assert_eq!(door.position(), Some(DoorPosition::Closed));
    }

    #[tokio::test]
    async fn should_start_with_no_position() {
        let door = VirtualDoor::default();
        assert_eq!(door.position(), None);
    }

    #[tokio::test]
    async fn should_fail_exactly_once_when_scripted() {
        let door = VirtualDoor::default();
        door.fail_next_open();

        let err = door.open().await.unwrap_err();
        assert_eq!(err.to_string(), "simulated drive failure while opening");
        // The failure left no settled position behind.
        assert_eq!(door.position(), None);

        // The script is consumed; the next attempt succeeds.
        door.open().await.unwrap();
        assert_eq!(door.position(), Some(DoorPosition::Open));
    }

    #[tokio::test(start_paused = true)]
    async fn should_simulate_travel_time() {
        let door = VirtualDoor::new(Duration::from_secs(5), Duration::ZERO);
        let start = tokio::time::Instant::now();
        door.open().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
