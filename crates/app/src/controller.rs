//! Coop controller — the door state machine and its use-cases.
//!
//! The controller owns the current [`DoorStatus`], the automatic-mode flag
//! and the two active [`Condition`]s behind a single mutex. Guard checks and
//! the mutation to an in-flight status happen atomically under that lock, so
//! two concurrent transition attempts can never both reach the actuator: the
//! loser observes `Opening`/`Closing` and fails with the matching `Already*`
//! error. The lock is released before the actuator call, which may block for
//! the whole mechanical travel time, so status queries stay responsive while
//! the door moves.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use roost_domain::condition::{
    Condition, ConditionSpec, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
};
use roost_domain::error::CoopError;
use roost_domain::solar::SolarEvent;
use roost_domain::status::DoorStatus;
use roost_domain::time::{self, Timestamp};

use crate::ports::{DoorActuator, Notifier};

/// Initial controller configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct CoopSettings {
    /// Degrees north; `0.0` falls back to [`DEFAULT_LATITUDE`].
    pub latitude: f64,
    /// Degrees east; `0.0` falls back to [`DEFAULT_LONGITUDE`].
    pub longitude: f64,
    /// Whether the scheduler owns the door from the start.
    pub automatic: bool,
    /// Opening threshold specification.
    pub opening: ConditionSpec,
    /// Closing threshold specification.
    pub closing: ConditionSpec,
}

/// Administrative override of the controller configuration.
///
/// The status literal is an operator attestation of the door's real-world
/// state; the controller cannot verify the claim against the actuator.
#[derive(Debug, Clone)]
pub struct UpdateCommand {
    /// Desired status literal, `"opened"` or `"closed"`.
    pub status: String,
    /// New automatic-mode flag.
    pub automatic: bool,
    /// New opening condition.
    pub opening: ConditionSpec,
    /// New closing condition.
    pub closing: ConditionSpec,
}

/// Mutable controller state, guarded by one mutex.
struct ControllerState {
    status: DoorStatus,
    automatic: bool,
    opening: Condition,
    closing: Condition,
}

/// The coop door controller.
///
/// Constructed once at process start and shared by `Arc` between the
/// scheduler task and the transport layer. The actuator is exclusively
/// owned: no other component may invoke it.
pub struct CoopController<A> {
    actuator: A,
    notifiers: Vec<Arc<dyn Notifier>>,
    latitude: f64,
    longitude: f64,
    state: Mutex<ControllerState>,
}

/// Direction of a door transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Open,
    Close,
}

impl Transition {
    fn in_flight(self) -> DoorStatus {
        match self {
            Self::Open => DoorStatus::Opening,
            Self::Close => DoorStatus::Closing,
        }
    }

    fn settled(self) -> DoorStatus {
        match self {
            Self::Open => DoorStatus::Opened,
            Self::Close => DoorStatus::Closed,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Open => "opening",
            Self::Close => "closing",
        }
    }
}

impl<A: DoorActuator> CoopController<A> {
    /// Build a controller from its settings, resolving both condition specs.
    ///
    /// The initial status is [`DoorStatus::Unknown`] until an operator
    /// attests the real state via [`update`](Self::update) or a transition
    /// settles.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::InvalidFormat`] when a condition spec cannot be
    /// parsed; fatal at startup by design.
    pub fn new(actuator: A, settings: CoopSettings) -> Result<Self, CoopError> {
        let latitude = if settings.latitude == 0.0 {
            DEFAULT_LATITUDE
        } else {
            settings.latitude
        };
        let longitude = if settings.longitude == 0.0 {
            DEFAULT_LONGITUDE
        } else {
            settings.longitude
        };

        let opening = settings
            .opening
            .resolve(SolarEvent::Sunrise, latitude, longitude)?;
        let closing = settings
            .closing
            .resolve(SolarEvent::Sunset, latitude, longitude)?;

        Ok(Self {
            actuator,
            notifiers: Vec::new(),
            latitude,
            longitude,
            state: Mutex::new(ControllerState {
                status: DoorStatus::Unknown,
                automatic: settings.automatic,
                opening,
                closing,
            }),
        })
    }

    /// Attach the notifiers alerted on lifecycle events.
    #[must_use]
    pub fn with_notifiers(mut self, notifiers: Vec<Arc<dyn Notifier>>) -> Self {
        self.notifiers = notifiers;
        self
    }

    /// Current door status.
    #[must_use]
    pub fn status(&self) -> DoorStatus {
        self.state().status
    }

    /// Whether automation currently owns the door.
    #[must_use]
    pub fn is_automatic(&self) -> bool {
        self.state().automatic
    }

    /// Coop latitude, degrees north.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Coop longitude, degrees east.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Today's opening threshold.
    #[must_use]
    pub fn opening_time(&self) -> Timestamp {
        self.state().opening.opening_time(time::now())
    }

    /// Today's closing threshold.
    #[must_use]
    pub fn closing_time(&self) -> Timestamp {
        self.state().closing.closing_time(time::now())
    }

    /// Manually open the coop door.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::AutomaticModeEnabled`] while automation owns the
    /// door, one of the illegal-transition kinds when the current status
    /// forbids opening, or [`CoopError::ActuationFailed`] when the actuator
    /// itself fails (the status is then `Unknown`).
    #[tracing::instrument(skip(self))]
    pub async fn open(&self) -> Result<(), CoopError> {
        if self.is_automatic() {
            return Err(CoopError::AutomaticModeEnabled);
        }
        self.transition(Transition::Open).await
    }

    /// Manually close the coop door.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`open`](Self::open), with the closing-side
    /// illegal-transition kinds.
    #[tracing::instrument(skip(self))]
    pub async fn close(&self) -> Result<(), CoopError> {
        if self.is_automatic() {
            return Err(CoopError::AutomaticModeEnabled);
        }
        self.transition(Transition::Close).await
    }

    /// Replace status, mode and both conditions in one atomic swap.
    ///
    /// This is an administrative override, not an actuation: the operator
    /// attests the door's real-world state, e.g. during manual correction
    /// or first registration.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::InvalidStatus`] for a status literal other than
    /// `"opened"`/`"closed"`, or [`CoopError::InvalidFormat`] for an
    /// unparsable condition spec. Nothing is mutated on error.
    #[tracing::instrument(skip(self, command), fields(status = %command.status))]
    pub fn update(&self, command: UpdateCommand) -> Result<(), CoopError> {
        let status = match command.status.as_str() {
            "opened" => DoorStatus::Opened,
            "closed" => DoorStatus::Closed,
            other => return Err(CoopError::InvalidStatus(other.to_string())),
        };

        let opening = command
            .opening
            .resolve(SolarEvent::Sunrise, self.latitude, self.longitude)?;
        let closing = command
            .closing
            .resolve(SolarEvent::Sunset, self.latitude, self.longitude)?;

        let mut state = self.state();
        state.status = status;
        state.automatic = command.automatic;
        state.opening = opening;
        state.closing = closing;

        tracing::info!(status = %status, automatic = command.automatic, "coop configuration updated");
        Ok(())
    }

    /// Evaluate the door against today's thresholds and actuate if needed.
    ///
    /// Invoked by the scheduler on every tick. Failures are logged and
    /// notified, never propagated: the scheduler must keep ticking.
    pub async fn check(&self) {
        self.check_at(time::now()).await;
    }

    async fn check_at(&self, now: Timestamp) {
        let (status, opening_time, closing_time) = {
            let state = self.state();
            if !state.automatic {
                tracing::debug!(status = %state.status, "automatic mode is disabled, skipping check");
                return;
            }
            (
                state.status,
                state.opening.opening_time(now),
                state.closing.closing_time(now),
            )
        };

        tracing::debug!(
            status = %status,
            opening_time = %opening_time,
            closing_time = %closing_time,
            "checking the coop"
        );

        match status {
            DoorStatus::Unknown => {
                tracing::warn!("the coop status is unknown, manual intervention is required");
            }
            DoorStatus::Opening | DoorStatus::Closing => {
                tracing::debug!(status = %status, "an actuation is already in flight");
            }
            DoorStatus::Closed if now >= opening_time && now < closing_time => {
                match self.transition(Transition::Open).await {
                    Ok(()) => tracing::info!("the coop has been opened"),
                    Err(err) => tracing::error!(error = %err, "error while opening the coop"),
                }
            }
            DoorStatus::Opened if now >= closing_time => {
                match self.transition(Transition::Close).await {
                    Ok(()) => tracing::info!("the coop has been closed"),
                    Err(err) => tracing::error!(error = %err, "error while closing the coop"),
                }
            }
            DoorStatus::Closed | DoorStatus::Opened => {}
        }
    }

    /// Guarded transition shared by the manual and automatic paths.
    async fn transition(&self, transition: Transition) -> Result<(), CoopError> {
        {
            let mut state = self.state();
            match state.status {
                DoorStatus::Unknown => return Err(CoopError::StatusUnknown),
                DoorStatus::Opening => return Err(CoopError::AlreadyOpening),
                DoorStatus::Closing => return Err(CoopError::AlreadyClosing),
                DoorStatus::Opened if transition == Transition::Open => {
                    return Err(CoopError::AlreadyOpened);
                }
                DoorStatus::Closed if transition == Transition::Close => {
                    return Err(CoopError::AlreadyClosed);
                }
                DoorStatus::Opened | DoorStatus::Closed => {}
            }
            // The in-flight status is what rejects re-entrant attempts while
            // the actuator travels outside this lock.
            state.status = transition.in_flight();
        }

        let result = match transition {
            Transition::Open => self.actuator.open().await,
            Transition::Close => self.actuator.close().await,
        };

        match result {
            Ok(()) => {
                self.state().status = transition.settled();
                Ok(())
            }
            Err(cause) => {
                self.state().status = DoorStatus::Unknown;
                self.notify_all(&format!(
                    "Error while {} the coop door, the status is now unknown.",
                    transition.verb()
                ));
                Err(CoopError::ActuationFailed(cause))
            }
        }
    }

    /// Broadcast a message to every attached notifier, best-effort.
    pub fn notify_all(&self, message: &str) {
        for notifier in &self.notifiers {
            notifier.notify(message);
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn actuator(&self) -> &A {
        &self.actuator
    }
}
