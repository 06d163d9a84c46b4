//! Common error types used across the workspace.
//!
//! A single closed enumeration so callers can branch on kind rather than
//! on message text. Each variant maps to exactly one caller-visible failure
//! of the controller surface.

use std::error::Error;
use std::fmt;

/// Failure reported by a door actuator.
///
/// Carries a human-readable message and, when the adapter has one, the
/// underlying driver error as a source.
#[derive(Debug)]
pub struct ActuationError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ActuationError {
    /// Create an actuation error from a message alone.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying driver error.
    #[must_use]
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for ActuationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ActuationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}

/// Everything that can go wrong when driving the coop.
#[derive(Debug, thiserror::Error)]
pub enum CoopError {
    /// A condition value string could not be parsed.
    #[error("invalid {what} format: {value:?}")]
    InvalidFormat {
        /// What was being parsed (`"schedule"`, `"offset"`, …).
        what: &'static str,
        /// The rejected input.
        value: String,
    },

    /// An update request carried a status literal other than
    /// `"opened"` or `"closed"`.
    #[error("invalid status literal: {0:?}")]
    InvalidStatus(String),

    /// Manual control is disallowed while automation owns the door.
    #[error("cannot control the coop manually while automatic mode is enabled")]
    AutomaticModeEnabled,

    /// The door's physical state is not trusted; no actuation is safe.
    #[error("the coop status is unknown, reconcile it manually first")]
    StatusUnknown,

    /// Open requested but the door is already opened.
    #[error("the coop is already opened")]
    AlreadyOpened,

    /// Close requested but the door is already closed.
    #[error("the coop is already closed")]
    AlreadyClosed,

    /// A transition requested while an opening actuation is in flight.
    #[error("the coop is already opening")]
    AlreadyOpening,

    /// A transition requested while a closing actuation is in flight.
    #[error("the coop is already closing")]
    AlreadyClosing,

    /// The actuator call itself failed; the door status is now unknown.
    #[error("error while actuating the door")]
    ActuationFailed(#[source] ActuationError),
}
