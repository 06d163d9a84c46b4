//! Shared application state for axum handlers.

use std::sync::Arc;

use roost_app::controller::CoopController;
use roost_app::ports::DoorActuator;

/// Application state shared across all axum handlers.
///
/// Generic over the actuator type to avoid dynamic dispatch. `Clone` is
/// implemented manually so the controller itself does not need to be
/// `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<A> {
    /// The one process-wide coop controller.
    pub controller: Arc<CoopController<A>>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
        }
    }
}

impl<A: DoorActuator + Send + Sync + 'static> AppState<A> {
    /// Create the state from a freshly built controller.
    pub fn new(controller: CoopController<A>) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }

    /// Create the state from a pre-wrapped `Arc` controller.
    ///
    /// Use this when the controller is also shared with the scheduler task.
    pub fn from_arc(controller: Arc<CoopController<A>>) -> Self {
        Self { controller }
    }
}
