//! # roost-adapter-virtual
//!
//! Virtual/demo adapter that provides a simulated door actuator and a
//! logging notifier for testing and demonstration purposes.
//!
//! ## Provided implementations
//!
//! | Type | Port | Behaviour |
//! |------|------|-----------|
//! | [`VirtualDoor`] | `DoorActuator` | Simulated travel time, scripted failures |
//! | [`TracingNotifier`] | `Notifier` | Logs every notification at `INFO` |
//!
//! ## Dependency rule
//!
//! Depends on `roost-app` (port traits) and `roost-domain` only.

mod door;
mod notify;

pub use door::{DoorPosition, VirtualDoor};
pub use notify::TracingNotifier;
