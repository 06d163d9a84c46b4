//! # roost-app
//!
//! Application layer — the coop controller and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DoorActuator` — blocking open/close of the physical door
//!   - `Notifier` — best-effort out-of-band alerts
//! - Provide the **`CoopController`** use-cases: manual `open`/`close`,
//!   administrative `update`, and the automatic `check` evaluation
//! - Provide the **scheduler loop** that drives `check` on a fixed cadence
//!   without overlap
//!
//! ## Dependency rule
//! Depends on `roost-domain` only (plus `tokio::time` for the scheduler).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod controller;
pub mod ports;
pub mod scheduler;
