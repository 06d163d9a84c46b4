//! # roost-domain
//!
//! Pure domain model for the roost coop door automation system.
//!
//! ## Responsibilities
//! - Define the door **status** state machine values
//! - Define **conditions** (fixed clock time or solar event + offset) that
//!   yield today's opening and closing thresholds
//! - Contain the solar-position math behind sun-based conditions
//! - Define the closed error enumeration shared across the workspace
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod condition;
pub mod error;
pub mod solar;
pub mod status;
pub mod time;
