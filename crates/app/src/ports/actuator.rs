//! Door actuator port — the physical door-moving mechanism.

use std::future::Future;

use roost_domain::error::ActuationError;

/// Drives the physical coop door.
///
/// Both operations are allowed to block for the mechanical travel time.
/// The contract only requires eventual completion or failure; there is no
/// partial-progress reporting, and a call cannot be cancelled mid-travel.
/// Any timeout policy belongs to the implementation, not to the caller.
pub trait DoorActuator {
    /// Open the door.
    fn open(&self) -> impl Future<Output = Result<(), ActuationError>> + Send;

    /// Close the door.
    fn close(&self) -> impl Future<Output = Result<(), ActuationError>> + Send;
}

impl<T: DoorActuator + Send + Sync> DoorActuator for std::sync::Arc<T> {
    fn open(&self) -> impl Future<Output = Result<(), ActuationError>> + Send {
        (**self).open()
    }

    fn close(&self) -> impl Future<Output = Result<(), ActuationError>> + Send {
        (**self).close()
    }
}
