//! Scheduler — the periodic timer driving the automatic evaluation.
//!
//! One background task loops forever, awaiting each [`CoopController::check`]
//! before the next tick, so at most one check is ever in flight. Ticks that
//! elapse while a check is still running (a slow actuator, for instance) are
//! skipped rather than queued: a backlog of stale evaluations has no value.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::controller::CoopController;
use crate::ports::DoorActuator;

/// Cadence of the automatic evaluation.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(10);

/// Run the scheduler loop at the default [`CHECK_INTERVAL`].
///
/// Never returns; spawn it as a background task and let it die with the
/// process.
pub async fn run<A>(controller: Arc<CoopController<A>>)
where
    A: DoorActuator + Send + Sync,
{
    run_every(controller, CHECK_INTERVAL).await;
}

/// Run the scheduler loop at a custom cadence.
///
/// Before the first tick, broadcasts that the door status is unknown:
/// actuator truth has not been observed yet and an operator should attest
/// the real state.
pub async fn run_every<A>(controller: Arc<CoopController<A>>, period: Duration)
where
    A: DoorActuator + Send + Sync,
{
    controller.notify_all("The status of the coop is unknown.");
    tracing::info!(period = ?period, "starting the coop scheduler");

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // An interval yields immediately on its first tick; consume it so the
    // first check happens one full period after startup.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        controller.check().await;
    }
}
