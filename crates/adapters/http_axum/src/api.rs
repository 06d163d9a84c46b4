//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod coop;

use axum::Router;
use axum::routing::{get, post};

use roost_app::ports::DoorActuator;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<A>() -> Router<AppState<A>>
where
    A: DoorActuator + Send + Sync + 'static,
{
    Router::new()
        .route("/coop", get(coop::get::<A>).post(coop::update::<A>))
        .route("/coop/open", post(coop::open::<A>))
        .route("/coop/close", post(coop::close::<A>))
}
