//! JSON REST handlers for the coop resource.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use roost_app::controller::UpdateCommand;
use roost_app::ports::DoorActuator;
use roost_domain::condition::ConditionSpec;
use roost_domain::status::DoorStatus;
use roost_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of the `GET /api/coop` response.
#[derive(Serialize)]
pub struct CoopBody {
    pub status: DoorStatus,
    pub automatic: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub opening_time: Timestamp,
    pub closing_time: Timestamp,
}

/// Request body for updating the coop configuration.
#[derive(Deserialize)]
pub struct UpdateCoopRequest {
    pub status: String,
    pub automatic: bool,
    pub opening_condition: ConditionSpec,
    pub closing_condition: ConditionSpec,
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<CoopBody>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the update and transition endpoints.
pub enum CommandResponse {
    NoContent,
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/coop`
pub async fn get<A>(State(state): State<AppState<A>>) -> GetResponse
where
    A: DoorActuator + Send + Sync + 'static,
{
    let controller = &state.controller;
    GetResponse::Ok(Json(CoopBody {
        status: controller.status(),
        automatic: controller.is_automatic(),
        latitude: controller.latitude(),
        longitude: controller.longitude(),
        opening_time: controller.opening_time(),
        closing_time: controller.closing_time(),
    }))
}

/// `POST /api/coop`
pub async fn update<A>(
    State(state): State<AppState<A>>,
    Json(req): Json<UpdateCoopRequest>,
) -> Result<CommandResponse, ApiError>
where
    A: DoorActuator + Send + Sync + 'static,
{
    state.controller.update(UpdateCommand {
        status: req.status,
        automatic: req.automatic,
        opening: req.opening_condition,
        closing: req.closing_condition,
    })?;
    Ok(CommandResponse::NoContent)
}

/// `POST /api/coop/open`
pub async fn open<A>(State(state): State<AppState<A>>) -> Result<CommandResponse, ApiError>
where
    A: DoorActuator + Send + Sync + 'static,
{
    state.controller.open().await?;
    Ok(CommandResponse::NoContent)
}

/// `POST /api/coop/close`
pub async fn close<A>(State(state): State<AppState<A>>) -> Result<CommandResponse, ApiError>
where
    A: DoorActuator + Send + Sync + 'static,
{
    state.controller.close().await?;
    Ok(CommandResponse::NoContent)
}
