//! # roost-adapter-http-axum
//!
//! HTTP adapter — exposes the coop controller surface as a JSON REST API.
//!
//! ## Routes
//!
//! | Method | Path | Behaviour |
//! |--------|------|-----------|
//! | `GET`  | `/health` | Liveness probe |
//! | `GET`  | `/api/coop` | Status, mode, coordinates, today's thresholds |
//! | `POST` | `/api/coop` | Administrative update (status attestation, mode, conditions) |
//! | `POST` | `/api/coop/open` | Manual open |
//! | `POST` | `/api/coop/close` | Manual close |
//!
//! Authentication and response caching are deliberately out of scope; put
//! this behind a reverse proxy if the coop faces the open internet.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
