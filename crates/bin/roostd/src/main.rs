//! # roostd — roost daemon
//!
//! Composition root that wires everything together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (TOML file, env vars)
//! - Initialise the `tracing` subscriber
//! - Construct the door actuator and notifiers (adapters)
//! - Construct the coop controller, injecting adapters via port traits
//! - Spawn the scheduler task driving the automatic evaluation
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use roost_adapter_http_axum::router;
use roost_adapter_http_axum::state::AppState;
use roost_adapter_virtual::{TracingNotifier, VirtualDoor};
use roost_app::controller::CoopController;
use roost_app::ports::Notifier;
use roost_app::scheduler;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("error while loading the configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Door
    let door = VirtualDoor::new(
        Duration::from_secs(config.door.opening_duration_secs),
        Duration::from_secs(config.door.closing_duration_secs),
    );

    // Notifiers
    let notifiers: Vec<Arc<dyn Notifier>> = vec![Arc::new(TracingNotifier)];

    // Controller
    let controller = CoopController::new(door, config.coop.settings())
        .context("error while creating the opening and closing conditions")?
        .with_notifiers(notifiers);
    let controller = Arc::new(controller);

    // Scheduler
    tokio::spawn(scheduler::run(Arc::clone(&controller)));

    // HTTP
    let app = router::build(AppState::from_arc(controller));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("error while binding to {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "roostd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error while serving")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install the shutdown handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
