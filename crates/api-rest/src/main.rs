//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, without loading `.env`.
//!
//! ## Intended use
//! Useful for development and debugging when the environment is already set up. The workspace's
//! main `rxdesk-run` binary does the same after loading `.env`.

use api_rest::{router, AppState};
use rx_core::CoreConfig;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the RxDesk REST API server.
///
/// # Environment Variables
/// - `RX_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `RX_DATA_DIR`: Directory for record storage (default: "rx_data")
/// - `RX_SEED_SAMPLES`: Seed the sample pharmacies when truthy
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration or sample data cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("rx_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("RX_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = Arc::new(CoreConfig::from_env()?);

    tracing::info!(
        "-- Starting {} REST API on {} (data dir {})",
        cfg.service_name(),
        addr,
        cfg.data_dir().display()
    );

    let state = AppState::new(cfg.clone());
    if cfg.seed_samples() {
        state.pharmacies.seed_samples()?;
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
