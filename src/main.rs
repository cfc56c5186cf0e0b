use api_rest::{router, AppState};
use rx_core::CoreConfig;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the RxDesk application
///
/// Loads `.env`, resolves the core configuration once, optionally seeds the sample pharmacies
/// and serves the REST API (with Swagger UI at `/swagger-ui`) until Ctrl-C.
///
/// # Environment Variables
/// - `RX_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `RX_DATA_DIR`: Directory for record storage (default: "rx_data")
/// - `RX_SERVICE_NAME`: Name reported by `/health` (default: "rxdesk")
/// - `RX_SEED_SAMPLES`: Seed the sample pharmacies when set to 1/true/yes/on
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rxdesk_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("rx_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("RX_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = Arc::new(CoreConfig::from_env()?);

    let state = AppState::new(cfg.clone());
    if cfg.seed_samples() {
        let added = state.pharmacies.seed_samples()?;
        tracing::info!("++ Seeded {} sample pharmacies", added);
    }

    tracing::info!("++ Starting {} REST on {}", cfg.service_name(), rest_addr);
    tracing::info!("++ Data directory: {}", cfg.data_dir().display());

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- {} stopped", cfg.service_name());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
