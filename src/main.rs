//! HTTP server for the Prima Engine.
//!
//! Environment:
//! - `PRIMA_CONFIG_DIR`: fiscal-year directory to load (built-in 2025 values when unset)
//! - `PRIMA_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use prima_engine::api::{AppState, create_router};
use prima_engine::calculation::PrimaCalculator;
use prima_engine::config::{ConfigLoader, FiscalConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("PRIMA_CONFIG_DIR") {
        Ok(dir) => ConfigLoader::load(&dir)?.into_config(),
        Err(_) => {
            info!("PRIMA_CONFIG_DIR not set, using built-in fiscal year 2025");
            FiscalConfig::default()
        }
    };
    info!(
        fiscal_year = config.metadata().year,
        uvt_value = %config.parameters().uvt_value,
        brackets = config.brackets().len(),
        "Fiscal configuration ready"
    );

    let app = create_router(AppState::new(PrimaCalculator::new(config)));

    let addr = std::env::var("PRIMA_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
