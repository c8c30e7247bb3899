//! Till Variance Engine HTTP server.
//!
//! ## Environment
//! - `TILL_ENGINE_CONFIG` - retail location config directory (default `./config/store_001`)
//! - `TILL_ENGINE_ADDR` - listen address (default `0.0.0.0:3000`)
//! - `RUST_LOG` - log filter (default `info,till_engine=debug`)

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use till_engine::api::{AppState, create_router};
use till_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/store_001";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till_engine=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir =
        std::env::var("TILL_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = std::env::var("TILL_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        retail_location = %config.retail_location().id,
        "Loaded retail location configuration"
    );

    let router = create_router(AppState::new(config));
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Till engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
