use anyhow::Result;
use tracing::{debug, error, info, warn};

use portfolio_api::api::{self, state::ApiState};
use portfolio_api::global::{
    config::AppConfig,
    database::DatabaseHandle,
    error::AppError,
    logging,
    state::{share, SharedDatabase},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match AppConfig::load().map_err(AppError::from) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let _log_guard = logging::init(&config.app);

    info!("Starting portfolio-api...");
    debug!(?config, "Loaded configuration");

    let db = connect_database(&config).await?;

    if config.api.enabled {
        let state = ApiState::new(db.clone());
        let served = api::server::start_api_server(
            state,
            &config.api.host,
            config.api.port,
            shutdown_signal(),
        )
        .await;

        if let Err(e) = served {
            error!(error = %e, "API server stopped with an error");
            db.write().await.disconnect().await;
            return Err(anyhow::anyhow!(e));
        }
    } else {
        info!("API server is disabled in config, press Ctrl+C to shutdown");
        shutdown_signal().await;
    }

    db.write().await.disconnect().await;
    info!("Shutdown complete");

    Ok(())
}

/// Build the handle from config and connect it before anything else can use it.
async fn connect_database(config: &AppConfig) -> Result<SharedDatabase, AppError> {
    let mut db = DatabaseHandle::new(&config.database);
    debug!(url = %db.connection_url(), "Resolved MongoDB connection URL");

    db.connect().await?;

    Ok(share(db))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => warn!("Shutdown signal received, initiating graceful shutdown"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
