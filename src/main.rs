use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use botify_api::{
    api::{create_router, AppState},
    config::Config,
    db,
    services::{data_logger::DataLogger, experiment::Experiment, random::ThreadRandom},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    // Catalog stores
    let redis_client = db::create_redis_client(&config.redis_url)?;
    let stores = db::redis_catalog(db::connect(redis_client).await?);

    let experiment = Experiment::new(config.experiment_name.clone());
    tracing::info!(experiment = experiment.name(), "Experiment configured");

    let (data_logger, data_logger_handle) = DataLogger::new(config.data_log_dir.clone().into());

    let state = AppState::new(
        stores,
        Arc::new(experiment),
        Arc::new(ThreadRandom),
        config.catalog_size,
        data_logger,
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    data_logger_handle.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
