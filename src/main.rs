use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use telco_churn_api::api::{AppState, PageLimits};
use telco_churn_api::app::router;
use telco_churn_api::config::config;
use telco_churn_api::database::ConnectionManager;
use telco_churn_api::predictions::PredictionLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, MONGO_URI, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("telco_churn_api=info,tower_http=info")),
        )
        .init();

    let config = config();
    tracing::info!("Starting Telco churn API in {:?} mode", config.environment);

    let db = Arc::new(ConnectionManager::connect_lazy(&config.database).await?);
    let predictions = PredictionLogger::open(&config.predictions.db_path).await?;
    let state = AppState::new(
        db.clone(),
        predictions.clone(),
        PageLimits::from(&config.api),
        config.predictions.data_dir.clone(),
    );
    let app = router(state, config.api.enable_request_logging);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Telco churn API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    predictions.close().await;
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
