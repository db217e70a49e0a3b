//! Symptomatch API Server
//!
//! Run with: cargo run -p symptomatch-web --bin symptomatch-server

use std::sync::Arc;

use anyhow::Context;
use symptomatch_config::Config;
use symptomatch_db::Database;
use symptomatch_llm::{build_backend, SymptomAdvisor};
use symptomatch_web::{router::build_router, state::AppState, telemetry};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    info!("Starting Symptomatch API server...");

    let config = Config::load().context("failed to load configuration")?;

    let db = Database::connect(&config.database)
        .await
        .context("failed to open disease store")?;
    info!(backend = db.backend_name(), "Disease store ready");

    let backend = build_backend(&config.llm);
    info!(provider = backend.provider(), model = backend.model_id(), "AI backend configured");
    let advisor = Arc::new(SymptomAdvisor::new(backend));

    let app = build_router(AppState::new(db, advisor));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
