use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use accounts_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(&cfg.log_level, cfg.log_json);

    // Selector errors are fatal: a degraded store is worse than no store.
    let backend = cfg.backend_kind().map_err(|e| {
        error!("Invalid repository backend: {}", e);
        e
    })?;
    let repository = api::repositories::RepositoryFactory::create(backend).map_err(|e| {
        error!("Failed to construct repository backend: {}", e);
        e
    })?;

    info!("Repository backend: {}", backend);
    info!("Environment: {}", cfg.environment);

    let state = Arc::new(api::AppState::new(repository, cfg.clone()));
    let app = api::app_router(state);

    let host: IpAddr = cfg
        .host
        .parse()
        .with_context(|| format!("invalid host address '{}'", cfg.host))?;
    let addr = SocketAddr::new(host, cfg.port);
    info!("accounts-api listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
