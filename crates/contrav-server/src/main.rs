#![forbid(unsafe_code)]

use contrav_server::{build_router, validate_startup_config_contract, ApiConfig, AppState};
use contrav_store::Store;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ApiConfig::from_env();
    init_tracing(config.log_json);
    validate_startup_config_contract(&config)?;

    let store = if config.db_path == ":memory:" {
        Store::open_in_memory()
    } else {
        Store::open(Path::new(&config.db_path))
    }
    .map_err(|e| format!("open store at {}: {e}", config.db_path))?;

    let state = AppState::with_config(Arc::new(store), config.clone());
    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|e| format!("bind {} failed: {e}", config.bind))?;
    info!("contrav-server listening on {}", config.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
