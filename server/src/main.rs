//! ROFL Logger Server Entry Point

use rofl_logger_server::config::{AuthConfig, RuntimeConfig, ServerConfig, StoreConfig};
use rofl_logger_server::gateway::AuthGateway;
use rofl_logger_server::store::FileLogStore;
use rofl_logger_server::{api, runtime, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("ROFL Logger v{}", env!("CARGO_PKG_VERSION"));

    // バックエンド選択は起動時の一度きり。解決できなければ起動しない。
    let runtime_config = RuntimeConfig::from_env();
    let backend = match runtime::init_backend(&runtime_config).await {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Error: failed to initialize runtime backend: {}", e);
            std::process::exit(1);
        }
    };
    let identity = backend.identity().clone();
    info!(
        "Runtime backend ready: kind={} app_id={}",
        identity.backend_kind, identity.app_id
    );

    let store_config = StoreConfig::from_env();
    let store = match FileLogStore::new(&store_config.log_file).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: failed to initialize log store: {}", e);
            std::process::exit(1);
        }
    };
    info!("Log store: {}", store_config.log_file.display());

    let gateway = AuthGateway::new(backend, AuthConfig::from_env());

    let state = AppState {
        gateway: Arc::new(gateway),
        store: Arc::new(store),
    };

    let app = api::create_router(state);

    let server_config = ServerConfig::from_env();
    let bind_addr = server_config.bind_addr();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("ROFL Logger server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    info!("Server shutdown complete");
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
