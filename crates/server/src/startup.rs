use configs::{AppConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{errors::StartupError, routes, state::AppState};
use service::{store, AnimalService};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

async fn bind(server: &ServerConfig) -> Result<TcpListener, StartupError> {
    let addr = format!("{}:{}", server.host, server.port);
    TcpListener::bind((server.host.as_str(), server.port))
        .await
        .map_err(|source| StartupError::Bind { addr, source })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Connect the document store, build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = store::connect(&cfg.database).await.map_err(StartupError::Store)?;
    let state = AppState::new(AnimalService::new(store));
    let app = routes::build_router(state, build_cors());

    let listener = bind(&cfg.server).await?;
    let addr = listener.local_addr()?;
    info!(%addr, database = %cfg.database.database_name, "starting animal api");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
