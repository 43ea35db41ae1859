use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use configs::{AppConfig, CorsConfig, ServerConfig};
use migration::{Migrator, MigratorTrait};
use models::db::connect_with_config;
use service::student::repo::seaorm::SeaOrmStudentRepository;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// CORS for the single configured frontend origin; other origins get no CORS headers.
pub fn build_cors(cfg: &CorsConfig) -> Result<CorsLayer, StartupError> {
    let origin = HeaderValue::from_str(&cfg.allowed_origin)
        .map_err(|e| StartupError::InvalidConfig(format!("cors.allowed_origin: {e}")))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}

pub fn load_bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server bind address: {e}")))
}

/// Assemble the router over any store; used by `run` and by the HTTP tests.
pub fn build_app(state: ServerState, cors: &CorsConfig) -> Result<Router, StartupError> {
    Ok(routes::build_router(state, build_cors(cors)?))
}

/// Public entry: connect, migrate, and serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = load_bind_addr(&cfg.server)?;

    let db = connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        Migrator::up(&db, None).await?;
        info!(event = "migrations_applied", "schema up to date");
    }

    let repo = Arc::new(SeaOrmStudentRepository::new(db));
    let state = ServerState::new(repo);
    let app = build_app(state, &cfg.cors)?;

    info!(%addr, origin = %cfg.cors.allowed_origin, event = "listening", "starting student portal server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(event = "stopped", "server stopped");
    Ok(())
}
