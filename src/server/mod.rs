use crate::config::Config;
use crate::tmdb::{MovieSource, TmdbClient};
use anyhow::{Context, Result};
use axum::{http::StatusCode, middleware, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod routes;

use auth::RoutePolicy;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Movie data backend (the TMDb client in production)
    pub source: Arc<dyn MovieSource>,
    /// Compiled public-route patterns
    pub route_policy: Arc<RoutePolicy>,
}

impl AppContext {
    pub fn new(config: Config, source: Arc<dyn MovieSource>) -> Result<Self> {
        let route_policy = RoutePolicy::new(&config.server.auth.public_routes)
            .context("Invalid public route pattern")?;

        Ok(Self {
            config: Arc::new(config),
            source,
            route_policy: Arc::new(route_policy),
        })
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(routes::page_routes())
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(ctx.clone(), auth::auth_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Build the TMDb client from config and start the HTTP server.
///
/// Fails before binding when no API key is configured.
pub async fn start_server(config: Config) -> Result<()> {
    let client = TmdbClient::from_config(&config.tmdb).context("Cannot start without TMDb access")?;
    start_server_with_source(config, Arc::new(client)).await
}

/// Start the HTTP server against an arbitrary movie source
pub async fn start_server_with_source(config: Config, source: Arc<dyn MovieSource>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    if !config.server.auth.enforce {
        tracing::info!("Route protection is not enforced; all requests are allowed");
    }

    let ctx = AppContext::new(config, source)?;
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
