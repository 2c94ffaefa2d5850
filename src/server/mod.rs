//! HTTP server.
//!
//! Routes:
//! - `GET /`, `GET /health`: liveness
//! - `POST /login`: credentials in, bearer token out
//! - `GET|POST|DELETE /bookmarks`: shared bookmark list (token required)
//! - `GET|POST /messages`, `POST /messages/{id}/like`, `DELETE /messages/{id}`:
//!   message board (token required)

mod extract;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{header, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

pub use extract::{AuthUser, ForwardedFor, JsonBody};
pub use state::AppState;

use crate::config::{Config, CORS_MAX_AGE_SECS};

/// Builds the router with CORS applied to every route.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::login))
        .route(
            "/bookmarks",
            get(handlers::list_bookmarks)
                .post(handlers::add_bookmark)
                .delete(handlers::remove_bookmark),
        )
        .route(
            "/messages",
            get(handlers::list_messages).post(handlers::create_message),
        )
        .route("/messages/{id}/like", post(handlers::like_message))
        .route("/messages/{id}", delete(handlers::delete_message))
        .layer(cors)
        .with_state(state)
}

/// Serves `state` on an already bound listener until `shutdown` resolves.
///
/// Peer addresses are recorded so login alerts have an address to report when
/// no `X-Forwarded-For` header is present.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
}

/// Builds the state from `config`, binds and serves until Ctrl+C or SIGTERM.
pub async fn start_server(config: Config) -> Result<()> {
    let state = AppState::from_config(&config).await?;

    let address = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {address}"))?;

    info!("Listening on http://{address}/");
    serve(listener, state, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await
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
