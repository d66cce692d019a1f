//! HTTP surface
//!
//! JSON API under `/api/v1`, served with axum and shut down gracefully on
//! Ctrl+C or SIGTERM.

pub mod error;
pub mod handlers;
pub mod resources;

use std::future::Future;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tinderbox_domain::constants::API_PREFIX;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::context::AppContext;

pub use error::ApiError;

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    let api = Router::new()
        .route("/people/recommended", get(handlers::recommended))
        .route("/people/liked", get(handlers::liked))
        .route("/people/{person_id}/like", post(handlers::like))
        .route("/people/{person_id}/dislike", post(handlers::dislike))
        .route("/health", get(handlers::health));

    Router::new().nest(API_PREFIX, api).with_state(ctx)
}

/// Serve the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, ctx: Arc<AppContext>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        info!(%address, "server listening");
    }
    axum::serve(listener, router(ctx)).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(err) => {
                error!(error = %err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
