//! Router construction and the serve loop.

use std::future::Future;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::{health, market, session};
use crate::state::AppState;

/// Build the router with every route and middleware attached.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/login", get(session::login))
        .route("/reset_token", get(session::reset_token))
        .route("/group/portfolio", get(session::portfolio))
        .route("/group/pull/{params}", get(market::pull))
        .route("/group/{action}/{params}", get(market::action))
        .route("/markets", get(market::markets))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown)
        .await
}
