use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;

use crate::utils::config::{AppConfig, GithubSettings};

pub mod error;
pub mod handlers;

#[derive(Debug, Clone)]
pub struct AppState {
    pub github: Arc<GithubSettings>,
}

pub fn router(state: AppState, static_file: &Path) -> Router {
    Router::new()
        .route("/api/pulls", get(handlers::list_pulls))
        .route("/api/pulls/:number", get(handlers::get_pull))
        .route("/api/pulls/:number/comments", get(handlers::list_comments))
        .route("/api/review-requests", get(handlers::review_requests))
        .fallback_service(ServeFile::new(static_file))
        .layer(cors_layer())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    log::info!(
        "[log_request] {} {} -> {} in {:?}",
        method, path, response.status(), started.elapsed()
    );
    response
}

pub async fn serve(config: AppConfig) -> std::io::Result<()> {
    let state = AppState { github: Arc::new(config.github) };
    let app = router(state, &config.static_file);
    let listener = TcpListener::bind(config.bind_addr).await?;
    log::info!("[serve] Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("[shutdown_signal] Unable to listen for Ctrl-C: {:?}", e);
        std::future::pending::<()>().await;
    }
    log::info!("[shutdown_signal] Shutting down");
}
