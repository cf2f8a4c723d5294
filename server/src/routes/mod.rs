//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the chat proxy API under a single Axum router. The portfolio site
//! itself is served as static files from `WEBSITE_DIR` at `/`, so one
//! process hosts both the pages and the `/api/chat` endpoint they call.

pub mod chat;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes plus the static portfolio site as fallback.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let website = ServeDir::new(website_dir()).append_index_html_on_directories(true);

    Router::new()
        .route(
            "/api/chat",
            post(chat::post_chat).fallback(chat::method_not_allowed),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .fallback_service(website)
}

/// Resolve the path to the portfolio website directory.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("website"))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
