//! Router assembly: stage pages, grading endpoint, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - index and the four stage pages
/// - grading at `/submit` and `/fake-submit` (both always mounted), plus the
///   configured submit path if it differs
/// - `/static` served from the configured directory
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new(&state.config.static_dir);
    let submit_path = state.config.grading.submit_path.clone();

    let mut router = Router::new()
        .route("/", get(http::http_index))
        .route("/pdf-demo", get(http::http_pdf_demo))
        .route("/image-demo", get(http::http_image_demo))
        .route("/audio-demo", get(http::http_audio_demo))
        .route("/puzzle-demo", get(http::http_puzzle_demo))
        .route("/submit", post(http::http_post_submit))
        .route("/fake-submit", post(http::http_post_submit))
        .route("/api/v1/health", get(http::http_health));

    if submit_path != "/submit" && submit_path != "/fake-submit" {
        router = router.route(&submit_path, post(http::http_post_submit));
    }

    router
        .nest_service("/static", static_service)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
