//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs the stage and basic result info.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::Html, response::IntoResponse, Json};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::domain::Stage;
use crate::error::{ApiError, ApiResult};
use crate::logic::grade;
use crate::pages;
use crate::protocol::{HealthOut, Verdict};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_index(State(state): State<Arc<AppState>>) -> Html<String> {
  Html(pages::render_index(&state.config))
}

fn stage_page(state: &AppState, stage: Stage) -> ApiResult<Html<String>> {
  let html = pages::render(&state.config, stage)?;
  info!(target: "quiz", %stage, "Stage page served");
  Ok(Html(html))
}

#[instrument(level = "info", skip(state))]
pub async fn http_pdf_demo(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
  stage_page(&state, Stage::Pdf)
}

#[instrument(level = "info", skip(state))]
pub async fn http_image_demo(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
  stage_page(&state, Stage::Image)
}

#[instrument(level = "info", skip(state))]
pub async fn http_audio_demo(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
  stage_page(&state, Stage::Audio)
}

#[instrument(level = "info", skip(state))]
pub async fn http_puzzle_demo(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
  stage_page(&state, Stage::Puzzle)
}

/// The body is parsed by hand so that content-type is not enforced and any
/// non-object JSON is rejected with the same 400.
#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_post_submit(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<Json<Verdict>> {
  let parsed = serde_json::from_slice::<Value>(&body);
  let Ok(Value::Object(map)) = parsed else {
    warn!(target: "quiz", "Submission body is not a JSON object");
    return Err(ApiError::BadRequest);
  };
  Ok(Json(grade(&state.config, &state.table, &map)))
}
