//! Stage page generator.
//!
//! Each page carries its instructions as JSON -> base64 inside a script that
//! `atob`s it into `#result`. The visible HTML holds no readable task text, so
//! a solver has to decode the blob before it can read the task.

use serde_json::json;
use tracing::{debug, instrument};

use crate::config::QuizConfig;
use crate::domain::Stage;
use crate::error::ApiResult;
use crate::protocol::{Artifact, Instructions};
use crate::seeds;
use crate::util::{b64, data_uri, gzip, json_number, to_spaced_json};

/// base64(gzip(`{"secret_sum": <answer>}`))
pub fn puzzle_payload(answer: f64) -> ApiResult<String> {
  let inner = to_spaced_json(&json!({ "secret_sum": json_number(answer) }))?;
  Ok(b64(gzip(inner.as_bytes())?))
}

pub fn instructions(cfg: &QuizConfig, stage: Stage) -> ApiResult<Instructions> {
  let (task, artifact) = match stage {
    Stage::Pdf => (seeds::PDF_TASK, Artifact::FileDataUri(data_uri("text/csv", seeds::PDF_CSV))),
    Stage::Image => (seeds::IMAGE_TASK, Artifact::ImagePath(seeds::IMAGE_PATH.into())),
    Stage::Audio => (seeds::AUDIO_TASK, Artifact::AudioDataUri(data_uri("audio/wav", seeds::AUDIO_BYTES))),
    Stage::Puzzle => (seeds::PUZZLE_TASK, Artifact::PayloadGzB64(puzzle_payload(cfg.answers.puzzle)?)),
  };
  Ok(Instructions {
    task,
    artifact,
    submit_url: cfg.submit_url(),
    url: cfg.url_for(stage.path()),
  })
}

/// Full HTML for one stage.
#[instrument(level = "debug", skip_all, fields(%stage))]
pub fn render(cfg: &QuizConfig, stage: Stage) -> ApiResult<String> {
  let ins = instructions(cfg, stage)?;
  let blob = b64(to_spaced_json(&ins)?);
  debug!(target: "quiz", %stage, blob_len = blob.len(), "Instructions encoded");

  // The pdf page shows nothing but the blob.
  let footer = match stage {
    Stage::Pdf => String::new(),
    _ => format!("    <p>Expected answer = {}</p>\n", cfg.answers.for_stage(stage)),
  };

  Ok(format!(
    r##"
    <div id="result"></div>
    <script>
      document.querySelector("#result").innerHTML = atob(`{blob}`);
    </script>
{footer}    "##
  ))
}

pub fn render_index(cfg: &QuizConfig) -> String {
  let links: String = Stage::ALL
    .iter()
    .map(|s| format!("        <li><a href=\"{}\">{}</a></li>\n", cfg.url_for(s.path()), s.title()))
    .collect();
  format!(
    r#"
    <h2>Fake TDS Quiz Server OK</h2>
    <p>BASE_URL = {base}</p>
    <ul>
{links}    </ul>
    "#,
    base = cfg.base_url
  )
}
