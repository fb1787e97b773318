//! Application state: the immutable configuration and the stage lookup table,
//! built once at startup and shared by every handler.

use tracing::{info, instrument};

use crate::config::{sanitize_submit_path, QuizConfig};
use crate::domain::{Stage, StageTable};

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: QuizConfig,
    pub table: StageTable,
}

impl AppState {
    #[instrument(level = "info", skip_all)]
    pub fn new(mut config: QuizConfig) -> Self {
        config.grading.submit_path = sanitize_submit_path(&config.grading.submit_path);
        let table = StageTable::new(&config.answers);
        for stage in Stage::ALL {
            let e = table.get(stage);
            info!(target: "quiz_chain", %stage, expected = e.expected, url = %config.url_for(stage.path()), "Stage registered");
        }
        info!(
            target: "quiz_chain",
            base_url = %config.base_url,
            submit_url = %config.submit_url(),
            tolerance = ?config.grading.tolerance,
            require_identity = config.grading.require_identity,
            reveal_next_on_non_numeric = config.grading.reveal_next_on_non_numeric,
            "Grading policy"
        );
        Self { config, table }
    }
}
