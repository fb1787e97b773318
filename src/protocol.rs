//! Public protocol structs for the stage pages and the grading endpoint (serde ready).
//! Field order is part of the contract: solvers see the JSON text verbatim.

use serde::Serialize;

/// The data artifact a stage embeds. Flattened into `Instructions`, so the
/// variant name becomes the JSON key (e.g. `"file_data_uri": "data:..."`).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    FileDataUri(String),
    ImagePath(String),
    AudioDataUri(String),
    PayloadGzB64(String),
}

/// Instructions record embedded (JSON -> base64) in each stage page.
#[derive(Debug, Clone, Serialize)]
pub struct Instructions {
    pub task: &'static str,
    #[serde(flatten)]
    pub artifact: Artifact,
    pub submit_url: String,
    pub url: String,
}

/// Grader response. `url` is the next stage, or null at the end of the chain.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    pub reason: String,
    pub url: Option<String>,
}

impl Verdict {
    pub fn pass(next: Option<String>) -> Self {
        Self { correct: true, reason: String::new(), url: next }
    }

    pub fn fail(reason: &str, next: Option<String>) -> Self {
        Self { correct: false, reason: reason.into(), url: next }
    }
}

pub const REASON_MISSING_URL: &str = "missing url";
pub const REASON_MISSING_FIELDS: &str = "missing fields";
pub const REASON_UNKNOWN_URL: &str = "unknown url";
pub const REASON_NOT_NUMERIC: &str = "not numeric";
pub const REASON_WRONG: &str = "Wrong answer";

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

/// Body of a hard (4xx) failure.
#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_keep_key_order() {
        let ins = Instructions {
            task: "t",
            artifact: Artifact::PayloadGzB64("abc".into()),
            submit_url: "http://h/submit".into(),
            url: "http://h/puzzle-demo".into(),
        };
        let s = serde_json::to_string(&ins).expect("json");
        assert_eq!(
            s,
            r#"{"task":"t","payload_gz_b64":"abc","submit_url":"http://h/submit","url":"http://h/puzzle-demo"}"#
        );
    }

    #[test]
    fn terminal_verdict_serializes_null_url() {
        let s = serde_json::to_string(&Verdict::pass(None)).expect("json");
        assert_eq!(s, r#"{"correct":true,"reason":"","url":null}"#);
    }
}
