//! Answer grading.
//!
//! Takes the already-parsed JSON object and always produces a `Verdict`; the
//! only hard failure (body is not a JSON object) is handled by the caller.

use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::config::{GradingPolicy, QuizConfig};
use crate::domain::StageTable;
use crate::protocol::*;
use crate::util::trunc_for_log;

/// Python-`float()`-like coercion of the `answer` field.
pub fn parse_answer(v: Option<&Value>) -> Option<f64> {
  match v? {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
    _ => None,
  }
}

fn non_empty_str(body: &Map<String, Value>, key: &str) -> bool {
  body.get(key).and_then(Value::as_str).is_some_and(|s| !s.trim().is_empty())
}

/// Falsy JSON (null, "", 0, false, [], {}) counts as an absent field.
fn is_blank(v: &Value) -> bool {
  match v {
    Value::Null => true,
    Value::Bool(b) => !b,
    Value::Number(n) => n.as_f64() == Some(0.0),
    Value::String(s) => s.is_empty(),
    Value::Array(a) => a.is_empty(),
    Value::Object(o) => o.is_empty(),
  }
}

fn matches(policy: &GradingPolicy, got: f64, expected: f64) -> bool {
  match policy.tolerance {
    Some(tol) => (got - expected).abs() < tol,
    None => got == expected,
  }
}

#[instrument(level = "info", skip_all)]
pub fn grade(cfg: &QuizConfig, table: &StageTable, body: &Map<String, Value>) -> Verdict {
  let Some(url) = body.get("url").filter(|v| !is_blank(v)) else {
    info!(target: "quiz", reason = REASON_MISSING_URL, "Submission rejected");
    return Verdict::fail(REASON_MISSING_URL, None);
  };

  if cfg.grading.require_identity && !(non_empty_str(body, "email") && non_empty_str(body, "secret")) {
    info!(target: "quiz", reason = REASON_MISSING_FIELDS, "Submission rejected");
    return Verdict::fail(REASON_MISSING_FIELDS, None);
  }

  let Some(entry) = url.as_str().and_then(|u| table.lookup(u)) else {
    info!(target: "quiz", url = %trunc_for_log(&url.to_string(), 120), reason = REASON_UNKNOWN_URL, "Submission rejected");
    return Verdict::fail(REASON_UNKNOWN_URL, None);
  };
  let next_url = entry.next.map(|s| cfg.url_for(s.path()));

  let Some(got) = parse_answer(body.get("answer")) else {
    let next = if cfg.grading.reveal_next_on_non_numeric { next_url } else { None };
    info!(target: "quiz", stage = %entry.stage, reason = REASON_NOT_NUMERIC, "Submission graded");
    return Verdict::fail(REASON_NOT_NUMERIC, next);
  };

  let correct = matches(&cfg.grading, got, entry.expected);
  info!(target: "quiz", stage = %entry.stage, %correct, answer = got, "Submission graded");
  if correct {
    Verdict::pass(next_url)
  } else {
    Verdict::fail(REASON_WRONG, next_url)
  }
}
