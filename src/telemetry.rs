//! Tracing setup.
//!
//! `LOG_LEVEL` holds `EnvFilter` directives; an unparsable value is reported
//! once and the quiz defaults apply. `LOG_FORMAT=json` switches to one JSON
//! object per event, which is what hosted log drains expect.
//!
//! Targets emitted by this crate:
//! - `quiz_chain`: startup, configuration, listener lifecycle.
//! - `quiz`: page renders and grading verdicts.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,quiz=debug,quiz_chain=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

impl LogFormat {
  pub fn from_env_value(v: Option<&str>) -> Self {
    match v.map(str::trim) {
      Some(s) if s.eq_ignore_ascii_case("json") => LogFormat::Json,
      _ => LogFormat::Pretty,
    }
  }
}

/// Directives from `LOG_LEVEL`, or the defaults plus the reason they were not used.
pub fn build_filter(directives: Option<&str>) -> (EnvFilter, Option<String>) {
  match directives.map(str::trim).filter(|s| !s.is_empty()) {
    Some(d) => match EnvFilter::try_new(d) {
      Ok(f) => (f, None),
      Err(e) => (EnvFilter::new(DEFAULT_FILTER), Some(format!("invalid LOG_LEVEL {:?}: {}", d, e))),
    },
    None => (EnvFilter::new(DEFAULT_FILTER), None),
  }
}

pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  let level = std::env::var("LOG_LEVEL").ok();
  let format = LogFormat::from_env_value(std::env::var("LOG_FORMAT").ok().as_deref());
  let (filter, rejected) = build_filter(level.as_deref());

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  match format {
    LogFormat::Json => builder.json().try_init()?,
    LogFormat::Pretty => builder.try_init()?,
  }

  if let Some(reason) = rejected {
    tracing::warn!(target: "quiz_chain", %reason, "Falling back to default log filter");
  }
  tracing::debug!(target: "quiz_chain", ?format, "Tracing initialized");
  Ok(())
}
