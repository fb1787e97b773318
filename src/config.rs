//! Process configuration: base URL, listen port, static dir, and the optional
//! TOML file (expected answers + grading policy).
//!
//! Environment:
//!   PORT                  : u16 (default 8000)
//!   RAILWAY_PUBLIC_DOMAIN : base URL becomes `https://<domain>`
//!   PUBLIC_BASE_URL       : explicit base URL, wins over the domain rule
//!   STATIC_DIR            : served under /static (default "./static")
//!   QUIZ_CONFIG_PATH      : TOML with `[answers]` and `[grading]` tables
//!
//! Everything is resolved once at startup into an immutable `QuizConfig`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::Answers;

pub const DEFAULT_PORT: u16 = 8000;
pub const LOCAL_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_SUBMIT_PATH: &str = "/submit";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse {path}: {source}")]
  Toml {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

/// How lenient the grader is. Defaults reproduce the reference behavior.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GradingPolicy {
  /// `None` compares with `==`; `Some(t)` accepts `|a - b| < t`.
  pub tolerance: Option<f64>,
  /// Require non-empty `email` and `secret` (presence only, never verified).
  pub require_identity: bool,
  /// Surface the successor url even when `answer` is not numeric.
  pub reveal_next_on_non_numeric: bool,
  /// Grading path advertised in every instructions payload.
  pub submit_path: String,
}

impl Default for GradingPolicy {
  fn default() -> Self {
    Self {
      tolerance: None,
      require_identity: false,
      reveal_next_on_non_numeric: true,
      submit_path: DEFAULT_SUBMIT_PATH.into(),
    }
  }
}

/// Schema of the optional TOML file.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizFile {
  #[serde(default)]
  pub answers: Answers,
  #[serde(default)]
  pub grading: GradingPolicy,
}

#[derive(Clone, Debug)]
pub struct QuizConfig {
  pub base_url: String,
  pub port: u16,
  pub static_dir: PathBuf,
  pub answers: Answers,
  pub grading: GradingPolicy,
}

impl Default for QuizConfig {
  fn default() -> Self {
    Self {
      base_url: LOCAL_BASE_URL.into(),
      port: DEFAULT_PORT,
      static_dir: PathBuf::from("./static"),
      answers: Answers::default(),
      grading: GradingPolicy::default(),
    }
  }
}

impl QuizConfig {
  pub fn from_env() -> Self {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build from an arbitrary variable source. A broken config file is logged
  /// and replaced by defaults so the server still comes up.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let base_url = resolve_base_url(
      lookup("PUBLIC_BASE_URL").as_deref(),
      lookup("RAILWAY_PUBLIC_DOMAIN").as_deref(),
    );

    let port = match lookup("PORT") {
      Some(p) => p.trim().parse::<u16>().unwrap_or_else(|e| {
        warn!(target: "quiz_chain", port = %p, error = %e, "Invalid PORT; using default");
        DEFAULT_PORT
      }),
      None => DEFAULT_PORT,
    };

    let static_dir = lookup("STATIC_DIR")
      .filter(|s| !s.trim().is_empty())
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from("./static"));

    let file = match lookup("QUIZ_CONFIG_PATH") {
      Some(path) => match load_quiz_file(Path::new(&path)) {
        Ok(f) => {
          info!(target: "quiz_chain", %path, "Loaded quiz config (TOML)");
          f
        }
        Err(e) => {
          error!(target: "quiz_chain", error = %e, "Quiz config unusable; using built-in defaults");
          QuizFile::default()
        }
      },
      None => QuizFile::default(),
    };

    let mut grading = file.grading;
    grading.submit_path = sanitize_submit_path(&grading.submit_path);

    Self { base_url, port, static_dir, answers: file.answers, grading }
  }

  pub fn url_for(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  pub fn submit_url(&self) -> String {
    self.url_for(&self.grading.submit_path)
  }
}

/// Explicit override first, then the platform domain, then the local default.
pub fn resolve_base_url(explicit: Option<&str>, public_domain: Option<&str>) -> String {
  if let Some(url) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
    return url.trim_end_matches('/').to_string();
  }
  match public_domain.map(str::trim).filter(|s| !s.is_empty()) {
    Some(domain) => format!("https://{}", domain),
    None => LOCAL_BASE_URL.to_string(),
  }
}

pub fn load_quiz_file(path: &Path) -> Result<QuizFile, ConfigError> {
  let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
  parse_quiz_file(&text).map_err(|source| ConfigError::Toml { path: path.to_path_buf(), source })
}

pub fn parse_quiz_file(text: &str) -> Result<QuizFile, toml::de::Error> {
  toml::from_str::<QuizFile>(text)
}

fn normalize_path(p: &str) -> String {
  let p = p.trim();
  if p.is_empty() {
    DEFAULT_SUBMIT_PATH.to_string()
  } else if p.starts_with('/') {
    p.to_string()
  } else {
    format!("/{}", p)
  }
}

/// Paths the router already owns for something other than grading.
const RESERVED_PATHS: [&str; 6] = ["/", "/pdf-demo", "/image-demo", "/audio-demo", "/puzzle-demo", "/api/v1/health"];

/// Why a submit path cannot be mounted, if it cannot.
pub fn submit_path_conflict(path: &str) -> Option<&'static str> {
  if path == "/static" || path.starts_with("/static/") {
    Some("shadowed by the /static file service")
  } else if RESERVED_PATHS.contains(&path) {
    Some("collides with a page route")
  } else if path.contains(['*', ':', '{', '}', '?', '#']) {
    Some("contains route pattern or query characters")
  } else {
    None
  }
}

/// Normalize a configured submit path; unusable values are logged and
/// replaced by `/submit`.
pub fn sanitize_submit_path(raw: &str) -> String {
  let path = normalize_path(raw);
  match submit_path_conflict(&path) {
    None => path,
    Some(why) => {
      error!(target: "quiz_chain", submit_path = %path, reason = why, "Unusable submit_path; using default");
      DEFAULT_SUBMIT_PATH.to_string()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |k: &str| map.get(k).cloned()
  }

  #[test]
  fn base_url_prefers_override_then_domain_then_local() {
    assert_eq!(resolve_base_url(None, None), "http://localhost:8001");
    assert_eq!(resolve_base_url(None, Some("")), "http://localhost:8001");
    assert_eq!(resolve_base_url(None, Some("quiz.up.railway.app")), "https://quiz.up.railway.app");
    assert_eq!(resolve_base_url(Some("http://10.0.0.5:9000/"), Some("quiz.up.railway.app")), "http://10.0.0.5:9000");
  }

  #[test]
  fn defaults_without_env() {
    let cfg = QuizConfig::from_lookup(|_| None);
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.base_url, "http://localhost:8001");
    assert_eq!(cfg.submit_url(), "http://localhost:8001/submit");
    assert_eq!(cfg.answers, Answers::default());
    assert_eq!(cfg.grading, GradingPolicy::default());
  }

  #[test]
  fn bad_port_falls_back_to_default() {
    let cfg = QuizConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
    assert_eq!(cfg.port, DEFAULT_PORT);
    let cfg = QuizConfig::from_lookup(lookup_from(&[("PORT", "9123")]));
    assert_eq!(cfg.port, 9123);
  }

  #[test]
  fn toml_overrides_answers_and_policy() {
    let f = parse_quiz_file(
      r#"
        [answers]
        image = 778

        [grading]
        tolerance = 1e-6
        require_identity = true
        submit_path = "fake-submit"
      "#,
    )
    .expect("toml");
    assert_eq!(f.answers.image, 778.0);
    assert_eq!(f.answers.pdf, 60.0);
    assert_eq!(f.grading.tolerance, Some(1e-6));
    assert!(f.grading.require_identity);
    assert!(f.grading.reveal_next_on_non_numeric);
    assert_eq!(normalize_path(&f.grading.submit_path), "/fake-submit");
  }

  #[test]
  fn submit_path_conflicts_fall_back_to_default() {
    for bad in ["/static", "static/x", "/static/fake.png", "/", "/pdf-demo", "/api/v1/health", "/grade/:id", "/x/*rest"] {
      assert_eq!(sanitize_submit_path(bad), DEFAULT_SUBMIT_PATH, "{bad}");
    }
    assert_eq!(sanitize_submit_path("grade"), "/grade");
    assert_eq!(sanitize_submit_path("/fake-submit"), "/fake-submit");
    assert_eq!(sanitize_submit_path("/statistics"), "/statistics");
    assert_eq!(sanitize_submit_path("   "), DEFAULT_SUBMIT_PATH);
  }

  #[test]
  fn quiz_file_on_disk_is_applied() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("quiz.toml");
    std::fs::write(
      &path,
      "[answers]\npuzzle = 43\n\n[grading]\nreveal_next_on_non_numeric = false\nsubmit_path = \"/static\"\n",
    )
    .expect("write toml");
    let path_str = path.to_string_lossy().into_owned();
    let cfg = QuizConfig::from_lookup(lookup_from(&[("QUIZ_CONFIG_PATH", path_str.as_str()), ("STATIC_DIR", "/srv/assets")]));
    assert_eq!(cfg.answers.puzzle, 43.0);
    assert_eq!(cfg.answers.pdf, 60.0);
    assert!(!cfg.grading.reveal_next_on_non_numeric);
    assert_eq!(cfg.grading.submit_path, DEFAULT_SUBMIT_PATH);
    assert_eq!(cfg.static_dir, PathBuf::from("/srv/assets"));
  }

  #[test]
  fn unparsable_quiz_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[answers\npdf = ").expect("write toml");
    assert!(matches!(load_quiz_file(&path), Err(ConfigError::Toml { .. })));
    let path_str = path.to_string_lossy().into_owned();
    let cfg = QuizConfig::from_lookup(lookup_from(&[("QUIZ_CONFIG_PATH", path_str.as_str())]));
    assert_eq!(cfg.answers, Answers::default());
  }

  #[test]
  fn missing_config_file_is_reported() {
    let err = load_quiz_file(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
  }

  #[test]
  fn unreadable_config_path_keeps_defaults() {
    let cfg = QuizConfig::from_lookup(lookup_from(&[("QUIZ_CONFIG_PATH", "/definitely/not/here.toml")]));
    assert_eq!(cfg.answers, Answers::default());
  }
}
