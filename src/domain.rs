//! Domain models: the four quiz stages, their expected answers, and the ordered
//! lookup table the grader dispatches through.

use std::fmt;

use serde::Deserialize;

use crate::seeds;

/// One page in the quiz chain. Declaration order is chain order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
  Pdf,
  Image,
  Audio,
  Puzzle,
}

impl Stage {
  /// Chain order, also the priority order for url suffix matching.
  pub const ALL: [Stage; 4] = [Stage::Pdf, Stage::Image, Stage::Audio, Stage::Puzzle];

  pub fn path(self) -> &'static str {
    match self {
      Stage::Pdf => "/pdf-demo",
      Stage::Image => "/image-demo",
      Stage::Audio => "/audio-demo",
      Stage::Puzzle => "/puzzle-demo",
    }
  }

  /// Link text on the index page.
  pub fn title(self) -> &'static str {
    match self {
      Stage::Pdf => "PDF Demo",
      Stage::Image => "Image Demo",
      Stage::Audio => "Audio Demo",
      Stage::Puzzle => "Puzzle Demo",
    }
  }

  pub fn next(self) -> Option<Stage> {
    match self {
      Stage::Pdf => Some(Stage::Image),
      Stage::Image => Some(Stage::Audio),
      Stage::Audio => Some(Stage::Puzzle),
      Stage::Puzzle => None,
    }
  }

  /// First stage (in chain order) whose path is a suffix of `url`.
  pub fn from_url(url: &str) -> Option<Stage> {
    Self::ALL.into_iter().find(|s| url.ends_with(s.path()))
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Stage::Pdf => "pdf",
      Stage::Image => "image",
      Stage::Audio => "audio",
      Stage::Puzzle => "puzzle",
    };
    f.write_str(s)
  }
}

/// Expected answer per stage. Accepted in the `[answers]` table of the TOML config.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Answers {
  pub pdf: f64,
  pub image: f64,
  pub audio: f64,
  pub puzzle: f64,
}

impl Default for Answers {
  fn default() -> Self {
    Self {
      pdf: seeds::PDF_SUM_ANSWER,
      image: seeds::IMAGE_OCR_ANSWER,
      audio: seeds::AUDIO_ANSWER,
      puzzle: seeds::PUZZLE_ANSWER,
    }
  }
}

impl Answers {
  pub fn for_stage(&self, stage: Stage) -> f64 {
    match stage {
      Stage::Pdf => self.pdf,
      Stage::Image => self.image,
      Stage::Audio => self.audio,
      Stage::Puzzle => self.puzzle,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageEntry {
  pub stage: Stage,
  pub expected: f64,
  pub next: Option<Stage>,
}

/// Ordered `stage -> {expected, successor}` table, fixed at startup.
#[derive(Clone, Debug)]
pub struct StageTable {
  entries: [StageEntry; 4],
}

impl StageTable {
  pub fn new(answers: &Answers) -> Self {
    let entries = Stage::ALL.map(|stage| StageEntry {
      stage,
      expected: answers.for_stage(stage),
      next: stage.next(),
    });
    Self { entries }
  }

  pub fn get(&self, stage: Stage) -> &StageEntry {
    // ALL and entries share the same order
    &self.entries[stage as usize]
  }

  /// Suffix dispatch in chain order; first match wins.
  pub fn lookup(&self, url: &str) -> Option<&StageEntry> {
    Stage::from_url(url).map(|stage| self.get(stage))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn chain_is_linear_and_terminates() {
    let mut seen = vec![Stage::Pdf];
    let mut cur = Stage::Pdf;
    while let Some(n) = cur.next() {
      assert!(!seen.contains(&n), "cycle at {n}");
      seen.push(n);
      cur = n;
    }
    assert_eq!(seen, Stage::ALL.to_vec());
  }

  #[test]
  fn from_url_matches_suffix_only() {
    assert_eq!(Stage::from_url("https://x.example/pdf-demo"), Some(Stage::Pdf));
    assert_eq!(Stage::from_url("/puzzle-demo"), Some(Stage::Puzzle));
    assert_eq!(Stage::from_url("https://x.example/pdf-demo/"), None);
    assert_eq!(Stage::from_url("https://x.example/pdf-demo?x=1"), None);
    assert_eq!(Stage::from_url(""), None);
  }

  #[test]
  fn table_uses_default_answers() {
    let table = StageTable::new(&Answers::default());
    assert_eq!(table.get(Stage::Pdf).expected, 60.0);
    assert_eq!(table.get(Stage::Image).expected, 777.0);
    assert_eq!(table.get(Stage::Audio).expected, 12.0);
    assert_eq!(table.get(Stage::Puzzle).expected, 42.0);
    assert_eq!(table.get(Stage::Puzzle).next, None);
  }

  #[test]
  fn lookup_follows_chain_order() {
    let table = StageTable::new(&Answers::default());
    let e = table.lookup("http://localhost:8001/audio-demo").expect("entry");
    assert_eq!(e.stage, Stage::Audio);
    assert_eq!(e.next, Some(Stage::Puzzle));
    assert!(table.lookup("http://localhost:8001/nonsense").is_none());
  }
}
