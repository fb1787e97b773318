//! Built-in stage content: expected answers and the literal artifacts each page embeds.
//!
//! These values are part of the wire contract with existing solvers; change them
//! only together with the clients that depend on them.

pub const PDF_SUM_ANSWER: f64 = 60.0;
pub const IMAGE_OCR_ANSWER: f64 = 777.0;
pub const AUDIO_ANSWER: f64 = 12.0;
pub const PUZZLE_ANSWER: f64 = 42.0;

/// Rows sum to `PDF_SUM_ANSWER`.
pub const PDF_CSV: &str = "name,value\nA,10\nB,20\nC,30\n";

/// Stand-in "audio" bytes; the digits sum to `AUDIO_ANSWER`.
pub const AUDIO_BYTES: &[u8] = b"numbers 3 4 5";

/// Served from the static dir if an operator provides one.
pub const IMAGE_PATH: &str = "/static/fake.png";

pub const PDF_TASK: &str = "Compute sum of CSV values";
pub const IMAGE_TASK: &str = "OCR image";
pub const AUDIO_TASK: &str = "Decode audio, sum numbers";
pub const PUZZLE_TASK: &str = "Decode and gunzip";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn csv_rows_sum_to_pdf_answer() {
    let sum: f64 = PDF_CSV
      .lines()
      .skip(1)
      .filter_map(|l| l.split(',').nth(1))
      .map(|v| v.parse::<f64>().expect("numeric value"))
      .sum();
    assert_eq!(sum, PDF_SUM_ANSWER);
  }

  #[test]
  fn audio_digits_sum_to_audio_answer() {
    let text = std::str::from_utf8(AUDIO_BYTES).expect("ascii");
    let sum: f64 = text.split_whitespace().filter_map(|t| t.parse::<f64>().ok()).sum();
    assert_eq!(sum, AUDIO_ANSWER);
  }
}
