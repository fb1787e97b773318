//! Small encoding helpers used across modules: base64, data URIs, gzip, and
//! JSON text with the `", "` / `": "` separators existing solvers expect.

use std::io::{self, Write};

use base64::{engine::general_purpose, Engine as _};
use flate2::{write::GzEncoder, Compression};
use serde::{ser::Error as _, Serialize};
use serde_json::Value;

/// Standard (padded) base64, the alphabet browsers' `atob` accepts.
pub fn b64(bytes: impl AsRef<[u8]>) -> String {
  general_purpose::STANDARD.encode(bytes)
}

/// `data:<mime>;base64,<payload>`
pub fn data_uri(mime: &str, bytes: impl AsRef<[u8]>) -> String {
  format!("data:{};base64,{}", mime, b64(bytes))
}

pub fn gzip(bytes: &[u8]) -> io::Result<Vec<u8>> {
  let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() + 32), Compression::default());
  encoder.write_all(bytes)?;
  encoder.finish()
}

/// serde_json formatter that spaces separators like Python's `json.dumps`.
struct SpacedSeparators;

impl serde_json::ser::Formatter for SpacedSeparators {
  fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
    if first { Ok(()) } else { writer.write_all(b", ") }
  }

  fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
    if first { Ok(()) } else { writer.write_all(b", ") }
  }

  fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
    writer.write_all(b": ")
  }
}

/// Serialize to compact JSON with spaced separators, e.g. `{"secret_sum": 42}`.
pub fn to_spaced_json<T: ?Sized + Serialize>(value: &T) -> serde_json::Result<String> {
  let mut buf = Vec::with_capacity(128);
  let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedSeparators);
  value.serialize(&mut ser)?;
  String::from_utf8(buf).map_err(serde_json::Error::custom)
}

/// Integral values become JSON integers (`42`, not `42.0`).
pub fn json_number(x: f64) -> Value {
  if x.is_finite() && x.fract() == 0.0 && x.abs() < 9_007_199_254_740_992.0 {
    Value::from(x as i64)
  } else {
    Value::from(x)
  }
}

/// Log-safe truncation for client-supplied strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}
