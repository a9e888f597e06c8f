use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a movie as handed out by the metadata service.
///
/// The service emits integers, but records that went through other clients
/// may carry the same id as a numeric string. The original JSON form is kept
/// so a record serializes back exactly as it was read.
///
/// A whole-number float (`550.0`) is read as `Number`; any other float is
/// kept as `Text`, so one odd id never makes a stored list unreadable.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum MovieId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMovieId {
    Int(u64),
    Float(f64),
    Text(String),
}

impl From<RawMovieId> for MovieId {
    fn from(raw: RawMovieId) -> Self {
        match raw {
            RawMovieId::Int(n) => MovieId::Number(n),
            RawMovieId::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                MovieId::Number(f as u64)
            }
            RawMovieId::Float(f) => MovieId::Text(f.to_string()),
            RawMovieId::Text(s) => MovieId::Text(s),
        }
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawMovieId::deserialize(deserializer).map(MovieId::from)
    }
}

/// Numeric value of a text id under loose comparison rules: surrounding
/// whitespace is ignored, a blank string is zero, and decimal, exponent and
/// `0x`/`0o`/`0b` forms are accepted.
fn coerce_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix).ok().map(|v| v as f64);
    }

    // Rust accepts "inf"/"nan" spellings that never name an id
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

impl MovieId {
    /// Loose identity: `550` matches `"550"`, `"550.0"` and `" 5.5e2 "`.
    /// Two strings match only when equal.
    pub fn matches(&self, other: &MovieId) -> bool {
        match (self, other) {
            (MovieId::Number(a), MovieId::Number(b)) => a == b,
            (MovieId::Text(a), MovieId::Text(b)) => a == b,
            (MovieId::Number(n), MovieId::Text(s)) | (MovieId::Text(s), MovieId::Number(n)) => {
                coerce_number(s) == Some(*n as f64)
            }
        }
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId::Number(id)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        match id.parse::<u64>() {
            Ok(n) => MovieId::Number(n),
            Err(_) => MovieId::Text(id.to_string()),
        }
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Number(n) => write!(f, "{}", n),
            MovieId::Text(s) => write!(f, "{}", s),
        }
    }
}
