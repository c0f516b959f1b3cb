//! Art record types

use serde::Serialize;

use super::body::{Segment, segments};
use super::colors::CanonicalColor;
use super::matcher::PartialMatch;

/// One extracted glyph with its palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtRecord {
    /// Aliases in declaration order.
    #[serde(rename = "name")]
    pub names: Vec<String>,
    /// Widest visible body line, in columns.
    pub width: usize,
    /// Palette in token order; `${c1}` refers to the first entry.
    pub colors: Vec<CanonicalColor>,
    /// Padded body lines with `:` replaced by `;`.
    #[serde(rename = "art", serialize_with = "serialize_art")]
    pub body: Vec<String>,
}

impl ArtRecord {
    /// Primary name (first alias).
    pub fn name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    /// Number of body lines.
    pub fn height(&self) -> usize {
        self.body.len()
    }

    /// Split the body into colored segments.
    pub fn segments(&self) -> Vec<Segment> {
        segments(&self.body.join("\n"))
    }

    /// Resolve a segment's palette index against this record's colors.
    pub fn color_of(&self, segment: &Segment) -> Option<CanonicalColor> {
        segment
            .color
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.colors.get(index).copied())
    }
}

fn serialize_art<S: serde::Serializer>(body: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&body.join("\n"))
}

/// Why a host file produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `match=` anchor in the file.
    NoRecord,
    /// An anchor was found but a capture could not be read.
    Incomplete(PartialMatch),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRecord => write!(f, "no art record"),
            Self::Incomplete(partial) => write!(f, "incomplete art record ({partial})"),
        }
    }
}

/// Result of extracting one host file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtOutcome {
    /// A record was extracted.
    Parsed(ArtRecord),
    /// The file does not carry a record.
    Skipped(SkipReason),
}
