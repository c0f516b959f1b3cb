//! Error types for `Glyphrip`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `Glyphrip` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== Malformed Tokens ====================
    /// A color token looked like a hex color but was not valid hexadecimal.
    #[error("malformed color token: {token:?}")]
    MalformedColor {
        /// The offending token, after quote stripping.
        token: String,
    },

    /// A token that should be a base-10 integer could not be parsed.
    #[error("malformed integer: {token:?}")]
    MalformedInteger {
        /// The offending token.
        token: String,
    },

    /// A run-length count was negative.
    #[error("negative run-length count: {count}")]
    NegativeCount {
        /// The count as written in the source.
        count: i64,
    },

    // ==================== Unsupported Expressions ====================
    /// The expression uses a shape outside the literal/constructor grammar.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// The expression parser met a token it did not expect.
    #[error("unexpected token at line {line}: {found}")]
    UnexpectedToken {
        /// 1-based source line of the token.
        line: usize,
        /// Description of the token that was found.
        found: String,
    },

    /// A string literal was never closed.
    #[error("unterminated string literal starting at line {line}")]
    UnterminatedString {
        /// 1-based source line where the literal starts.
        line: usize,
    },

    // ==================== Structural Errors ====================
    /// The glyph body has no lines once blank edges are trimmed.
    #[error("glyph body is empty")]
    EmptyBody,

    /// The record's name capture held no usable alias.
    #[error("record has no names")]
    EmptyNames,

    /// A run-length pair had sequences of different lengths.
    #[error("run-length pair mismatch: {values} values but {counts} counts")]
    RunLengthMismatch {
        /// Length of the values sequence.
        values: usize,
        /// Length of the counts sequence.
        counts: usize,
    },

    /// The counts of a run-length pair add up to more than the expansion limit.
    #[error("run-length expansion exceeds {limit} items")]
    RunLengthTooLarge {
        /// The largest expanded length that is accepted.
        limit: usize,
    },

    /// The expected top-level binding does not exist in the file.
    #[error("binding '{name}' not found")]
    BindingNotFound {
        /// The binding identifier that was searched for.
        name: String,
    },

    /// The binding exists but is not assigned a dict literal.
    #[error("binding '{name}' is not a dict literal")]
    NotADict {
        /// The binding identifier.
        name: String,
    },

    // ==================== Context Wrappers ====================
    /// An error raised while processing a specific file.
    #[error("{path}: {source}")]
    InFile {
        /// The file being processed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },

    /// An error raised while evaluating a specific dictionary entry.
    #[error("entry '{key}': {source}")]
    InEntry {
        /// The dictionary key of the entry.
        key: String,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },

    // ==================== Serialization Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// TOML parse error (configuration files).
    #[error("TOML parse error: {0}")]
    TomlDeError(#[from] toml::de::Error),
}

impl Error {
    /// Attach the file that was being processed.
    #[must_use]
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Attach the dictionary key that was being evaluated.
    #[must_use]
    pub fn in_entry(self, key: impl Into<String>) -> Self {
        Error::InEntry {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// The processing stage that rejected the input.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Io(_) | Error::WalkDirError(_) => "io",
            Error::MalformedColor { .. }
            | Error::MalformedInteger { .. }
            | Error::NegativeCount { .. } => "malformed-token",
            Error::UnsupportedExpression(_)
            | Error::UnexpectedToken { .. }
            | Error::UnterminatedString { .. } => "unsupported-expression",
            Error::EmptyBody
            | Error::EmptyNames
            | Error::RunLengthMismatch { .. }
            | Error::RunLengthTooLarge { .. }
            | Error::BindingNotFound { .. }
            | Error::NotADict { .. } => "structural",
            Error::InFile { source, .. } | Error::InEntry { source, .. } => source.stage(),
            Error::JsonError(_) | Error::TomlSerError(_) | Error::TomlDeError(_) => "serialization",
        }
    }
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `Glyphrip` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_sees_through_context() {
        let err = Error::RunLengthMismatch { values: 2, counts: 3 }
            .in_entry("rainbow")
            .in_file("presets.py");
        assert_eq!(err.stage(), "structural");
        assert_eq!(
            err.to_string(),
            "presets.py: entry 'rainbow': run-length pair mismatch: 2 values but 3 counts"
        );
    }
}
