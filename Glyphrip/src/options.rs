//! Extraction options
//!
//! Options shared by the art and preset paths. They can be built in code with
//! the `with_*` methods or loaded from a TOML file:
//!
//! ```toml
//! strict = false
//! lowercase_names = true
//! extensions = ["py"]
//! follow_links = true
//! binding_name = "PRESETS"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default identifier of the preset dictionary binding.
pub const DEFAULT_BINDING: &str = "PRESETS";

/// Options controlling discovery, evaluation and failure handling.
///
/// # Example
///
/// ```
/// use glyphrip::ExtractOptions;
///
/// let options = ExtractOptions::new()
///     .with_strict(true)
///     .with_binding_name("PRESETS");
/// assert!(options.strict);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Preset path: fail the whole file on the first failing entry.
    /// Art path: every file is still attempted, then the CLI refuses to
    /// write the document when any file failed.
    pub strict: bool,

    /// Lowercase every alias of an art record.
    pub lowercase_names: bool,

    /// File extensions (without dot, case-insensitive) scanned for art.
    pub extensions: Vec<String>,

    /// Follow symbolic links while walking directories.
    pub follow_links: bool,

    /// Identifier of the top-level dict binding holding presets.
    pub binding_name: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strict: false,
            lowercase_names: false,
            extensions: vec!["py".to_string()],
            follow_links: true,
            binding_name: DEFAULT_BINDING.to_string(),
        }
    }
}

impl ExtractOptions {
    /// Create options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML file. Missing keys keep their defaults.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Set strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set whether aliases are lowercased.
    #[must_use]
    pub fn with_lowercase_names(mut self, lowercase: bool) -> Self {
        self.lowercase_names = lowercase;
        self
    }

    /// Replace the scanned extensions.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether symbolic links are followed.
    #[must_use]
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set the preset binding identifier.
    #[must_use]
    pub fn with_binding_name(mut self, name: impl Into<String>) -> Self {
        self.binding_name = name.into();
        self
    }

    /// Whether `path` has one of the scanned extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}
