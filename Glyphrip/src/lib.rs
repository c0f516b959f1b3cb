//! # Glyphrip
//!
//! Extracts visual-theme data that host source files declare as literal
//! expressions, without executing them.
//!
//! ## Paths
//!
//! - **Art** - one ASCII-art record per host file (`match=`, `color=`,
//!   `ascii=`), normalized into width, palette and padded body lines
//! - **Presets** - a top-level dict of color-gradient constructors,
//!   statically flattened and run-length expanded into color sequences
//!
//! ## Quick Start
//!
//! ### Extracting Art
//!
//! ```
//! use glyphrip::art::{ArtOutcome, CanonicalColor, parse_art};
//! use glyphrip::ExtractOptions;
//!
//! let text = r##"fedora = Art(match=r'''"Fedora"''', color='fg "#3c6eb4"', ascii=r"""
//! ${c1}  __
//! ${c2} /_:
//! """)"##;
//!
//! let ArtOutcome::Parsed(record) = parse_art(text, &ExtractOptions::default())? else {
//!     panic!("no record");
//! };
//! assert_eq!(record.names, ["Fedora"]);
//! assert_eq!(record.colors[1], CanonicalColor::Rgb { r: 60, g: 110, b: 180 });
//! assert_eq!(record.body, ["${c1}  __", "${c2} /_;"]);
//! # Ok::<(), glyphrip::Error>(())
//! ```
//!
//! ### Batch Processing
//!
//! ```no_run
//! use glyphrip::prelude::*;
//! use std::path::Path;
//!
//! let options = ExtractOptions::default();
//! let files = find_art_files("distros/", &options)?;
//! let result = batch_extract_art(&files, Path::new("distros/"), &options, |_| {});
//! println!("{} records, {} skipped", result.success_count, result.skip_count);
//! # Ok::<(), glyphrip::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `glyphrip` command-line binary

pub mod art;
pub mod batch;
pub mod error;
pub mod options;
pub mod output;
pub mod presets;

// Re-exports for convenience
pub use error::{Error, Result};
pub use options::ExtractOptions;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::options::ExtractOptions;

    pub use crate::art::{
        ArtOutcome, ArtRecord, CanonicalColor, GlyphBody, RecordMatch, SkipReason, match_record,
        parse_art, parse_art_file,
    };
    pub use crate::batch::{BatchArtResult, BatchProgress, batch_extract_art, find_art_files};
    pub use crate::output::{ArtFormat, PresetFormat, write_art, write_presets};
    pub use crate::presets::{
        PresetEntry, PresetTable, PresetValue, expand, extract_presets, extract_presets_file,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
