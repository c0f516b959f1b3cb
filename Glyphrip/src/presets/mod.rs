//! Preset path: color-gradient presets
//!
//! Evaluates the top-level preset dict of a host file without running it.
//! Each entry is tokenized, parsed into the closed construction grammar,
//! flattened, evaluated to literals and expanded to a flat color sequence:
//!
//! ```
//! use glyphrip::{ExtractOptions, presets::extract_presets};
//!
//! let text = r#"
//! PRESETS = {
//!     'duo': ColorProfile(['#000000', '#ffffff']).with_weights([1, 2]),
//! }
//! "#;
//! let table = extract_presets(text, &ExtractOptions::default()).unwrap();
//! assert_eq!(table.entries[0].sequence, ["#000000", "#ffffff", "#ffffff"]);
//! ```

pub mod ast;
mod evaluate;
mod expand;
pub mod flatten;
pub mod lexer;
pub mod parser;

use std::path::Path;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

pub use evaluate::{Literal, PresetValue, evaluate};
pub use expand::{MAX_EXPANDED_LEN, expand};
pub use flatten::flatten;

use crate::error::{Error, Result};
use crate::options::ExtractOptions;
use parser::RawEntry;

/// One preset, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetEntry {
    pub name: String,
    pub sequence: Vec<String>,
}

/// Every entry of a preset dict that evaluated, plus the ones that did not.
#[derive(Debug, Default)]
pub struct PresetTable {
    /// Successful entries in dict order.
    pub entries: Vec<PresetEntry>,
    /// Per-entry failures, each wrapped in [`Error::InEntry`].
    pub failures: Vec<Error>,
}

impl PresetTable {
    /// Name to sequence mapping in dict order. A repeated key keeps its
    /// first position and its last value.
    pub fn to_map(&self) -> IndexMap<String, Vec<String>> {
        let mut map = IndexMap::with_capacity(self.entries.len());
        for entry in &self.entries {
            map.insert(entry.name.clone(), entry.sequence.clone());
        }
        map
    }
}

/// Extract every preset from the text of a host file.
///
/// # Errors
/// Fails when the binding is missing or not a dict, when the file cannot be
/// tokenized, or (strict mode) on the first failing entry.
pub fn extract_presets(text: &str, options: &ExtractOptions) -> Result<PresetTable> {
    let tokens = lexer::tokenize(text)?;
    let body = parser::locate_binding(&tokens, &options.binding_name)?;
    let raw_entries = parser::split_entries(body);
    tracing::debug!("Evaluating {} preset entries", raw_entries.len());

    let results: Vec<Result<PresetEntry>> = raw_entries.par_iter().map(evaluate_entry).collect();

    let mut table = PresetTable::default();
    for result in results {
        match result {
            Ok(entry) => table.entries.push(entry),
            Err(e) if options.strict => return Err(e),
            Err(e) => {
                tracing::warn!("Skipped preset {}", e);
                table.failures.push(e);
            }
        }
    }
    Ok(table)
}

/// Read a host file and extract its presets. Errors carry the file path.
pub fn extract_presets_file(path: &Path, options: &ExtractOptions) -> Result<PresetTable> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::from(e).in_file(path))?;
    let table = extract_presets(&text, options).map_err(|e| e.in_file(path))?;
    tracing::info!(
        "Evaluated {} presets from {} ({} failed)",
        table.entries.len(),
        path.display(),
        table.failures.len()
    );
    Ok(table)
}

/// Run one entry through parse, flatten, evaluate and expand.
fn evaluate_entry(entry: &RawEntry<'_>) -> Result<PresetEntry> {
    let run = || -> Result<PresetEntry> {
        let name = entry.key()?;
        let tokens = entry.value.ok_or_else(|| {
            Error::UnsupportedExpression("dictionary entry without a value".to_string())
        })?;
        let expr = flatten(parser::parse_expr(tokens)?);
        let value = PresetValue::try_from(evaluate(&expr)?)?;
        Ok(PresetEntry {
            name,
            sequence: value.into_sequence()?,
        })
    };
    run().map_err(|e| e.in_entry(entry.label()))
}
