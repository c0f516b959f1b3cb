//! Output documents
//!
//! Art records go out as the YAML art document or as JSON; presets as a TOML
//! (or JSON) mapping of name to color sequence, in dict order.

mod yaml;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use indexmap::IndexMap;

pub use yaml::{art_to_yaml, write_art_yaml};

use crate::art::ArtRecord;
use crate::error::Result;

/// Output format of the art path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for ArtFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid art format '{s}'. Valid values: yaml, json")),
        }
    }
}

impl fmt::Display for ArtFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        })
    }
}

/// Output format of the preset path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresetFormat {
    #[default]
    Toml,
    Json,
}

impl FromStr for PresetFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid preset format '{s}'. Valid values: toml, json")),
        }
    }
}

impl fmt::Display for PresetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "toml",
            Self::Json => "json",
        })
    }
}

/// Write art records in `format`.
pub fn write_art<W: Write>(records: &[ArtRecord], format: ArtFormat, writer: &mut W) -> Result<()> {
    match format {
        ArtFormat::Yaml => write_art_yaml(records, writer),
        ArtFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, records)?;
            writeln!(writer)?;
            Ok(())
        }
    }
}

/// Write the preset mapping in `format`.
pub fn write_presets<W: Write>(
    presets: &IndexMap<String, Vec<String>>,
    format: PresetFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        PresetFormat::Toml => writer.write_all(toml::to_string(presets)?.as_bytes())?,
        PresetFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, presets)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
