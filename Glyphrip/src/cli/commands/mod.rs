use clap::Subcommand;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::output::{ArtFormat, PresetFormat};

pub mod art;
mod execute;
pub mod inspect;
pub mod presets;

#[derive(Subcommand)]
pub enum Commands {
    /// Extract art records from every host file under a directory
    Art {
        /// Directory scanned recursively for host files
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: ArtFormat,

        /// Write nothing and fail if any file fails
        #[arg(long)]
        strict: bool,

        /// Lowercase every alias
        #[arg(long)]
        lowercase_names: bool,

        /// Host file extension to scan (repeatable). Default: py
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },

    /// Evaluate the preset dict of a host file
    Presets {
        /// Host file declaring the preset dict
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (toml, json)
        #[arg(short, long, default_value = "toml")]
        format: PresetFormat,

        /// Name of the dict binding. Default: PRESETS
        #[arg(short, long)]
        binding: Option<String>,

        /// Fail on the first entry that cannot be evaluated
        #[arg(long)]
        strict: bool,
    },

    /// Show how a single host file is matched and parsed
    Inspect {
        /// Host file
        file: PathBuf,
    },
}

/// Buffered writer for `--output`, or stdout when no path is given.
pub(crate) fn output_writer(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(std::io::stdout().lock()),
    };
    Ok(writer)
}
