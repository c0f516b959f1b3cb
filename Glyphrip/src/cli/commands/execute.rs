//! Command execution implementations

use super::Commands;
use super::{art, inspect, presets};
use crate::cli::GlobalArgs;
use crate::options::ExtractOptions;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let base = load_options(global)?;

        match self {
            Commands::Art {
                input,
                output,
                format,
                strict,
                lowercase_names,
                extensions,
            } => {
                let strict = base.strict || *strict;
                let lowercase = base.lowercase_names || *lowercase_names;
                let mut options = base.with_strict(strict).with_lowercase_names(lowercase);
                if !extensions.is_empty() {
                    options = options.with_extensions(extensions.iter().cloned());
                }
                art::execute(input, output.as_deref(), *format, &options, global.quiet)
            }
            Commands::Presets {
                input,
                output,
                format,
                binding,
                strict,
            } => {
                let strict = base.strict || *strict;
                let mut options = base.with_strict(strict);
                if let Some(binding) = binding {
                    options = options.with_binding_name(binding.clone());
                }
                presets::execute(input, output.as_deref(), *format, &options, global.quiet)
            }
            Commands::Inspect { file } => inspect::execute(file, &base),
        }
    }
}

/// Options from `--config`, or the defaults.
fn load_options(global: &GlobalArgs) -> anyhow::Result<ExtractOptions> {
    match &global.config {
        Some(path) => {
            tracing::debug!("Loading options from {}", path.display());
            Ok(ExtractOptions::from_toml_file(path)?)
        }
        None => Ok(ExtractOptions::default()),
    }
}
