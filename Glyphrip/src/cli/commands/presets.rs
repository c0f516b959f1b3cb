//! CLI command for preset evaluation

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use super::output_writer;
use crate::cli::progress::{print_done, simple_spinner};
use crate::options::ExtractOptions;
use crate::output::{PresetFormat, write_presets};
use crate::presets::extract_presets_file;

/// Evaluate the preset dict of `input` and write the name to colors mapping.
///
/// # Errors
/// Fails when the file cannot be read, the binding is missing or not a dict,
/// the output cannot be written, or (strict mode) any entry failed.
pub fn execute(
    input: &Path,
    output: Option<&Path>,
    format: PresetFormat,
    options: &ExtractOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    let spinner = simple_spinner(&format!("Evaluating {}...", input.display()), quiet);
    let result = extract_presets_file(input, options);
    spinner.finish_and_clear();
    let table = result?;

    eprintln!(
        "Evaluated {} presets ({} failed)",
        table.entries.len(),
        table.failures.len()
    );
    for failure in &table.failures {
        eprintln!("  Failed {failure}");
    }

    let mut writer = output_writer(output)?;
    write_presets(&table.to_map(), format, &mut writer)?;
    writer.flush()?;

    print_done(started.elapsed(), quiet);
    Ok(())
}
