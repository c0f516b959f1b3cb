//! CLI command for batch art extraction

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::bail;

use super::output_writer;
use crate::batch::{batch_extract_art, find_art_files};
use crate::cli::progress::{DISK, GEAR, LOOKING_GLASS, print_done, print_step, simple_bar};
use crate::options::ExtractOptions;
use crate::output::{ArtFormat, write_art};

/// Extract art from every host file under `input` and write one document.
///
/// # Errors
/// Fails when the directory cannot be scanned, the output cannot be
/// written, or (strict mode) any file failed.
pub fn execute(
    input: &Path,
    output: Option<&Path>,
    format: ArtFormat,
    options: &ExtractOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    print_step(1, 3, LOOKING_GLASS, "Scanning host files...", quiet);
    let files = find_art_files(input, options)?;
    if files.is_empty() {
        eprintln!("No host files found in: {}", input.display());
    }

    print_step(2, 3, GEAR, &format!("Parsing {} files...", files.len()), quiet);
    let pb = simple_bar(files.len() as u64, "Parsing", quiet);
    let result = batch_extract_art(&files, input, options, |progress| {
        pb.set_position(progress.current as u64);
        if let Some(ref name) = progress.current_file {
            pb.set_message(name.clone());
        }
    });
    pb.finish_and_clear();

    eprintln!();
    eprintln!("Extraction complete:");
    eprintln!("  Parsed: {}", result.success_count);
    eprintln!("  Skipped: {}", result.skip_count);
    eprintln!("  Failed: {}", result.fail_count);

    if result.has_failures() {
        eprintln!();
        eprintln!("Failures:");
        for msg in result.results.iter().filter(|m| m.starts_with("Failed")) {
            eprintln!("  {msg}");
        }
        if options.strict {
            bail!(
                "{} file(s) failed in strict mode; no document written",
                result.fail_count
            );
        }
    }

    let writing = format!("Writing {} records as {format}...", result.records.len());
    print_step(3, 3, DISK, &writing, quiet);
    let mut writer = output_writer(output)?;
    write_art(&result.records, format, &mut writer)?;
    writer.flush()?;

    print_done(started.elapsed(), quiet);
    Ok(())
}
