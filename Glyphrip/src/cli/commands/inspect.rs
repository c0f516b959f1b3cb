//! CLI command showing how one host file is read

use std::path::Path;

use console::style;

use crate::art::{ArtOutcome, RecordMatch, match_record, parse_art};
use crate::options::ExtractOptions;

/// Print the matcher result, the normalized record and its color segments.
///
/// # Errors
/// Fails when the file cannot be read.
pub fn execute(file: &Path, options: &ExtractOptions) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)?;

    println!("Host file: {}", file.display());
    println!();

    let raw = match match_record(&text) {
        RecordMatch::Found(raw) => raw,
        RecordMatch::Partial(partial) => {
            println!("{} {partial}", style("Incomplete record:").yellow());
            return Ok(());
        }
        RecordMatch::Absent => {
            println!("{}", style("No art record").dim());
            return Ok(());
        }
    };

    println!("{}", style("Raw captures").bold());
    println!("  match: {}", raw.names);
    println!("  color: {}", raw.colors);
    println!("  ascii: {} lines", raw.body_lines().len());
    println!();

    let record = match parse_art(&text, options) {
        Ok(ArtOutcome::Parsed(record)) => record,
        Ok(ArtOutcome::Skipped(reason)) => {
            println!("Skipped: {reason}");
            return Ok(());
        }
        Err(e) => {
            println!("{} [{}] {e}", style("Rejected").red(), e.stage());
            return Ok(());
        }
    };

    println!("{}", style("Record").bold());
    println!("  names:  {}", record.names.join(" | "));
    println!("  width:  {}", record.width);
    println!("  height: {}", record.height());
    println!("  colors:");
    for (i, color) in record.colors.iter().enumerate() {
        println!("    c{}: {color:?}", i + 1);
    }
    println!();

    println!("{}", style("Segments").bold());
    for segment in record.segments() {
        let color = record
            .color_of(&segment)
            .map_or_else(|| "-".to_string(), |c| format!("{c:?}"));
        println!("  {:<24} {:?}", color, segment.text);
    }

    Ok(())
}
