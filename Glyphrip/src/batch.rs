//! Batch art extraction
//!
//! Discovers host files under a directory and extracts their art records in
//! parallel. Every file is attempted; the result keeps records and failures
//! in discovery order along with a per-file message and the tallies.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::art::{ArtOutcome, ArtRecord, parse_art_file};
use crate::error::{Error, Result};
use crate::options::ExtractOptions;

/// Progress of a batch run.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Files started so far (1-based).
    pub current: usize,
    /// Total files in the batch.
    pub total: usize,
    /// Display path of the file just started.
    pub current_file: Option<String>,
}

impl BatchProgress {
    /// Progress with the current file name.
    #[must_use]
    pub fn with_file(current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            current,
            total,
            current_file: Some(file.into()),
        }
    }
}

/// Result of a batch art extraction
#[derive(Debug, Default)]
pub struct BatchArtResult {
    /// Extracted records, in file order
    pub records: Vec<ArtRecord>,
    /// Number of files with a record
    pub success_count: usize,
    /// Number of files without a record
    pub skip_count: usize,
    /// Number of files that failed
    pub fail_count: usize,
    /// Per-file failures, each wrapped in [`Error::InFile`]
    pub failures: Vec<Error>,
    /// Messages for each file processed
    pub results: Vec<String>,
}

impl BatchArtResult {
    /// Whether any file failed.
    pub fn has_failures(&self) -> bool {
        self.fail_count > 0
    }
}

/// Find host files under `dir` whose extension is accepted by `options`.
///
/// # Returns
/// A sorted list of file paths.
///
/// # Errors
/// Fails when the directory itself cannot be read.
pub fn find_art_files<P: AsRef<Path>>(dir: P, options: &ExtractOptions) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", dir.display()),
        )));
    }

    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(options.follow_links)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && options.accepts(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    Ok(files)
}

/// Extract art from `files` in parallel.
///
/// # Arguments
/// * `files` - Host files to process
/// * `source_base` - Base directory, used to shorten paths in messages
/// * `options` - Extraction options
/// * `progress` - Callback for progress updates
pub fn batch_extract_art<F>(
    files: &[PathBuf],
    source_base: &Path,
    options: &ExtractOptions,
    progress: F,
) -> BatchArtResult
where
    F: Fn(&BatchProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let skip_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = files.len();

    let outcomes: Vec<(String, Result<ArtOutcome>)> = files
        .par_iter()
        .map(|path| {
            let display_path = path
                .strip_prefix(source_base)
                .unwrap_or(path.as_path())
                .to_string_lossy()
                .to_string();

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress::with_file(current, total, display_path.clone()));

            let outcome = parse_art_file(path, options);
            match &outcome {
                Ok(ArtOutcome::Parsed(_)) => success_counter.fetch_add(1, Ordering::SeqCst),
                Ok(ArtOutcome::Skipped(_)) => skip_counter.fetch_add(1, Ordering::SeqCst),
                Err(_) => fail_counter.fetch_add(1, Ordering::SeqCst),
            };
            (display_path, outcome)
        })
        .collect();

    let mut result = BatchArtResult {
        success_count: success_counter.load(Ordering::SeqCst),
        skip_count: skip_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        ..BatchArtResult::default()
    };

    for (display_path, outcome) in outcomes {
        match outcome {
            Ok(ArtOutcome::Parsed(record)) => {
                result
                    .results
                    .push(format!("Parsed {display_path}: {}", record.names.join("/")));
                result.records.push(record);
            }
            Ok(ArtOutcome::Skipped(reason)) => {
                result.results.push(format!("Skipped {display_path}: {reason}"));
            }
            Err(e) => {
                tracing::warn!("Failed {}: {}", display_path, e);
                result.results.push(format!("Failed {display_path}: {e}"));
                result.failures.push(e);
            }
        }
    }

    result
}
