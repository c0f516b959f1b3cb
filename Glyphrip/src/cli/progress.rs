//! CLI progress display utilities
//!
//! Step indicators, spinners and progress bars. Everything here draws to
//! stderr so documents written to stdout stay clean.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Gear - for processing/evaluation operations
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

// =============================================================================
// Step-Based Progress
// =============================================================================

/// Print a step indicator: `[1/3] 🔍 Message...`, unless `quiet`
///
/// # Example
/// ```ignore
/// print_step(1, 3, LOOKING_GLASS, "Scanning host files...", quiet);
/// print_step(2, 3, GEAR, "Parsing art...", quiet);
/// print_step(3, 3, DISK, "Writing document...", quiet);
/// ```
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str, quiet: bool) {
    if let Some(line) = step_line(current, total, &emoji, msg, quiet) {
        eprintln!("{line}");
    }
}

/// Print completion message: `✨ Done in 2s`, unless `quiet`
pub fn print_done(elapsed: Duration, quiet: bool) {
    if let Some(line) = done_line(elapsed, quiet) {
        eprintln!("{line}");
    }
}

fn step_line(
    current: usize,
    total: usize,
    emoji: &Emoji,
    msg: &str,
    quiet: bool,
) -> Option<String> {
    (!quiet).then(|| {
        format!(
            "{} {}{}",
            style(format!("[{current}/{total}]")).bold().dim(),
            emoji,
            msg
        )
    })
}

fn done_line(elapsed: Duration, quiet: bool) -> Option<String> {
    (!quiet).then(|| format!("{} Done in {}", SPARKLE, HumanDuration(elapsed)))
}

// =============================================================================
// Progress Styles
// =============================================================================

/// Progress bar style for determinate progress
///
/// Format: `Parsing [████████░░░░░░░░] 50/100`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .expect("valid template")
}

// =============================================================================
// Simple Progress Helpers
// =============================================================================

/// Create a simple spinner, or a hidden one when `quiet`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn simple_spinner(msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a simple progress bar, or a hidden one when `quiet`
#[must_use]
pub fn simple_bar(total: u64, msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(bar_style());
    pb.set_message(msg.to_string());
    pb
}
