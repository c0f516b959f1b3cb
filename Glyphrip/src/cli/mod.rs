//! Glyphrip CLI - Command-line interface for art and preset extraction

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glyphrip")]
#[command(about = "Glyphrip: extract ASCII art and color presets from host source files", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug log output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and hide progress bars
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Load extraction options from a TOML file (flags override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub quiet: bool,
    pub config: Option<PathBuf>,
}

/// Run the Glyphrip CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };
    cli.command.execute(&global)?;

    Ok(())
}
