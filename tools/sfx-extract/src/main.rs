//! extract-sfx - extract every sound effect from the Pokémon TCG ROM
//!
//! ```bash
//! extract-sfx --rom pokemon_card_game.gb --output public/sfx
//! extract-sfx --skip-unused --quiet
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sfx_extract::{ExtractConfig, ExtractOptions, ExtractionOutcome, ExtractionReport, backend};

/// Extract SFX from the Pokémon TCG Game Boy ROM
#[derive(Parser)]
#[command(name = "extract-sfx")]
#[command(about = "Extract SFX from Pokemon TCG Game Boy ROM")]
#[command(version)]
struct Cli {
    /// Path to the ROM file
    #[arg(short, long, default_value = "pokemon_card_game.gb")]
    rom: PathBuf,

    /// Output directory for encoded files
    #[arg(short, long, default_value = "public/sfx")]
    output: PathBuf,

    /// Skip unused SFX entries
    #[arg(long)]
    skip_unused: bool,

    /// Suppress per-file output
    #[arg(short, long)]
    quiet: bool,

    /// Tuning and catalog overrides (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(&cli) {
        Ok(report) => {
            print_summary(&report);
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExtractionReport> {
    let config = match &cli.config {
        Some(path) => ExtractConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ExtractConfig::default(),
    };

    tracing::debug!(
        "Emulation backend: {}",
        backend::backend_name().unwrap_or("none")
    );

    let options = ExtractOptions {
        rom: cli.rom.clone(),
        output_dir: cli.output.clone(),
        skip_unused: cli.skip_unused,
        verbose: !cli.quiet,
    };

    let report = sfx_extract::extract(&options, &config, backend::start_machine)
        .context("Extraction aborted")?;
    Ok(report)
}

fn print_summary(report: &ExtractionReport) {
    println!();
    println!("Extraction complete!");
    println!("  Extracted: {} SFX", report.succeeded());
    println!("  Failed: {}", report.failed());
    if report.skipped() > 0 {
        println!("  Skipped: {}", report.skipped());
    }

    let failed = report.failed_names();
    if !failed.is_empty() {
        println!("  Failed SFX: {}", failed.join(", "));
        for (name, outcome) in &report.outcomes {
            if let ExtractionOutcome::Failed(err) = outcome {
                tracing::debug!("{}: {}", name, err);
            }
        }
    }
}
