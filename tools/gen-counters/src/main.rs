//! gen-counters - render damage and status counter PNGs

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gen_counters::{CounterStyle, DEFAULT_SIZE, generate_counters};

#[derive(Parser)]
#[command(name = "gen-counters")]
#[command(about = "Generate coin-style damage and status counter images")]
struct Cli {
    /// Output directory
    #[arg(short, long, default_value = "src/plugins/pokemon/counters")]
    output: PathBuf,

    /// Image edge length in pixels
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    size: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let written = generate_counters(&cli.output, &CounterStyle::with_size(cli.size))?;

    println!(
        "Generated {} counters in {}",
        written.len(),
        cli.output.display()
    );
    Ok(())
}
