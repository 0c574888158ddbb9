//! CLI entry point for the tile mosaic generator

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wfc_mosaic::io::cli::{Cli, MosaicRunner};

fn main() -> wfc_mosaic::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut runner = MosaicRunner::new(cli);
    runner.process()?;
    Ok(())
}
