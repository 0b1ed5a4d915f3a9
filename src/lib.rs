pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod tilemap;
pub mod writer;

use anyhow::Context;
use clap::Parser;
use log::info;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let config = match &args.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::default(),
    };

    // 1. ── Decode ─────────────────────────────────────────────────────
    let askm = parser::load_askm(&args.input)?;

    // 2. ── Project ────────────────────────────────────────────────────
    let tmx = processor::run(&askm, &config, &args.resource)
        .with_context(|| format!("Converting {}", args.input.display()))?;

    // 3. ── Write output ───────────────────────────────────────────────
    writer::tiled::emit(&tmx, &args.output)
        .with_context(|| format!("Writing {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    Ok(())
}
