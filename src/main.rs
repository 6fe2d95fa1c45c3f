//! mascot: build a random mascot from a directory of part assets and save it
//! as a PNG.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mascot_builder::{DirAssetSource, InputEvent, Mascot, MascotConfig, Result};

#[derive(Parser, Debug)]
#[command(name = "mascot", version, about = "Compose a layered mascot into a PNG")]
struct Cli {
    /// Directory holding `{part}/{part}{n}.svg` assets
    #[arg(short, long)]
    assets: PathBuf,

    /// JSON config listing parts and variant counts (defaults to the built-in set)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible variant choices
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON array of input events to replay after randomizing
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Directory to write the exported image into
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MascotConfig::load(path)?,
        None => MascotConfig::default(),
    };

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let source = DirAssetSource::new(&cli.assets);
    let mut mascot = match cli.seed {
        Some(seed) => Mascot::with_seed(config, source, seed)?,
        None => Mascot::new(config, source)?,
    };

    for (part, result) in mascot.randomize_all() {
        match result {
            Ok(resolved) => tracing::info!(part = %part, variant = resolved.variant, "part loaded"),
            Err(e) => tracing::warn!(part = %part, error = %e, "part kept without an image"),
        }
    }

    if let Some(path) = &cli.events {
        let events: Vec<InputEvent> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        tracing::info!(count = events.len(), "replaying events");
        for event in events {
            mascot.enqueue(event);
        }
        for result in mascot.process_pending() {
            if let Err(e) = result {
                tracing::warn!(error = %e, "event failed");
            }
        }
    }

    for notice in mascot.take_notices() {
        eprintln!("{notice}");
    }

    let path = mascot.export_to_dir(&cli.out)?;
    println!("{}", path.display());
    Ok(())
}
