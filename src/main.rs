//! Asteroid Field: fly a triangle through a wrapping field of asteroids.
//!
//! Usage:
//!   asteroid_field [--config <file.toml>] [--seed <n>] [--dump-config <file.toml>]
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use asteroid_field::config::GameConfig;
use asteroid_field::EngineBuilder;

#[derive(Parser)]
#[command(name = "asteroid_field")]
#[command(about = "Asteroids arcade game")]
struct Args {
    /// TOML configuration file; missing sections use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for world generation, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }

    if let Some(path) = &args.dump_config {
        config
            .save(path)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        info!("Configuration written to {}", path.display());
        return Ok(());
    }

    EngineBuilder::new()
        .with_config(config)
        .build()
        .run()
        .map_err(|e| anyhow::anyhow!("Platform failure: {e}"))?;

    Ok(())
}
