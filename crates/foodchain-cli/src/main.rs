//! Foodchain CLI — drive simulated purchases through the supply chain.
//!
//! Subcommands: catalog, buy, demo.

mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use foodchain_core::SimulationConfig;
use tracing_subscriber::EnvFilter;

/// Foodchain — a supply chain, one hand-off at a time.
#[derive(Parser, Debug)]
#[command(name = "foodchain", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the product catalog.
    Catalog(commands::catalog::CatalogArgs),
    /// Buy a product through a freshly assembled chain.
    Buy(commands::buy::BuyArgs),
    /// Run the scripted demo: a purchase, an underpayment, and a
    /// double-spend attempt.
    Demo(commands::demo::DemoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());
    init_tracing(&level);
    tracing::debug!(?config, "configuration loaded");

    match &cli.command {
        Commands::Catalog(args) => commands::catalog::run(args),
        Commands::Buy(args) => commands::buy::run(args, &config),
        Commands::Demo(args) => commands::demo::run(args, &config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SimulationConfig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        }
        None => Ok(SimulationConfig::default()),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
