//! Blockhash CLI - perceptual hashes of image files.
//!
//! Prints one `{hash}  {filename}` line per input image, or JSON records.
//!
//! # Usage
//!
//! ```bash
//! # Hash a few files
//! blockhash hash a.jpg b.png
//!
//! # 8x8 grid, resize to 256x256 first, show bit maps
//! blockhash hash --bits 8 --size 256x256 --interpolation 4 --debug a.jpg
//!
//! # Walk a directory with 4 workers, JSON Lines to a file
//! blockhash hash ./photos/ -p 4 -f jsonl -o hashes.jsonl
//!
//! # View configuration
//! blockhash config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Blockhash - block mean value perceptual image hashing.
#[derive(Parser, Debug)]
#[command(name = "blockhash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "BLOCKHASH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute hashes of image files or directories
    Hash(cli::hash::HashArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `blockhash config path`."
            );
            blockhash_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("blockhash v{}", blockhash_core::VERSION);

    match cli.command {
        Commands::Hash(args) => cli::hash::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, cli.config.as_deref()),
    }
}
