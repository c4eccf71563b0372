//! The `blockhash hash` command for hashing image files.

mod batch;
mod setup;
pub mod types;

pub use types::OutputFormat;

use blockhash_core::config::parse_size;
use blockhash_core::{
    Config, FileDiscovery, HashPipeline, ImageDecoder, OutputFormat as CoreOutputFormat,
};
use clap::Args;
use std::path::PathBuf;

use batch::{hash_parallel, hash_sequential};
use setup::apply_overrides;

/// Arguments for the `hash` command.
#[derive(Args, Debug, Default)]
pub struct HashArgs {
    /// Image files or directories to hash
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Use the fast method (block edges truncated, no pixel weighting)
    #[arg(long, overrides_with = "no_quick")]
    pub quick: bool,

    /// Use the weighted method even if the config enables quick mode
    #[arg(long, overrides_with = "quick")]
    pub no_quick: bool,

    /// Grid side; the hash has bits*bits bits (must be even)
    #[arg(short, long)]
    pub bits: Option<u32>,

    /// Resize every image to WIDTHxHEIGHT before hashing
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Resize filter: 1 nearest, 2 bilinear, 3 bicubic, 4 antialias
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub interpolation: Option<u8>,

    /// Print the bit grid of each hash to stderr
    #[arg(long, overrides_with = "no_debug")]
    pub debug: bool,

    /// Disable bit grid output enabled in the config
    #[arg(long, overrides_with = "debug")]
    pub no_debug: bool,

    /// Number of parallel workers
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON array output
    #[arg(long, overrides_with = "no_pretty")]
    pub pretty: bool,

    /// Compact JSON array output even if the config enables pretty printing
    #[arg(long, overrides_with = "pretty")]
    pub no_pretty: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Everything a hashing run needs, assembled by `setup`.
pub(crate) struct HashContext {
    pub pipeline: HashPipeline,
    pub decoder: ImageDecoder,
    pub output_format: CoreOutputFormat,
    pub pretty: bool,
    pub workers: usize,
    pub timeout_ms: u64,
}

/// Execute the hash command.
pub async fn execute(args: HashArgs, mut config: Config) -> anyhow::Result<()> {
    apply_overrides(&mut config, &args)?;
    let ctx = setup::build_context(&config)?;

    let discovery = FileDiscovery::new(config.processing.clone());
    let files = discovery.discover_all(&args.inputs);
    if files.is_empty() {
        tracing::warn!("No supported image files found in {:?}", args.inputs);
        return Ok(());
    }
    tracing::info!("Found {} image(s) to hash", files.len());

    if ctx.workers > 1 && files.len() > 1 {
        hash_parallel(ctx, &args, files).await
    } else {
        hash_sequential(ctx, &args, files)
    }
}
