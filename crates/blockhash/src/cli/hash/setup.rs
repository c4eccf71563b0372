//! Merge CLI flags into the config and build the hashing context.

use anyhow::Context;
use blockhash_core::{Config, HashPipeline, ImageDecoder, Interpolation, OutputFormat};

use super::{HashArgs, HashContext};

/// Apply command-line flags on top of the loaded configuration.
///
/// Flags win over the config file; the merged result is validated as a whole.
pub fn apply_overrides(config: &mut Config, args: &HashArgs) -> anyhow::Result<()> {
    if let Some(quick) = toggle(args.quick, args.no_quick) {
        config.hash.quick = quick;
    }
    if let Some(bits) = args.bits {
        config.hash.bits = bits;
    }
    if let Some(size) = args.size {
        config.hash.size = Some(size);
    }
    if let Some(code) = args.interpolation {
        config.hash.interpolation = Interpolation::try_from(code)?;
    }
    if let Some(debug) = toggle(args.debug, args.no_debug) {
        config.hash.debug = debug;
    }
    if let Some(workers) = args.parallel {
        config.processing.parallel_workers = workers;
    }
    if let Some(format) = args.format {
        config.output.format = format.to_string();
    }
    if let Some(pretty) = toggle(args.pretty, args.no_pretty) {
        config.output.pretty = pretty;
    }

    config.validate()?;
    Ok(())
}

/// Resolve a `--flag` / `--no-flag` pair; `None` leaves the config value.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Build the pipeline, decoder, and output settings from a validated config.
pub fn build_context(config: &Config) -> anyhow::Result<HashContext> {
    let pipeline =
        HashPipeline::new(config.hash.clone())?.with_observer(|grid| eprintln!("{grid}\n"));
    let output_format = OutputFormat::parse(&config.output.format)
        .with_context(|| format!("Unknown output format: {}", config.output.format))?;

    tracing::debug!(
        "Hashing with bits={} quick={} size={:?} interpolation={}",
        config.hash.bits,
        config.hash.quick,
        config.hash.size,
        u8::from(config.hash.interpolation)
    );

    Ok(HashContext {
        pipeline,
        decoder: ImageDecoder::new(config.limits.clone()),
        output_format,
        pretty: config.output.pretty,
        workers: config.processing.parallel_workers,
        timeout_ms: config.limits.decode_timeout_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::super::types::OutputFormat as CliFormat;
    use super::*;
    use std::path::PathBuf;

    fn args() -> HashArgs {
        HashArgs {
            inputs: vec![PathBuf::from("a.png")],
            ..Default::default()
        }
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args()).unwrap();
        assert_eq!(config.hash.bits, 16);
        assert!(!config.hash.quick);
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        let args = HashArgs {
            quick: true,
            bits: Some(8),
            size: Some((256, 128)),
            interpolation: Some(3),
            parallel: Some(4),
            format: Some(CliFormat::Jsonl),
            ..args()
        };
        apply_overrides(&mut config, &args).unwrap();

        assert!(config.hash.quick);
        assert_eq!(config.hash.bits, 8);
        assert_eq!(config.hash.size, Some((256, 128)));
        assert_eq!(config.hash.interpolation, Interpolation::Bicubic);
        assert_eq!(config.processing.parallel_workers, 4);
        assert_eq!(config.output.format, "jsonl");
    }

    #[test]
    fn test_negated_flags_turn_config_off() {
        let mut config = Config::default();
        config.hash.quick = true;
        config.hash.debug = true;
        config.output.pretty = true;
        let args = HashArgs {
            no_quick: true,
            no_debug: true,
            no_pretty: true,
            ..args()
        };
        apply_overrides(&mut config, &args).unwrap();

        assert!(!config.hash.quick);
        assert!(!config.hash.debug);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_unset_toggles_keep_config() {
        let mut config = Config::default();
        config.hash.quick = true;
        apply_overrides(&mut config, &args()).unwrap();
        assert!(config.hash.quick);
    }

    #[test]
    fn test_oversized_bits_rejected() {
        let mut config = Config::default();
        let args = HashArgs {
            bits: Some(65536),
            ..args()
        };
        assert!(apply_overrides(&mut config, &args).is_err());
    }

    #[test]
    fn test_odd_bits_rejected() {
        let mut config = Config::default();
        let args = HashArgs {
            bits: Some(7),
            ..args()
        };
        assert!(apply_overrides(&mut config, &args).is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default();
        let args = HashArgs {
            parallel: Some(0),
            ..args()
        };
        assert!(apply_overrides(&mut config, &args).is_err());
    }

    #[test]
    fn test_build_context() {
        let config = Config::default();
        let ctx = build_context(&config).unwrap();
        assert_eq!(ctx.output_format, OutputFormat::Text);
        assert_eq!(ctx.workers, 1);
        assert_eq!(ctx.pipeline.config().bits, 16);
    }
}
