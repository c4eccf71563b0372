//! Batch hashing: sequential and parallel runs with progress and streaming output.

use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use blockhash_core::pipeline::format_to_string;
use blockhash_core::{
    BlockhashError, HashPipeline, HashRecord, ImageDecoder, OutputWriter, PipelineError,
};
use futures_util::stream::{self, StreamExt};
use indicatif::ProgressBar;

use super::{HashArgs, HashContext};

/// Hash files one after another on the current thread.
///
/// Decoding is lazy: each file is read only when its hash is requested.
pub fn hash_sequential(
    ctx: HashContext,
    args: &HashArgs,
    files: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let mut run = BatchRun::new(&ctx, args, files.len())?;

    // Filled by the decode step, drained once per hash.
    let decoded_info: Cell<Option<(u32, u32, String)>> = Cell::new(None);
    let images = files.iter().map(|path| {
        ctx.decoder.decode(path).map(|decoded| {
            decoded_info.set(Some((
                decoded.width,
                decoded.height,
                format_to_string(decoded.format),
            )));
            decoded.image
        })
    });

    for (path, result) in files.iter().zip(ctx.pipeline.hash_results(images)) {
        let info = decoded_info.take();
        let record = result.and_then(|hash| {
            let (width, height, format) = info.ok_or_else(|| PipelineError::Decode {
                path: path.clone(),
                message: "Missing decode information".to_string(),
            })?;
            Ok(HashRecord::new(path, &hash, width, height, format))
        });
        run.report(path, record)?;
    }

    run.finish()
}

/// Hash files on tokio's blocking pool with at most `workers` in flight.
///
/// Results are reported in input order. Each file is bounded by the decode
/// timeout.
pub async fn hash_parallel(
    ctx: HashContext,
    args: &HashArgs,
    files: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let mut run = BatchRun::new(&ctx, args, files.len())?;
    let timeout_ms = ctx.timeout_ms;
    let pipeline = Arc::new(ctx.pipeline);
    let decoder = Arc::new(ctx.decoder);

    tracing::debug!("Hashing with {} workers", ctx.workers);

    let mut results = stream::iter(files)
        .map(|path| {
            let pipeline = Arc::clone(&pipeline);
            let decoder = Arc::clone(&decoder);
            async move {
                let task_path = path.clone();
                let task = tokio::task::spawn_blocking(move || {
                    hash_file(&pipeline, &decoder, &task_path)
                });
                let record = match tokio::time::timeout(Duration::from_millis(timeout_ms), task)
                    .await
                {
                    Ok(Ok(record)) => record,
                    Ok(Err(e)) => Err(PipelineError::Decode {
                        path: path.clone(),
                        message: format!("Task join error: {e}"),
                    }
                    .into()),
                    Err(_) => Err(PipelineError::Timeout {
                        path: path.clone(),
                        stage: "hash".to_string(),
                        timeout_ms,
                    }
                    .into()),
                };
                (path, record)
            }
        })
        .buffered(ctx.workers);

    while let Some((path, record)) = results.next().await {
        run.report(&path, record)?;
    }

    run.finish()
}

/// Decode and hash one file.
fn hash_file(
    pipeline: &HashPipeline,
    decoder: &ImageDecoder,
    path: &Path,
) -> Result<HashRecord, BlockhashError> {
    let decoded = decoder.decode(path)?;
    let hash = pipeline.hash_image(&decoded.image)?;
    Ok(HashRecord::new(
        path,
        &hash,
        decoded.width,
        decoded.height,
        format_to_string(decoded.format),
    ))
}

/// Output, progress, and counters shared by both run modes.
struct BatchRun {
    writer: OutputWriter<Box<dyn Write>>,
    output_path: Option<PathBuf>,
    progress: ProgressBar,
    total: usize,
    succeeded: u64,
    failed: u64,
    start_time: Instant,
}

impl BatchRun {
    fn new(ctx: &HashContext, args: &HashArgs, total: usize) -> anyhow::Result<Self> {
        let sink: Box<dyn Write> = match &args.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(io::stdout().lock()),
        };

        // Stdout carries the hashes, so only draw progress when writing to a file.
        let progress = if args.output.is_some() && total > 1 {
            create_progress_bar(total as u64)
        } else {
            ProgressBar::hidden()
        };

        Ok(Self {
            writer: OutputWriter::new(sink, ctx.output_format, ctx.pretty),
            output_path: args.output.clone(),
            progress,
            total,
            succeeded: 0,
            failed: 0,
            start_time: Instant::now(),
        })
    }

    fn report(
        &mut self,
        path: &Path,
        record: Result<HashRecord, BlockhashError>,
    ) -> anyhow::Result<()> {
        match record {
            Ok(record) => {
                self.succeeded += 1;
                self.writer.write(&record)?;
            }
            Err(e) => {
                self.failed += 1;
                self.progress
                    .suspend(|| tracing::error!("Failed: {:?} - {}", path, e));
            }
        }

        self.progress.inc(1);
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            let rate = (self.succeeded + self.failed) as f64 / elapsed;
            self.progress.set_message(format!("{:.1} img/sec", rate));
        }
        Ok(())
    }

    fn finish(mut self) -> anyhow::Result<()> {
        self.writer.finish()?;
        self.progress.finish_and_clear();

        if let Some(path) = &self.output_path {
            tracing::info!("Output written to {:?}", path);
        }
        tracing::info!(
            "Hashed {} of {} file(s) in {:.2}s ({} failed)",
            self.succeeded,
            self.total,
            self.start_time.elapsed().as_secs_f64(),
            self.failed
        );

        if self.succeeded == 0 && self.failed > 0 {
            anyhow::bail!("All {} file(s) failed to hash", self.failed);
        }
        Ok(())
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    use indicatif::ProgressStyle;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}
