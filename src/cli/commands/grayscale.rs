//! Grayscale command: per-row fan-out, timing includes encoding the output file

use anyhow::{Result, ensure};
use clap::Args;
use std::path::PathBuf;

use super::runtime_pool;
use crate::cli::Output;
use crate::config::ParspeedConfig;
use crate::report::Comparison;
use crate::timing::measure;
use crate::workloads::grayscale;

#[derive(Args, Debug, Default)]
pub struct GrayscaleArgs {
    /// Input image (any format the image codec can decode)
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where the sequential result is written
    #[arg(long, value_name = "FILE")]
    pub sequential_output: Option<PathBuf>,

    /// Where the parallel result is written
    #[arg(long, value_name = "FILE")]
    pub parallel_output: Option<PathBuf>,

    /// Number of timed trials (each trial rewrites the outputs)
    #[arg(long)]
    pub trials: Option<usize>,
}

pub fn execute(
    args: GrayscaleArgs,
    config: &ParspeedConfig,
    output: &Output,
) -> Result<Comparison> {
    let settings = &config.grayscale;
    let input = args.input.unwrap_or_else(|| settings.input.clone());
    let sequential_output = args
        .sequential_output
        .unwrap_or_else(|| settings.sequential_output.clone());
    let parallel_output = args
        .parallel_output
        .unwrap_or_else(|| settings.parallel_output.clone());
    let trials = args.trials.unwrap_or(settings.trials);

    let source = grayscale::load(&input)?;
    let (width, height) = source.dimensions();
    let pool = runtime_pool(&config.runtime)?;

    output.step(&format!(
        "Converting {} ({width}x{height}, {height} rows)",
        input.display()
    ));

    let sequential = measure(trials, || -> Result<_> {
        let gray = grayscale::sequential(&source);
        grayscale::save(&sequential_output, &gray)?;
        Ok(gray)
    })?;
    let parallel = measure(trials, || -> Result<_> {
        let gray = grayscale::parallel(&source, &pool)?;
        grayscale::save(&parallel_output, &gray)?;
        Ok(gray)
    })?;
    let sequential_gray = sequential.value?;
    let parallel_gray = parallel.value?;
    ensure!(
        parallel_gray.as_raw() == sequential_gray.as_raw(),
        "parallel grayscale image differs from the sequential image"
    );

    Ok(
        Comparison::new("Grayscale conversion", sequential.min, parallel.min, trials)
            .with_detail("Image", format!("{width}x{height}"))
            .with_detail("Sequential output", sequential_output.display())
            .with_detail("Parallel output", parallel_output.display()),
    )
}
