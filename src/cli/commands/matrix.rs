//! Matrix command: per-cell fan-out on the shared pool

use anyhow::{Result, ensure};
use clap::Args;

use super::runtime_pool;
use crate::cli::Output;
use crate::config::ParspeedConfig;
use crate::report::Comparison;
use crate::timing::measure;
use crate::workloads::matrix::{self, Matrix};

#[derive(Args, Debug, Default)]
pub struct MatrixArgs {
    /// Side length of the square matrices
    #[arg(long)]
    pub size: Option<usize>,

    /// Seed for the random input matrices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of timed trials (minimum is reported)
    #[arg(long)]
    pub trials: Option<usize>,
}

pub fn execute(args: MatrixArgs, config: &ParspeedConfig, output: &Output) -> Result<Comparison> {
    let n = args.size.unwrap_or(config.matrix.size);
    let seed = args.seed.unwrap_or(config.matrix.seed);
    let trials = args.trials.unwrap_or(config.matrix.trials);

    let a = Matrix::random(n, seed);
    let b = Matrix::random(n, seed.wrapping_add(1));
    let pool = runtime_pool(&config.runtime)?;

    output.step(&format!(
        "Multiplying {n}x{n} matrices ({} cells on {} threads)",
        n * n,
        pool.current_num_threads()
    ));

    let sequential = measure(trials, || matrix::multiply_sequential(&a, &b))?;
    let parallel = measure(trials, || matrix::multiply_parallel(&a, &b, &pool))?;
    let sequential_product = sequential.value?;
    let parallel_product = parallel.value?;
    ensure!(
        parallel_product == sequential_product,
        "parallel matrix product differs from the sequential product"
    );

    Ok(
        Comparison::new("Matrix multiplication", sequential.min, parallel.min, trials)
            .with_detail("Size", format!("{n}x{n}"))
            .with_detail("Checksum", parallel_product.checksum()),
    )
}
