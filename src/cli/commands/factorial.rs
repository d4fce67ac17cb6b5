//! Factorial command: per-task fan-out over a set of integers

use anyhow::{Result, ensure};
use clap::Args;

use crate::cli::Output;
use crate::config::ParspeedConfig;
use crate::report::Comparison;
use crate::timing::measure;
use crate::workloads::factorial;

#[derive(Args, Debug, Default)]
pub struct FactorialArgs {
    /// Integers to compute factorials of (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub inputs: Vec<u64>,

    /// Number of timed trials (minimum is reported)
    #[arg(long)]
    pub trials: Option<usize>,
}

pub fn execute(
    args: FactorialArgs,
    config: &ParspeedConfig,
    output: &Output,
) -> Result<Comparison> {
    let inputs = if args.inputs.is_empty() {
        config.factorial.inputs.clone()
    } else {
        args.inputs
    };
    let trials = args.trials.unwrap_or(config.factorial.trials);

    output.step(&format!("Computing factorials of {inputs:?} ({trials} trials)"));

    let sequential = measure(trials, || factorial::sequential(&inputs))?;
    let parallel = measure(trials, || factorial::parallel(&inputs))?;
    let parallel_values = parallel.value?;
    ensure!(
        parallel_values == sequential.value,
        "parallel factorials differ from the sequential results"
    );

    let largest_bits = parallel_values.iter().map(|v| v.bits()).max().unwrap_or(0);
    Ok(
        Comparison::new("Factorial", sequential.min, parallel.min, trials)
            .with_detail("Inputs", inputs.len())
            .with_detail("Largest result", format!("{largest_bits} bits")),
    )
}
