//! Records command: per-record fan-out (or a bounded pool), index-tagged merge and stable sort

use anyhow::{Result, ensure};
use clap::Args;
use std::path::PathBuf;

use super::runtime_workers;
use crate::cli::Output;
use crate::config::ParspeedConfig;
use crate::report::Comparison;
use crate::timing::measure;
use crate::workloads::records::{self, Dispatch};

#[derive(Args, Debug, Default)]
pub struct RecordsArgs {
    /// JSON file holding an array of records
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where the sequentially sorted records are written
    #[arg(long, value_name = "FILE")]
    pub sequential_output: Option<PathBuf>,

    /// Where the parallel sorted records are written
    #[arg(long, value_name = "FILE")]
    pub parallel_output: Option<PathBuf>,

    /// How records are handed to concurrent units
    #[arg(long, value_enum)]
    pub dispatch: Option<Dispatch>,

    /// Number of timed trials (minimum is reported)
    #[arg(long)]
    pub trials: Option<usize>,
}

pub fn execute(args: RecordsArgs, config: &ParspeedConfig, output: &Output) -> Result<Comparison> {
    let settings = &config.records;
    let input = args.input.unwrap_or_else(|| settings.input.clone());
    let sequential_output = args
        .sequential_output
        .unwrap_or_else(|| settings.sequential_output.clone());
    let parallel_output = args
        .parallel_output
        .unwrap_or_else(|| settings.parallel_output.clone());
    let trials = args.trials.unwrap_or(settings.trials);
    let dispatch = args.dispatch.unwrap_or(settings.dispatch);

    let people = records::read(&input)?;
    let workers = runtime_workers(&config.runtime);

    let units = match dispatch {
        Dispatch::PerRecord => format!("{} units", people.len()),
        Dispatch::Pool => format!("{workers} pooled workers"),
    };
    output.step(&format!(
        "Sorting {} records from {} ({units})",
        people.len(),
        input.display()
    ));

    let sequential = measure(trials, || records::sequential(people.clone()))?;
    let parallel = measure(trials, || records::parallel(&people, dispatch, workers))?;
    let parallel_sorted = parallel.value?;
    ensure!(
        parallel_sorted == sequential.value,
        "parallel record order differs from the sequential order"
    );

    records::write(&sequential_output, &sequential.value)?;
    records::write(&parallel_output, &parallel_sorted)?;
    output.success(&format!(
        "Wrote {} and {}",
        sequential_output.display(),
        parallel_output.display()
    ));

    Ok(
        Comparison::new("Record sorting", sequential.min, parallel.min, trials)
            .with_detail("Records", people.len()),
    )
}
