//! Pi command: Nilakantha series over a fixed number of blocks

use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::config::ParspeedConfig;
use crate::report::Comparison;
use crate::timing::measure;
use crate::workloads::pi::{self, Reduction};

/// Allowed drift between the two sums from floating-point reassociation
const TOLERANCE: f64 = 1e-9;

#[derive(Args, Debug, Default)]
pub struct PiArgs {
    /// Number of series terms
    #[arg(long)]
    pub terms: Option<usize>,

    /// Number of contiguous blocks (one thread each)
    #[arg(long)]
    pub workers: Option<usize>,

    /// How block sums are merged
    #[arg(long, value_enum)]
    pub reduction: Option<Reduction>,

    /// Number of timed trials (minimum is reported)
    #[arg(long)]
    pub trials: Option<usize>,
}

pub fn execute(args: PiArgs, config: &ParspeedConfig, output: &Output) -> Result<Comparison> {
    let terms = args.terms.unwrap_or(config.pi.terms);
    let workers = args.workers.unwrap_or(config.pi.workers);
    let reduction = args.reduction.unwrap_or(config.pi.reduction);
    let trials = args.trials.unwrap_or(config.pi.trials);

    output.step(&format!(
        "Summing {terms} terms in {workers} blocks ({reduction:?} reduction, {trials} trials)"
    ));

    let sequential = measure(trials, || pi::sequential(terms))?;
    let parallel = measure(trials, || pi::parallel(terms, workers, reduction))?;
    let parallel_pi = parallel.value?;

    let drift = (parallel_pi - sequential.value).abs();
    if drift > TOLERANCE {
        output.warning(&format!("parallel sum drifted by {drift:e} from the sequential sum"));
    }

    Ok(
        Comparison::new("Pi (Nilakantha)", sequential.min, parallel.min, trials)
            .with_detail("Sequential π", format!("{:.15}", sequential.value))
            .with_detail("Parallel π", format!("{parallel_pi:.15}"))
            .with_detail("Math π", format!("{:.15}", std::f64::consts::PI)),
    )
}
