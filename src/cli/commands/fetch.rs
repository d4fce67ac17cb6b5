//! Fetch command: one task per endpoint, failures counted rather than fatal

use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::config::ParspeedConfig;
use crate::report::Comparison;
use crate::timing::measure_async;
use crate::workloads::fetch::{aggregate_parallel, aggregate_sequential, fetch_payload};

#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Endpoint URL (repeatable; replaces the configured list)
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoints: Vec<String>,

    /// Number of timed trials (each trial re-fetches every endpoint)
    #[arg(long)]
    pub trials: Option<usize>,
}

pub async fn execute(
    args: FetchArgs,
    config: &ParspeedConfig,
    output: &Output,
) -> Result<Comparison> {
    let endpoints = if args.endpoints.is_empty() {
        config.fetch.endpoints.clone()
    } else {
        args.endpoints
    };
    let trials = args.trials.unwrap_or(config.fetch.trials);
    let client = reqwest::Client::new();

    output.step(&format!("Fetching {} endpoints", endpoints.len()));

    let (client, urls) = (&client, endpoints.as_slice());
    let sequential = measure_async(trials, move || {
        aggregate_sequential(urls, move |url| fetch_payload(client.clone(), url))
    })
    .await?;
    let parallel = measure_async(trials, move || {
        aggregate_parallel(urls, move |url| fetch_payload(client.clone(), url))
    })
    .await?;
    let parallel_stats = parallel.value?;

    if parallel_stats.errors > 0 || sequential.value.errors > 0 {
        output.warning(&format!(
            "{} endpoint(s) failed; their records are not counted",
            parallel_stats.errors.max(sequential.value.errors)
        ));
    }

    Ok(
        Comparison::new("HTTP aggregation", sequential.min, parallel.min, trials)
            .with_detail("Sequential records fetched", sequential.value.successes)
            .with_detail("Sequential errors", sequential.value.errors)
            .with_detail("Parallel records fetched", parallel_stats.successes)
            .with_detail("Parallel errors", parallel_stats.errors),
    )
}
