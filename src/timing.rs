//! Minimum-of-N wall-clock measurement
//!
//! The minimum is reported rather than the mean or median: scheduler noise only ever adds
//! time, so the fastest trial is the closest to the workload's real cost.

use anyhow::{Result, ensure};
use std::future::Future;
use std::time::{Duration, Instant};

/// Outcome of a repeated measurement
#[derive(Debug, Clone)]
pub struct Measurement<T> {
    /// Fastest observed trial
    pub min: Duration,
    /// Value produced by the last trial
    pub value: T,
    /// Number of trials that were run
    pub trials: usize,
}

/// Run `f` exactly `trials` times and keep the fastest duration
pub fn measure<T, F>(trials: usize, mut f: F) -> Result<Measurement<T>>
where
    F: FnMut() -> T,
{
    ensure!(trials > 0, "at least one trial is required");

    let mut min = Duration::MAX;
    let mut value = None;
    for trial in 0..trials {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        tracing::trace!(trial, ?elapsed, "trial finished");

        min = min.min(elapsed);
        value = Some(result);
    }

    Ok(Measurement {
        min,
        // trials > 0 guarantees at least one value
        value: value.ok_or_else(|| anyhow::anyhow!("measurement produced no value"))?,
        trials,
    })
}

/// Async counterpart of [`measure`] for workloads that await I/O
pub async fn measure_async<T, F, Fut>(trials: usize, mut f: F) -> Result<Measurement<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
{
    ensure!(trials > 0, "at least one trial is required");

    let mut min = Duration::MAX;
    let mut value = None;
    for _ in 0..trials {
        let start = Instant::now();
        let result = f().await;
        min = min.min(start.elapsed());
        value = Some(result);
    }

    Ok(Measurement {
        min,
        value: value.ok_or_else(|| anyhow::anyhow!("measurement produced no value"))?,
        trials,
    })
}
