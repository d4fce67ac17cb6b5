//! Command implementations for parspeed CLI
//!
//! Each benchmark command resolves its settings (CLI flag, else configuration), prepares
//! inputs outside the timed region, measures both variants, checks that they agree and
//! returns a [`Comparison`](crate::report::Comparison) for the reporter.

use anyhow::Result;

use crate::config::RuntimeConfig;
use crate::parallel::{build_pool, optimal_workers};

pub mod all;
pub mod factorial;
pub mod fetch;
pub mod grayscale;
pub mod matrix;
pub mod pi;
pub mod records;

/// Worker count for the shared runtime, from hardware parallelism and configuration
pub(crate) fn runtime_workers(runtime: &RuntimeConfig) -> usize {
    optimal_workers(runtime.max_threads, runtime.thread_percentage)
}

pub(crate) fn runtime_pool(runtime: &RuntimeConfig) -> Result<rayon::ThreadPool> {
    build_pool(runtime_workers(runtime))
}
