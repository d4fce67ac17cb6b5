//! Configuration management for parspeed
//!
//! Every workload constant (input sizes, trial counts, file paths, endpoints) lives here.
//! Values are layered by [`core`]: embedded defaults, then a project or custom file, then
//! `PARSPEED_` environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::workloads::pi::Reduction;
use crate::workloads::records::Dispatch;

mod core;

/// Main configuration structure for parspeed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParspeedConfig {
    /// Shared worker pool sizing
    pub runtime: RuntimeConfig,

    /// Arbitrary-precision factorial set (per-task fan-out)
    pub factorial: FactorialConfig,

    /// Grayscale image conversion (per-row fan-out)
    pub grayscale: GrayscaleConfig,

    /// Dense matrix multiplication (per-cell fan-out)
    pub matrix: MatrixConfig,

    /// Nilakantha series for π (block fan-out)
    pub pi: PiConfig,

    /// JSON record sorting (per-element fan-out)
    pub records: RecordsConfig,

    /// Concurrent HTTP aggregation (per-endpoint fan-out)
    pub fetch: FetchConfig,
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Maximum number of worker threads (0 = no limit)
    pub max_threads: usize,

    /// Percentage of CPU cores to use (1-100)
    pub thread_percentage: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorialConfig {
    pub inputs: Vec<u64>,
    pub trials: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrayscaleConfig {
    pub input: PathBuf,
    pub sequential_output: PathBuf,
    pub parallel_output: PathBuf,
    pub trials: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Side length of both square input matrices
    pub size: usize,
    /// Seed for the random input matrices
    pub seed: u64,
    pub trials: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiConfig {
    pub terms: usize,
    /// Fixed block count, independent of the shared pool size
    pub workers: usize,
    pub trials: usize,
    #[serde(default)]
    pub reduction: Reduction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    pub input: PathBuf,
    pub sequential_output: PathBuf,
    pub parallel_output: PathBuf,
    pub trials: usize,
    #[serde(default)]
    pub dispatch: Dispatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub endpoints: Vec<String>,
    pub trials: usize,
}
