//! Speedup computation and rendering

use anyhow::Result;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::cli::Output;

/// Ratio of sequential to parallel wall-clock time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Speedup {
    Ratio(f64),
    /// The parallel run was faster than the clock could resolve
    Unbounded,
}

impl Speedup {
    pub fn between(sequential: Duration, parallel: Duration) -> Self {
        if parallel.is_zero() {
            Speedup::Unbounded
        } else {
            Speedup::Ratio(sequential.as_secs_f64() / parallel.as_secs_f64())
        }
    }

    pub fn ratio(&self) -> Option<f64> {
        match self {
            Speedup::Ratio(ratio) => Some(*ratio),
            Speedup::Unbounded => None,
        }
    }
}

impl fmt::Display for Speedup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speedup::Ratio(ratio) => write!(f, "{ratio:.2}"),
            Speedup::Unbounded => write!(f, "∞"),
        }
    }
}

// JSON has no infinity; an unbounded speedup is written as null
impl Serialize for Speedup {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Speedup::Ratio(ratio) => serializer.serialize_f64(*ratio),
            Speedup::Unbounded => serializer.serialize_none(),
        }
    }
}

fn as_secs<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// A labelled value shown under a comparison (result digest, error count, ...)
#[derive(Debug, Clone, Serialize)]
pub struct Detail {
    pub label: String,
    pub value: String,
}

/// Sequential vs parallel timings for one workload
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub workload: String,
    #[serde(rename = "sequential_secs", serialize_with = "as_secs")]
    pub sequential: Duration,
    #[serde(rename = "parallel_secs", serialize_with = "as_secs")]
    pub parallel: Duration,
    pub speedup: Speedup,
    pub trials: usize,
    pub details: Vec<Detail>,
}

impl Comparison {
    pub fn new(workload: &str, sequential: Duration, parallel: Duration, trials: usize) -> Self {
        Self {
            workload: workload.to_string(),
            sequential,
            parallel,
            speedup: Speedup::between(sequential, parallel),
            trials,
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, label: &str, value: impl ToString) -> Self {
        self.details.push(Detail {
            label: label.to_string(),
            value: value.to_string(),
        });
        self
    }
}

/// Output format for comparison reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Styled, human-readable text
    #[default]
    Text,
    /// JSON array for machine processing
    Json,
}

/// Render comparisons in the requested format
pub fn render(comparisons: &[Comparison], format: ReportFormat, output: &Output) -> Result<()> {
    match format {
        ReportFormat::Text => {
            for comparison in comparisons {
                render_text(comparison, output);
            }
        }
        ReportFormat::Json => println!("{}", render_json(comparisons)?),
    }
    Ok(())
}

pub fn render_text(comparison: &Comparison, output: &Output) {
    output.header(&comparison.workload);
    output.key_value("Sequential execution took:", &format!("{:?}", comparison.sequential), false);
    output.key_value("Parallel execution took:", &format!("{:?}", comparison.parallel), false);
    output.key_value("Speedup:", &comparison.speedup.to_string(), true);
    if comparison.trials > 1 {
        output.verbose(&format!("minimum of {} trials", comparison.trials));
    }
    for detail in &comparison.details {
        output.key_value(&format!("{}:", detail.label), &detail.value, false);
    }
}

pub fn render_json(comparisons: &[Comparison]) -> Result<String> {
    Ok(serde_json::to_string_pretty(comparisons)?)
}
