//! Run every workload that needs no external input

use anyhow::Result;

use super::{factorial, matrix, pi};
use crate::cli::Output;
use crate::config::ParspeedConfig;
use crate::report::Comparison;

pub fn execute(config: &ParspeedConfig, output: &Output) -> Result<Vec<Comparison>> {
    Ok(vec![
        factorial::execute(Default::default(), config, output)?,
        matrix::execute(Default::default(), config, output)?,
        pi::execute(Default::default(), config, output)?,
    ])
}
