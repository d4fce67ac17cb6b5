//! Nilakantha series for π, split into contiguous blocks
//!
//! ```text
//! π = 3 + Σ_{i=1..terms} 4·(-1)^(i+1) / ((2i)(2i+1)(2i+2))
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::parallel::{
    Granularity, LockedSum, Partition, decompose, place_indexed, spawn_per_partition, sum_slots,
};

/// How block partial sums are merged into the final value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    /// Each block adds its local sum to one mutex-guarded total
    #[default]
    Locked,
    /// Each block writes its own slot; slots are summed after the join
    Slots,
}

fn term(i: usize) -> f64 {
    let sign = if i % 2 == 1 { 1.0 } else { -1.0 };
    let x = 2.0 * i as f64;
    4.0 * sign / (x * (x + 1.0) * (x + 2.0))
}

/// Sum of the series terms covered by a block (series indices are 1-based)
fn block_sum(partition: &Partition) -> f64 {
    (partition.start + 1..=partition.end).map(term).sum()
}

pub fn sequential(terms: usize) -> f64 {
    let mut pi = 3.0;
    for i in 1..=terms {
        pi += term(i);
    }
    pi
}

/// Parallel series sum over `workers` blocks, the last block absorbing the remainder
pub fn parallel(terms: usize, workers: usize, reduction: Reduction) -> Result<f64> {
    let blocks = decompose(terms, Granularity::Block { workers })?;

    match reduction {
        Reduction::Locked => {
            let total = LockedSum::new(3.0);
            spawn_per_partition(&blocks, |block| {
                let local = block_sum(block);
                total.add(local);
            })?;
            Ok(total.into_total())
        }
        Reduction::Slots => {
            let partials = spawn_per_partition(&blocks, block_sum)?;
            let slots = place_indexed(blocks.len(), partials)?;
            Ok(3.0 + sum_slots(&slots))
        }
    }
}
