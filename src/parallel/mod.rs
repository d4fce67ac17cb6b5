//! Workload decomposition, parallel execution and result merging
//!
//! Every benchmark in this crate runs the same computation twice: once sequentially and
//! once split into independently computable units. This module holds the parts that are
//! shared by all of them.
//!
//! # Architecture Responsibilities
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   partition     │    │   executor       │    │   aggregate     │
//! │                 │───▶│                  │───▶│                 │
//! │ • per-task      │    │ • fan-in threads │    │ • index slots   │
//! │ • block         │    │ • worker pool    │    │ • locked sum    │
//! │ • per-row       │    │ • rayon runtime  │    │ • stable sort   │
//! │ • per-cell      │    │ • join barrier   │    │ • tallies       │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! ## Synchronization discipline
//! - Units writing **independent slots** (pixels, matrix cells) get disjoint `&mut` slices
//!   and need no lock.
//! - Units feeding **one shared scalar** accumulate privately and take the lock once
//!   ([`LockedSum`]), or write their own slot for a lock-free merge ([`sum_slots`]).
//! - Units routed through a **channel** tag results with their input index; the channel is
//!   sized to the producer count so the consumer can drain while producers run.
//!
//! # Example
//!
//! ```rust
//! use parspeed::parallel::{Granularity, decompose, fan_in, place_indexed};
//!
//! let partitions = decompose(10, Granularity::Block { workers: 3 })?;
//! let partials = fan_in(&partitions, |p| p.range().sum::<usize>())?;
//! let sums = place_indexed(partitions.len(), partials)?;
//! assert_eq!(sums, vec![3, 12, 30]);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod executor;
pub mod partition;

// Re-export main types for easier access
pub use aggregate::{LockedSum, Tally, place_indexed, stable_sort_by, sum_slots};
pub use executor::{ParallelExecutor, build_pool, fan_in, optimal_workers, spawn_per_partition};
pub use partition::{Granularity, Partition, block_ranges, decompose, verify_coverage};
