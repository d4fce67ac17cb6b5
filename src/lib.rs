//! # parspeed - sequential vs parallel workload benchmarks
//!
//! Six workloads, each implemented twice (a sequential baseline and a parallel
//! decomposition of the same work), timed with a minimum-of-N harness and reported as a
//! speedup ratio.
//!
//! ## Quick Start
//!
//! ```bash
//! # Factorials of the default input set, 10 trials each
//! parspeed factorial
//!
//! # 300x300 matrix multiplication, one task per output cell
//! parspeed matrix --size 300
//!
//! # Nilakantha series with the lock-free reduction
//! parspeed pi --reduction slots
//!
//! # Everything that needs no input files, as JSON
//! parspeed --format json all
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use parspeed::report::Comparison;
//! use parspeed::timing::measure;
//! use parspeed::workloads::pi::{self, Reduction};
//!
//! let sequential = measure(3, || pi::sequential(10_000))?;
//! let parallel = measure(3, || pi::parallel(10_000, 4, Reduction::Locked))?;
//! let parallel_pi = parallel.value?;
//! assert!((parallel_pi - sequential.value).abs() < 1e-9);
//!
//! let comparison = Comparison::new("pi", sequential.min, parallel.min, 3);
//! println!("speedup: {}", comparison.speedup);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`parallel`]: decomposition, execution and merge policies shared by all workloads
//! - [`timing`]: minimum-of-N measurement
//! - [`report`]: speedup ratio and rendering
//! - [`workloads`]: the six benchmark workloads
//! - [`config`]: layered configuration (defaults, file, environment)

pub mod cli;
pub mod config;
pub mod parallel;
pub mod report;
pub mod timing;
pub mod workloads;

pub use cli::{Cli, Output};
pub use config::ParspeedConfig;

