//! The six benchmark workloads
//!
//! Each module exposes a sequential baseline and a parallel variant producing the same
//! result. They differ in how the work is split:
//!
//! | workload    | granularity | merge                               |
//! |-------------|-------------|-------------------------------------|
//! | `factorial` | per task    | index-tagged channel                |
//! | `grayscale` | per row     | disjoint row slices                 |
//! | `matrix`    | per cell    | disjoint output slots               |
//! | `pi`        | block       | locked sum or per-block slots       |
//! | `records`   | per element | index-tagged channel + stable sort  |
//! | `fetch`     | per task    | channel drain, success/error tally  |

pub mod factorial;
pub mod fetch;
pub mod grayscale;
pub mod matrix;
pub mod pi;
pub mod records;
