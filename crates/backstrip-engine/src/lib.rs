//! Column pipeline and batch runner for sediment backstripping.
//!
//! A [`ColumnInput`] is a mapped column: raw horizon depths, ages and
//! lithologies. [`reconstruct_column`] refines it into sublayers, runs
//! the forward and backward compaction passes, and returns the burial
//! history stamped with sublayer ages. [`ColumnBatch`] does the same for
//! many columns, sequentially or on a worker pool, with results in input
//! order either way.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod batch;
pub mod column;
pub mod config;
pub mod metrics;
mod worker;

pub use batch::{BatchError, BatchResult, ColumnBatch};
pub use column::{reconstruct_column, ColumnError, ColumnInput, ColumnResult};
pub use config::{EngineConfig, EngineConfigError, Refinement};
pub use metrics::BatchMetrics;
