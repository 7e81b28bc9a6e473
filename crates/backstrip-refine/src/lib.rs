//! Layer refinement for the backstripping engine.
//!
//! Mapped horizons are sparse: one depth and one age per surface. The
//! compaction passes want a fine, roughly uniform stack. This crate
//! subdivides each raw layer into a configured number of sublayers by
//! linear interpolation of depths and ages, and repeats the raw layer's
//! lithology over its sublayers.
//!
//! Depth arrays hold sublayer *bases* and age arrays hold sublayer
//! *tops*, which is why [`refine_depths`] interpolates at `k / s` and
//! [`refine_ages`] at `(k + 1) / s`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod interpolate;
pub mod plan;

pub use column::{FineColumn, RawColumn};
pub use error::RefineError;
pub use interpolate::{expand_lithology, refine_ages, refine_depths};
pub use plan::{SublayerPlan, MAX_SUBLAYERS};
