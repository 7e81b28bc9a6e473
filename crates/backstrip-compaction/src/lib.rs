//! Porosity-stress compaction law and the two decompaction passes.
//!
//! # Passes
//!
//! 1. [`forward_pass`] marches down the present-day column in
//!    depth-bounded steps and records each layer's solid mass.
//! 2. [`backward_pass`] replays the same stepping kernel once per burial
//!    stage in mass-bounded steps, recovering the paleo-depth of each
//!    layer base as the depth at which its stored mass is exhausted.
//!
//! Both passes drive [`kernel::march`] and differ only in the
//! [`StepBound`] they supply.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod backward;
pub mod error;
pub mod forward;
pub mod history;
pub mod kernel;
pub mod porosity;
pub mod reconstruct;
pub mod state;

pub use backward::backward_pass;
pub use error::CompactionError;
pub use forward::{forward_pass, LayerMasses};
pub use history::BurialHistory;
pub use kernel::{march, PlannedStep, StepBound};
pub use porosity::{
    bulk_porosity, bulk_porosity_code, critical_water_fraction, porosity_in_range, water_fraction,
};
pub use reconstruct::{reconstruct, PassMetrics, Reconstruction};
pub use state::CompactionState;
