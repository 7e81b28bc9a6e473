//! Core types for the backstripping workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the compaction, refinement and engine
//! crates: column identifiers, lithology descriptions, the lithology
//! catalogue, compaction-law constants, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod id;
pub mod lithology;

pub use config::{CompactionConfig, ConfigError, PorosityCheck};
pub use error::ModelError;
pub use id::ColumnId;
pub use lithology::{LayerLithology, LithologyCatalog, LithologyModel, DEFAULT_CRITICAL_POROSITY};
