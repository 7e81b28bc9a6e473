//! Backstrip: reconstruct the burial history of layered sediment columns.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the backstrip sub-crates. For most users, adding `backstrip` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use backstrip::prelude::*;
//!
//! // Two Revil sand/shale layers with bases at 100 m and 50 m.
//! let bottom = [100.0, 50.0];
//! let layers = vec![LayerLithology::revil(0.45, 0.45, 0.3); 2];
//! let config = CompactionConfig::default();
//!
//! let masses = forward_pass(&bottom, &layers, &config).unwrap();
//! assert!(masses.get(0).unwrap() > masses.get(1).unwrap());
//!
//! let history = backward_pass(&masses, &layers, &config).unwrap();
//! // Stage 0: layer 0 alone at the surface, thicker than it is today.
//! assert!(history.depth(0, 0).unwrap() > 50.0);
//! // The last stage is the present day.
//! let today = history.present_day();
//! assert!((today[0] - 100.0).abs() < 1e-6);
//! assert!((today[1] - 50.0).abs() < 1e-6);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `backstrip-core` | Column ids, lithologies, compaction constants |
//! | [`compaction`] | `backstrip-compaction` | Porosity law, forward and backward passes |
//! | [`refine`] | `backstrip-refine` | Raw columns and sublayer refinement |
//! | [`engine`] | `backstrip-engine` | Column pipeline and batch runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and constants (`backstrip-core`).
pub use backstrip_core as types;

/// Porosity-stress law and the decompaction passes (`backstrip-compaction`).
///
/// [`compaction::forward_pass`] computes per-layer solid mass;
/// [`compaction::backward_pass`] replays it through every burial stage.
pub use backstrip_compaction as compaction;

/// Sublayer refinement of mapped horizons (`backstrip-refine`).
pub use backstrip_refine as refine;

/// Column pipeline and batch runner (`backstrip-engine`).
///
/// [`engine::ColumnBatch`] reconstructs many columns, optionally on a
/// worker pool.
pub use backstrip_engine as engine;

/// Common imports for typical backstrip usage.
///
/// ```rust
/// use backstrip::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use backstrip_core::{
        ColumnId, CompactionConfig, LayerLithology, LithologyCatalog, LithologyModel,
        PorosityCheck,
    };

    // Passes
    pub use backstrip_compaction::{
        backward_pass, bulk_porosity, forward_pass, reconstruct, BurialHistory, LayerMasses,
    };

    // Refinement
    pub use backstrip_refine::{RawColumn, SublayerPlan};

    // Engine
    pub use backstrip_engine::{
        reconstruct_column, ColumnBatch, ColumnInput, ColumnResult, EngineConfig, Refinement,
    };

    // Errors
    pub use backstrip_compaction::CompactionError;
    pub use backstrip_core::{ConfigError, ModelError};
    pub use backstrip_engine::{BatchError, ColumnError};
    pub use backstrip_refine::RefineError;
}
