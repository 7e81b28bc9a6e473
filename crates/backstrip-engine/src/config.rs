//! Engine configuration.

use std::error::Error;
use std::fmt;

use backstrip_core::{CompactionConfig, ConfigError};
use backstrip_refine::{RawColumn, RefineError, SublayerPlan, MAX_SUBLAYERS};

// ── Refinement ──────────────────────────────────────────────────

/// How raw layers are subdivided when a column carries no explicit plan.
#[derive(Clone, Debug, PartialEq)]
pub enum Refinement {
    /// The same number of sublayers in every raw layer.
    Uniform(usize),
    /// Enough sublayers that none is thicker than this many metres.
    MaxThickness(f64),
}

impl Default for Refinement {
    fn default() -> Self {
        Self::Uniform(1)
    }
}

impl Refinement {
    /// Build the plan for one raw column.
    pub fn plan_for(&self, column: &RawColumn) -> Result<SublayerPlan, RefineError> {
        match *self {
            Self::Uniform(s) => SublayerPlan::uniform(column.len(), s),
            Self::MaxThickness(max) => SublayerPlan::by_thickness(&column.bases, max),
        }
    }
}

// ── EngineConfig ────────────────────────────────────────────────

/// Configuration for [`ColumnBatch`](crate::ColumnBatch) and
/// [`reconstruct_column`](crate::reconstruct_column).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Constants of the compaction law.
    pub compaction: CompactionConfig,
    /// Default subdivision of raw layers.
    pub refinement: Refinement,
    /// Number of worker threads for parallel runs. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 64]`).
    pub worker_count: Option<usize>,
    /// Stop at the first failing column instead of reporting every
    /// column's outcome. Default: true.
    pub fail_fast: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            compaction: CompactionConfig::default(),
            refinement: Refinement::default(),
            worker_count: None,
            fail_fast: true,
        }
    }
}

impl EngineConfig {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 64),
        }
    }

    /// Check the compaction constants and the refinement setting.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        self.compaction.validate()?;
        match self.refinement {
            Refinement::Uniform(0) => Err(EngineConfigError::InvalidRefinement {
                reason: "uniform refinement needs at least one sublayer".into(),
            }),
            Refinement::Uniform(s) if s > MAX_SUBLAYERS => {
                Err(EngineConfigError::InvalidRefinement {
                    reason: format!(
                        "uniform refinement allows at most {MAX_SUBLAYERS} sublayers, got {s}"
                    ),
                })
            }
            Refinement::MaxThickness(t) if !t.is_finite() || t <= 0.0 => {
                Err(EngineConfigError::InvalidRefinement {
                    reason: format!("max sublayer thickness must be positive, got {t}"),
                })
            }
            _ => Ok(()),
        }
    }
}

// ── EngineConfigError ───────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum EngineConfigError {
    /// The compaction constants are invalid.
    Compaction(ConfigError),
    /// The refinement setting cannot produce a plan.
    InvalidRefinement {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for EngineConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compaction(e) => write!(f, "compaction config: {e}"),
            Self::InvalidRefinement { reason } => write!(f, "invalid refinement: {reason}"),
        }
    }
}

impl Error for EngineConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Compaction(e) => Some(e),
            Self::InvalidRefinement { .. } => None,
        }
    }
}

impl From<ConfigError> for EngineConfigError {
    fn from(e: ConfigError) -> Self {
        Self::Compaction(e)
    }
}
