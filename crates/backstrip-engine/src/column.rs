//! The per-column pipeline: refine, forward pass, backward pass.

use std::error::Error;
use std::fmt;

use backstrip_compaction::{reconstruct, BurialHistory, CompactionError, LayerMasses, PassMetrics};
use backstrip_core::{ColumnId, LithologyCatalog};
use backstrip_refine::{FineColumn, RawColumn, RefineError, SublayerPlan};
use tracing::debug;

use crate::config::{EngineConfig, EngineConfigError};

// ── Error type ──────────────────────────────────────────────────

/// Error from reconstructing one column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnError {
    /// The engine configuration is invalid.
    Config(EngineConfigError),
    /// The raw column could not be refined.
    Refine(RefineError),
    /// A compaction pass failed.
    Compaction(CompactionError),
    /// A lithology name is missing from the catalogue.
    Lithology {
        /// The unresolved name.
        name: String,
    },
}

impl fmt::Display for ColumnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Refine(e) => write!(f, "refine: {e}"),
            Self::Compaction(e) => write!(f, "compaction: {e}"),
            Self::Lithology { name } => write!(f, "unknown lithology '{name}'"),
        }
    }
}

impl Error for ColumnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Refine(e) => Some(e),
            Self::Compaction(e) => Some(e),
            Self::Lithology { .. } => None,
        }
    }
}

impl From<EngineConfigError> for ColumnError {
    fn from(e: EngineConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RefineError> for ColumnError {
    fn from(e: RefineError) -> Self {
        Self::Refine(e)
    }
}

impl From<CompactionError> for ColumnError {
    fn from(e: CompactionError) -> Self {
        Self::Compaction(e)
    }
}

// ── Input ───────────────────────────────────────────────────────

/// One mapped column and, optionally, its own sublayer plan.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnInput {
    /// Grid position.
    pub id: ColumnId,
    /// Raw horizons, deepest first.
    pub raw: RawColumn,
    /// Overrides [`EngineConfig::refinement`] for this column.
    pub plan: Option<SublayerPlan>,
}

impl ColumnInput {
    /// A column refined with the engine's default plan.
    pub fn new(id: ColumnId, raw: RawColumn) -> Self {
        Self {
            id,
            raw,
            plan: None,
        }
    }

    /// Use an explicit plan for this column.
    pub fn with_plan(mut self, plan: SublayerPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Build a column whose lithologies are looked up by name.
    pub fn from_names<S: AsRef<str>>(
        id: ColumnId,
        bases: Vec<f64>,
        ages: Vec<f64>,
        base_age: f64,
        names: &[S],
        catalog: &LithologyCatalog,
    ) -> Result<Self, ColumnError> {
        let lithology = catalog
            .resolve_all(names.iter().map(AsRef::as_ref))
            .map_err(|name| ColumnError::Lithology { name })?;
        Ok(Self::new(
            id,
            RawColumn {
                bases,
                ages,
                base_age,
                lithology,
            },
        ))
    }
}

// ── Result ──────────────────────────────────────────────────────

/// Everything reconstructed for one column.
#[derive(Clone, Debug)]
pub struct ColumnResult {
    /// Grid position.
    pub id: ColumnId,
    /// The refined column the passes ran on.
    pub fine: FineColumn,
    /// Solid mass per sublayer.
    pub masses: LayerMasses,
    /// Solid mass per raw layer (sum over its sublayers).
    pub raw_masses: Vec<f64>,
    /// Sublayer base depths through time, stage ages attached.
    pub history: BurialHistory,
    /// Step counts and timings of the two passes.
    pub metrics: PassMetrics,
}

/// Refine one column and reconstruct its burial history.
pub fn reconstruct_column(
    input: &ColumnInput,
    config: &EngineConfig,
) -> Result<ColumnResult, ColumnError> {
    config.validate()?;
    run_column(input, config)
}

// Assumes a validated config.
pub(crate) fn run_column(
    input: &ColumnInput,
    config: &EngineConfig,
) -> Result<ColumnResult, ColumnError> {
    let plan = match &input.plan {
        Some(plan) => plan.clone(),
        None => config.refinement.plan_for(&input.raw)?,
    };
    let fine = input.raw.refine(&plan)?;
    let rec = reconstruct(&fine.bottom, &fine.layers, &config.compaction)?;

    // The layer override may integrate fewer sublayers than were refined.
    let n = rec.masses.len();
    let history = rec.history.with_stage_ages(fine.ages[..n].to_vec())?;
    let raw_masses = (0..plan.raw_len())
        .map(|r| {
            let range = plan.fine_range(r);
            rec.masses.sum_range(range.start.min(n)..range.end.min(n))
        })
        .collect();

    debug!(
        column = %input.id,
        sublayers = fine.len(),
        steps = rec.metrics.total_steps(),
        "column reconstructed"
    );
    Ok(ColumnResult {
        id: input.id,
        fine,
        masses: rec.masses,
        raw_masses,
        history,
        metrics: rec.metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Refinement;
    use backstrip_core::{LayerLithology, LithologyModel};

    fn raw() -> RawColumn {
        RawColumn {
            bases: vec![80.0, 30.0],
            ages: vec![10.0, 0.0],
            base_age: 25.0,
            lithology: vec![
                LayerLithology::exponential(LithologyModel::Sandstone),
                LayerLithology::revil(0.45, 0.45, 0.3),
            ],
        }
    }

    #[test]
    fn stage_ages_are_sublayer_tops() {
        let input = ColumnInput::new(ColumnId::new(0, 0), raw())
            .with_plan(SublayerPlan::new(vec![2, 3]).unwrap());
        let result = reconstruct_column(&input, &EngineConfig::default()).unwrap();
        assert_eq!(result.history.num_layers(), 5);
        assert_eq!(result.history.stage_age(0), Some(17.5));
        assert_eq!(result.history.stage_age(1), Some(10.0));
        assert_eq!(result.history.stage_age(4), Some(0.0));
    }

    #[test]
    fn raw_masses_sum_sublayers() {
        let input = ColumnInput::new(ColumnId::new(1, 2), raw())
            .with_plan(SublayerPlan::new(vec![5, 3]).unwrap());
        let result = reconstruct_column(&input, &EngineConfig::default()).unwrap();
        assert_eq!(result.raw_masses.len(), 2);
        let total: f64 = result.raw_masses.iter().sum();
        assert!((total - result.masses.total()).abs() < 1e-9);
    }

    #[test]
    fn names_resolve_through_catalog() {
        let catalog = LithologyCatalog::with_presets();
        let input = ColumnInput::from_names(
            ColumnId::new(0, 0),
            vec![80.0, 30.0],
            vec![10.0, 0.0],
            25.0,
            &["sandstone", "revil_mix"],
            &catalog,
        )
        .unwrap();
        assert_eq!(input.raw.lithology[0].model, LithologyModel::Sandstone);
        assert_eq!(input.raw.lithology[1].model, LithologyModel::Revil);
    }

    #[test]
    fn unknown_name_is_reported() {
        let catalog = LithologyCatalog::with_presets();
        let err = ColumnInput::from_names(
            ColumnId::new(0, 0),
            vec![10.0],
            vec![0.0],
            1.0,
            &["granite"],
            &catalog,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ColumnError::Lithology {
                name: "granite".into()
            }
        );
    }

    #[test]
    fn refine_errors_are_wrapped() {
        let mut bad = raw();
        bad.bases.swap(0, 1);
        let err = reconstruct_column(&ColumnInput::new(ColumnId::new(0, 0), bad), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, ColumnError::Refine(_)));
    }

    #[test]
    fn tiny_max_thickness_is_a_refine_error() {
        let config = EngineConfig {
            refinement: Refinement::MaxThickness(1e-300),
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        let err = reconstruct_column(&ColumnInput::new(ColumnId::new(0, 0), raw()), &config)
            .unwrap_err();
        assert_eq!(
            err,
            ColumnError::Refine(RefineError::TooManySublayers { layer: 0 })
        );
    }
}
