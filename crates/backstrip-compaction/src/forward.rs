//! Forward pass: present-day geometry to per-layer solid mass.

use std::ops::Range;

use backstrip_core::{CompactionConfig, LayerLithology, PorosityCheck};
use tracing::debug;

use crate::error::CompactionError;
use crate::kernel::{march, PlannedStep, StepBound};
use crate::state::CompactionState;

/// Solid mass per layer (metres of grain per unit area), index 0 deepest.
///
/// Computed once from present-day geometry and held fixed; the
/// backward pass reproduces these budgets at every stage.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerMasses {
    masses: Vec<f64>,
}

impl LayerMasses {
    /// Wrap precomputed budgets.
    pub fn new(masses: Vec<f64>) -> Self {
        Self { masses }
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Whether there are no layers.
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Mass of one layer.
    pub fn get(&self, layer: usize) -> Option<f64> {
        self.masses.get(layer).copied()
    }

    /// All masses, deepest first.
    pub fn as_slice(&self) -> &[f64] {
        &self.masses
    }

    /// Total solid mass of the column.
    pub fn total(&self) -> f64 {
        self.masses.iter().sum()
    }

    /// Summed mass of a contiguous run of layers, e.g. the sublayers of
    /// one raw layer.
    pub fn sum_range(&self, range: Range<usize>) -> f64 {
        self.masses[range].iter().sum()
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.masses
    }
}

/// Depth-bounded stepping: never step past the current layer base.
struct DepthBound<'a> {
    bottom: &'a [f64],
    masses: Vec<f64>,
}

impl StepBound for DepthBound<'_> {
    fn plan(
        &mut self,
        layer: usize,
        state: &CompactionState,
        dz_nominal: f64,
    ) -> Result<PlannedStep, CompactionError> {
        let remaining = self.bottom[layer] - state.z;
        if remaining <= dz_nominal {
            Ok(PlannedStep::crossing(remaining.max(0.0)))
        } else {
            Ok(PlannedStep::inside(dz_nominal))
        }
    }

    fn crossed(&mut self, layer: usize, state: &CompactionState) {
        self.masses[layer] = state.localmass;
    }
}

/// Number of layers the passes integrate, after the compatibility override.
pub(crate) fn effective_layer_count(
    available: usize,
    config: &CompactionConfig,
) -> Result<usize, CompactionError> {
    match config.forward_layer_override {
        None => Ok(available),
        Some(n) if n >= 1 && n <= available => Ok(n),
        Some(n) => Err(CompactionError::LayerOverride {
            requested: n,
            available,
        }),
    }
}

/// Check the present-day column: base depths finite, non-negative and
/// non-decreasing with depth (`bottom[l] >= bottom[l + 1]`).
pub(crate) fn validate_column(
    bottom: &[f64],
    layers: &[LayerLithology],
    config: &CompactionConfig,
) -> Result<(), CompactionError> {
    if bottom.is_empty() {
        return Err(CompactionError::InvalidColumn {
            reason: "column has no layers".into(),
        });
    }
    if bottom.len() != layers.len() {
        return Err(CompactionError::InvalidColumn {
            reason: format!(
                "{} base depths but {} lithologies",
                bottom.len(),
                layers.len()
            ),
        });
    }
    if let Some((l, d)) = bottom.iter().enumerate().find(|(_, d)| !d.is_finite()) {
        return Err(CompactionError::InvalidColumn {
            reason: format!("base depth of layer {l} is not finite ({d})"),
        });
    }
    if bottom[bottom.len() - 1] < 0.0 {
        return Err(CompactionError::InvalidColumn {
            reason: format!("top layer base {} is above the surface", bottom[bottom.len() - 1]),
        });
    }
    if let Some(l) = (0..bottom.len() - 1).find(|&l| bottom[l] < bottom[l + 1]) {
        return Err(CompactionError::InvalidColumn {
            reason: format!(
                "layer {l} base {} is shallower than layer {} base {}",
                bottom[l],
                l + 1,
                bottom[l + 1]
            ),
        });
    }
    validate_lithology(layers, config)
}

/// Lithology parameters are checked unless the porosity policy is `Off`.
pub(crate) fn validate_lithology(
    layers: &[LayerLithology],
    config: &CompactionConfig,
) -> Result<(), CompactionError> {
    if config.porosity_check != PorosityCheck::Off {
        for layer in layers {
            layer.validate()?;
        }
    }
    Ok(())
}

pub(crate) fn forward_counted(
    bottom: &[f64],
    layers: &[LayerLithology],
    config: &CompactionConfig,
) -> Result<(LayerMasses, u64), CompactionError> {
    config.validate()?;
    validate_column(bottom, layers, config)?;
    let n = effective_layer_count(bottom.len(), config)?;

    let mut bound = DepthBound {
        bottom: &bottom[..n],
        masses: vec![0.0; n],
    };
    let steps = march(&layers[..n], n - 1, config, &mut bound)?;
    debug!(layers = n, steps, "forward pass complete");
    Ok((LayerMasses::new(bound.masses), steps))
}

/// Compute the conserved solid mass of every layer from present-day base
/// depths (`bottom[0]` deepest) and per-layer lithology.
pub fn forward_pass(
    bottom: &[f64],
    layers: &[LayerLithology],
    config: &CompactionConfig,
) -> Result<LayerMasses, CompactionError> {
    forward_counted(bottom, layers, config).map(|(masses, _)| masses)
}
