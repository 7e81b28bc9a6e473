//! Backward pass: per-stage paleo-depths from fixed mass budgets.

use backstrip_core::{CompactionConfig, LayerLithology};
use tracing::debug;

use crate::error::CompactionError;
use crate::forward::{validate_lithology, LayerMasses};
use crate::history::BurialHistory;
use crate::kernel::{march, PlannedStep, StepBound};
use crate::state::CompactionState;

/// Mass-bounded stepping: take nominal steps until the next one would
/// overshoot the layer's budget, then solve linearly for the partial
/// step that exhausts it.
struct MassBound<'a> {
    masses: &'a [f64],
    stage: usize,
    bases: &'a mut [f64],
}

impl StepBound for MassBound<'_> {
    fn plan(
        &mut self,
        layer: usize,
        state: &CompactionState,
        dz_nominal: f64,
    ) -> Result<PlannedStep, CompactionError> {
        let increment = (1.0 - state.phi_b) * dz_nominal;
        if increment <= 0.0 {
            return Err(CompactionError::DegenerateMassStep {
                layer,
                stage: self.stage,
                increment,
            });
        }
        let target = self.masses[layer];
        let newmass = state.localmass + increment;
        if newmass <= target {
            Ok(PlannedStep::inside(dz_nominal))
        } else {
            let dz = (target - state.localmass) / (newmass - state.localmass) * dz_nominal;
            Ok(PlannedStep::crossing(dz))
        }
    }

    fn crossed(&mut self, layer: usize, state: &CompactionState) {
        self.bases[layer] = state.z;
    }
}

pub(crate) fn backward_counted(
    masses: &LayerMasses,
    layers: &[LayerLithology],
    config: &CompactionConfig,
) -> Result<(BurialHistory, u64), CompactionError> {
    let n = masses.len();
    if n == 0 || layers.len() != n {
        return Err(CompactionError::InvalidColumn {
            reason: format!("{n} mass budgets for {} lithologies", layers.len()),
        });
    }
    if let Some((l, m)) = masses
        .as_slice()
        .iter()
        .enumerate()
        .find(|(_, m)| !m.is_finite() || **m < 0.0)
    {
        return Err(CompactionError::InvalidColumn {
            reason: format!("mass budget of layer {l} is {m}"),
        });
    }

    let mut history = BurialHistory::new(n);
    let mut steps = 0u64;
    for stage in 0..n {
        let mut bound = MassBound {
            masses: masses.as_slice(),
            stage,
            bases: history.stage_mut(stage),
        };
        steps += march(layers, stage, config, &mut bound)?;
    }
    debug!(layers = n, stages = n, steps, "backward pass complete");
    Ok((history, steps))
}

/// Reconstruct the base depth of every layer at every burial stage from
/// the mass budgets of [`forward_pass`](crate::forward_pass).
///
/// Stage `t` starts from a fresh surface state and integrates layers
/// `t` down to `0`.
pub fn backward_pass(
    masses: &LayerMasses,
    layers: &[LayerLithology],
    config: &CompactionConfig,
) -> Result<BurialHistory, CompactionError> {
    config.validate()?;
    validate_lithology(layers, config)?;
    backward_counted(masses, layers, config).map(|(history, _)| history)
}
