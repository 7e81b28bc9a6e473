//! The stepping kernel shared by both passes.
//!
//! [`march`] walks a column from the surface down through layers
//! `top, top-1, .., 0`. At every step it asks a [`StepBound`] how far to
//! go and whether that step closes the current layer; the bound is the
//! only thing that differs between the depth-bounded forward pass and
//! the mass-bounded backward pass.

use backstrip_core::{CompactionConfig, LayerLithology};

use crate::error::CompactionError;
use crate::state::CompactionState;

/// Step chosen by a [`StepBound`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannedStep {
    /// Step length (m), never negative.
    pub dz: f64,
    /// Whether this step ends exactly at the base of the current layer.
    pub crosses: bool,
}

impl PlannedStep {
    /// A full step that stays inside the layer.
    pub fn inside(dz: f64) -> Self {
        Self { dz, crosses: false }
    }

    /// A (possibly shortened) step that ends at the layer base.
    pub fn crossing(dz: f64) -> Self {
        Self { dz, crosses: true }
    }
}

/// Stopping criterion and step-size corrector for [`march`].
pub trait StepBound {
    /// Choose the next step in `layer` given the state before the step.
    fn plan(
        &mut self,
        layer: usize,
        state: &CompactionState,
        dz_nominal: f64,
    ) -> Result<PlannedStep, CompactionError>;

    /// Called after a crossing step, before the layer mass is reset.
    fn crossed(&mut self, layer: usize, state: &CompactionState);
}

/// Integrate from the surface through `layers[..=top]`, deepest last.
///
/// Returns the number of kernel steps taken.
pub fn march<B: StepBound>(
    layers: &[LayerLithology],
    top: usize,
    config: &CompactionConfig,
    bound: &mut B,
) -> Result<u64, CompactionError> {
    let Some(top_layer) = layers.get(top) else {
        return Err(CompactionError::InvalidColumn {
            reason: format!("top layer {top} out of range for {} layers", layers.len()),
        });
    };
    let mut state = CompactionState::at_surface(config, top_layer)?;
    let mut layer = top;
    let mut steps = 0u64;

    loop {
        let step = bound.plan(layer, &state, config.dz_nominal)?;
        state.advance(step.dz, &layers[layer], config)?;
        steps += 1;

        if step.crosses {
            bound.crossed(layer, &state);
            state.reset_mass();
            if layer == 0 {
                break;
            }
            layer -= 1;
            state.enter_layer(&layers[layer], config)?;
        }
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Crosses every layer after a fixed number of nominal steps.
    struct CountingBound {
        per_layer: u32,
        taken: u32,
        crossings: Vec<(usize, f64)>,
    }

    impl StepBound for CountingBound {
        fn plan(
            &mut self,
            _layer: usize,
            _state: &CompactionState,
            dz_nominal: f64,
        ) -> Result<PlannedStep, CompactionError> {
            self.taken += 1;
            if self.taken == self.per_layer {
                self.taken = 0;
                Ok(PlannedStep::crossing(dz_nominal))
            } else {
                Ok(PlannedStep::inside(dz_nominal))
            }
        }

        fn crossed(&mut self, layer: usize, state: &CompactionState) {
            self.crossings.push((layer, state.z));
        }
    }

    #[test]
    fn visits_layers_top_down() {
        let layers = vec![LayerLithology::revil(0.45, 0.45, 0.3); 3];
        let cfg = CompactionConfig::default();
        let mut bound = CountingBound {
            per_layer: 4,
            taken: 0,
            crossings: Vec::new(),
        };
        let steps = march(&layers, 2, &cfg, &mut bound).unwrap();
        assert_eq!(steps, 12);
        assert_eq!(bound.crossings, vec![(2, 4.0), (1, 8.0), (0, 12.0)]);
    }

    #[test]
    fn partial_stack_stops_at_layer_zero() {
        let layers = vec![LayerLithology::revil(0.45, 0.45, 0.3); 5];
        let cfg = CompactionConfig::default();
        let mut bound = CountingBound {
            per_layer: 1,
            taken: 0,
            crossings: Vec::new(),
        };
        let steps = march(&layers, 1, &cfg, &mut bound).unwrap();
        assert_eq!(steps, 2);
        assert_eq!(bound.crossings.len(), 2);
    }

    #[test]
    fn top_out_of_range_is_rejected() {
        let layers = vec![LayerLithology::revil(0.45, 0.45, 0.3); 2];
        let cfg = CompactionConfig::default();
        let mut bound = CountingBound {
            per_layer: 1,
            taken: 0,
            crossings: Vec::new(),
        };
        assert!(matches!(
            march(&layers, 2, &cfg, &mut bound),
            Err(CompactionError::InvalidColumn { .. })
        ));
    }
}
