//! Transient compaction state carried down the column.

use backstrip_core::{CompactionConfig, LayerLithology, ModelError, PorosityCheck};
use tracing::warn;

use crate::porosity::{bulk_porosity, porosity_in_range};

/// Scalar state of one pass through a column.
///
/// `z` is the marching depth from the top of the pass and `localmass`
/// the solid mass accumulated in the current layer. The derivative
/// history (`phi_sd_dsig`, `phi_sh_dsig`, `dsigold`) feeds the
/// second-order term of the porosity update.
#[derive(Clone, Debug, PartialEq)]
pub struct CompactionState {
    /// Marching depth (m).
    pub z: f64,
    /// Solid mass accumulated in the current layer (m of grain).
    pub localmass: f64,
    /// Sand end-member porosity.
    pub phi_sd: f64,
    /// Shale end-member porosity.
    pub phi_sh: f64,
    /// Bulk porosity at `z` for the current layer.
    pub phi_b: f64,
    /// `dphi_sd/dsigma` from the last stress-bearing step.
    pub phi_sd_dsig: f64,
    /// `dphi_sh/dsigma` from the last stress-bearing step.
    pub phi_sh_dsig: f64,
    /// Stress increment of the last stress-bearing step (Pa).
    pub dsigold: f64,
}

impl CompactionState {
    /// Fresh surface state for a pass whose first layer is `top`.
    pub fn at_surface(
        config: &CompactionConfig,
        top: &LayerLithology,
    ) -> Result<Self, ModelError> {
        let mut state = Self {
            z: 0.0,
            localmass: 0.0,
            phi_sd: config.phi0_sd,
            phi_sh: config.phi0_sh,
            phi_b: 0.0,
            phi_sd_dsig: 0.0,
            phi_sh_dsig: 0.0,
            dsigold: 0.0,
        };
        state.enter_layer(top, config)?;
        Ok(state)
    }

    /// Re-evaluate the bulk porosity at the current depth for a new layer.
    pub fn enter_layer(
        &mut self,
        layer: &LayerLithology,
        config: &CompactionConfig,
    ) -> Result<(), ModelError> {
        self.phi_b = bulk_porosity(
            self.phi_sd,
            self.phi_sh,
            layer.clay_fraction,
            config.grain_density,
            layer.model,
            self.z,
        );
        self.check(config.porosity_check)
    }

    /// Advance by `dz` metres through `layer`.
    ///
    /// Adds the solid in the step to `localmass`, converts it into an
    /// effective-stress increment, relaxes both end-member porosities
    /// toward their critical values with a truncated Taylor expansion in
    /// the increment, and recomputes the bulk porosity at the new depth.
    pub fn advance(
        &mut self,
        dz: f64,
        layer: &LayerLithology,
        config: &CompactionConfig,
    ) -> Result<(), ModelError> {
        let solid = (1.0 - self.phi_b) * dz;
        self.localmass += solid;
        let dsig = config.buoyant_weight() * solid;

        if dsig > 0.0 {
            let d_sd = -(self.phi_sd - layer.phic_sd) * config.beta_sd;
            let d_sh = -(self.phi_sh - layer.phic_sh) * config.beta_sh;
            let (dd_sd, dd_sh) = if self.dsigold > 0.0 {
                (
                    (d_sd - self.phi_sd_dsig) / self.dsigold,
                    (d_sh - self.phi_sh_dsig) / self.dsigold,
                )
            } else {
                (0.0, 0.0)
            };
            self.phi_sd += d_sd * dsig + 0.5 * dd_sd * dsig * dsig;
            self.phi_sh += d_sh * dsig + 0.5 * dd_sh * dsig * dsig;
            self.phi_sd_dsig = d_sd;
            self.phi_sh_dsig = d_sh;
            self.dsigold = dsig;
        }

        self.z += dz;
        self.enter_layer(layer, config)
    }

    /// Close the current layer: its mass budget starts again from zero.
    pub fn reset_mass(&mut self) {
        self.localmass = 0.0;
    }

    fn check(&self, policy: PorosityCheck) -> Result<(), ModelError> {
        if policy == PorosityCheck::Off {
            return Ok(());
        }
        for (which, phi) in [
            ("bulk", self.phi_b),
            ("sand", self.phi_sd),
            ("shale", self.phi_sh),
        ] {
            if porosity_in_range(phi) {
                continue;
            }
            match policy {
                PorosityCheck::Strict => {
                    return Err(ModelError::PorosityOutOfRange {
                        which,
                        phi,
                        depth: self.z,
                    });
                }
                _ => warn!(which, phi, depth = self.z, "porosity outside [0, 1]"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sand_shale() -> LayerLithology {
        LayerLithology::revil(0.45, 0.45, 0.3)
    }

    #[test]
    fn surface_state_uses_config_porosities() {
        let cfg = CompactionConfig::default();
        let s = CompactionState::at_surface(&cfg, &sand_shale()).unwrap();
        assert_eq!(s.z, 0.0);
        assert_eq!(s.phi_sd, 0.54);
        assert_eq!(s.phi_sh, 0.65);
        assert!(s.phi_b > 0.0 && s.phi_b < 0.65);
        assert_eq!(s.dsigold, 0.0);
    }

    #[test]
    fn advance_accumulates_solid_and_compacts() {
        let cfg = CompactionConfig::default();
        let layer = sand_shale();
        let mut s = CompactionState::at_surface(&cfg, &layer).unwrap();
        let phi0 = s.phi_b;
        s.advance(10.0, &layer, &cfg).unwrap();
        assert!((s.localmass - (1.0 - phi0) * 10.0).abs() < 1e-12);
        assert_eq!(s.z, 10.0);
        assert!(s.phi_sd < 0.54);
        assert!(s.phi_sh < 0.65);
        assert!(s.dsigold > 0.0);
    }

    #[test]
    fn second_step_uses_derivative_history() {
        let cfg = CompactionConfig::default();
        let layer = sand_shale();
        let mut s = CompactionState::at_surface(&cfg, &layer).unwrap();
        s.advance(50.0, &layer, &cfg).unwrap();
        let first = s.phi_sd_dsig;
        s.advance(50.0, &layer, &cfg).unwrap();
        // Relaxation slows as phi approaches phic.
        assert!(s.phi_sd_dsig > first);
        assert!(s.phi_sd > layer.phic_sd);
    }

    #[test]
    fn zero_step_leaves_porosity_unchanged() {
        let cfg = CompactionConfig::default();
        let layer = sand_shale();
        let mut s = CompactionState::at_surface(&cfg, &layer).unwrap();
        s.advance(5.0, &layer, &cfg).unwrap();
        let before = s.clone();
        s.advance(0.0, &layer, &cfg).unwrap();
        assert_eq!(s, before);
    }

    #[test]
    fn strict_policy_reports_bad_porosity() {
        let cfg = CompactionConfig {
            phi0_sd: 0.54,
            ..Default::default()
        };
        // Critical porosity far below zero drives phi_sd negative.
        let layer = LayerLithology {
            phic_sd: -50.0,
            ..sand_shale()
        };
        let mut s = CompactionState::at_surface(&cfg, &layer).unwrap();
        let mut result = Ok(());
        for _ in 0..1000 {
            result = s.advance(10.0, &layer, &cfg);
            if result.is_err() {
                break;
            }
        }
        assert!(matches!(
            result,
            Err(ModelError::PorosityOutOfRange { .. })
        ));
    }

    #[test]
    fn exponential_layer_relaxes_toward_its_critical_porosities() {
        use backstrip_core::{LithologyModel, DEFAULT_CRITICAL_POROSITY};

        let cfg = CompactionConfig::default();
        let chalk = LayerLithology::exponential(LithologyModel::Chalk);
        let mut s = CompactionState::at_surface(&cfg, &chalk).unwrap();
        for _ in 0..1000 {
            s.advance(1.0, &chalk, &cfg).unwrap();
        }
        assert!(s.phi_sd < cfg.phi0_sd && s.phi_sd > DEFAULT_CRITICAL_POROSITY);
        assert!(s.phi_sh < cfg.phi0_sh && s.phi_sh > DEFAULT_CRITICAL_POROSITY);
    }

    #[test]
    fn off_policy_keeps_going() {
        let cfg = CompactionConfig {
            porosity_check: PorosityCheck::Off,
            ..Default::default()
        };
        let layer = LayerLithology {
            phic_sd: -50.0,
            ..sand_shale()
        };
        let mut s = CompactionState::at_surface(&cfg, &layer).unwrap();
        for _ in 0..1000 {
            s.advance(10.0, &layer, &cfg).unwrap();
        }
        assert!(s.phi_sd < 0.0);
    }
}
