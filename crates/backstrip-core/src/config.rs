//! Compaction-law constants and their validation.
//!
//! [`CompactionConfig`] carries compressibilities, densities, gravity,
//! surface porosities and the step size. One value is shared read-only
//! by every column of a run.

use std::error::Error;
use std::fmt;

// ── PorosityCheck ──────────────────────────────────────────────────

/// What the stepping kernel does when a porosity leaves `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PorosityCheck {
    /// Abort the column with an error.
    #[default]
    Strict,
    /// Log a warning and keep integrating.
    Warn,
    /// No check, and lithology parameters are not validated either.
    Off,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`CompactionConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A constant that must be finite and strictly positive is not.
    InvalidConstant {
        /// Field name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A surface porosity outside `[0, 1)`.
    InvalidPorosity {
        /// Field name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Grain density does not exceed fluid density, so buried solids
    /// would carry no buoyant load.
    DensityInversion {
        /// Grain density (kg/m^3).
        grain: f64,
        /// Fluid density (kg/m^3).
        fluid: f64,
    },
    /// `forward_layer_override` is zero.
    ZeroLayerOverride,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConstant { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::InvalidPorosity { name, value } => {
                write!(f, "{name} must lie in [0, 1), got {value}")
            }
            Self::DensityInversion { grain, fluid } => write!(
                f,
                "grain_density {grain} must exceed fluid_density {fluid}"
            ),
            Self::ZeroLayerOverride => write!(f, "forward_layer_override must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── CompactionConfig ───────────────────────────────────────────────

/// Constants of the porosity-stress compaction law.
#[derive(Clone, Debug, PartialEq)]
pub struct CompactionConfig {
    /// Sand end-member compressibility (1/Pa). Default: 1.5e-8.
    pub beta_sd: f64,
    /// Shale end-member compressibility (1/Pa). Default: 5.0e-8.
    pub beta_sh: f64,
    /// Grain density (kg/m^3). Default: 2650.
    pub grain_density: f64,
    /// Pore-fluid density (kg/m^3). Default: 1030.
    pub fluid_density: f64,
    /// Gravitational acceleration (m/s^2). Default: 9.81.
    pub gravity: f64,
    /// Sand end-member porosity at the sediment surface. Default: 0.54.
    pub phi0_sd: f64,
    /// Shale end-member porosity at the sediment surface. Default: 0.65.
    pub phi0_sh: f64,
    /// Nominal integration step (m). Default: 1.0.
    pub dz_nominal: f64,
    /// Porosity range policy. Default: [`PorosityCheck::Strict`].
    pub porosity_check: PorosityCheck,
    /// Fixed layer count for the forward pass.
    ///
    /// Some grids were built for a forward pass that marched a hardcoded
    /// number of layers whatever the caller passed. `Some(n)` reproduces
    /// that: only layers `0..n` are integrated and reconstructed. `None`
    /// (default) uses the caller's count.
    pub forward_layer_override: Option<usize>,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            beta_sd: 1.5e-8,
            beta_sh: 5.0e-8,
            grain_density: 2650.0,
            fluid_density: 1030.0,
            gravity: 9.81,
            phi0_sd: 0.54,
            phi0_sh: 0.65,
            dz_nominal: 1.0,
            porosity_check: PorosityCheck::Strict,
            forward_layer_override: None,
        }
    }
}

impl CompactionConfig {
    /// Buoyant weight gradient `(rho_g - rho_f) * g` in Pa/m of solid.
    pub fn buoyant_weight(&self) -> f64 {
        (self.grain_density - self.fluid_density) * self.gravity
    }

    /// Check every constant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("beta_sd", self.beta_sd),
            ("beta_sh", self.beta_sh),
            ("grain_density", self.grain_density),
            ("fluid_density", self.fluid_density),
            ("gravity", self.gravity),
            ("dz_nominal", self.dz_nominal),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidConstant { name, value });
            }
        }
        for (name, value) in [("phi0_sd", self.phi0_sd), ("phi0_sh", self.phi0_sh)] {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::InvalidPorosity { name, value });
            }
        }
        if self.grain_density <= self.fluid_density {
            return Err(ConfigError::DensityInversion {
                grain: self.grain_density,
                fluid: self.fluid_density,
            });
        }
        if self.forward_layer_override == Some(0) {
            return Err(ConfigError::ZeroLayerOverride);
        }
        Ok(())
    }
}
