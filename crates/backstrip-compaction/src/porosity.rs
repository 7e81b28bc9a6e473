//! Bulk porosity from end-member porosities, clay fraction and depth.

use backstrip_core::{LithologyModel, ModelError};

/// Solid-shale fraction of the grain volume for the Revil mixture.
///
/// Below `sv == phi_sd` the shale sits inside the sand pore space and
/// the sand frame carries `1 - phi_sd` of solids per unit volume; above
/// it the sand grains are dispersed in a shale matrix and occupy
/// `1 - sv`. Both branches agree at `sv == phi_sd`.
pub fn water_fraction(phi_sd: f64, phi_sh: f64, sv: f64, grain_density: f64) -> f64 {
    let shale_mass = sv * (1.0 - phi_sh) * grain_density;
    let sand_mass = if sv < phi_sd {
        (1.0 - phi_sd) * grain_density
    } else {
        (1.0 - sv) * grain_density
    };
    shale_mass / (shale_mass + sand_mass)
}

/// Solid-shale fraction at which shale exactly fills the sand pores.
pub fn critical_water_fraction(phi_sd: f64, phi_sh: f64) -> f64 {
    phi_sd * (1.0 - phi_sh) / (1.0 - phi_sd * phi_sh)
}

/// Bulk porosity of a layer.
///
/// `sv` is the shale volume fraction and only matters for
/// [`LithologyModel::Revil`]; the exponential models depend on `depth`
/// (metres) alone.
///
/// ```
/// use backstrip_compaction::bulk_porosity;
/// use backstrip_core::LithologyModel;
///
/// // Clean sand: bulk porosity is the sand porosity.
/// let phi = bulk_porosity(0.4, 0.6, 0.0, 2650.0, LithologyModel::Revil, 0.0);
/// assert!((phi - 0.4).abs() < 1e-12);
///
/// // Shale curve at the surface.
/// let phi = bulk_porosity(0.0, 0.0, 0.0, 2650.0, LithologyModel::Shale, 0.0);
/// assert!((phi - 0.63).abs() < 1e-12);
/// ```
pub fn bulk_porosity(
    phi_sd: f64,
    phi_sh: f64,
    sv: f64,
    grain_density: f64,
    model: LithologyModel,
    depth: f64,
) -> f64 {
    match model.exponential_coefficients() {
        Some((a, k)) => a * (-k * depth).exp(),
        None => {
            let svw = water_fraction(phi_sd, phi_sh, sv, grain_density);
            let svwcr = critical_water_fraction(phi_sd, phi_sh);
            if svw < svwcr {
                // sand-supported
                phi_sd - (1.0 - phi_sd) * svw / (1.0 - svw)
            } else {
                phi_sh * svw / (svw + (1.0 - phi_sh) * (1.0 - svw))
            }
        }
    }
}

/// Bulk porosity from a raw model code, for callers holding untyped
/// lithology grids.
pub fn bulk_porosity_code(
    phi_sd: f64,
    phi_sh: f64,
    sv: f64,
    grain_density: f64,
    model_code: u8,
    depth: f64,
) -> Result<f64, ModelError> {
    let model = LithologyModel::from_code(model_code)?;
    Ok(bulk_porosity(phi_sd, phi_sh, sv, grain_density, model, depth))
}

/// Whether `phi` is a physical porosity. NaN is not.
pub fn porosity_in_range(phi: f64) -> bool {
    (0.0..=1.0).contains(&phi)
}
