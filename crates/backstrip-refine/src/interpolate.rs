//! Linear interpolation of raw horizons onto sublayers.

use backstrip_core::LayerLithology;

use crate::error::RefineError;
use crate::plan::SublayerPlan;

fn check_len(what: &'static str, got: usize, plan: &SublayerPlan) -> Result<(), RefineError> {
    if got != plan.raw_len() {
        return Err(RefineError::LengthMismatch {
            what,
            expected: plan.raw_len(),
            got,
        });
    }
    Ok(())
}

/// Sublayer base depths, deepest first.
///
/// Raw layer `r` spans `[rawtop, rawbot]` with `rawbot = raw_bases[r]`
/// and `rawtop = raw_bases[r + 1]` (the surface for the top layer).
/// Sublayer `k` of `s` gets base `rawbot - (rawbot - rawtop) * k / s`,
/// so `k = 0` sits exactly on the raw base.
///
/// ```
/// use backstrip_refine::{refine_depths, SublayerPlan};
///
/// let plan = SublayerPlan::uniform(2, 2).unwrap();
/// let fine = refine_depths(&[100.0, 50.0], &plan).unwrap();
/// assert_eq!(fine, vec![100.0, 75.0, 50.0, 25.0]);
/// ```
pub fn refine_depths(raw_bases: &[f64], plan: &SublayerPlan) -> Result<Vec<f64>, RefineError> {
    check_len("bases", raw_bases.len(), plan)?;
    let mut out = Vec::with_capacity(plan.total());
    for (r, &rawbot) in raw_bases.iter().enumerate() {
        let rawtop = raw_bases.get(r + 1).copied().unwrap_or(0.0);
        let s = plan.count(r) as f64;
        for k in 0..plan.count(r) {
            out.push(rawbot - (rawbot - rawtop) * k as f64 / s);
        }
    }
    Ok(out)
}

/// Sublayer top ages, deepest first.
///
/// Raw layer `r` spans ages `[agetop, agebot]` with `agetop = raw_ages[r]`
/// and `agebot = raw_ages[r - 1]` (`base_age` for `r = 0`). Sublayer `k`
/// of `s` gets age `agebot - (agebot - agetop) * (k + 1) / s`: ages are
/// sublayer tops where depths are sublayer bases. The top sublayer
/// (`k = s - 1`) carries `agetop` exactly.
pub fn refine_ages(
    raw_ages: &[f64],
    base_age: f64,
    plan: &SublayerPlan,
) -> Result<Vec<f64>, RefineError> {
    check_len("ages", raw_ages.len(), plan)?;
    let mut out = Vec::with_capacity(plan.total());
    for (r, &agetop) in raw_ages.iter().enumerate() {
        let agebot = if r == 0 { base_age } else { raw_ages[r - 1] };
        let s = plan.count(r);
        for k in 0..s {
            // The top sublayer takes the horizon age as given.
            if k + 1 == s {
                out.push(agetop);
            } else {
                out.push(agebot - (agebot - agetop) * (k + 1) as f64 / s as f64);
            }
        }
    }
    Ok(out)
}

/// Repeat each raw layer's lithology over its sublayers.
pub fn expand_lithology(
    layers: &[LayerLithology],
    plan: &SublayerPlan,
) -> Result<Vec<LayerLithology>, RefineError> {
    check_len("lithology", layers.len(), plan)?;
    let mut out = Vec::with_capacity(plan.total());
    for (r, layer) in layers.iter().enumerate() {
        out.extend(std::iter::repeat_n(*layer, plan.count(r)));
    }
    Ok(out)
}
