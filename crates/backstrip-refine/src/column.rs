//! Raw horizon columns and their refined form.

use backstrip_core::LayerLithology;

use crate::error::RefineError;
use crate::interpolate::{expand_lithology, refine_ages, refine_depths};
use crate::plan::SublayerPlan;

/// A column as mapped: one entry per raw layer, deepest first.
#[derive(Clone, Debug, PartialEq)]
pub struct RawColumn {
    /// Present-day base depth of each raw layer (m).
    pub bases: Vec<f64>,
    /// Age of each raw layer's top horizon.
    pub ages: Vec<f64>,
    /// Age of the base of the deepest layer.
    pub base_age: f64,
    /// Lithology of each raw layer.
    pub lithology: Vec<LayerLithology>,
}

/// A refined column ready for the compaction passes.
#[derive(Clone, Debug, PartialEq)]
pub struct FineColumn {
    /// Present-day sublayer base depths, deepest first.
    pub bottom: Vec<f64>,
    /// Sublayer top ages, deepest first.
    pub ages: Vec<f64>,
    /// Sublayer lithologies.
    pub layers: Vec<LayerLithology>,
    /// The plan that produced this column.
    pub plan: SublayerPlan,
}

impl RawColumn {
    /// Number of raw layers.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Whether the column has no layers.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Check lengths, finiteness and stratigraphic order.
    ///
    /// Bases must not get deeper going up and must stay at or below the
    /// surface. Ages must not get older going up, starting from
    /// `base_age`. Lithology parameters are checked by the compaction
    /// passes, which know the porosity-check policy.
    pub fn validate(&self) -> Result<(), RefineError> {
        let n = self.bases.len();
        if n == 0 {
            return Err(RefineError::EmptyColumn);
        }
        for (what, got) in [("ages", self.ages.len()), ("lithology", self.lithology.len())] {
            if got != n {
                return Err(RefineError::LengthMismatch {
                    what,
                    expected: n,
                    got,
                });
            }
        }
        if !self.base_age.is_finite() {
            return Err(RefineError::NonFinite {
                what: "base_age",
                index: 0,
            });
        }
        for (what, values) in [("bases", &self.bases), ("ages", &self.ages)] {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(RefineError::NonFinite { what, index });
            }
        }
        if let Some(r) = (1..n).find(|&r| self.bases[r] > self.bases[r - 1]) {
            return Err(RefineError::NotMonotonic {
                what: "bases",
                index: r,
            });
        }
        if self.bases[n - 1] < 0.0 {
            return Err(RefineError::NotMonotonic {
                what: "bases",
                index: n - 1,
            });
        }
        if self.ages[0] > self.base_age {
            return Err(RefineError::NotMonotonic {
                what: "ages",
                index: 0,
            });
        }
        if let Some(r) = (1..n).find(|&r| self.ages[r] > self.ages[r - 1]) {
            return Err(RefineError::NotMonotonic {
                what: "ages",
                index: r,
            });
        }
        Ok(())
    }

    /// Validate and subdivide according to `plan`.
    pub fn refine(&self, plan: &SublayerPlan) -> Result<FineColumn, RefineError> {
        self.validate()?;
        Ok(FineColumn {
            bottom: refine_depths(&self.bases, plan)?,
            ages: refine_ages(&self.ages, self.base_age, plan)?,
            layers: expand_lithology(&self.lithology, plan)?,
            plan: plan.clone(),
        })
    }
}

impl FineColumn {
    /// Number of sublayers.
    pub fn len(&self) -> usize {
        self.bottom.len()
    }

    /// Whether the column has no sublayers.
    pub fn is_empty(&self) -> bool {
        self.bottom.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backstrip_core::LithologyModel;

    fn column() -> RawColumn {
        RawColumn {
            bases: vec![1200.0, 700.0, 250.0],
            ages: vec![40.0, 15.0, 0.0],
            base_age: 65.0,
            lithology: vec![
                LayerLithology::exponential(LithologyModel::Sandstone),
                LayerLithology::revil(0.45, 0.45, 0.3),
                LayerLithology::exponential(LithologyModel::Shale),
            ],
        }
    }

    #[test]
    fn one_sublayer_per_raw_layer_is_identity() {
        let raw = column();
        let fine = raw.refine(&SublayerPlan::uniform(3, 1).unwrap()).unwrap();
        assert_eq!(fine.bottom, raw.bases);
        assert_eq!(fine.ages, raw.ages);
        assert_eq!(fine.layers, raw.lithology);
    }

    #[test]
    fn refine_keeps_horizons() {
        let raw = column();
        let plan = SublayerPlan::new(vec![5, 3, 2]).unwrap();
        let fine = raw.refine(&plan).unwrap();
        assert_eq!(fine.len(), 10);
        for r in 0..raw.len() {
            let range = plan.fine_range(r);
            assert_eq!(fine.bottom[range.start], raw.bases[r]);
            assert_eq!(fine.ages[range.end - 1], raw.ages[r]);
            assert!(fine.layers[range].iter().all(|l| *l == raw.lithology[r]));
        }
    }

    #[test]
    fn inverted_bases_rejected() {
        let mut raw = column();
        raw.bases[2] = 800.0;
        assert_eq!(
            raw.validate(),
            Err(RefineError::NotMonotonic {
                what: "bases",
                index: 2
            })
        );
    }

    #[test]
    fn ages_older_than_base_rejected() {
        let mut raw = column();
        raw.base_age = 30.0;
        assert_eq!(
            raw.validate(),
            Err(RefineError::NotMonotonic {
                what: "ages",
                index: 0
            })
        );
    }

    #[test]
    fn plan_must_match_column() {
        let raw = column();
        let err = raw.refine(&SublayerPlan::uniform(2, 4).unwrap()).unwrap_err();
        assert!(matches!(err, RefineError::LengthMismatch { expected: 2, got: 3, .. }));
    }

    #[test]
    fn nan_age_rejected() {
        let mut raw = column();
        raw.ages[1] = f64::NAN;
        assert_eq!(
            raw.validate(),
            Err(RefineError::NonFinite {
                what: "ages",
                index: 1
            })
        );
    }
}
