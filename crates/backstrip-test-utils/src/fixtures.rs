//! Reference columns with known behaviour.

use backstrip_core::{LayerLithology, LithologyModel};
use backstrip_refine::RawColumn;

/// A fine column: present-day base depths and lithology, deepest first.
#[derive(Clone, Debug, PartialEq)]
pub struct TestColumn {
    pub bottom: Vec<f64>,
    pub layers: Vec<LayerLithology>,
}

impl TestColumn {
    pub fn len(&self) -> usize {
        self.bottom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bottom.is_empty()
    }
}

/// The standard Revil mixture used across the test suites.
pub fn revil_mix() -> LayerLithology {
    LayerLithology::revil(0.45, 0.45, 0.3)
}

/// Two Revil layers with bases at 100 m and 50 m.
///
/// With default constants the deeper layer holds more solid mass, and
/// the last backward stage returns bases 100 and 50.
pub fn two_layer_revil() -> TestColumn {
    TestColumn {
        bottom: vec![100.0, 50.0],
        layers: vec![revil_mix(); 2],
    }
}

/// One layer of every model, thick enough that compaction matters.
pub fn mixed_lithology() -> TestColumn {
    TestColumn {
        bottom: vec![900.0, 720.0, 510.0, 330.0, 140.0],
        layers: vec![
            LayerLithology::exponential(LithologyModel::Chalk),
            LayerLithology::exponential(LithologyModel::Sandstone),
            LayerLithology::revil(0.40, 0.35, 0.6),
            LayerLithology::exponential(LithologyModel::ShalySandstone),
            LayerLithology::exponential(LithologyModel::Shale),
        ],
    }
}

/// A column whose middle layer has zero present-day thickness.
pub fn pinched_layer() -> TestColumn {
    TestColumn {
        bottom: vec![60.0, 30.0, 30.0],
        layers: vec![revil_mix(); 3],
    }
}

/// Three mapped horizons with ages, for refinement and engine tests.
pub fn three_horizon_raw() -> RawColumn {
    RawColumn {
        bases: vec![240.0, 150.0, 60.0],
        ages: vec![30.0, 12.0, 0.0],
        base_age: 55.0,
        lithology: vec![
            LayerLithology::exponential(LithologyModel::Sandstone),
            revil_mix(),
            LayerLithology::exponential(LithologyModel::Shale),
        ],
    }
}
