//! Seeded random columns.

use backstrip_core::{LayerLithology, LithologyModel};
use backstrip_refine::RawColumn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::fixtures::TestColumn;

/// Deterministic generator of valid columns.
///
/// The same seed always yields the same sequence of columns, so
/// failures reproduce across machines.
pub struct ColumnGenerator {
    rng: ChaCha8Rng,
    max_thickness: f64,
}

impl ColumnGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_thickness: 40.0,
        }
    }

    /// Cap on generated layer thickness in metres (default 40).
    pub fn with_max_thickness(mut self, max_thickness: f64) -> Self {
        self.max_thickness = max_thickness;
        self
    }

    /// A random lithology: a Revil mixture or one of the exponential curves.
    pub fn lithology(&mut self) -> LayerLithology {
        let pick = self.rng.random_range(0..LithologyModel::ALL.len());
        match LithologyModel::ALL[pick] {
            LithologyModel::Revil => LayerLithology::revil(
                self.rng.random_range(0.30..0.50),
                self.rng.random_range(0.30..0.50),
                self.rng.random_range(0.0..=1.0),
            ),
            model => LayerLithology::exponential(model),
        }
    }

    fn thicknesses(&mut self, layers: usize) -> Vec<f64> {
        (0..layers)
            .map(|_| self.rng.random_range(1.0..self.max_thickness))
            .collect()
    }

    /// A fine column of `layers` layers, deepest first, top at the surface.
    pub fn fine_column(&mut self, layers: usize) -> TestColumn {
        let thickness = self.thicknesses(layers);
        let bottom = bases_from_thickness(&thickness);
        let layers = (0..layers).map(|_| self.lithology()).collect();
        TestColumn { bottom, layers }
    }

    /// A raw column with ages, `layers` horizons deep.
    pub fn raw_column(&mut self, layers: usize) -> RawColumn {
        let thickness = self.thicknesses(layers);
        let bases = bases_from_thickness(&thickness);
        let mut age = 0.0;
        let mut ages = vec![0.0; layers];
        for a in ages.iter_mut().rev() {
            *a = age;
            age += self.rng.random_range(0.5..10.0);
        }
        let lithology = (0..layers).map(|_| self.lithology()).collect();
        RawColumn {
            bases,
            ages,
            base_age: age,
            lithology,
        }
    }

    /// `columns` raw columns of `layers` horizons each.
    pub fn raw_grid(&mut self, columns: usize, layers: usize) -> Vec<RawColumn> {
        (0..columns).map(|_| self.raw_column(layers)).collect()
    }
}

// Layer 0 is deepest; the top layer's top is the surface.
fn bases_from_thickness(thickness: &[f64]) -> Vec<f64> {
    let mut bases = vec![0.0; thickness.len()];
    let mut depth = 0.0;
    for (base, t) in bases.iter_mut().zip(thickness).rev() {
        depth += t;
        *base = depth;
    }
    bases
}
