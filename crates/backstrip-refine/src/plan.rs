//! Number of sublayers per raw layer.

use std::ops::Range;

use crate::error::RefineError;

/// Upper bound on the sublayers of one raw layer.
pub const MAX_SUBLAYERS: usize = 1 << 20;

/// Validated sublayer counts, one per raw layer (index 0 deepest).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SublayerPlan {
    counts: Vec<usize>,
    // offsets[r] is the fine index of raw layer r's deepest sublayer;
    // offsets[R] is the total.
    offsets: Vec<usize>,
}

impl SublayerPlan {
    /// Build a plan from explicit counts. Every count must lie in
    /// `1..=MAX_SUBLAYERS`.
    pub fn new(counts: Vec<usize>) -> Result<Self, RefineError> {
        if counts.is_empty() {
            return Err(RefineError::EmptyColumn);
        }
        if let Some(layer) = counts.iter().position(|&c| c == 0) {
            return Err(RefineError::ZeroSublayers { layer });
        }
        let mut offsets = Vec::with_capacity(counts.len() + 1);
        let mut acc: usize = 0;
        offsets.push(0);
        for (layer, &c) in counts.iter().enumerate() {
            if c > MAX_SUBLAYERS {
                return Err(RefineError::TooManySublayers { layer });
            }
            acc = acc
                .checked_add(c)
                .ok_or(RefineError::TooManySublayers { layer })?;
            offsets.push(acc);
        }
        Ok(Self { counts, offsets })
    }

    /// The same count for every raw layer.
    pub fn uniform(raw_layers: usize, sublayers: usize) -> Result<Self, RefineError> {
        Self::new(vec![sublayers; raw_layers])
    }

    /// Enough sublayers that none is thicker than `max_thickness`.
    ///
    /// `bases` are raw layer base depths, deepest first; the top raw
    /// layer extends to the surface. Zero-thickness layers get one
    /// sublayer.
    pub fn by_thickness(bases: &[f64], max_thickness: f64) -> Result<Self, RefineError> {
        if !max_thickness.is_finite() || max_thickness <= 0.0 {
            return Err(RefineError::InvalidThickness {
                value: max_thickness,
            });
        }
        let counts = (0..bases.len())
            .map(|r| {
                let top = bases.get(r + 1).copied().unwrap_or(0.0);
                let thickness = (bases[r] - top).max(0.0);
                let wanted = (thickness / max_thickness).ceil();
                if wanted.is_nan() || wanted > MAX_SUBLAYERS as f64 {
                    return Err(RefineError::TooManySublayers { layer: r });
                }
                Ok((wanted as usize).max(1))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(counts)
    }

    /// Number of raw layers.
    pub fn raw_len(&self) -> usize {
        self.counts.len()
    }

    /// Total number of fine sublayers.
    pub fn total(&self) -> usize {
        self.offsets[self.counts.len()]
    }

    /// Sublayers of raw layer `raw`.
    pub fn count(&self, raw: usize) -> usize {
        self.counts[raw]
    }

    /// All counts, deepest raw layer first.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Fine indices covered by raw layer `raw`.
    pub fn fine_range(&self, raw: usize) -> Range<usize> {
        self.offsets[raw]..self.offsets[raw + 1]
    }

    /// The raw layer a fine sublayer belongs to.
    pub fn raw_layer_of(&self, fine: usize) -> Option<usize> {
        if fine >= self.total() {
            return None;
        }
        // offsets is strictly increasing because every count is >= 1.
        match self.offsets.binary_search(&fine) {
            Ok(r) => Some(r),
            Err(r) => Some(r - 1),
        }
    }
}
