//! Reconstructed burial history of one column.

use crate::error::CompactionError;

/// Base depth of every layer at every burial stage.
///
/// Stage `t` is the column as it stood when layer `t` had just been
/// deposited, so it holds layers `0..=t`. Stage `N - 1` is present day.
/// Storage is triangular: exactly `N * (N + 1) / 2` values, stage-major.
#[derive(Clone, Debug, PartialEq)]
pub struct BurialHistory {
    layers: usize,
    depths: Vec<f64>,
    stage_ages: Option<Vec<f64>>,
}

fn stage_offset(stage: usize) -> usize {
    stage * (stage + 1) / 2
}

impl BurialHistory {
    /// Zero-filled history for `layers` layers.
    pub fn new(layers: usize) -> Self {
        Self {
            layers,
            depths: vec![0.0; stage_offset(layers)],
            stage_ages: None,
        }
    }

    /// Attach the age of each stage (one per layer, youngest last).
    pub fn with_stage_ages(mut self, ages: Vec<f64>) -> Result<Self, CompactionError> {
        if ages.len() != self.layers {
            return Err(CompactionError::InvalidColumn {
                reason: format!("{} stage ages for {} stages", ages.len(), self.layers),
            });
        }
        self.stage_ages = Some(ages);
        Ok(self)
    }

    /// Number of layers (and of stages).
    pub fn num_layers(&self) -> usize {
        self.layers
    }

    /// Age of stage `t`, if ages were attached.
    pub fn stage_age(&self, stage: usize) -> Option<f64> {
        self.stage_ages.as_ref()?.get(stage).copied()
    }

    /// Base depths of layers `0..=stage` at `stage`, deepest first.
    pub fn stage(&self, stage: usize) -> Option<&[f64]> {
        if stage >= self.layers {
            return None;
        }
        let start = stage_offset(stage);
        Some(&self.depths[start..start + stage + 1])
    }

    pub(crate) fn stage_mut(&mut self, stage: usize) -> &mut [f64] {
        let start = stage_offset(stage);
        &mut self.depths[start..start + stage + 1]
    }

    /// `bottomhist[layer, stage]`; `None` when the layer did not exist yet.
    pub fn depth(&self, layer: usize, stage: usize) -> Option<f64> {
        self.stage(stage)?.get(layer).copied()
    }

    /// Present-day base depths (the last stage).
    pub fn present_day(&self) -> &[f64] {
        match self.layers {
            0 => &[],
            n => &self.depths[stage_offset(n - 1)..],
        }
    }

    /// Thickness of `layer` at `stage`.
    pub fn thickness(&self, layer: usize, stage: usize) -> Option<f64> {
        let bases = self.stage(stage)?;
        let base = *bases.get(layer)?;
        let top = if layer == stage { 0.0 } else { bases[layer + 1] };
        Some(base - top)
    }

    /// Total sediment thickness at `stage` (base of layer 0).
    pub fn column_thickness(&self, stage: usize) -> Option<f64> {
        self.depth(0, stage)
    }

    /// Base depth of `layer` through every stage at which it exists.
    pub fn layer_path(&self, layer: usize) -> Vec<f64> {
        (layer..self.layers)
            .filter_map(|t| self.depth(layer, t))
            .collect()
    }

    /// Dense `[layer][stage]` matrix, row-major, with `fill` where the
    /// layer did not exist yet.
    pub fn to_matrix(&self, fill: f64) -> Vec<f64> {
        let n = self.layers;
        let mut out = vec![fill; n * n];
        for t in 0..n {
            let start = stage_offset(t);
            for l in 0..=t {
                out[l * n + t] = self.depths[start + l];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BurialHistory {
        let mut h = BurialHistory::new(3);
        h.stage_mut(0).copy_from_slice(&[20.0]);
        h.stage_mut(1).copy_from_slice(&[45.0, 25.0]);
        h.stage_mut(2).copy_from_slice(&[70.0, 50.0, 30.0]);
        h
    }

    #[test]
    fn triangular_storage_is_exact() {
        assert_eq!(BurialHistory::new(4).depths.len(), 10);
        assert!(BurialHistory::new(0).present_day().is_empty());
    }

    #[test]
    fn depth_lookup_respects_existence() {
        let h = sample();
        assert_eq!(h.depth(0, 0), Some(20.0));
        assert_eq!(h.depth(1, 0), None);
        assert_eq!(h.depth(1, 2), Some(50.0));
        assert_eq!(h.depth(0, 3), None);
        assert_eq!(h.present_day(), &[70.0, 50.0, 30.0]);
    }

    #[test]
    fn thickness_uses_next_younger_base() {
        let h = sample();
        assert_eq!(h.thickness(0, 2), Some(20.0));
        assert_eq!(h.thickness(2, 2), Some(30.0));
        assert_eq!(h.thickness(1, 1), Some(25.0));
        assert_eq!(h.column_thickness(1), Some(45.0));
    }

    #[test]
    fn layer_path_follows_burial() {
        let h = sample();
        assert_eq!(h.layer_path(0), vec![20.0, 45.0, 70.0]);
        assert_eq!(h.layer_path(2), vec![30.0]);
    }

    #[test]
    fn matrix_fills_missing_cells() {
        let h = sample();
        let m = h.to_matrix(f64::NAN);
        assert_eq!(m[0], 20.0);
        assert!(m[3].is_nan());
        assert_eq!(m[5], 50.0);
    }

    #[test]
    fn stage_ages_must_match() {
        assert!(sample().with_stage_ages(vec![3.0, 2.0]).is_err());
        let h = sample().with_stage_ages(vec![30.0, 20.0, 10.0]).unwrap();
        assert_eq!(h.stage_age(1), Some(20.0));
        assert_eq!(h.stage_age(3), None);
    }
}
