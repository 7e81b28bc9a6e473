//! Forward then backward in one call, with step and timing metrics.

use std::time::Instant;

use backstrip_core::{CompactionConfig, LayerLithology};

use crate::backward::backward_counted;
use crate::error::CompactionError;
use crate::forward::{forward_counted, LayerMasses};
use crate::history::BurialHistory;

/// Work done by one reconstruction.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassMetrics {
    /// Kernel steps taken by the forward pass.
    pub forward_steps: u64,
    /// Kernel steps taken by all stages of the backward pass.
    pub backward_steps: u64,
    /// Wall-clock time of the forward pass.
    pub forward_us: u64,
    /// Wall-clock time of the backward pass.
    pub backward_us: u64,
}

impl PassMetrics {
    /// Steps taken by both passes.
    pub fn total_steps(&self) -> u64 {
        self.forward_steps + self.backward_steps
    }
}

/// Result of [`reconstruct`].
#[derive(Clone, Debug)]
pub struct Reconstruction {
    /// Conserved solid mass per layer.
    pub masses: LayerMasses,
    /// Base depth of every layer at every stage.
    pub history: BurialHistory,
    /// Step counts and timings.
    pub metrics: PassMetrics,
}

/// Run the forward pass on present-day depths and replay it backward
/// through every burial stage.
pub fn reconstruct(
    bottom: &[f64],
    layers: &[LayerLithology],
    config: &CompactionConfig,
) -> Result<Reconstruction, CompactionError> {
    let started = Instant::now();
    let (masses, forward_steps) = forward_counted(bottom, layers, config)?;
    let forward_us = started.elapsed().as_micros() as u64;

    let started = Instant::now();
    let (history, backward_steps) = backward_counted(&masses, &layers[..masses.len()], config)?;
    let backward_us = started.elapsed().as_micros() as u64;

    Ok(Reconstruction {
        masses,
        history,
        metrics: PassMetrics {
            forward_steps,
            backward_steps,
            forward_us,
            backward_us,
        },
    })
}
