//! Batch reconstruction of many columns.
//!
//! [`ColumnBatch`] owns N [`ColumnInput`]s and reconstructs them all in
//! one call. [`run()`](ColumnBatch::run) walks the columns on the
//! calling thread; [`run_parallel()`](ColumnBatch::run_parallel) spreads
//! them over a worker pool. Columns are independent, so both produce the
//! same histories in the same order.

use std::time::Instant;

use tracing::info;

use crate::column::{run_column, ColumnError, ColumnInput, ColumnResult};
use crate::config::{EngineConfig, EngineConfigError};
use crate::metrics::BatchMetrics;
use crate::worker::{run_pool, PoolError, Slot};

// ── Error type ──────────────────────────────────────────────────

/// Error from a batch operation, annotated with the failing column index.
#[derive(Debug, PartialEq)]
pub enum BatchError {
    /// A column failed and `fail_fast` is set.
    Column {
        /// Index of the column that failed (0-based).
        column_index: usize,
        /// The underlying column error.
        error: ColumnError,
    },
    /// Configuration error during construction.
    Config(EngineConfigError),
    /// Batch-level argument validation failed.
    InvalidArgument {
        /// Human-readable description of what's wrong.
        reason: String,
    },
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// The OS error message.
        reason: String,
    },
    /// A worker thread panicked; its column has no result.
    WorkerPanicked,
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Column {
                column_index,
                error,
            } => write!(f, "column {column_index}: {error}"),
            BatchError::Config(e) => write!(f, "config error: {e}"),
            BatchError::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            BatchError::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn worker thread: {reason}")
            }
            BatchError::WorkerPanicked => write!(f, "a worker thread panicked"),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Column { error, .. } => Some(error),
            BatchError::Config(e) => Some(e),
            _ => None,
        }
    }
}

// ── Result type ─────────────────────────────────────────────────

/// Outcome of a batch run.
///
/// With `fail_fast` every entry of `columns` is `Ok`; otherwise failed
/// columns keep their error in place.
#[derive(Debug)]
pub struct BatchResult {
    /// Per-column outcome, in input order.
    pub columns: Vec<Result<ColumnResult, ColumnError>>,
    /// Aggregate counts and timing.
    pub metrics: BatchMetrics,
}

impl BatchResult {
    /// Successful columns, in input order.
    pub fn succeeded(&self) -> impl Iterator<Item = &ColumnResult> {
        self.columns.iter().filter_map(|r| r.as_ref().ok())
    }

    /// Failed columns with their input index.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &ColumnError)> {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().err().map(|e| (i, e)))
    }
}

// ── ColumnBatch ─────────────────────────────────────────────────

/// A set of columns reconstructed under one [`EngineConfig`].
pub struct ColumnBatch {
    inputs: Vec<ColumnInput>,
    config: EngineConfig,
}

impl ColumnBatch {
    /// Create a batch.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidArgument`] for an empty batch and
    /// [`BatchError::Config`] if `config` fails validation.
    pub fn new(inputs: Vec<ColumnInput>, config: EngineConfig) -> Result<Self, BatchError> {
        if inputs.is_empty() {
            return Err(BatchError::InvalidArgument {
                reason: "ColumnBatch requires at least one column".into(),
            });
        }
        config.validate().map_err(BatchError::Config)?;
        Ok(Self { inputs, config })
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.inputs.len()
    }

    /// The columns, in order.
    pub fn inputs(&self) -> &[ColumnInput] {
        &self.inputs
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reconstruct every column on the calling thread.
    pub fn run(&self) -> Result<BatchResult, BatchError> {
        let started = Instant::now();
        let mut slots: Vec<Slot> = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let result = run_column(input, &self.config);
            let failed = result.is_err();
            slots.push(Some(result));
            if failed && self.config.fail_fast {
                break;
            }
        }
        slots.resize_with(self.inputs.len(), || None);
        self.finish(slots, 1, started)
    }

    /// Reconstruct every column on [`EngineConfig::resolved_worker_count`]
    /// worker threads.
    ///
    /// Results are identical to [`run()`](Self::run). With `fail_fast`,
    /// the reported error is the one with the lowest column index.
    pub fn run_parallel(&self) -> Result<BatchResult, BatchError> {
        let started = Instant::now();
        let workers = self
            .config
            .resolved_worker_count()
            .min(self.inputs.len());
        let slots = run_pool(&self.inputs, &self.config, workers).map_err(|e| match e {
            PoolError::Spawn(reason) => BatchError::ThreadSpawnFailed { reason },
            PoolError::Panicked => BatchError::WorkerPanicked,
        })?;
        self.finish(slots, workers, started)
    }

    fn finish(
        &self,
        slots: Vec<Slot>,
        workers: usize,
        started: Instant,
    ) -> Result<BatchResult, BatchError> {
        if self.config.fail_fast {
            // Workers never skip a column below the lowest failure, so
            // this matches the sequential run.
            let first_err = slots
                .iter()
                .enumerate()
                .find_map(|(i, s)| match s {
                    Some(Err(e)) => Some((i, e.clone())),
                    _ => None,
                });
            if let Some((column_index, error)) = first_err {
                info!(column = column_index, %error, "batch aborted");
                return Err(BatchError::Column {
                    column_index,
                    error,
                });
            }
        }

        let columns = slots
            .into_iter()
            .map(|s| s.ok_or(BatchError::WorkerPanicked))
            .collect::<Result<Vec<_>, _>>()?;

        let metrics = BatchMetrics {
            columns: columns.len(),
            failed: columns.iter().filter(|r| r.is_err()).count(),
            workers,
            total_steps: columns
                .iter()
                .filter_map(|r| r.as_ref().ok())
                .map(|c| c.metrics.total_steps())
                .sum(),
            total_us: started.elapsed().as_micros() as u64,
        };
        info!(
            columns = metrics.columns,
            failed = metrics.failed,
            workers,
            steps = metrics.total_steps,
            elapsed_us = metrics.total_us,
            "batch complete"
        );
        Ok(BatchResult { columns, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backstrip_core::{ColumnId, LayerLithology};
    use backstrip_refine::RawColumn;

    fn input(i: u32, top: f64) -> ColumnInput {
        ColumnInput::new(
            ColumnId::new(i, 0),
            RawColumn {
                bases: vec![top + 20.0, top],
                ages: vec![3.0, 0.0],
                base_age: 6.0,
                lithology: vec![LayerLithology::revil(0.45, 0.45, 0.3); 2],
            },
        )
    }

    #[test]
    fn empty_batch_rejected() {
        assert!(matches!(
            ColumnBatch::new(vec![], EngineConfig::default()),
            Err(BatchError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn sequential_run_keeps_order() {
        let batch = ColumnBatch::new(
            (0..4).map(|i| input(i, 10.0 + i as f64)).collect(),
            EngineConfig::default(),
        )
        .unwrap();
        let result = batch.run().unwrap();
        assert_eq!(result.metrics.columns, 4);
        assert_eq!(result.metrics.workers, 1);
        let ids: Vec<_> = result.succeeded().map(|c| c.id.i).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn fail_fast_reports_first_bad_column() {
        let mut inputs: Vec<_> = (0..5).map(|i| input(i, 10.0)).collect();
        inputs[2].raw.bases.swap(0, 1);
        inputs[4].raw.bases.swap(0, 1);
        let batch = ColumnBatch::new(inputs, EngineConfig::default()).unwrap();
        for result in [batch.run(), batch.run_parallel()] {
            match result {
                Err(BatchError::Column { column_index, .. }) => assert_eq!(column_index, 2),
                other => panic!("expected column error, got {other:?}"),
            }
        }
    }

    #[test]
    fn collect_mode_keeps_failures_in_place() {
        let mut inputs: Vec<_> = (0..3).map(|i| input(i, 10.0)).collect();
        inputs[1].raw.ages.push(1.0);
        let config = EngineConfig {
            fail_fast: false,
            ..EngineConfig::default()
        };
        let result = ColumnBatch::new(inputs, config).unwrap().run().unwrap();
        assert_eq!(result.metrics.failed, 1);
        assert_eq!(result.metrics.succeeded(), 2);
        let failed: Vec<_> = result.failures().map(|(i, _)| i).collect();
        assert_eq!(failed, vec![1]);
    }
}
