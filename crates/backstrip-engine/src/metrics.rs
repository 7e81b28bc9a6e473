//! Batch-level performance metrics.
//!
//! Per-column step counts and timings live in
//! [`PassMetrics`](backstrip_compaction::PassMetrics); [`BatchMetrics`]
//! aggregates them for one batch run.

/// Timing and work metrics for one batch run.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchMetrics {
    /// Columns in the batch.
    pub columns: usize,
    /// Columns that failed.
    pub failed: usize,
    /// Worker threads used (1 for sequential runs).
    pub workers: usize,
    /// Kernel steps summed over every successful column.
    pub total_steps: u64,
    /// Wall-clock time for the whole batch.
    pub total_us: u64,
}

impl BatchMetrics {
    /// Columns that completed.
    pub fn succeeded(&self) -> usize {
        self.columns - self.failed
    }
}
