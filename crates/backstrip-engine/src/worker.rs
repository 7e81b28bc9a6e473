//! Worker pool for parallel batch runs.
//!
//! A feeder thread pushes column indices into a bounded crossbeam
//! channel; each worker receives an index, reconstructs that column and
//! sends `(index, result)` back. The caller drains the result channel
//! into per-index slots, so output order never depends on scheduling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::column::{run_column, ColumnError, ColumnInput, ColumnResult};
use crate::config::EngineConfig;

pub(crate) type Slot = Option<Result<ColumnResult, ColumnError>>;

/// Why the pool could not deliver every slot.
#[derive(Debug)]
pub(crate) enum PoolError {
    Spawn(String),
    Panicked,
}

/// One worker's main loop: recv index → reconstruct → reply.
///
/// With `fail_fast`, indices above the lowest failed index so far are
/// skipped and their slots stay empty. Lower indices always run, so the
/// first failure in input order is always found.
fn worker_loop(
    inputs: &[ColumnInput],
    config: &EngineConfig,
    first_failed: &AtomicUsize,
    task_rx: Receiver<usize>,
    result_tx: Sender<(usize, Result<ColumnResult, ColumnError>)>,
) {
    while let Ok(index) = task_rx.recv() {
        if config.fail_fast && index > first_failed.load(Ordering::Acquire) {
            continue;
        }
        let result = run_column(&inputs[index], config);
        if config.fail_fast && result.is_err() {
            first_failed.fetch_min(index, Ordering::AcqRel);
        }
        if result_tx.send((index, result)).is_err() {
            break;
        }
    }
}

/// Reconstruct every input on `workers` threads.
///
/// Returns one slot per input, in input order.
pub(crate) fn run_pool(
    inputs: &[ColumnInput],
    config: &EngineConfig,
    workers: usize,
) -> Result<Vec<Slot>, PoolError> {
    let (task_tx, task_rx) = crossbeam_channel::bounded::<usize>(workers * 4);
    let (result_tx, result_rx) = crossbeam_channel::bounded(workers * 4);
    let first_failed = AtomicUsize::new(usize::MAX);
    let first_failed = &first_failed;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        let mut spawn_error = None;
        for i in 0..workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("backstrip-worker-{i}"))
                .spawn_scoped(scope, move || {
                    worker_loop(inputs, config, first_failed, task_rx, result_tx)
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    spawn_error = Some(e.to_string());
                    break;
                }
            }
        }
        // Workers hold their own ends; dropping ours lets the channels
        // disconnect once the feeder and every worker are done.
        drop(task_rx);
        drop(result_tx);

        let feeder = if spawn_error.is_none() {
            let spawned = thread::Builder::new()
                .name("backstrip-feeder".into())
                .spawn_scoped(scope, move || {
                    for index in 0..inputs.len() {
                        if task_tx.send(index).is_err() {
                            break;
                        }
                    }
                });
            match spawned {
                Ok(handle) => Some(handle),
                Err(e) => {
                    spawn_error = Some(e.to_string());
                    None
                }
            }
        } else {
            drop(task_tx);
            None
        };

        let mut slots: Vec<Slot> = Vec::with_capacity(inputs.len());
        slots.resize_with(inputs.len(), || None);
        for (index, result) in result_rx.iter() {
            slots[index] = Some(result);
        }

        let mut panicked = false;
        for handle in handles {
            panicked |= handle.join().is_err();
        }
        if let Some(handle) = feeder {
            panicked |= handle.join().is_err();
        }

        match (spawn_error, panicked) {
            (Some(reason), _) => Err(PoolError::Spawn(reason)),
            (None, true) => Err(PoolError::Panicked),
            (None, false) => Ok(slots),
        }
    })
}
