//! Benchmark profiles for the backstrip workspace.
//!
//! - [`reference_batch`]: 8x8 grid, 6 horizons, 5 sublayers each
//! - [`stress_batch`]: 32x32 grid with the same column shape
//! - [`deep_column`]: one fine column for pass-level benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use backstrip_core::ColumnId;
use backstrip_engine::{ColumnInput, EngineConfig, Refinement};
use backstrip_test_utils::{ColumnGenerator, TestColumn};

/// Horizons per generated column.
pub const HORIZONS: usize = 6;

/// Engine configuration shared by the batch profiles.
pub fn bench_config(worker_count: Option<usize>) -> EngineConfig {
    EngineConfig {
        refinement: Refinement::Uniform(5),
        worker_count,
        ..EngineConfig::default()
    }
}

/// `side x side` seeded columns, row-major.
pub fn grid_inputs(side: u32, seed: u64) -> Vec<ColumnInput> {
    let mut generator = ColumnGenerator::new(seed);
    let mut inputs = Vec::with_capacity((side * side) as usize);
    for i in 0..side {
        for j in 0..side {
            inputs.push(ColumnInput::new(
                ColumnId::new(i, j),
                generator.raw_column(HORIZONS),
            ));
        }
    }
    inputs
}

/// Reference profile: 64 columns.
pub fn reference_batch(seed: u64) -> Vec<ColumnInput> {
    grid_inputs(8, seed)
}

/// Stress profile: 1024 columns.
pub fn stress_batch(seed: u64) -> Vec<ColumnInput> {
    grid_inputs(32, seed)
}

/// A fine column of `layers` layers up to 60 m thick.
pub fn deep_column(layers: usize, seed: u64) -> TestColumn {
    ColumnGenerator::new(seed)
        .with_max_thickness(60.0)
        .fine_column(layers)
}
