//! Reconstruct a small grid of columns and print one burial history.
//!
//! Run with `RUST_LOG=debug` to see per-pass and per-column events.

use backstrip_core::{ColumnId, LithologyCatalog};
use backstrip_engine::{ColumnBatch, ColumnInput, EngineConfig, Refinement};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let catalog = LithologyCatalog::with_presets();
    let mut inputs = Vec::new();
    for i in 0..4u32 {
        let shift = 10.0 * i as f64;
        inputs.push(ColumnInput::from_names(
            ColumnId::new(i, 0),
            vec![400.0 + shift, 250.0 + shift, 90.0],
            vec![34.0, 11.0, 0.0],
            66.0,
            &["chalk", "revil_mix", "shale"],
            &catalog,
        )?);
    }

    let config = EngineConfig {
        refinement: Refinement::MaxThickness(20.0),
        ..EngineConfig::default()
    };
    let result = ColumnBatch::new(inputs, config)?.run_parallel()?;

    if let Some(column) = result.succeeded().next() {
        println!("column {}: {} sublayers", column.id, column.fine.len());
        println!("raw layer masses: {:?}", column.raw_masses);
        for stage in 0..column.history.num_layers() {
            let age = column.history.stage_age(stage).unwrap_or(f64::NAN);
            let depth = column.history.column_thickness(stage).unwrap_or(f64::NAN);
            println!("{age:>7.2} Ma  basement at {depth:>8.2} m");
        }
    }
    println!(
        "{} columns, {} steps, {} us",
        result.metrics.columns, result.metrics.total_steps, result.metrics.total_us
    );
    Ok(())
}
