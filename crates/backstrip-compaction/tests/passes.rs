//! End-to-end forward/backward behaviour on reference and random columns.

use backstrip_compaction::{backward_pass, forward_pass, reconstruct, CompactionError};
use backstrip_core::{CompactionConfig, LayerLithology, LithologyModel, PorosityCheck};
use backstrip_test_utils::{assert_close, fixtures, ColumnGenerator};
use proptest::prelude::*;

#[test]
fn two_layer_round_trip() {
    let column = fixtures::two_layer_revil();
    let cfg = CompactionConfig::default();
    let masses = forward_pass(&column.bottom, &column.layers, &cfg).unwrap();
    assert!(masses.get(0).unwrap() > masses.get(1).unwrap());

    let history = backward_pass(&masses, &column.layers, &cfg).unwrap();
    assert_close(history.present_day(), &[100.0, 50.0], 1e-6);
}

#[test]
fn mixed_lithology_round_trip() {
    let column = fixtures::mixed_lithology();
    let cfg = CompactionConfig::default();
    let result = reconstruct(&column.bottom, &column.layers, &cfg).unwrap();
    assert_eq!(result.history.num_layers(), column.len());
    assert_close(result.history.present_day(), &column.bottom, 1e-6);
}

#[test]
fn pinched_layer_stays_pinched() {
    let column = fixtures::pinched_layer();
    let cfg = CompactionConfig::default();
    let result = reconstruct(&column.bottom, &column.layers, &cfg).unwrap();
    assert_eq!(result.masses.get(1), Some(0.0));
    for stage in 1..column.len() {
        let thickness = result.history.thickness(1, stage).unwrap();
        assert!(thickness.abs() < 1e-9, "stage {stage}: {thickness}");
    }
}

#[test]
fn deepest_layer_is_thickest_alone() {
    // Layer 0 is least compacted at stage 0, when nothing lies on it.
    let column = fixtures::mixed_lithology();
    let cfg = CompactionConfig::default();
    let history = reconstruct(&column.bottom, &column.layers, &cfg)
        .unwrap()
        .history;
    let first = history.thickness(0, 0).unwrap();
    let last = history.thickness(0, column.len() - 1).unwrap();
    assert!(first > last, "{first} <= {last}");
}

#[test]
fn exponential_critical_porosities_reach_the_layer_below() {
    let bottom = [1500.0, 1000.0];
    let cfg = CompactionConfig::default();
    let chalk = LayerLithology::exponential(LithologyModel::Chalk);
    let preset = [fixtures::revil_mix(), chalk];
    let hard = [
        fixtures::revil_mix(),
        chalk.with_critical_porosities(0.0, 0.0),
    ];

    let preset = forward_pass(&bottom, &preset, &cfg).unwrap();
    let hard = forward_pass(&bottom, &hard, &cfg).unwrap();

    // The chalk curve depends on depth alone.
    assert_eq!(preset.get(1), hard.get(1));
    // Its critical porosities set the end-member state the Revil layer
    // starts from.
    let (a, b) = (preset.get(0).unwrap(), hard.get(0).unwrap());
    assert!(a < b, "{a} >= {b}");
}

#[test]
fn invalid_lithology_rejected_unless_unchecked() {
    let mut column = fixtures::two_layer_revil();
    column.layers[1] = LayerLithology::revil(0.45, 0.45, 1.5);

    let strict = CompactionConfig::default();
    assert!(matches!(
        forward_pass(&column.bottom, &column.layers, &strict),
        Err(CompactionError::Model(_))
    ));

    let unchecked = CompactionConfig {
        porosity_check: PorosityCheck::Off,
        ..CompactionConfig::default()
    };
    assert!(forward_pass(&column.bottom, &column.layers, &unchecked).is_ok());
}

#[test]
fn override_truncates_every_stage() {
    let column = fixtures::mixed_lithology();
    let cfg = CompactionConfig {
        forward_layer_override: Some(3),
        ..CompactionConfig::default()
    };
    let result = reconstruct(&column.bottom, &column.layers, &cfg).unwrap();
    assert_eq!(result.masses.len(), 3);
    assert_eq!(result.history.present_day().len(), 3);
    assert_close(result.history.present_day(), &column.bottom[..3], 1e-6);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_columns_round_trip(seed in any::<u64>(), layers in 1usize..6) {
        let column = ColumnGenerator::new(seed).fine_column(layers);
        let cfg = CompactionConfig::default();
        let result = reconstruct(&column.bottom, &column.layers, &cfg).unwrap();
        for (got, want) in result.history.present_day().iter().zip(&column.bottom) {
            prop_assert!((got - want).abs() < 1e-6, "{} vs {}", got, want);
        }
    }

    #[test]
    fn burial_deepens_through_time(seed in any::<u64>(), layers in 2usize..6) {
        let column = ColumnGenerator::new(seed).fine_column(layers);
        let cfg = CompactionConfig::default();
        let history = reconstruct(&column.bottom, &column.layers, &cfg).unwrap().history;
        for layer in 0..layers {
            let path = history.layer_path(layer);
            for w in path.windows(2) {
                prop_assert!(w[1] >= w[0] - 1e-9, "layer {}: {:?}", layer, path);
            }
        }
    }

    #[test]
    fn solid_mass_never_exceeds_thickness(seed in any::<u64>(), layers in 1usize..6) {
        let column = ColumnGenerator::new(seed).fine_column(layers);
        let masses = forward_pass(&column.bottom, &column.layers, &CompactionConfig::default()).unwrap();
        for l in 0..layers {
            let top = column.bottom.get(l + 1).copied().unwrap_or(0.0);
            let m = masses.get(l).unwrap();
            prop_assert!(m >= 0.0 && m <= column.bottom[l] - top + 1e-9);
        }
    }
}
