//! Test utilities for backstrip development.
//!
//! Hand-written reference columns live in [`fixtures`]; seeded random
//! columns for property tests and benchmarks come from
//! [`ColumnGenerator`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod synthetic;

pub use fixtures::TestColumn;
pub use synthetic::ColumnGenerator;

/// Assert two slices agree element-wise within `tol`.
#[track_caller]
pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {actual:?} vs {expected:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tol,
            "index {i}: {a} differs from {e} by more than {tol}"
        );
    }
}
