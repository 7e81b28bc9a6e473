//! Error types for the porosity-stress model.
//!
//! The compaction law itself never validates its inputs; these variants
//! name the points where a malformed input would otherwise turn into a
//! silent zero or NaN further down the column.

use std::error::Error;
use std::fmt;

/// Errors raised while evaluating the porosity-stress model.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// A lithology model code outside `0..=4`.
    UnsupportedModelType {
        /// The rejected code.
        code: u8,
    },
    /// A porosity left the physically valid range `[0, 1]` (NaN included).
    PorosityOutOfRange {
        /// Which porosity was out of range (`"bulk"`, `"sand"`, `"shale"`).
        which: &'static str,
        /// The offending value.
        phi: f64,
        /// Marching depth at which it was observed, in metres.
        depth: f64,
    },
    /// Lithology parameters outside their physical range.
    InvalidLithology {
        /// Description of the violated constraint.
        reason: String,
    },
    /// A model input was NaN or infinite.
    NonFinite {
        /// Name of the input.
        what: &'static str,
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedModelType { code } => {
                write!(f, "unsupported lithology model type {code} (expected 0..=4)")
            }
            Self::PorosityOutOfRange { which, phi, depth } => {
                write!(f, "{which} porosity {phi} outside [0, 1] at depth {depth} m")
            }
            Self::InvalidLithology { reason } => write!(f, "invalid lithology: {reason}"),
            Self::NonFinite { what, value } => write!(f, "{what} must be finite, got {value}"),
        }
    }
}

impl Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_code() {
        let e = ModelError::UnsupportedModelType { code: 7 };
        assert!(e.to_string().contains('7'));
    }

    #[test]
    fn display_porosity_range() {
        let e = ModelError::PorosityOutOfRange {
            which: "bulk",
            phi: 1.25,
            depth: 300.0,
        };
        let s = e.to_string();
        assert!(s.contains("bulk"));
        assert!(s.contains("1.25"));
        assert!(s.contains("300"));
    }
}
