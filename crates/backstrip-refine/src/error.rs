//! Refinement errors.

use std::error::Error;
use std::fmt;

/// Errors from sublayer planning and refinement.
#[derive(Clone, Debug, PartialEq)]
pub enum RefineError {
    /// No raw layers.
    EmptyColumn,
    /// A raw layer was assigned zero sublayers.
    ZeroSublayers {
        /// Raw layer index.
        layer: usize,
    },
    /// An input array has the wrong length.
    LengthMismatch {
        /// Name of the array.
        what: &'static str,
        /// Expected length (raw layer count).
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// A value is NaN or infinite.
    NonFinite {
        /// Name of the array.
        what: &'static str,
        /// Index of the value.
        index: usize,
    },
    /// Depths must not decrease downward and ages must not increase upward.
    NotMonotonic {
        /// Name of the array.
        what: &'static str,
        /// Index of the first offending value.
        index: usize,
    },
    /// A raw layer asks for more sublayers than [`MAX_SUBLAYERS`], or the
    /// running total no longer fits in `usize`.
    ///
    /// [`MAX_SUBLAYERS`]: crate::plan::MAX_SUBLAYERS
    TooManySublayers {
        /// Raw layer index.
        layer: usize,
    },
    /// `max_thickness` for thickness-driven planning is not positive.
    InvalidThickness {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for RefineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyColumn => write!(f, "column has no raw layers"),
            Self::ZeroSublayers { layer } => write!(f, "raw layer {layer} has zero sublayers"),
            Self::LengthMismatch {
                what,
                expected,
                got,
            } => write!(f, "{what}: expected {expected} entries, got {got}"),
            Self::NonFinite { what, index } => write!(f, "{what}[{index}] is not finite"),
            Self::NotMonotonic { what, index } => {
                write!(f, "{what}[{index}] breaks the stratigraphic order")
            }
            Self::TooManySublayers { layer } => write!(
                f,
                "raw layer {layer} needs more than {} sublayers",
                crate::plan::MAX_SUBLAYERS
            ),
            Self::InvalidThickness { value } => {
                write!(f, "max sublayer thickness must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for RefineError {}
