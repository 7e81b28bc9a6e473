//! Errors from the forward and backward passes.

use std::error::Error;
use std::fmt;

use backstrip_core::{ConfigError, ModelError};

/// Errors raised while integrating a column.
#[derive(Clone, Debug, PartialEq)]
pub enum CompactionError {
    /// The porosity model rejected a state.
    Model(ModelError),
    /// The compaction constants are invalid.
    Config(ConfigError),
    /// The column geometry or layer table is malformed.
    InvalidColumn {
        /// Description of the problem.
        reason: String,
    },
    /// The mass-bounded step could not be solved because a nominal step
    /// adds no solid mass.
    DegenerateMassStep {
        /// Layer being reconstructed.
        layer: usize,
        /// Burial stage being reconstructed.
        stage: usize,
        /// The non-positive mass increment of a nominal step.
        increment: f64,
    },
    /// `forward_layer_override` asks for more layers than the column has.
    LayerOverride {
        /// Requested layer count.
        requested: usize,
        /// Layers available in the column.
        available: usize,
    },
}

impl fmt::Display for CompactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(e) => write!(f, "model: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::InvalidColumn { reason } => write!(f, "invalid column: {reason}"),
            Self::DegenerateMassStep {
                layer,
                stage,
                increment,
            } => write!(
                f,
                "degenerate mass step for layer {layer} at stage {stage}: increment {increment}"
            ),
            Self::LayerOverride {
                requested,
                available,
            } => write!(
                f,
                "forward layer override {requested} exceeds the {available} layers in the column"
            ),
        }
    }
}

impl Error for CompactionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModelError> for CompactionError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<ConfigError> for CompactionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
