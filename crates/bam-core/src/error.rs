use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BamError {
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Component {index} is {value}, expected -1 or +1")]
    NotBipolar { index: usize, value: f32 },

    #[error("Bipolar vectors must have at least one component")]
    EmptyVector,

    #[error("Recall did not converge after {iterations} iterations ({unstable} patterns still changing)")]
    DidNotConverge { iterations: usize, unstable: usize },

    #[error("Pattern count mismatch: expected {expected}, got {actual}")]
    PatternCountMismatch { expected: usize, actual: usize },

    #[error("No recall has been executed yet")]
    NoTrajectory,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type BamResult<T> = Result<T, BamError>;

impl BamError {
    pub(crate) fn dimension(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            actual,
        }
    }

    /// Fails with `DimensionMismatch` unless `actual == expected`.
    pub(crate) fn check_dimension(
        context: &'static str,
        expected: usize,
        actual: usize,
    ) -> BamResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::dimension(context, expected, actual))
        }
    }
}

impl From<ConfigError> for BamError {
    fn from(e: ConfigError) -> Self {
        BamError::Config(e.to_string())
    }
}
