//! Bidirectional associative memory (BAM).
//!
//! Stores pairs of bipolar vectors in one Hebbian correlation matrix and
//! recalls either member of a pair from the other by ping-pong iteration to a
//! fixed point.
//!
//! ```text
//! pattern pairs -> build_weights -> W -> run_recall / correct / crosstalk
//!                                      -> correctness -> reporting
//! ```
//!
//! All engine functions are pure over their inputs; [`BamExecutor`] is the
//! only owner of mutable state.

pub mod config;
pub mod correction;
pub mod crosstalk;
pub mod error;
pub mod evaluation;
pub mod executor;
pub mod fixtures;
pub mod pattern;
pub mod recall;
pub mod vector;
pub mod weights;

#[cfg(test)]
mod tests_config;
#[cfg(test)]
mod tests_proptest;

// Configuration
pub use config::{BamConfig, ConfigError, NoiseTrialConfig, RecallConfig, ReportConfig};

// Errors
pub use error::{BamError, BamResult};

// Data model
pub use pattern::{PatternPair, PatternSet};
pub use vector::{activate, BipolarVector};
pub use weights::{build_weights, WeightMatrix};

// Recall
pub use recall::{
    run_recall, run_step, run_step_from_inputs, run_step_from_outputs, settle, Direction,
    RecallIterator, RecallPhase, RecallState, Trajectory,
};

// Analysis
pub use correction::{
    correct, correct_detailed, corrupt, run_noise_trials, CorrectionOutcome, NoiseReport,
    NoiseStats,
};
pub use crosstalk::{crosstalk, CrosstalkEntry, CrosstalkReport};
pub use evaluation::{
    correctness, percentage, verify_recall, CorrectnessReport, RecallCheck, RecallFailure,
};

// Session
pub use executor::BamExecutor;
