//! Session object owning one pattern set and its weight matrix.

use tracing::{debug, info};

use crate::config::BamConfig;
use crate::correction::{correct, run_noise_trials, NoiseReport};
use crate::crosstalk::{crosstalk, CrosstalkReport};
use crate::error::{BamError, BamResult};
use crate::evaluation::{correctness, verify_recall, CorrectnessReport, RecallCheck};
use crate::pattern::PatternSet;
use crate::recall::{run_recall, Direction, Trajectory};
use crate::vector::BipolarVector;
use crate::weights::{build_weights, WeightMatrix};

/// Owns a [`PatternSet`], the matching [`WeightMatrix`] and the most recent
/// recall trajectory.
///
/// # Invariants
/// - `weights == build_weights(&patterns)` after every public call
/// - a failed call leaves patterns and weights unchanged
///
/// # Thread Safety
/// Not synchronized; intended for a single owning thread.
#[derive(Debug, Clone)]
pub struct BamExecutor {
    config: BamConfig,
    patterns: PatternSet,
    weights: WeightMatrix,
    trajectory: Option<Trajectory>,
}

impl BamExecutor {
    pub fn new(input_dim: usize, output_dim: usize, config: BamConfig) -> Self {
        Self::with_patterns(PatternSet::new(input_dim, output_dim), config)
    }

    pub fn with_patterns(patterns: PatternSet, config: BamConfig) -> Self {
        let weights = build_weights(&patterns);
        Self {
            config,
            patterns,
            weights,
            trajectory: None,
        }
    }

    /// Store one more association and rebuild the weights from the full set.
    pub fn add_pattern(&mut self, input: BipolarVector, output: BipolarVector) -> BamResult<()> {
        self.patterns.push(input, output)?;
        self.rebuild_weights();
        Ok(())
    }

    pub fn rebuild_weights(&mut self) {
        self.weights = build_weights(&self.patterns);
        self.trajectory = None;
        debug!(
            patterns = self.patterns.len(),
            rows = self.weights.input_dim(),
            cols = self.weights.output_dim(),
            "weights rebuilt"
        );
    }

    /// Run recall over every stored pattern, replacing the previous trajectory.
    pub fn execute(&mut self, direction: Direction) -> BamResult<&Trajectory> {
        self.trajectory = None;
        let trajectory = run_recall(&self.weights, &self.patterns, direction, &self.config.recall)?;
        Ok(self.trajectory.insert(trajectory))
    }

    pub fn correct(&self, corrupted: &BipolarVector) -> BamResult<BipolarVector> {
        correct(&self.weights, corrupted, self.config.recall.max_iterations)
    }

    pub fn crosstalk(&self) -> CrosstalkReport {
        crosstalk(&self.patterns)
    }

    /// Correctness of the last [`execute`](Self::execute) call.
    pub fn correctness(&self) -> BamResult<CorrectnessReport> {
        let trajectory = self.trajectory.as_ref().ok_or(BamError::NoTrajectory)?;
        correctness(trajectory, &self.patterns)
    }

    pub fn verify_recall(&self) -> BamResult<Vec<RecallCheck>> {
        verify_recall(&self.weights, &self.patterns)
    }

    pub fn noise_trials(&self) -> BamResult<NoiseReport> {
        let report = run_noise_trials(
            &self.weights,
            &self.patterns,
            &self.config.noise,
            self.config.recall.max_iterations,
        )?;
        info!(
            recovery = ?report.recovery_rate(),
            "noise trials on executor patterns"
        );
        Ok(report)
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    pub fn config(&self) -> &BamConfig {
        &self.config
    }
}
