//! Noise correction: recalling a stored input from a corrupted copy.
//!
//! A corrupted input is pushed through repeated input-side passes until it
//! stops changing. Recovery is measured with the Hamming distance to the
//! stored pattern before and after.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::NoiseTrialConfig;
use crate::error::{BamError, BamResult};
use crate::evaluation::percentage;
use crate::pattern::PatternSet;
use crate::recall::{settle, Direction, RecallState};
use crate::vector::{activate, BipolarVector};
use crate::weights::WeightMatrix;

/// Correct `corrupted` against an already-trained matrix.
///
/// Recall starts from `(corrupted, sgn(corrupted · W))` and applies
/// input-side passes until two consecutive states match.
pub fn correct(
    weights: &WeightMatrix,
    corrupted: &BipolarVector,
    max_iterations: usize,
) -> BamResult<BipolarVector> {
    let (state, _) = correct_state(weights, corrupted, max_iterations)?;
    Ok(state.input)
}

fn correct_state(
    weights: &WeightMatrix,
    corrupted: &BipolarVector,
    max_iterations: usize,
) -> BamResult<(RecallState, usize)> {
    let placeholder = activate(&weights.forward(corrupted.as_dvector())?);
    settle(
        weights,
        RecallState::new(corrupted.clone(), placeholder),
        Direction::FromInputs,
        max_iterations,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionOutcome {
    pub corrected: BipolarVector,
    pub distance_before: usize,
    pub distance_after: usize,
    pub iterations: usize,
}

impl CorrectionOutcome {
    pub fn recovered(&self) -> bool {
        self.distance_after == 0
    }
}

/// [`correct`] plus Hamming distances to `original`.
pub fn correct_detailed(
    weights: &WeightMatrix,
    original: &BipolarVector,
    corrupted: &BipolarVector,
    max_iterations: usize,
) -> BamResult<CorrectionOutcome> {
    let distance_before = original.hamming_distance(corrupted)?;
    let (state, iterations) = correct_state(weights, corrupted, max_iterations)?;
    let distance_after = original.hamming_distance(&state.input)?;
    Ok(CorrectionOutcome {
        corrected: state.input,
        distance_before,
        distance_after,
        iterations,
    })
}

/// Copy of `vector` with `flips` distinct components negated at random.
pub fn corrupt<R: Rng + ?Sized>(
    vector: &BipolarVector,
    flips: usize,
    rng: &mut R,
) -> BamResult<BipolarVector> {
    if flips > vector.len() {
        return Err(BamError::dimension("corruption flips", vector.len(), flips));
    }
    let indices = rand::seq::index::sample(rng, vector.len(), flips).into_vec();
    vector.flipped(&indices)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseStats {
    pub index: usize,
    pub trials: usize,
    pub recovered: usize,
    pub not_recovered: usize,
    pub did_not_converge: usize,
    pub mean_distance_before: f64,
    /// Averaged over trials that converged; `None` when none did
    pub mean_distance_after: Option<f64>,
}

impl NoiseStats {
    pub fn recovery_rate(&self) -> Option<f64> {
        percentage(self.recovered, self.not_recovered + self.did_not_converge)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseReport {
    pub flips: usize,
    pub seed: u64,
    pub patterns: Vec<NoiseStats>,
}

impl NoiseReport {
    pub fn total_trials(&self) -> usize {
        self.patterns.iter().map(|p| p.trials).sum()
    }

    pub fn total_recovered(&self) -> usize {
        self.patterns.iter().map(|p| p.recovered).sum()
    }

    /// Overall recovery percentage, `None` when no trials ran.
    pub fn recovery_rate(&self) -> Option<f64> {
        let total = self.total_trials();
        let recovered = self.total_recovered();
        percentage(recovered, total - recovered)
    }
}

/// Corrupt every stored input `config.trials` times and try to correct it.
///
/// Non-convergent trials are counted, not propagated; dimension errors are.
pub fn run_noise_trials(
    weights: &WeightMatrix,
    patterns: &PatternSet,
    config: &NoiseTrialConfig,
    max_iterations: usize,
) -> BamResult<NoiseReport> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut stats = Vec::with_capacity(patterns.len());

    for (index, pair) in patterns.pairs().iter().enumerate() {
        let mut s = NoiseStats {
            index,
            ..Default::default()
        };
        let mut before_sum = 0usize;
        let mut after_sum = 0usize;
        let mut converged = 0usize;

        for _ in 0..config.trials {
            let corrupted = corrupt(&pair.input, config.flips, &mut rng)?;
            s.trials += 1;
            before_sum += pair.input.hamming_distance(&corrupted)?;

            match correct_detailed(weights, &pair.input, &corrupted, max_iterations) {
                Ok(outcome) => {
                    converged += 1;
                    after_sum += outcome.distance_after;
                    if outcome.recovered() {
                        s.recovered += 1;
                    } else {
                        s.not_recovered += 1;
                    }
                }
                Err(BamError::DidNotConverge { .. }) => s.did_not_converge += 1,
                Err(e) => return Err(e),
            }
        }

        s.mean_distance_before = before_sum as f64 / s.trials.max(1) as f64;
        s.mean_distance_after = (converged > 0).then(|| after_sum as f64 / converged as f64);
        debug!(
            pattern = index,
            recovered = s.recovered,
            trials = s.trials,
            "noise trials finished"
        );
        stats.push(s);
    }

    let report = NoiseReport {
        flips: config.flips,
        seed: config.seed,
        patterns: stats,
    };
    info!(
        flips = report.flips,
        trials = report.total_trials(),
        recovered = report.total_recovered(),
        "noise correction experiment complete"
    );
    Ok(report)
}
