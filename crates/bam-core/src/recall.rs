//! Ping-pong recall and the fixed-point iterator.
//!
//! # Mathematical Formulation
//! ```text
//! from inputs:  y' = x · W         x' = y' · Wᵀ     -> (sgn x', sgn y')
//! from outputs: x' = y · Wᵀ        y' = x' · W      -> (sgn x', sgn y')
//! ```
//! The second half of each pass uses the raw (unthresholded) signal of the
//! first half; only the returned pair is thresholded.
//!
//! # State Machine
//! ```text
//! Initialized --step--> Iterating --(all unchanged)--> Converged
//!                          ^   |
//!                          +---+ (any pattern changed)
//! ```
//! Convergence is global: the iterator stops only when every pattern's newest
//! state equals its previous one in the same step.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::RecallConfig;
use crate::error::{BamError, BamResult};
use crate::pattern::PatternSet;
use crate::vector::{activate, BipolarVector};
use crate::weights::WeightMatrix;

/// Which side of the memory a recall pass starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    FromInputs,
    FromOutputs,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::FromInputs => "from inputs",
            Direction::FromOutputs => "from outputs",
        }
    }
}

/// Snapshot of one pattern during recall. Equality is structural.
#[derive(Debug, Clone, PartialEq)]
pub struct RecallState {
    pub input: BipolarVector,
    pub output: BipolarVector,
}

impl RecallState {
    pub fn new(input: BipolarVector, output: BipolarVector) -> Self {
        Self { input, output }
    }
}

/// One pass starting on the input side.
pub fn run_step_from_inputs(weights: &WeightMatrix, state: &RecallState) -> BamResult<RecallState> {
    let raw_output = weights.forward(state.input.as_dvector())?;
    let raw_input = weights.backward(&raw_output)?;
    Ok(RecallState {
        input: activate(&raw_input),
        output: activate(&raw_output),
    })
}

/// One pass starting on the output side.
pub fn run_step_from_outputs(
    weights: &WeightMatrix,
    state: &RecallState,
) -> BamResult<RecallState> {
    let raw_input = weights.backward(state.output.as_dvector())?;
    let raw_output = weights.forward(&raw_input)?;
    Ok(RecallState {
        input: activate(&raw_input),
        output: activate(&raw_output),
    })
}

pub fn run_step(
    weights: &WeightMatrix,
    state: &RecallState,
    direction: Direction,
) -> BamResult<RecallState> {
    match direction {
        Direction::FromInputs => run_step_from_inputs(weights, state),
        Direction::FromOutputs => run_step_from_outputs(weights, state),
    }
}

/// Drive a single state to a fixed point.
///
/// Returns the fixed point and the number of passes applied, including the
/// final pass that confirmed it.
pub fn settle(
    weights: &WeightMatrix,
    start: RecallState,
    direction: Direction,
    max_iterations: usize,
) -> BamResult<(RecallState, usize)> {
    let mut current = start;
    for iteration in 1..=max_iterations {
        let next = run_step(weights, &current, direction)?;
        if next == current {
            return Ok((next, iteration));
        }
        current = next;
    }
    Err(BamError::DidNotConverge {
        iterations: max_iterations,
        unstable: 1,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecallPhase {
    Initialized,
    Iterating,
    Converged,
}

/// Per-step recall history.
///
/// `steps()[0]` holds the stored pairs; `steps()[t][p]` is pattern `p`
/// after `t` passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    direction: Direction,
    steps: Vec<Vec<RecallState>>,
}

impl Trajectory {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            steps: Vec::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steps(&self) -> &[Vec<RecallState>] {
        &self.steps
    }

    /// Number of passes applied (the initial entry is not a pass).
    pub fn iterations(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Number of patterns tracked.
    pub fn pattern_count(&self) -> usize {
        self.steps.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Newest state of every pattern; empty for an empty pattern set.
    pub fn final_states(&self) -> &[RecallState] {
        self.steps.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every recorded state of one pattern, oldest first.
    pub fn pattern_history(&self, index: usize) -> Vec<&RecallState> {
        self.steps.iter().filter_map(|step| step.get(index)).collect()
    }

    /// Patterns whose newest state differs from the previous one.
    ///
    /// Before the first pass every pattern counts as unstable.
    pub fn unstable_count(&self) -> usize {
        match self.steps.as_slice() {
            [.., prev, last] => prev.iter().zip(last).filter(|(a, b)| a != b).count(),
            [only] => only.len(),
            [] => 0,
        }
    }
}

/// Steps every pattern of a set in lockstep until the global fixed point.
pub struct RecallIterator<'w> {
    weights: &'w WeightMatrix,
    trajectory: Trajectory,
    phase: RecallPhase,
}

impl<'w> RecallIterator<'w> {
    /// Seed step 0 with each stored pair.
    pub fn new(
        weights: &'w WeightMatrix,
        patterns: &PatternSet,
        direction: Direction,
    ) -> BamResult<Self> {
        BamError::check_dimension("recall input", weights.input_dim(), patterns.input_dim())?;
        BamError::check_dimension("recall output", weights.output_dim(), patterns.output_dim())?;

        let mut trajectory = Trajectory::new(direction);
        let phase = if patterns.is_empty() {
            RecallPhase::Converged
        } else {
            trajectory.steps.push(
                patterns
                    .pairs()
                    .iter()
                    .map(|p| RecallState::new(p.input.clone(), p.output.clone()))
                    .collect(),
            );
            RecallPhase::Initialized
        };

        Ok(Self {
            weights,
            trajectory,
            phase,
        })
    }

    pub fn phase(&self) -> RecallPhase {
        self.phase
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }

    /// Apply one pass to every pattern. A no-op once converged.
    pub fn step(&mut self) -> BamResult<RecallPhase> {
        if self.phase == RecallPhase::Converged {
            return Ok(self.phase);
        }

        let direction = self.trajectory.direction;
        let next = self
            .trajectory
            .final_states()
            .iter()
            .map(|state| run_step(self.weights, state, direction))
            .collect::<BamResult<Vec<_>>>()?;
        self.trajectory.steps.push(next);

        let unstable = self.trajectory.unstable_count();
        debug!(
            iteration = self.trajectory.iterations(),
            unstable,
            direction = direction.label(),
            "recall step"
        );

        self.phase = if unstable == 0 {
            RecallPhase::Converged
        } else {
            RecallPhase::Iterating
        };
        Ok(self.phase)
    }
}

/// Recall every pattern of `patterns` to a global fixed point.
///
/// Fails with [`BamError::DidNotConverge`] once `config.max_iterations`
/// passes have been applied without convergence.
pub fn run_recall(
    weights: &WeightMatrix,
    patterns: &PatternSet,
    direction: Direction,
    config: &RecallConfig,
) -> BamResult<Trajectory> {
    let mut iter = RecallIterator::new(weights, patterns, direction)?;

    while iter.phase() != RecallPhase::Converged {
        let iterations = iter.trajectory().iterations();
        if iterations >= config.max_iterations {
            let unstable = iter.trajectory().unstable_count();
            warn!(
                iterations,
                unstable,
                direction = direction.label(),
                "recall did not converge"
            );
            return Err(BamError::DidNotConverge {
                iterations,
                unstable,
            });
        }
        iter.step()?;
    }

    let trajectory = iter.into_trajectory();
    info!(
        patterns = trajectory.pattern_count(),
        iterations = trajectory.iterations(),
        direction = direction.label(),
        "recall converged"
    );
    Ok(trajectory)
}
