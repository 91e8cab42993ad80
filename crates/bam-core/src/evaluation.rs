//! Comparing recall results with the stored ground truth.

use serde::{Deserialize, Serialize};

use crate::error::{BamError, BamResult};
use crate::pattern::PatternSet;
use crate::recall::{run_step_from_inputs, RecallState, Trajectory};
use crate::weights::WeightMatrix;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectnessReport {
    pub correct_input: usize,
    pub incorrect_input: usize,
    pub correct_output: usize,
    pub incorrect_output: usize,
}

impl CorrectnessReport {
    /// Percentage of inputs recalled exactly; `None` when nothing was compared.
    pub fn input_accuracy(&self) -> Option<f64> {
        percentage(self.correct_input, self.incorrect_input)
    }

    /// Percentage of outputs recalled exactly; `None` when nothing was compared.
    pub fn output_accuracy(&self) -> Option<f64> {
        percentage(self.correct_output, self.incorrect_output)
    }

    pub fn is_perfect(&self) -> bool {
        self.incorrect_input == 0 && self.incorrect_output == 0
    }
}

/// `part / (part + rest)` as a percentage, `None` for an empty category.
pub fn percentage(part: usize, rest: usize) -> Option<f64> {
    let total = part + rest;
    if total == 0 {
        None
    } else {
        Some(part as f64 * 100.0 / total as f64)
    }
}

/// Tally the final state of `trajectory` against the stored pairs.
pub fn correctness(trajectory: &Trajectory, patterns: &PatternSet) -> BamResult<CorrectnessReport> {
    let finals = trajectory.final_states();
    if finals.len() != patterns.len() {
        return Err(BamError::PatternCountMismatch {
            expected: patterns.len(),
            actual: finals.len(),
        });
    }

    let mut report = CorrectnessReport::default();
    for (state, pair) in finals.iter().zip(patterns.pairs()) {
        if state.input == pair.input {
            report.correct_input += 1;
        } else {
            report.incorrect_input += 1;
        }
        if state.output == pair.output {
            report.correct_output += 1;
        } else {
            report.incorrect_output += 1;
        }
    }
    Ok(report)
}

/// Side of a pair that a single pass failed to reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecallFailure {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecallCheck {
    pub index: usize,
    pub recalled: RecallState,
    pub failures: Vec<RecallFailure>,
}

impl RecallCheck {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One pass from every stored pair through `weights`, reporting which
/// sides were not reproduced.
pub fn verify_recall(weights: &WeightMatrix, patterns: &PatternSet) -> BamResult<Vec<RecallCheck>> {
    patterns
        .pairs()
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            let start = RecallState::new(pair.input.clone(), pair.output.clone());
            let recalled = run_step_from_inputs(weights, &start)?;
            let mut failures = Vec::new();
            if recalled.input != pair.input {
                failures.push(RecallFailure::Input);
            }
            if recalled.output != pair.output {
                failures.push(RecallFailure::Output);
            }
            Ok(RecallCheck {
                index,
                recalled,
                failures,
            })
        })
        .collect()
}
