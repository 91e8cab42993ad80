//! Demonstration datasets.
//!
//! Every function builds a fresh [`PatternSet`] by value; nothing here is
//! shared or mutable.

use crate::error::BamResult;
use crate::pattern::PatternSet;
use crate::vector::BipolarVector;

/// Input patterns used by the Part A / B / C demonstrations (dimension 5).
pub const DEMO_INPUTS: [[f32; 5]; 4] = [
    [-1.0, 1.0, 1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0, 1.0],
];

/// Output patterns paired with [`DEMO_INPUTS`] (dimension 4).
pub const DEMO_OUTPUTS: [[f32; 4]; 4] = [
    [1.0, 1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0, -1.0],
];

/// Three pairs whose inputs are pairwise at Hamming distance >= 3.
/// Every stored pair is a fixed point in both directions.
pub const SEPARATED_INPUTS: [[f32; 5]; 3] = [
    [-1.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0, 1.0, 1.0],
];

pub const SEPARATED_OUTPUTS: [[f32; 4]; 3] = [
    [1.0, -1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0, -1.0],
];

fn build<const M: usize, const K: usize>(
    inputs: &[[f32; M]],
    outputs: &[[f32; K]],
) -> BamResult<PatternSet> {
    let mut set = PatternSet::new(M, K);
    for (input, output) in inputs.iter().zip(outputs) {
        set.push(
            BipolarVector::from_slice(input)?,
            BipolarVector::from_slice(output)?,
        )?;
    }
    Ok(set)
}

/// First three demonstration pairs.
pub fn part_a() -> BamResult<PatternSet> {
    build(&DEMO_INPUTS[..3], &DEMO_OUTPUTS[..3])
}

/// All four demonstration pairs (Part A plus the fourth association).
pub fn part_c() -> BamResult<PatternSet> {
    build(&DEMO_INPUTS, &DEMO_OUTPUTS)
}

/// The fourth demonstration pair on its own.
pub fn part_c_addition() -> BamResult<(BipolarVector, BipolarVector)> {
    Ok((
        BipolarVector::from_slice(&DEMO_INPUTS[3])?,
        BipolarVector::from_slice(&DEMO_OUTPUTS[3])?,
    ))
}

/// Well-separated set used for convergence and noise experiments.
pub fn separated_triplet() -> BamResult<PatternSet> {
    build(&SEPARATED_INPUTS, &SEPARATED_OUTPUTS)
}
