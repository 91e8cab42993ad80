//! Crosstalk between stored associations.
//!
//! ```text
//! crosstalk_i = Σ_{k≠i} y_k · cos(x_k, x_i)
//! ```
//! The cosine term is the dot product of the normalized inputs, so the
//! result depends only on the geometry of the stored set.

use nalgebra::DVector;

use crate::pattern::PatternSet;

#[derive(Debug, Clone, PartialEq)]
pub struct CrosstalkEntry {
    pub index: usize,
    /// Output-shaped interference vector
    pub vector: DVector<f32>,
    /// Euclidean norm of `vector`
    pub magnitude: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrosstalkReport {
    pub entries: Vec<CrosstalkEntry>,
    /// Sum of all magnitudes
    pub total: f32,
}

impl CrosstalkReport {
    pub fn magnitudes(&self) -> Vec<f32> {
        self.entries.iter().map(|e| e.magnitude).collect()
    }
}

/// Interference on every stored pattern from the other N-1 pairs. O(N²).
pub fn crosstalk(patterns: &PatternSet) -> CrosstalkReport {
    let normalized: Vec<DVector<f32>> = patterns.inputs().map(|x| x.normalized()).collect();

    let entries: Vec<CrosstalkEntry> = (0..patterns.len())
        .map(|i| {
            let mut accum: DVector<f32> = DVector::zeros(patterns.output_dim());
            for (k, pair) in patterns.pairs().iter().enumerate() {
                if k == i {
                    continue;
                }
                let cosine = normalized[k].dot(&normalized[i]);
                accum += pair.output.as_dvector() * cosine;
            }
            let magnitude = accum.norm();
            CrosstalkEntry {
                index: i,
                vector: accum,
                magnitude,
            }
        })
        .collect();

    let total = entries.iter().map(|e| e.magnitude).sum();
    CrosstalkReport { entries, total }
}
