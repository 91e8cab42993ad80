//! Hebbian correlation matrix.
//!
//! # Mathematical Formulation
//! ```text
//! W = Σ_i x_i^T · y_i        (M × K)
//! forward:  x · W   = W^T x  (length K)
//! backward: y · W^T = W y    (length M)
//! ```

use std::ops::Add;

use nalgebra::{DMatrix, DVector};

use crate::error::{BamError, BamResult};
use crate::pattern::PatternSet;
use crate::vector::BipolarVector;

/// Dense `input_dim × output_dim` weight matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    matrix: DMatrix<f32>,
}

impl WeightMatrix {
    pub fn zeros(input_dim: usize, output_dim: usize) -> Self {
        Self {
            matrix: DMatrix::zeros(input_dim, output_dim),
        }
    }

    /// Wrap a raw matrix, e.g. one assembled by hand for diagnostics.
    pub fn from_matrix(matrix: DMatrix<f32>) -> Self {
        Self { matrix }
    }

    /// Add the outer product `input^T · output`.
    ///
    /// Dimensions are checked before the matrix is touched.
    pub fn accumulate(&mut self, input: &BipolarVector, output: &BipolarVector) -> BamResult<()> {
        BamError::check_dimension("weight rows", self.input_dim(), input.len())?;
        BamError::check_dimension("weight columns", self.output_dim(), output.len())?;
        // W = 1·x·yᵀ + 1·W
        self.matrix
            .ger(1.0, input.as_dvector(), output.as_dvector(), 1.0);
        Ok(())
    }

    /// Element-wise sum of two matrices of the same shape.
    pub fn try_add(&self, other: &WeightMatrix) -> BamResult<WeightMatrix> {
        BamError::check_dimension("weight rows", self.input_dim(), other.input_dim())?;
        BamError::check_dimension("weight columns", self.output_dim(), other.output_dim())?;
        Ok(Self {
            matrix: &self.matrix + &other.matrix,
        })
    }

    /// `input · W`, the raw (unthresholded) output-side signal.
    pub fn forward(&self, input: &DVector<f32>) -> BamResult<DVector<f32>> {
        BamError::check_dimension("forward propagation", self.input_dim(), input.len())?;
        Ok(self.matrix.tr_mul(input))
    }

    /// `output · W^T`, the raw (unthresholded) input-side signal.
    pub fn backward(&self, output: &DVector<f32>) -> BamResult<DVector<f32>> {
        BamError::check_dimension("backward propagation", self.output_dim(), output.len())?;
        Ok(&self.matrix * output)
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.matrix.nrows()
    }

    #[inline]
    pub fn output_dim(&self) -> usize {
        self.matrix.ncols()
    }

    /// Entry at (`row`, `col`), `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.matrix.get((row, col)).copied()
    }

    /// Rows as plain vectors, for reporting.
    pub fn rows(&self) -> Vec<Vec<f32>> {
        self.matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

impl Add for &WeightMatrix {
    type Output = WeightMatrix;

    /// # Panics
    /// Panics when the shapes differ; use [`WeightMatrix::try_add`] to get an
    /// error instead.
    fn add(self, rhs: &WeightMatrix) -> WeightMatrix {
        WeightMatrix {
            matrix: &self.matrix + &rhs.matrix,
        }
    }
}

/// Sum of outer products over every pair in `patterns`.
///
/// An empty set yields the zero matrix of the set's shape.
pub fn build_weights(patterns: &PatternSet) -> WeightMatrix {
    let mut weights = WeightMatrix::zeros(patterns.input_dim(), patterns.output_dim());
    for pair in patterns.pairs() {
        weights
            .matrix
            .ger(1.0, pair.input.as_dvector(), pair.output.as_dvector(), 1.0);
    }
    weights
}
