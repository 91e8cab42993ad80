//! Bipolar vectors and the threshold activation.
//!
//! Every vector that takes part in storage or recall lives in {-1, +1}^N.
//! Raw propagation results are plain `DVector<f32>` values and only become
//! bipolar through [`activate`].

use std::fmt;

use nalgebra::DVector;

use crate::error::{BamError, BamResult};

/// A fixed-length vector whose components are all -1.0 or +1.0.
///
/// # Invariants
/// - `len() >= 1`
/// - every component is exactly -1.0 or +1.0
///
/// Operations never mutate a vector in place; they return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct BipolarVector {
    data: DVector<f32>,
}

impl BipolarVector {
    /// Build from literal components, rejecting anything outside {-1, +1}.
    pub fn new(components: Vec<f32>) -> BamResult<Self> {
        if components.is_empty() {
            return Err(BamError::EmptyVector);
        }
        if let Some((index, &value)) = components
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != 1.0 && v != -1.0)
        {
            return Err(BamError::NotBipolar { index, value });
        }
        Ok(Self {
            data: DVector::from_vec(components),
        })
    }

    /// Convenience wrapper over [`BipolarVector::new`] for fixtures.
    pub fn from_slice(components: &[f32]) -> BamResult<Self> {
        Self::new(components.to_vec())
    }

    /// Vector of `len` components all set to +1.
    pub fn ones(len: usize) -> BamResult<Self> {
        if len == 0 {
            return Err(BamError::EmptyVector);
        }
        Ok(Self {
            data: DVector::from_element(len, 1.0),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: empty vectors cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_dvector(&self) -> &DVector<f32> {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    /// Number of components that differ between `self` and `other`.
    pub fn hamming_distance(&self, other: &Self) -> BamResult<usize> {
        BamError::check_dimension("hamming distance", self.len(), other.len())?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .filter(|(a, b)| a != b)
            .count())
    }

    /// Copy of `self` with the components at `indices` negated.
    ///
    /// Repeated indices flip the same component repeatedly.
    pub fn flipped(&self, indices: &[usize]) -> BamResult<Self> {
        let mut data = self.data.clone();
        for &i in indices {
            if i >= data.len() {
                return Err(BamError::dimension("flip index", data.len(), i));
            }
            data[i] = -data[i];
        }
        Ok(Self { data })
    }

    /// Unit-length copy as a real vector. Never divides by zero since a
    /// bipolar vector has norm sqrt(len) >= 1.
    pub fn normalized(&self) -> DVector<f32> {
        self.data.normalize()
    }
}

impl fmt::Display for BipolarVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", *v as i32)?;
        }
        write!(f, "]")
    }
}

/// Bipolar threshold: `v[i] >= 0` maps to +1, everything else to -1.
///
/// NaN compares false against zero and therefore maps to -1.
pub fn activate(raw: &DVector<f32>) -> BipolarVector {
    BipolarVector {
        data: raw.map(|x| if x >= 0.0 { 1.0 } else { -1.0 }),
    }
}
