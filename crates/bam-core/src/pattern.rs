//! Ordered store of (input, output) associations.

use crate::error::{BamError, BamResult};
use crate::vector::BipolarVector;

/// One stored association.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternPair {
    pub input: BipolarVector,
    pub output: BipolarVector,
}

/// Append-only collection of pattern pairs with fixed dimensions.
///
/// # Invariants
/// - every input has length `input_dim`
/// - every output has length `output_dim`
/// - pairs are never removed or reordered
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSet {
    input_dim: usize,
    output_dim: usize,
    pairs: Vec<PatternPair>,
}

impl PatternSet {
    pub fn new(input_dim: usize, output_dim: usize) -> Self {
        Self {
            input_dim,
            output_dim,
            pairs: Vec::new(),
        }
    }

    /// Build a set from literal pairs; dimensions come from the first pair.
    pub fn from_pairs<I>(pairs: I) -> BamResult<Self>
    where
        I: IntoIterator<Item = (BipolarVector, BipolarVector)>,
    {
        let mut iter = pairs.into_iter().peekable();
        let (input_dim, output_dim) = match iter.peek() {
            Some((i, o)) => (i.len(), o.len()),
            None => {
                return Err(BamError::PatternCountMismatch {
                    expected: 1,
                    actual: 0,
                })
            }
        };
        let mut set = Self::new(input_dim, output_dim);
        for (input, output) in iter {
            set.push(input, output)?;
        }
        Ok(set)
    }

    /// Append a pair. The set is left untouched when either side has the
    /// wrong length.
    pub fn push(&mut self, input: BipolarVector, output: BipolarVector) -> BamResult<()> {
        BamError::check_dimension("pattern input", self.input_dim, input.len())?;
        BamError::check_dimension("pattern output", self.output_dim, output.len())?;
        self.pairs.push(PatternPair { input, output });
        Ok(())
    }

    /// Append every pair of `other`, which must share this set's dimensions.
    pub fn extend_from(&mut self, other: &PatternSet) -> BamResult<()> {
        BamError::check_dimension("pattern set input", self.input_dim, other.input_dim)?;
        BamError::check_dimension("pattern set output", self.output_dim, other.output_dim)?;
        self.pairs.extend(other.pairs.iter().cloned());
        Ok(())
    }

    /// Set holding only the first `count` pairs.
    pub fn prefix(&self, count: usize) -> Self {
        Self {
            input_dim: self.input_dim,
            output_dim: self.output_dim,
            pairs: self.pairs.iter().take(count).cloned().collect(),
        }
    }

    /// Set holding only the pair at `index`, if present.
    pub fn single(&self, index: usize) -> Option<Self> {
        self.pairs.get(index).map(|pair| Self {
            input_dim: self.input_dim,
            output_dim: self.output_dim,
            pairs: vec![pair.clone()],
        })
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    #[inline]
    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[PatternPair] {
        &self.pairs
    }

    pub fn get(&self, index: usize) -> Option<&PatternPair> {
        self.pairs.get(index)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &BipolarVector> {
        self.pairs.iter().map(|p| &p.input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &BipolarVector> {
        self.pairs.iter().map(|p| &p.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(c: &[f32]) -> BipolarVector {
        BipolarVector::from_slice(c).unwrap()
    }

    #[test]
    fn test_push_rejects_wrong_dimensions_without_mutation() {
        let mut set = PatternSet::new(3, 2);
        set.push(v(&[1.0, -1.0, 1.0]), v(&[1.0, 1.0])).unwrap();

        let err = set.push(v(&[1.0, 1.0]), v(&[1.0, 1.0])).unwrap_err();
        assert_eq!(
            err,
            BamError::DimensionMismatch {
                context: "pattern input",
                expected: 3,
                actual: 2
            }
        );
        assert!(set.push(v(&[1.0, 1.0, 1.0]), v(&[1.0])).is_err());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_pairs_takes_dimensions_from_first_pair() {
        let set = PatternSet::from_pairs(vec![
            (v(&[1.0, -1.0, 1.0, 1.0]), v(&[-1.0, 1.0])),
            (v(&[-1.0, -1.0, 1.0, 1.0]), v(&[1.0, 1.0])),
        ])
        .unwrap();
        assert_eq!(set.input_dim(), 4);
        assert_eq!(set.output_dim(), 2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_pairs_empty_is_rejected() {
        assert!(PatternSet::from_pairs(Vec::new()).is_err());
    }

    #[test]
    fn test_extend_and_prefix() {
        let mut a = PatternSet::new(2, 1);
        a.push(v(&[1.0, 1.0]), v(&[1.0])).unwrap();
        let mut b = PatternSet::new(2, 1);
        b.push(v(&[-1.0, 1.0]), v(&[-1.0])).unwrap();

        a.extend_from(&b).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.prefix(1).len(), 1);
        assert_eq!(a.single(1).unwrap().pairs()[0].output, v(&[-1.0]));
        assert!(a.single(2).is_none());

        let c = PatternSet::new(3, 1);
        assert!(a.extend_from(&c).is_err());
        assert_eq!(a.len(), 2);
    }
}
