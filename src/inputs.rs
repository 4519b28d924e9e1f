//! Sparse input representation for categorical (one-hot) columns.

use serde::{Deserialize, Serialize};

/// Sparse vector for one categorical column, stored as parallel
/// index/value pairs.
///
/// A one-hot encoded column has a single active index with value 1.0, but
/// multi-hot inputs (several active categories) are supported as well. The
/// wide field layers consume this representation directly so the full
/// one-hot expansion is never materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseInput {
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl SparseInput {
    /// Create a sparse input from parallel index and value vectors.
    pub fn new(indices: Vec<usize>, values: Vec<f32>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "Sparse indices and values must have equal length"
        );
        SparseInput { indices, values }
    }

    /// Create a one-hot input: a single active index with value 1.0.
    pub fn one_hot(index: usize) -> Self {
        SparseInput {
            indices: vec![index],
            values: vec![1.0],
        }
    }

    /// An input with no active indices. Contributes zero in forward passes.
    pub fn empty() -> Self {
        SparseInput {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of active (index, value) pairs.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Largest active index, or `None` for an empty input.
    pub fn max_index(&self) -> Option<usize> {
        self.indices.iter().copied().max()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Iterate over the active (index, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}
