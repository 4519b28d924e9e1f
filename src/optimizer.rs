use std::collections::HashMap;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Gradient application over the three weight shapes the wide part
/// carries: a dense matrix, a sparse-touched vector, and a scalar.
///
/// The distributed master owns the heavier optimizers; this seam lets a
/// single-process training loop close the update step locally.
pub trait Optimizer {
    fn update_matrix(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32);

    /// Update only the weight indices present in the gradient map.
    fn update_sparse(
        &mut self,
        weights: &mut Array1<f32>,
        gradients: &HashMap<usize, f32>,
        learning_rate: f32,
    );

    fn update_scalar(&mut self, weight: &mut f32, gradient: f32, learning_rate: f32);
}

#[derive(Serialize, Deserialize, Clone)]
pub struct SGD;

impl SGD {
    pub fn new() -> SGD {
        SGD
    }
}

impl Default for SGD {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for SGD {
    fn update_matrix(&mut self, weights: &mut Array2<f32>, gradients: &Array2<f32>, learning_rate: f32) {
        weights.zip_mut_with(gradients, |w, &g| *w -= learning_rate * g);
    }

    fn update_sparse(
        &mut self,
        weights: &mut Array1<f32>,
        gradients: &HashMap<usize, f32>,
        learning_rate: f32,
    ) {
        for (&index, &gradient) in gradients {
            weights[index] -= learning_rate * gradient;
        }
    }

    fn update_scalar(&mut self, weight: &mut f32, gradient: f32, learning_rate: f32) {
        *weight -= learning_rate * gradient;
    }
}
