use std::collections::HashMap;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WidenetError};
use crate::inputs::SparseInput;
use crate::layers::initialization::WeightInit;
use crate::layers::traits::{InitializeWeights, Layer};
use crate::optimizer::Optimizer;
use crate::persist::{Checkpoint, SerializationType};

/// Wide sub-layer for one categorical (one-hot/sparse) input column.
///
/// Holds one weight per category. Forward reads only the weights addressed
/// by the sparse input's active indices, so the one-hot expansion is never
/// materialized; backward accumulates gradients for those indices alone,
/// keyed in a map so a checkpoint round only ships the touched subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WideFieldLayer {
    column_id: usize,
    in_dim: usize,
    weights: Array1<f32>,
    w_grads: HashMap<usize, f32>,
    last_input: Option<SparseInput>,
}

impl WideFieldLayer {
    /// Create a field layer for the given column with `in_dim` categories.
    /// Weights start at zero, the conventional wide-part initialization.
    pub fn new(column_id: usize, in_dim: usize) -> Self {
        WideFieldLayer {
            column_id,
            in_dim,
            weights: Array1::zeros(in_dim),
            w_grads: HashMap::new(),
            last_input: None,
        }
    }

    pub fn with_weights(mut self, weights: Array1<f32>) -> Self {
        assert_eq!(weights.len(), self.in_dim);
        self.weights = weights;
        self
    }

    pub fn column_id(&self) -> usize {
        self.column_id
    }

    /// Number of categories (weight vector length).
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    pub fn weights(&self) -> &Array1<f32> {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut Array1<f32> {
        &mut self.weights
    }

    /// Accumulated gradients, keyed by touched weight index.
    pub fn grads(&self) -> &HashMap<usize, f32> {
        &self.w_grads
    }

    /// Clear accumulated gradients before the next training iteration.
    pub fn init_grads(&mut self) {
        self.w_grads.clear();
    }

    /// Apply accumulated gradients to the touched weights.
    pub fn apply_gradients<O: Optimizer>(&mut self, optimizer: &mut O, learning_rate: f32) {
        optimizer.update_sparse(&mut self.weights, &self.w_grads, learning_rate);
    }
}

impl Default for WideFieldLayer {
    fn default() -> Self {
        WideFieldLayer::new(0, 0)
    }
}

impl Layer for WideFieldLayer {
    type Input = SparseInput;
    type Output = Array1<f32>;
    type BackInput = Array1<f32>;
    type BackOutput = Array1<f32>;

    fn forward(&mut self, input: SparseInput) -> Array1<f32> {
        let mut output = Array1::zeros(self.out_dim());
        for (index, value) in input.iter() {
            assert!(
                index < self.in_dim,
                "Sparse index {} out of range for column {} (width {})",
                index,
                self.column_id,
                self.in_dim
            );
            output[0] += self.weights[index] * value;
        }
        self.last_input = Some(input);
        output
    }

    fn backward(&mut self, gradient: &Array1<f32>, sig: f32) -> Array1<f32> {
        let input = self
            .last_input
            .as_ref()
            .expect("No input stored. forward() must be called before backward()");
        assert_eq!(gradient.len(), self.out_dim());

        let mut contributions = Array1::zeros(input.nnz());
        for (i, (index, value)) in input.iter().enumerate() {
            let grad = gradient[0] * value * sig;
            *self.w_grads.entry(index).or_insert(0.0) += grad;
            contributions[i] = grad;
        }
        contributions
    }

    fn out_dim(&self) -> usize {
        // One output unit per wide column
        1
    }
}

impl InitializeWeights for WideFieldLayer {
    fn init_weight(&mut self, method: WeightInit) {
        self.weights = method.init_vector(self.in_dim);
    }
}

impl Checkpoint for WideFieldLayer {
    fn write_to<W: std::io::Write>(&self, out: &mut W, ty: SerializationType) -> Result<()> {
        bincode::serialize_into(&mut *out, &(self.column_id as u32))?;
        bincode::serialize_into(&mut *out, &(self.in_dim as u32))?;
        match ty {
            SerializationType::Weights | SerializationType::ModelSpec => {
                bincode::serialize_into(&mut *out, &self.weights.to_vec())?;
            }
            SerializationType::Gradients => {
                let grads: HashMap<u64, f32> =
                    self.w_grads.iter().map(|(&i, &g)| (i as u64, g)).collect();
                bincode::serialize_into(&mut *out, &grads)?;
            }
        }
        Ok(())
    }

    fn read_fields<R: std::io::Read>(&mut self, input: &mut R, ty: SerializationType) -> Result<()> {
        let column_id: u32 = bincode::deserialize_from(&mut *input)?;
        let in_dim: u32 = bincode::deserialize_from(&mut *input)?;
        self.column_id = column_id as usize;
        self.in_dim = in_dim as usize;
        match ty {
            SerializationType::Weights | SerializationType::ModelSpec => {
                let weights: Vec<f32> = bincode::deserialize_from(&mut *input)?;
                if weights.len() != self.in_dim {
                    return Err(WidenetError::dimension_mismatch(
                        format!("{} weights for column {}", self.in_dim, self.column_id),
                        format!("{}", weights.len()),
                    ));
                }
                self.weights = Array1::from_vec(weights);
            }
            SerializationType::Gradients => {
                let grads: HashMap<u64, f32> = bincode::deserialize_from(&mut *input)?;
                self.w_grads = grads.into_iter().map(|(i, g)| (i as usize, g)).collect();
            }
        }
        Ok(())
    }
}
