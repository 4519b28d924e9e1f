use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WidenetError};
use crate::layers::initialization::WeightInit;
use crate::layers::traits::{InitializeWeights, Layer};
use crate::optimizer::Optimizer;
use crate::persist::{Checkpoint, SerializationType};

/// Wide sub-layer for the concatenated dense numeric features.
///
/// A standard linear transform `input · W` with weight matrix of shape
/// `(in_dim, out_dim)`. The output width defaults to one unit so it lines
/// up with the per-column field layers in the composite wide layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WideDenseLayer {
    in_dim: usize,
    out_dim: usize,
    weights: Array2<f32>,
    w_grads: Array2<f32>,
    last_input: Option<Array1<f32>>,
}

impl WideDenseLayer {
    /// Create a dense sub-layer over `in_dim` numeric features with a
    /// single output unit. Weights start at zero.
    pub fn new(in_dim: usize) -> Self {
        Self::new_with_dims(in_dim, 1)
    }

    /// Create a dense sub-layer with an explicit output width.
    pub fn new_with_dims(in_dim: usize, out_dim: usize) -> Self {
        WideDenseLayer {
            in_dim,
            out_dim,
            weights: Array2::zeros((in_dim, out_dim)),
            w_grads: Array2::zeros((in_dim, out_dim)),
            last_input: None,
        }
    }

    pub fn with_weights(mut self, weights: Array2<f32>) -> Self {
        assert_eq!(weights.dim(), (self.in_dim, self.out_dim));
        self.weights = weights;
        self
    }

    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut Array2<f32> {
        &mut self.weights
    }

    pub fn grads(&self) -> &Array2<f32> {
        &self.w_grads
    }

    /// Zero accumulated gradients before the next training iteration.
    pub fn init_grads(&mut self) {
        self.w_grads.fill(0.0);
    }

    /// Apply accumulated gradients to the weight matrix.
    pub fn apply_gradients<O: Optimizer>(&mut self, optimizer: &mut O, learning_rate: f32) {
        optimizer.update_matrix(&mut self.weights, &self.w_grads, learning_rate);
    }
}

impl Default for WideDenseLayer {
    fn default() -> Self {
        WideDenseLayer::new_with_dims(0, 1)
    }
}

impl Layer for WideDenseLayer {
    type Input = Array1<f32>;
    type Output = Array1<f32>;
    type BackInput = Array1<f32>;
    type BackOutput = Array2<f32>;

    fn forward(&mut self, input: Array1<f32>) -> Array1<f32> {
        assert_eq!(
            input.len(),
            self.in_dim,
            "Dense input length must match the layer's input width"
        );
        let output = input.dot(&self.weights);
        self.last_input = Some(input);
        output
    }

    fn backward(&mut self, gradient: &Array1<f32>, sig: f32) -> Array2<f32> {
        let input = self
            .last_input
            .as_ref()
            .expect("No input stored. forward() must be called before backward()");
        assert_eq!(gradient.len(), self.out_dim);

        let scaled = gradient * sig;
        let contribution = input
            .clone()
            .insert_axis(Axis(1))
            .dot(&scaled.view().insert_axis(Axis(0)));
        self.w_grads.scaled_add(1.0, &contribution);
        contribution
    }

    fn out_dim(&self) -> usize {
        self.out_dim
    }
}

impl InitializeWeights for WideDenseLayer {
    fn init_weight(&mut self, method: WeightInit) {
        self.weights = method.init_matrix(self.in_dim, self.out_dim);
    }
}

impl Checkpoint for WideDenseLayer {
    fn write_to<W: std::io::Write>(&self, out: &mut W, ty: SerializationType) -> Result<()> {
        bincode::serialize_into(&mut *out, &(self.in_dim as u32))?;
        bincode::serialize_into(&mut *out, &(self.out_dim as u32))?;
        let values: Vec<f32> = match ty {
            SerializationType::Weights | SerializationType::ModelSpec => {
                self.weights.iter().copied().collect()
            }
            SerializationType::Gradients => self.w_grads.iter().copied().collect(),
        };
        bincode::serialize_into(&mut *out, &values)?;
        Ok(())
    }

    fn read_fields<R: std::io::Read>(&mut self, input: &mut R, ty: SerializationType) -> Result<()> {
        let in_dim: u32 = bincode::deserialize_from(&mut *input)?;
        let out_dim: u32 = bincode::deserialize_from(&mut *input)?;
        self.in_dim = in_dim as usize;
        self.out_dim = out_dim as usize;

        let values: Vec<f32> = bincode::deserialize_from(&mut *input)?;
        let matrix = Array2::from_shape_vec((self.in_dim, self.out_dim), values)
            .map_err(|e| WidenetError::SerializationError(e.to_string()))?;
        match ty {
            SerializationType::Weights | SerializationType::ModelSpec => {
                self.weights = matrix;
                self.w_grads = Array2::zeros((self.in_dim, self.out_dim));
            }
            SerializationType::Gradients => {
                self.w_grads = matrix;
            }
        }
        Ok(())
    }
}
