use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layers::initialization::WeightInit;
use crate::layers::traits::{InitializeWeights, Layer};
use crate::optimizer::Optimizer;
use crate::persist::{Checkpoint, SerializationType};

/// Scalar bias added uniformly to every output unit of the wide layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiasLayer {
    weight: f32,
    w_grad: f32,
}

impl BiasLayer {
    pub fn new() -> Self {
        BiasLayer {
            weight: 0.0,
            w_grad: 0.0,
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn grad(&self) -> f32 {
        self.w_grad
    }

    pub fn init_grads(&mut self) {
        self.w_grad = 0.0;
    }

    pub fn apply_gradients<O: Optimizer>(&mut self, optimizer: &mut O, learning_rate: f32) {
        optimizer.update_scalar(&mut self.weight, self.w_grad, learning_rate);
    }
}

impl Layer for BiasLayer {
    type Input = f32;
    type Output = f32;
    type BackInput = f32;
    type BackOutput = f32;

    /// The host passes 1.0, making the output the bias weight itself.
    fn forward(&mut self, input: f32) -> f32 {
        input * self.weight
    }

    /// The gradient is the first element of the upstream signal, scaled
    /// by `sig`; accumulated and returned.
    fn backward(&mut self, gradient: &f32, sig: f32) -> f32 {
        let grad = gradient * sig;
        self.w_grad += grad;
        grad
    }

    fn out_dim(&self) -> usize {
        1
    }
}

impl InitializeWeights for BiasLayer {
    fn init_weight(&mut self, method: WeightInit) {
        self.weight = method.init_scalar();
    }
}

impl Checkpoint for BiasLayer {
    fn write_to<W: std::io::Write>(&self, out: &mut W, ty: SerializationType) -> Result<()> {
        let value = match ty {
            SerializationType::Weights | SerializationType::ModelSpec => self.weight,
            SerializationType::Gradients => self.w_grad,
        };
        bincode::serialize_into(&mut *out, &value)?;
        Ok(())
    }

    fn read_fields<R: std::io::Read>(&mut self, input: &mut R, ty: SerializationType) -> Result<()> {
        let value: f32 = bincode::deserialize_from(&mut *input)?;
        match ty {
            SerializationType::Weights | SerializationType::ModelSpec => self.weight = value,
            SerializationType::Gradients => self.w_grad = value,
        }
        Ok(())
    }
}
