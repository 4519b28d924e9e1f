use std::fs;
use std::io::{Read, Write};

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::inputs::SparseInput;
use crate::layers::bias::BiasLayer;
use crate::layers::dense::WideDenseLayer;
use crate::layers::field::WideFieldLayer;
use crate::layers::initialization::WeightInit;
use crate::layers::traits::{InitializeWeights, Layer};
use crate::optimizer::Optimizer;
use crate::persist::{Checkpoint, SerializationType};

/// Per-sublayer gradient contributions returned by [`WideLayer::backward`].
#[derive(Debug, Clone)]
pub struct WideGradients {
    /// One vector per wide column, covering only the touched weights,
    /// in the order of the column's active indices.
    pub fields: Vec<Array1<f32>>,

    /// Gradient for the dense sub-layer's weight matrix.
    pub dense: Option<Array2<f32>>,

    /// Gradient for the bias weight.
    pub bias: Option<f32>,
}

/// Composite wide layer of a Wide-and-Deep model.
///
/// Owns one [`WideFieldLayer`] per sparse (one-hot encoded) wide column, a
/// [`WideDenseLayer`] over the concatenated numeric features, and a
/// [`BiasLayer`]. Forward sums every contribution into one shared output
/// vector; because the composition is additive, backward distributes the
/// identical upstream gradient to each sub-layer.
///
/// The dense and bias sub-layers are optional so checkpoints written by
/// older or partial model topologies still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WideLayer {
    layers: Vec<WideFieldLayer>,
    dense_layer: Option<WideDenseLayer>,
    bias: Option<BiasLayer>,
}

impl WideLayer {
    /// Create a wide layer from field layers, a dense layer, and a bias.
    pub fn new(layers: Vec<WideFieldLayer>, dense_layer: WideDenseLayer, bias: BiasLayer) -> Self {
        WideLayer {
            layers,
            dense_layer: Some(dense_layer),
            bias: Some(bias),
        }
    }

    /// Create a wide layer without a dense sub-layer.
    pub fn with_bias(layers: Vec<WideFieldLayer>, bias: BiasLayer) -> Self {
        WideLayer {
            layers,
            dense_layer: None,
            bias: Some(bias),
        }
    }

    pub fn layers(&self) -> &[WideFieldLayer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut Vec<WideFieldLayer> {
        &mut self.layers
    }

    pub fn dense_layer(&self) -> Option<&WideDenseLayer> {
        self.dense_layer.as_ref()
    }

    pub fn dense_layer_mut(&mut self) -> Option<&mut WideDenseLayer> {
        self.dense_layer.as_mut()
    }

    pub fn bias(&self) -> Option<&BiasLayer> {
        self.bias.as_ref()
    }

    pub fn bias_mut(&mut self) -> Option<&mut BiasLayer> {
        self.bias.as_mut()
    }

    /// Output dimension accounting: the sum of the field layers' output
    /// dims, plus one for the dense layer and one for the bias when
    /// present.
    pub fn out_dim(&self) -> usize {
        let mut len = 0;
        for layer in &self.layers {
            len += layer.out_dim();
        }
        if self.dense_layer.is_some() {
            len += 1;
        }
        if self.bias.is_some() {
            len += 1;
        }
        len
    }

    /// Width of the shared output accumulator: the first field layer's
    /// output width, falling back to the dense layer's when no wide
    /// columns are configured. All sub-layer outputs must agree on it.
    fn accumulator_width(&self) -> usize {
        if let Some(first) = self.layers.first() {
            first.out_dim()
        } else if let Some(dense) = &self.dense_layer {
            dense.out_dim()
        } else {
            1
        }
    }

    /// Forward pass over one example: one sparse input per wide column plus
    /// the concatenated dense feature vector. Sums the per-column outputs,
    /// the dense output, and the bias into one shared output vector.
    pub fn forward(
        &mut self,
        sparse_inputs: &[SparseInput],
        dense_input: ArrayView1<f32>,
    ) -> Array1<f32> {
        assert_eq!(
            self.layers.len(),
            sparse_inputs.len(),
            "One sparse input required per wide column"
        );

        let mut results = Array1::zeros(self.accumulator_width());
        for (layer, input) in self.layers.iter_mut().zip(sparse_inputs) {
            let outputs = layer.forward(input.clone());
            assert_eq!(outputs.len(), results.len(), "Wide column output width mismatch");
            results += &outputs;
        }

        if let Some(dense) = self.dense_layer.as_mut() {
            let dense_outputs = dense.forward(dense_input.to_owned());
            assert_eq!(
                dense_outputs.len(),
                results.len(),
                "Dense sub-layer output width mismatch"
            );
            results += &dense_outputs;
        }

        if let Some(bias) = self.bias.as_mut() {
            results += bias.forward(1.0);
        }

        results
    }

    /// Backward pass: hand every sub-layer the same upstream gradient
    /// (forward is additive), scaled by `sig`, and collect the per-sublayer
    /// contributions. Gradients accumulate inside each sub-layer until
    /// [`WideLayer::init_grads`] resets them.
    pub fn backward(&mut self, back_inputs: ArrayView1<f32>, sig: f32) -> WideGradients {
        let back = back_inputs.to_owned();
        let fields = self
            .layers
            .iter_mut()
            .map(|layer| layer.backward(&back, sig))
            .collect();
        let dense = self
            .dense_layer
            .as_mut()
            .map(|dense| dense.backward(&back, sig));
        let bias = self.bias.as_mut().map(|bias| bias.backward(&back[0], sig));
        WideGradients { fields, dense, bias }
    }

    /// Reset every sub-layer's accumulated gradients.
    pub fn init_grads(&mut self) {
        for layer in &mut self.layers {
            layer.init_grads();
        }
        if let Some(dense) = self.dense_layer.as_mut() {
            dense.init_grads();
        }
        if let Some(bias) = self.bias.as_mut() {
            bias.init_grads();
        }
    }

    /// Apply every sub-layer's accumulated gradients through the optimizer.
    pub fn apply_gradients<O: Optimizer>(&mut self, optimizer: &mut O, learning_rate: f32) {
        for layer in &mut self.layers {
            layer.apply_gradients(optimizer, learning_rate);
        }
        if let Some(dense) = self.dense_layer.as_mut() {
            dense.apply_gradients(optimizer, learning_rate);
        }
        if let Some(bias) = self.bias.as_mut() {
            bias.apply_gradients(optimizer, learning_rate);
        }
    }

    /// Save the wide layer's state to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(&serialized)?;
        Ok(())
    }

    /// Load a wide layer from a file written by [`WideLayer::save`].
    pub fn load(path: &str) -> Result<Self> {
        let mut file = fs::File::open(path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        let deserialized: Self = bincode::deserialize(&buffer)?;
        Ok(deserialized)
    }
}

impl InitializeWeights for WideLayer {
    fn init_weight(&mut self, method: WeightInit) {
        for layer in &mut self.layers {
            layer.init_weight(method);
        }
        if let Some(dense) = self.dense_layer.as_mut() {
            dense.init_weight(method);
        }
        if let Some(bias) = self.bias.as_mut() {
            bias.init_weight(method);
        }
    }
}

impl Checkpoint for WideLayer {
    fn write_to<W: Write>(&self, out: &mut W, ty: SerializationType) -> Result<()> {
        bincode::serialize_into(&mut *out, &(self.layers.len() as u32))?;
        for layer in &self.layers {
            layer.write_to(out, ty)?;
        }

        match &self.dense_layer {
            None => bincode::serialize_into(&mut *out, &false)?,
            Some(dense) => {
                bincode::serialize_into(&mut *out, &true)?;
                dense.write_to(out, ty)?;
            }
        }

        match &self.bias {
            None => bincode::serialize_into(&mut *out, &false)?,
            Some(bias) => {
                bincode::serialize_into(&mut *out, &true)?;
                bias.write_to(out, ty)?;
            }
        }

        Ok(())
    }

    fn read_fields<R: Read>(&mut self, input: &mut R, ty: SerializationType) -> Result<()> {
        let layer_count: u32 = bincode::deserialize_from(&mut *input)?;
        let layer_count = layer_count as usize;
        for i in 0..layer_count {
            if i >= self.layers.len() {
                self.layers.push(WideFieldLayer::default());
            }
            self.layers[i].read_fields(input, ty)?;
        }
        self.layers.truncate(layer_count);

        let dense_exists: bool = bincode::deserialize_from(&mut *input)?;
        if dense_exists {
            self.dense_layer
                .get_or_insert_with(WideDenseLayer::default)
                .read_fields(input, ty)?;
        } else {
            self.dense_layer = None;
        }

        let bias_exists: bool = bincode::deserialize_from(&mut *input)?;
        if bias_exists {
            self.bias
                .get_or_insert_with(BiasLayer::default)
                .read_fields(input, ty)?;
        } else {
            self.bias = None;
        }

        Ok(())
    }
}
