use crate::error::{Result, WidenetError};
use crate::layers::initialization::WeightInit;
use crate::layers::traits::InitializeWeights;
use crate::layers::{BiasLayer, WideDenseLayer, WideFieldLayer, WideLayer};

/// Builder for WideLayer
pub struct WideLayerBuilder {
    fields: Vec<(usize, usize)>,
    dense_inputs: Option<usize>,
    weight_init: WeightInit,
}

impl WideLayerBuilder {
    /// Create a new wide layer builder
    pub fn new() -> Self {
        WideLayerBuilder {
            fields: Vec::new(),
            dense_inputs: None,
            weight_init: WeightInit::Zeros,
        }
    }

    /// Add a wide column: its column id and category count
    pub fn field(mut self, column_id: usize, in_dim: usize) -> Self {
        self.fields.push((column_id, in_dim));
        self
    }

    /// Set the number of concatenated dense features
    pub fn dense_inputs(mut self, size: usize) -> Self {
        self.dense_inputs = Some(size);
        self
    }

    /// Set weight initialization
    pub fn weight_init(mut self, init: WeightInit) -> Self {
        self.weight_init = init;
        self
    }

    /// Build the wide layer
    pub fn build(self) -> Result<WideLayer> {
        if self.fields.is_empty() && self.dense_inputs.is_none() {
            return Err(WidenetError::InvalidParameter {
                name: "inputs".to_string(),
                reason: "At least one wide column or a dense input width is required".to_string(),
            });
        }

        for &(column_id, in_dim) in &self.fields {
            if in_dim == 0 {
                return Err(WidenetError::InvalidParameter {
                    name: format!("field {}", column_id),
                    reason: "Column width must be greater than 0".to_string(),
                });
            }
        }

        if self.dense_inputs == Some(0) {
            return Err(WidenetError::InvalidParameter {
                name: "dense_inputs".to_string(),
                reason: "Dense input width must be greater than 0".to_string(),
            });
        }

        let layers = self
            .fields
            .into_iter()
            .map(|(column_id, in_dim)| WideFieldLayer::new(column_id, in_dim))
            .collect();

        let mut wide = match self.dense_inputs {
            Some(size) => WideLayer::new(layers, WideDenseLayer::new(size), BiasLayer::new()),
            None => WideLayer::with_bias(layers, BiasLayer::new()),
        };
        wide.init_weight(self.weight_init);
        Ok(wide)
    }
}

impl Default for WideLayerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
