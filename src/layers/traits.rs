use crate::layers::initialization::WeightInit;

/// Trait defining the forward/backward interface for wide-part layers.
///
/// The sub-layers are heterogeneous (sparse column input, dense vector
/// input, scalar input), so the input and output shapes are associated
/// types fixed by each implementation.
pub trait Layer {
    /// Input consumed by the forward pass
    type Input;

    /// Output produced by the forward pass
    type Output;

    /// Upstream gradient consumed by the backward pass
    type BackInput;

    /// Gradient contribution produced by the backward pass
    type BackOutput;

    /// Perform forward propagation for a single example.
    ///
    /// The input is taken by value: layers cache it for the subsequent
    /// backward pass.
    fn forward(&mut self, input: Self::Input) -> Self::Output;

    /// Perform backward propagation, accumulating this layer's gradients.
    ///
    /// The upstream gradient is borrowed because the composite layer hands
    /// the same signal to every sub-layer. `sig` scales it uniformly (the
    /// host uses it for the sign/learning factor of the loss derivative).
    fn backward(&mut self, gradient: &Self::BackInput, sig: f32) -> Self::BackOutput;

    /// Get the output dimension of the layer
    fn out_dim(&self) -> usize;
}

/// Trait for layers whose weights can be (re)initialized from a strategy.
pub trait InitializeWeights {
    fn init_weight(&mut self, method: WeightInit);
}
