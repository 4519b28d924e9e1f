//! # Widenet - Wide-Part Layers for Wide-and-Deep Training
//!
//! Widenet implements the linear ("wide") half of a Wide-and-Deep model as a
//! set of composable layers: per-column sparse sub-layers over one-hot
//! categorical features, a dense sub-layer over concatenated numeric
//! features, and a scalar bias applied uniformly to every output unit. The
//! composite layer sums all contributions into one shared output vector.
//!
//! ## Key Features
//!
//! - **Sparse forward/backward**: categorical columns are evaluated through
//!   index/value pairs, never materializing the one-hot expansion
//! - **Gradient bookkeeping**: each sub-layer accumulates its own gradients;
//!   the sparse sub-layers track only the weight indices a batch touched
//! - **Weight initialization**: selectable strategies (zeros, uniform,
//!   normal, Xavier, He) over scalar, vector, and matrix shapes
//! - **Checkpoint serialization**: a binary stream contract with presence
//!   flags for optional sub-layers, tagged by serialization type, for
//!   distributed training rounds
//!
//! ## Quick Start
//!
//! ```rust
//! use widenet::layers::{WideLayer, WideFieldLayer, WideDenseLayer, BiasLayer, WeightInit};
//! use widenet::layers::InitializeWeights;
//! use widenet::inputs::SparseInput;
//! use ndarray::array;
//!
//! // Two categorical columns (100 and 50 categories) plus 4 dense features
//! let fields = vec![WideFieldLayer::new(0, 100), WideFieldLayer::new(1, 50)];
//! let mut wide = WideLayer::new(fields, WideDenseLayer::new(4), BiasLayer::new());
//! wide.init_weight(WeightInit::Zeros);
//!
//! let sparse = vec![SparseInput::one_hot(42), SparseInput::one_hot(7)];
//! let dense = array![0.5, 0.1, 0.0, 0.3];
//! let output = wide.forward(&sparse, dense.view());
//! assert_eq!(output.len(), 1);
//! ```
//!
//! ## Module Organization
//!
//! - [`builders`] - Builder patterns for convenient layer construction
//! - [`error`] - Error types and result handling
//! - [`inputs`] - Sparse input representation for categorical columns
//! - [`layers`] - Wide, field, dense, and bias layers plus initialization
//! - [`optimizer`] - Gradient application (SGD)
//! - [`persist`] - Binary checkpoint serialization

#[macro_use]
pub mod macros;

pub mod builders;
pub mod error;
pub mod inputs;
pub mod layers;
pub mod optimizer;
pub mod persist;

#[cfg(test)]
mod tests;
