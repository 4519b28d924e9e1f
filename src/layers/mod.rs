pub mod bias;
pub mod dense;
pub mod field;
pub mod initialization;
pub mod traits;
pub mod wide;

pub use bias::BiasLayer;
pub use dense::WideDenseLayer;
pub use field::WideFieldLayer;
pub use initialization::WeightInit;
pub use traits::{InitializeWeights, Layer};
pub use wide::{WideGradients, WideLayer};
