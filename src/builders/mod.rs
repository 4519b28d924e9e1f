pub mod layers;

pub use layers::WideLayerBuilder;
