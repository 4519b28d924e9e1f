use ndarray::{arr1, arr2, array};

use crate::inputs::SparseInput;
use crate::layers::{
    BiasLayer, InitializeWeights, Layer, WeightInit, WideDenseLayer, WideFieldLayer,
};

#[test]
fn test_field_layer_creation() {
    let layer = WideFieldLayer::new(7, 50);

    assert_eq!(layer.column_id(), 7);
    assert_eq!(layer.in_dim(), 50);
    assert_eq!(layer.out_dim(), 1);
    assert_eq!(layer.weights().len(), 50);
    assert!(layer.weights().iter().all(|&w| w == 0.0));
}

#[test]
fn test_field_layer_forward_one_hot() {
    let mut layer = WideFieldLayer::new(0, 3).with_weights(arr1(&[0.5, 1.5, -0.25]));

    let output = layer.forward(SparseInput::one_hot(2));
    assert_eq!(output, arr1(&[-0.25]));
}

#[test]
fn test_field_layer_forward_multi_hot() {
    let mut layer = WideFieldLayer::new(0, 3).with_weights(arr1(&[0.5, 1.5, -0.25]));

    // 0.5 * 2.0 + (-0.25) * 0.5
    let input = SparseInput::new(vec![0, 2], vec![2.0, 0.5]);
    let output = layer.forward(input);
    assert_eq!(output, arr1(&[0.875]));
}

#[test]
fn test_field_layer_backward_touches_active_indices_only() {
    let mut layer = WideFieldLayer::new(0, 4).with_weights(arr1(&[0.5, 1.5, -0.25, 2.0]));

    layer.forward(SparseInput::new(vec![0, 2], vec![2.0, 0.5]));
    let contributions = layer.backward(&arr1(&[0.5]), 2.0);

    // grad = upstream * value * sig, for the touched indices in order
    assert_eq!(contributions, arr1(&[2.0, 0.5]));
    assert_eq!(layer.grads().len(), 2);
    assert_eq!(layer.grads()[&0], 2.0);
    assert_eq!(layer.grads()[&2], 0.5);
    assert!(!layer.grads().contains_key(&1));
    assert!(!layer.grads().contains_key(&3));
}

#[test]
fn test_field_layer_gradients_accumulate() {
    let mut layer = WideFieldLayer::new(0, 2).with_weights(arr1(&[1.0, 1.0]));

    layer.forward(SparseInput::one_hot(1));
    layer.backward(&arr1(&[0.5]), 1.0);
    layer.forward(SparseInput::one_hot(1));
    layer.backward(&arr1(&[0.25]), 1.0);

    assert_eq!(layer.grads()[&1], 0.75);

    layer.init_grads();
    assert!(layer.grads().is_empty());
}

#[test]
fn test_dense_layer_forward() {
    let mut layer =
        WideDenseLayer::new(2).with_weights(arr2(&[[0.5], [1.0]]));

    let output = layer.forward(array![2.0, 1.0]);
    assert_eq!(output, arr1(&[2.0]));
}

#[test]
fn test_dense_layer_backward_outer_product() {
    let mut layer = WideDenseLayer::new(2).with_weights(arr2(&[[0.5], [1.0]]));

    layer.forward(array![2.0, 1.0]);
    let contribution = layer.backward(&arr1(&[0.5]), 2.0);

    // grad[i][j] = input[i] * upstream[j] * sig
    assert_eq!(contribution, arr2(&[[2.0], [1.0]]));
    assert_eq!(layer.grads(), &arr2(&[[2.0], [1.0]]));

    layer.init_grads();
    assert_eq!(layer.grads(), &arr2(&[[0.0], [0.0]]));
}

#[test]
fn test_dense_layer_wider_output() {
    let mut layer = WideDenseLayer::new_with_dims(2, 3)
        .with_weights(arr2(&[[1.0, 0.0, 0.5], [0.0, 1.0, 0.5]]));

    assert_eq!(layer.out_dim(), 3);
    let output = layer.forward(array![2.0, 4.0]);
    assert_eq!(output, arr1(&[2.0, 4.0, 3.0]));
}

#[test]
fn test_bias_layer() {
    let mut bias = BiasLayer::new().with_weight(0.75);

    assert_eq!(bias.forward(1.0), 0.75);

    let grad = bias.backward(&1.5, 2.0);
    assert_eq!(grad, 3.0);
    assert_eq!(bias.grad(), 3.0);

    bias.backward(&0.5, 2.0);
    assert_eq!(bias.grad(), 4.0);

    bias.init_grads();
    assert_eq!(bias.grad(), 0.0);
}

#[test]
fn test_zero_initialization() {
    let mut layer = WideFieldLayer::new(0, 10).with_weights(arr1(&[1.0; 10]));
    layer.init_weight(WeightInit::Zeros);
    assert!(layer.weights().iter().all(|&w| w == 0.0));

    let mut dense = WideDenseLayer::new_with_dims(4, 2);
    dense.init_weight(WeightInit::Zeros);
    assert!(dense.weights().iter().all(|&w| w == 0.0));
    assert_eq!(dense.weights().dim(), (4, 2));

    let mut bias = BiasLayer::new().with_weight(3.0);
    bias.init_weight(WeightInit::Zeros);
    assert_eq!(bias.weight(), 0.0);
}

#[test]
fn test_uniform_initialization_bounds() {
    let mut layer = WideFieldLayer::new(0, 100);
    layer.init_weight(WeightInit::Uniform { min: -0.1, max: 0.1 });
    for &w in layer.weights().iter() {
        assert!(w >= -0.1 && w < 0.1);
    }
}

#[test]
fn test_xavier_initialization_bounds() {
    let mut dense = WideDenseLayer::new_with_dims(10, 20);
    dense.init_weight(WeightInit::XavierUniform);
    let limit = (6.0 / 30.0_f32).sqrt();
    for &w in dense.weights().iter() {
        assert!(w >= -limit && w <= limit);
    }
}
