use std::io::Cursor;

use ndarray::{arr1, arr2, array};

use crate::inputs::SparseInput;
use crate::layers::{BiasLayer, WideDenseLayer, WideFieldLayer, WideLayer};
use crate::persist::{Checkpoint, SerializationType};

fn sample_wide_layer() -> WideLayer {
    let fields = vec![
        WideFieldLayer::new(3, 3).with_weights(arr1(&[0.5, 1.5, -0.25])),
        WideFieldLayer::new(9, 2).with_weights(arr1(&[2.0, 0.0])),
    ];
    let dense = WideDenseLayer::new(2).with_weights(arr2(&[[0.5], [1.0]]));
    let bias = BiasLayer::new().with_weight(0.125);
    WideLayer::new(fields, dense, bias)
}

#[test]
fn test_serialization_type_values() {
    assert_eq!(SerializationType::Weights.value(), 0);
    assert_eq!(SerializationType::Gradients.value(), 1);
    assert_eq!(SerializationType::ModelSpec.value(), 2);

    for ty in [
        SerializationType::Weights,
        SerializationType::Gradients,
        SerializationType::ModelSpec,
    ] {
        assert_eq!(SerializationType::from_value(ty.value()).unwrap(), ty);
    }

    assert!(SerializationType::from_value(3).is_err());
    assert!(SerializationType::from_value(-1).is_err());
}

#[test]
fn test_weights_round_trip() {
    let wide = sample_wide_layer();

    let mut buffer = Vec::new();
    wide.write_to(&mut buffer, SerializationType::Weights).unwrap();

    let mut restored = WideLayer::default();
    restored
        .read_fields(&mut Cursor::new(buffer), SerializationType::Weights)
        .unwrap();

    assert_eq!(restored.layers().len(), 2);
    assert_eq!(restored.layers()[0].column_id(), 3);
    assert_eq!(restored.layers()[0].weights(), &arr1(&[0.5, 1.5, -0.25]));
    assert_eq!(restored.layers()[1].column_id(), 9);
    assert_eq!(restored.layers()[1].weights(), &arr1(&[2.0, 0.0]));
    assert_eq!(
        restored.dense_layer().unwrap().weights(),
        &arr2(&[[0.5], [1.0]])
    );
    assert_eq!(restored.bias().unwrap().weight(), 0.125);
}

#[test]
fn test_gradients_round_trip() {
    let mut wide = sample_wide_layer();
    let sparse = vec![SparseInput::one_hot(1), SparseInput::one_hot(0)];
    wide.forward(&sparse, array![2.0, 1.0].view());
    wide.backward(arr1(&[0.5]).view(), 1.0);

    let mut buffer = Vec::new();
    wide.write_to(&mut buffer, SerializationType::Gradients).unwrap();

    let mut restored = WideLayer::default();
    restored
        .read_fields(&mut Cursor::new(buffer), SerializationType::Gradients)
        .unwrap();

    assert_eq!(restored.layers()[0].grads()[&1], 0.5);
    assert_eq!(restored.layers()[1].grads()[&0], 0.5);
    assert_eq!(
        restored.dense_layer().unwrap().grads(),
        &arr2(&[[1.0], [0.5]])
    );
    assert_eq!(restored.bias().unwrap().grad(), 0.5);
    // Weights are not part of a gradients stream
    assert_eq!(restored.layers()[0].weights().len(), 0);
}

#[test]
fn test_presence_flags_for_partial_topology() {
    let wide = WideLayer::with_bias(
        vec![WideFieldLayer::new(0, 2).with_weights(arr1(&[1.0, 2.0]))],
        BiasLayer::new().with_weight(0.5),
    );

    let mut buffer = Vec::new();
    wide.write_to(&mut buffer, SerializationType::Weights).unwrap();

    // Read into a full topology: the dense layer must disappear
    let mut restored = sample_wide_layer();
    restored
        .read_fields(&mut Cursor::new(buffer), SerializationType::Weights)
        .unwrap();

    assert!(restored.dense_layer().is_none());
    assert!(restored.bias().is_some());
    assert_eq!(restored.layers().len(), 1);
    assert_eq!(restored.layers()[0].weights(), &arr1(&[1.0, 2.0]));
}

#[test]
fn test_read_shrinks_field_layer_list() {
    let wide = sample_wide_layer();
    let mut buffer = Vec::new();
    wide.write_to(&mut buffer, SerializationType::Weights).unwrap();

    let mut restored = WideLayer::new(
        vec![
            WideFieldLayer::new(0, 1),
            WideFieldLayer::new(1, 1),
            WideFieldLayer::new(2, 1),
        ],
        WideDenseLayer::new(2),
        BiasLayer::new(),
    );
    restored
        .read_fields(&mut Cursor::new(buffer), SerializationType::Weights)
        .unwrap();

    assert_eq!(restored.layers().len(), 2);
    assert_eq!(restored.layers()[0].column_id(), 3);
}

#[test]
fn test_model_spec_round_trip() {
    let wide = sample_wide_layer();
    let mut buffer = Vec::new();
    wide.write_to(&mut buffer, SerializationType::ModelSpec).unwrap();

    let mut restored = WideLayer::default();
    restored
        .read_fields(&mut Cursor::new(buffer), SerializationType::ModelSpec)
        .unwrap();

    assert_eq!(restored.out_dim(), wide.out_dim());
    assert_eq!(restored.layers()[0].in_dim(), 3);
    assert_eq!(restored.layers()[1].in_dim(), 2);
}

#[test]
fn test_truncated_stream_is_an_error() {
    let wide = sample_wide_layer();
    let mut buffer = Vec::new();
    wide.write_to(&mut buffer, SerializationType::Weights).unwrap();
    buffer.truncate(buffer.len() / 2);

    let mut restored = WideLayer::default();
    let result = restored.read_fields(&mut Cursor::new(buffer), SerializationType::Weights);
    assert!(result.is_err());
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.bin");
    let path = path.to_str().unwrap();

    let mut wide = sample_wide_layer();
    let sparse = vec![SparseInput::one_hot(1), SparseInput::one_hot(0)];
    let before = wide.forward(&sparse, array![2.0, 1.0].view());
    wide.save(path).unwrap();

    let mut loaded = WideLayer::load(path).unwrap();
    let after = loaded.forward(&sparse, array![2.0, 1.0].view());
    assert_eq!(before, after);
}
