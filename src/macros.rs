/// A macro to create a new `WideLayer`.
///
/// # Examples
///
/// ```
/// use widenet::wide_layer;
///
/// let wide = wide_layer!([(0, 100), (1, 50)], 4);
/// assert_eq!(wide.out_dim(), 4);
/// ```
///
/// This will create a new `WideLayer` with two wide columns (column 0 with
/// 100 categories, column 1 with 50), a dense sub-layer over 4 numeric
/// features, and a bias, all zero-initialized.
#[macro_export]
macro_rules! wide_layer {
    ([$(($column:expr, $width:expr)),* $(,)?], $dense_inputs:expr) => {
        $crate::layers::WideLayer::new(
            vec![$($crate::layers::WideFieldLayer::new($column, $width)),*],
            $crate::layers::WideDenseLayer::new($dense_inputs),
            $crate::layers::BiasLayer::new(),
        )
    };
}
