//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};

/// Transformation algorithms
///
/// A transformer takes a dataset or a matrix and returns a transformed version of it. Typical
/// examples are feature expansions, which do not need to learn anything from the data.
pub trait Transformer<R, T> {
    fn transform(&self, x: R) -> T;
}

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in *regression* the concept is a parameter vector minimizing a cost function, for scalers it
/// is the per-feature statistics of the training records.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model
///
/// Models predict by value and panic when the records do not match the learned width.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}
