//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// a nearest neighbour classifier stores the training records it later compares queries against.
///
/// Implementations are usually on the checked hyperparameters of an algorithm, the fitted model is
/// returned as `Object`.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with a model
///
/// A fitted model maps records `R` to targets `T`. Models which can refuse a prediction (for
/// example because they were never fitted) use a `Result` as `T`.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}
