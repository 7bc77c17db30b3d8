//! `mlkit` is a small toolkit for supervised learning on tabular numeric data.
//!
//! It focuses on the steps every classical ML experiment goes through before and after a model
//! is trained:
//!
//! * keeping feature rows and their labels together in a [`Dataset`]
//! * rescaling feature columns in place ([`Dataset::normalize`], [`Dataset::standardize`])
//! * partitioning a dataset into reproducible training and held-out parts
//!   ([`Dataset::train_test_split`])
//! * scoring predictions against the ground truth ([`metrics`])
//!
//! Learning algorithms live in their own crates and plug into the [`Fit`](traits::Fit) and
//! [`Predict`](traits::Predict) traits defined here. The nearest neighbour classifier is provided
//! by `mlkit-nn`, and loading datasets from CSV files by `mlkit-datasets`.
//!
//! ```
//! use mlkit::prelude::*;
//! use ndarray::array;
//!
//! let mut dataset = Dataset::new(
//!     array![[1., 10.], [2., 20.], [3., 30.], [4., 40.], [5., 50.]],
//!     array![0, 0, 1, 1, 1],
//! );
//! dataset.normalize();
//!
//! let (train, test) = dataset.train_test_split(0.2, 41).unwrap();
//! assert_eq!(train.nsamples(), 4);
//! assert_eq!(test.nsamples(), 1);
//! ```

pub mod dataset;
pub mod error;
mod metrics_classification;
mod metrics_regression;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float, Label};
pub use error::{Error, ErrorKind};
pub use param_guard::ParamGuard;

/// Common metrics functions for classification and regression
pub mod metrics {
    pub use crate::metrics_classification::{ConfusionMatrix, ToConfusionMatrix};
    pub use crate::metrics_regression::Regression;
}
