//! `mlkit-nn` provides distance metrics and a k-nearest neighbours classifier.
//!
//! ## The Big Picture
//!
//! `mlkit-nn` is a crate in the `mlkit` toolkit. It classifies a query by comparing it against
//! every stored training sample: the `k` samples closest to the query under a chosen
//! [`Distance`](distance::Distance) vote on its label.
//!
//! ## Current state
//!
//! * distance metrics: Manhattan, Euclidean, Chebyshev, Minkowski and user supplied functions
//! * exhaustive search for the `k` nearest samples with a bounded heap
//! * a majority vote classifier, [`KNearestNeighbours`]
//!
//! ## Example
//!
//! ```
//! use mlkit::prelude::*;
//! use mlkit_nn::{distance::L1Dist, KnnParams};
//! use ndarray::array;
//!
//! let train = Dataset::new(array![[0., 0.], [0., 1.], [10., 10.], [10., 11.]], array![0, 0, 1, 1]);
//!
//! let model = KnnParams::new().k(3).distance(L1Dist).fit(&train).unwrap();
//! assert_eq!(model.predict_sample(&array![9., 9.]).unwrap(), 1);
//! ```
use ndarray::ArrayView1;

mod classifier;
pub mod distance;
mod error;
mod heap_elem;
mod hyperparams;
pub mod linear;

pub use classifier::KNearestNeighbours;
pub use error::{NnError, Result};
pub use hyperparams::{KnnParams, KnnValidParams};

/// A single sample, one row of a record matrix
pub type Point<'a, F> = ArrayView1<'a, F>;
