//! Datasets
//!
//! This module implements the dataset struct and the operations that prepare it for learning:
//! partitioning into training and held-out parts, filtering by label and per-column rescaling.
use ndarray::{ArrayBase, ArrayView1, ArrayView2, Ix1, Ix2, OwnedRepr, ScalarOperand};

use num_traits::{FromPrimitive, NumAssignOps, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;

use std::fmt;
use std::hash::Hash;
use std::iter::Sum;

mod impl_dataset;
mod impl_records;
mod scaling;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in records of a dataset.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Discrete labels
///
/// Labels are countable, comparable and hashable. The total order is used whenever a
/// deterministic choice between labels is needed, for example to break a tie in a majority vote.
pub trait Label: PartialEq + Eq + Hash + Ord + Clone + fmt::Debug {}

impl Label for bool {}
impl Label for u8 {}
impl Label for usize {}
impl Label for i32 {}
impl Label for i64 {}
impl Label for String {}
impl Label for &str {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the data
/// and their targets. In order to keep the type complexity low the dataset base is only generic
/// over the records and targets and introduces a trait bound on the records.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional array with dimensionality (nsamples), `targets[i]` is the
/// label of row `i` of the records
///
/// Every row has the same width by construction of the matrix. Datasets derived from another
/// dataset (splits, shuffles, filters) always own their data, so mutating one of them never
/// affects another.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records
/// stored as an `Array2` and each record corresponds to a single label stored in an `Array1`.
pub type Dataset<F, L> = DatasetBase<ArrayBase<OwnedRepr<F>, Ix2>, ArrayBase<OwnedRepr<L>, Ix1>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, F, L> = DatasetBase<ArrayView2<'a, F>, ArrayView1<'a, L>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}
