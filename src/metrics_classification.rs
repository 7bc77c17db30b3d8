//! Common metrics for performance evaluation of classifier
//!
//! Scoring is essential for classification tasks. This module implements the confusion matrix and
//! the scoring functions derived from it: accuracy, precision, recall and f1-score.
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use ndarray::prelude::*;
use ndarray::Data;

use crate::dataset::{DatasetBase, Label, Records};
use crate::error::{Error, Result};

/// Return tuple of class index for each element of ground truth and prediction
fn map_prediction_to_idx<A: Label>(
    prediction: &[&A],
    ground_truth: &[&A],
    classes: &[A],
) -> Vec<(usize, usize)> {
    // create a map from class label to index
    let set = classes
        .iter()
        .enumerate()
        .map(|(a, b)| (b, a))
        .collect::<HashMap<_, usize>>();

    // every label is a member, the classes are collected from both arrays
    ground_truth
        .iter()
        .zip(prediction.iter())
        .filter_map(|(a, b)| set.get(*a).and_then(|x| set.get(*b).map(|y| (*x, *y))))
        .collect()
}

/// Ratio of two counts, zero if the denominator is zero
fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Confusion matrix for multi-label evaluation
///
/// A confusion matrix shows predictions in a matrix, where rows correspond to the ground truth and
/// columns to the prediction. The diagonal entries are correct predictions. Members are sorted in
/// ascending label order.
#[derive(Clone, PartialEq)]
pub struct ConfusionMatrix<A> {
    matrix: Array2<usize>,
    members: Array1<A>,
}

impl<A: Label> ConfusionMatrix<A> {
    /// The counts, `matrix[(i, j)]` is the number of samples of class `members[i]` predicted as
    /// `members[j]`
    pub fn matrix(&self) -> &Array2<usize> {
        &self.matrix
    }

    /// The labels of the rows and columns
    pub fn members(&self) -> &Array1<A> {
        &self.members
    }

    fn index_of(&self, label: &A) -> Option<usize> {
        self.members.iter().position(|member| member == label)
    }

    /// Fraction of correct predictions, zero for an empty matrix
    pub fn accuracy(&self) -> f64 {
        ratio(self.matrix.diag().sum(), self.matrix.sum())
    }

    /// Fraction of samples predicted as `label` which really belong to `label`
    pub fn precision(&self, label: &A) -> f64 {
        self.index_of(label)
            .map(|idx| ratio(self.matrix[(idx, idx)], self.matrix.column(idx).sum()))
            .unwrap_or(0.0)
    }

    /// Fraction of samples belonging to `label` which were predicted as `label`
    pub fn recall(&self, label: &A) -> f64 {
        self.index_of(label)
            .map(|idx| ratio(self.matrix[(idx, idx)], self.matrix.row(idx).sum()))
            .unwrap_or(0.0)
    }

    /// Harmonic mean of precision and recall for `label`
    pub fn f1_score(&self, label: &A) -> f64 {
        let precision = self.precision(label);
        let recall = self.recall(label);

        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    }
}

/// Print a confusion matrix
impl<A: fmt::Debug> fmt::Debug for ConfusionMatrix<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let len = self.matrix.len_of(Axis(0));
        writeln!(f, "members: {:?}", self.members)?;
        for _ in 0..len * 4 + 1 {
            write!(f, "-")?;
        }
        writeln!(f)?;

        for i in 0..len {
            write!(f, "| ")?;

            for j in 0..len {
                write!(f, "{} | ", self.matrix[(i, j)])?;
            }
            writeln!(f)?;
        }

        for _ in 0..len * 4 + 1 {
            write!(f, "-")?;
        }

        Ok(())
    }
}

/// Classification functions
///
/// Contains only routine for Confusion Matrix, as all other current metrices can be derived from
/// the entries in the matrix.
pub trait ToConfusionMatrix<A, T> {
    fn confusion_matrix(&self, ground_truth: T) -> Result<ConfusionMatrix<A>>;
}

impl<A: Label, S: Data<Elem = A>, S2: Data<Elem = A>> ToConfusionMatrix<A, &ArrayBase<S2, Ix1>>
    for ArrayBase<S, Ix1>
{
    fn confusion_matrix(&self, ground_truth: &ArrayBase<S2, Ix1>) -> Result<ConfusionMatrix<A>> {
        if self.len() != ground_truth.len() {
            return Err(Error::MismatchedShapes {
                records: ground_truth.len(),
                targets: self.len(),
            });
        }

        let prediction = self.iter().collect::<Vec<_>>();
        let ground_truth = ground_truth.iter().collect::<Vec<_>>();

        // create a sorted set of all labels
        let classes = ground_truth
            .iter()
            .chain(prediction.iter())
            .map(|x| (*x).clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        // count each index tuple in the confusion matrix
        let mut matrix = Array2::zeros((classes.len(), classes.len()));
        for (i1, i2) in map_prediction_to_idx(&prediction, &ground_truth, &classes) {
            matrix[(i1, i2)] += 1;
        }

        Ok(ConfusionMatrix {
            matrix,
            members: Array1::from(classes),
        })
    }
}

impl<A: Label, S: Data<Elem = A>, R: Records, S2: Data<Elem = A>>
    ToConfusionMatrix<A, &DatasetBase<R, ArrayBase<S2, Ix1>>> for ArrayBase<S, Ix1>
{
    fn confusion_matrix(
        &self,
        ground_truth: &DatasetBase<R, ArrayBase<S2, Ix1>>,
    ) -> Result<ConfusionMatrix<A>> {
        self.confusion_matrix(&ground_truth.targets)
    }
}
