//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables.

use ndarray::prelude::*;
use ndarray::Data;

use crate::{
    error::{Error, Result},
    Float,
};

/// Regression metrices trait
///
/// Implemented on the prediction, the ground truth is passed as argument. Every metric fails with
/// [`Error::MismatchedShapes`] if both have a different length and with
/// [`Error::NotEnoughSamples`] if they are empty.
pub trait Regression<A, T> {
    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: T) -> Result<A>;
    /// Square root of the mean squared error
    fn root_mean_squared_error(&self, compare_to: T) -> Result<A>;
    /// Mean absolute error between two continuous variables
    fn mean_absolute_error(&self, compare_to: T) -> Result<A>;
    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    ///
    /// To evaluate the accuracy of a prediction, use
    /// ```ignore
    /// prediction.r2(&ground_truth)
    /// ```
    ///
    /// Fails with [`Error::Parameters`] if the ground truth is constant.
    fn r2(&self, compare_to: T) -> Result<A>;
}

impl<A: Float, D: Data<Elem = A>, D2: Data<Elem = A>> Regression<A, &ArrayBase<D2, Ix1>>
    for ArrayBase<D, Ix1>
{
    fn mean_squared_error(&self, compare_to: &ArrayBase<D2, Ix1>) -> Result<A> {
        check_shapes(self, compare_to)?;

        Ok(mean(self.iter().zip(compare_to.iter()).map(|(a, b)| {
            let diff = *a - *b;
            diff * diff
        })))
    }

    fn root_mean_squared_error(&self, compare_to: &ArrayBase<D2, Ix1>) -> Result<A> {
        self.mean_squared_error(compare_to).map(A::sqrt)
    }

    fn mean_absolute_error(&self, compare_to: &ArrayBase<D2, Ix1>) -> Result<A> {
        check_shapes(self, compare_to)?;

        Ok(mean(
            self.iter()
                .zip(compare_to.iter())
                .map(|(a, b)| (*a - *b).abs()),
        ))
    }

    // r2 = 1 - sum((pred_i - y_i)^2)/sum((mean_y - y_i)^2)
    // the mean is of `compare_to`, the ground truth
    fn r2(&self, compare_to: &ArrayBase<D2, Ix1>) -> Result<A> {
        check_shapes(self, compare_to)?;

        let mean_y = mean(compare_to.iter().cloned());
        let ss_res = self
            .iter()
            .zip(compare_to.iter())
            .map(|(a, b)| (*a - *b) * (*a - *b))
            .sum::<A>();
        let ss_tot = compare_to
            .iter()
            .map(|y| (*y - mean_y) * (*y - mean_y))
            .sum::<A>();

        if ss_tot == A::zero() {
            return Err(Error::Parameters(
                "r2 is undefined for a constant ground truth".to_string(),
            ));
        }

        Ok(A::one() - ss_res / ss_tot)
    }
}

fn check_shapes<A, D: Data<Elem = A>, D2: Data<Elem = A>>(
    prediction: &ArrayBase<D, Ix1>,
    ground_truth: &ArrayBase<D2, Ix1>,
) -> Result<()> {
    if prediction.len() != ground_truth.len() {
        return Err(Error::MismatchedShapes {
            records: ground_truth.len(),
            targets: prediction.len(),
        });
    }
    if prediction.is_empty() {
        return Err(Error::NotEnoughSamples);
    }

    Ok(())
}

fn mean<A: Float, I: ExactSizeIterator<Item = A>>(values: I) -> A {
    let n = values.len();
    values.sum::<A>() / A::cast(n)
}
