use std::marker::PhantomData;

use mlkit::{Float, ParamGuard};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{distance::Distance, distance::L2Dist, NnError};

/// A verified hyper-parameter set ready for fitting a k-nearest neighbours classifier
///
/// See [`KnnParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct KnnValidParams<F, D> {
    k: usize,
    distance: D,
    #[cfg_attr(feature = "serde", serde(skip))]
    phantom: PhantomData<F>,
}

impl<F: Float, D: Distance<F>> KnnValidParams<F, D> {
    /// Number of neighbours voting on a label
    pub fn k(&self) -> usize {
        self.k
    }

    /// Metric used to compare samples
    pub fn distance(&self) -> &D {
        &self.distance
    }
}

/// A hyper-parameter set for the k-nearest neighbours classifier
///
/// # Defaults
///
/// * `k`: 5
/// * `distance`: Euclidean distance ([`L2Dist`])
///
/// # Errors
///
/// Checking fails with [`NnError::InvalidK`] if `k` is zero and with
/// [`NnError::InvalidMinkowskiP`] if the metric is a Minkowski distance of order smaller than one.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct KnnParams<F, D>(KnnValidParams<F, D>);

impl<F: Float> KnnParams<F, L2Dist> {
    /// Create a parameter set with the default values
    pub fn new() -> Self {
        Self::with_distance(L2Dist)
    }
}

impl<F: Float> Default for KnnParams<F, L2Dist> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, D: Distance<F>> KnnParams<F, D> {
    /// Create a parameter set with `k = 5` and the given metric
    pub fn with_distance(distance: D) -> Self {
        KnnParams(KnnValidParams {
            k: 5,
            distance,
            phantom: PhantomData,
        })
    }

    /// Set the number of neighbours voting on a label
    pub fn k(mut self, k: usize) -> Self {
        self.0.k = k;

        self
    }

    /// Replace the metric
    pub fn distance<D2: Distance<F>>(self, distance: D2) -> KnnParams<F, D2> {
        KnnParams(KnnValidParams {
            k: self.0.k,
            distance,
            phantom: PhantomData,
        })
    }
}

impl<F: Float, D: Distance<F>> ParamGuard for KnnParams<F, D> {
    type Checked = KnnValidParams<F, D>;
    type Error = NnError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.k == 0 {
            return Err(NnError::InvalidK);
        }
        self.0.distance.validate()?;

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
