//! k-nearest neighbours classification
//!
//! The classifier is a lazy learner: fitting copies the training samples and all work happens
//! when a query is predicted. The `k` training samples closest to the query vote on its label.
use std::collections::BTreeMap;

use mlkit::{
    metrics::ToConfusionMatrix,
    traits::{Fit, Predict},
    Dataset, DatasetBase, Float, Label,
};
use ndarray::{Array1, ArrayBase, Data, Ix1, Ix2};
use tracing::{debug, trace};

use crate::{distance::Distance, linear::LinearSearch, KnnValidParams, NnError, Result};

/// A k-nearest neighbours classifier
///
/// Created unfit from a checked parameter set with [`KNearestNeighbours::new`], or already fit
/// by calling `fit` on the parameters. Queries are answered by an exhaustive search over the
/// training samples followed by a majority vote. When several labels gather the same number of
/// votes the smallest label wins.
///
/// The classifier owns a copy of its training samples, later changes to the dataset it was fit on
/// don't affect it.
///
/// ```
/// use mlkit::prelude::*;
/// use mlkit_nn::{KNearestNeighbours, KnnParams};
/// use ndarray::array;
///
/// let train = Dataset::new(array![[0., 0.], [10., 10.]], array![0, 1]);
/// let test = Dataset::new(array![[0.1, 0.1], [9.9, 9.9]], array![0, 1]);
///
/// let mut model = KNearestNeighbours::new(KnnParams::new().k(1).check_unwrap());
/// model.fit(&train);
///
/// assert_eq!(model.predict(&array![[1., 2.], [8., 7.]]).unwrap(), array![0, 1]);
/// assert_eq!(model.score(&test).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KNearestNeighbours<F: Float, L: Label, D> {
    params: KnnValidParams<F, D>,
    training: Option<Dataset<F, L>>,
}

impl<F: Float, L: Label, D: Distance<F>> KNearestNeighbours<F, L, D> {
    /// Create an unfit classifier
    pub fn new(params: KnnValidParams<F, D>) -> Self {
        KNearestNeighbours {
            params,
            training: None,
        }
    }

    /// The parameters of the classifier
    pub fn params(&self) -> &KnnValidParams<F, D> {
        &self.params
    }

    /// Returns `true` once the classifier was fit
    pub fn is_fitted(&self) -> bool {
        self.training.is_some()
    }

    /// Store a copy of the dataset as training samples
    ///
    /// Replaces any previous training samples. Neither `k` nor the size of the dataset are
    /// checked here, an unsuitable training set is reported when predicting.
    pub fn fit<S, T>(&mut self, dataset: &DatasetBase<ArrayBase<S, Ix2>, ArrayBase<T, Ix1>>)
    where
        S: Data<Elem = F>,
        T: Data<Elem = L>,
    {
        let records = dataset.records.to_owned();
        let targets = dataset.targets.to_owned();

        debug!(
            nsamples = records.nrows(),
            nfeatures = records.ncols(),
            k = self.params.k(),
            "fit nearest neighbours"
        );

        self.training = Some(Dataset::new(records, targets));
    }

    fn training(&self) -> Result<&Dataset<F, L>> {
        self.training.as_ref().ok_or(NnError::NotFitted)
    }

    /// Returns the index and distance of the `k` training samples closest to `x`
    ///
    /// Sorted by ascending distance, samples at equal distance by ascending index.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    ///
    /// * [`NnError::NotFitted`] if the classifier was never fit
    /// * [`NnError::EmptyTrainingSet`] if it was fit on an empty dataset
    /// * [`NnError::KTooLarge`] if `k` exceeds the number of training samples
    /// * [`NnError::DimensionMismatch`] if `x` has a different number of features
    /// * [`NnError::NanDistance`] if the distance to a training sample is NaN
    pub fn k_nearest<S: Data<Elem = F>>(&self, x: &ArrayBase<S, Ix1>) -> Result<Vec<(usize, F)>> {
        let training = self.training()?;
        let nsamples = training.records.nrows();
        if nsamples == 0 {
            return Err(NnError::EmptyTrainingSet);
        }

        let k = self.params.k();
        if k > nsamples {
            return Err(NnError::KTooLarge { k, nsamples });
        }

        let expected = training.records.ncols();
        if x.len() != expected {
            return Err(NnError::DimensionMismatch {
                expected,
                found: x.len(),
            });
        }

        let search = LinearSearch::new(training.records.view(), self.params.distance());
        let neighbours = search.k_nearest(x.view(), k)?;
        trace!(k, ?neighbours, "selected neighbours");

        Ok(neighbours)
    }

    /// Predict the label of a single sample
    ///
    /// Fails under the same conditions as [`KNearestNeighbours::k_nearest`].
    pub fn predict_sample<S: Data<Elem = F>>(&self, x: &ArrayBase<S, Ix1>) -> Result<L> {
        let neighbours = self.k_nearest(x)?;
        let targets = &self.training()?.targets;

        majority_vote(neighbours.iter().map(|(idx, _)| &targets[*idx]))
    }

    /// Predict the label of every row of `x`, in order
    ///
    /// Fails with the first error of any row, a batch without rows only requires the classifier
    /// to be fit.
    pub fn predict_batch<S: Data<Elem = F>>(&self, x: &ArrayBase<S, Ix2>) -> Result<Array1<L>> {
        self.training()?;

        x.rows()
            .into_iter()
            .map(|row| self.predict_sample(&row))
            .collect::<Result<Vec<_>>>()
            .map(Array1::from)
    }

    /// Fraction of samples of `dataset` whose label is predicted correctly
    ///
    /// Returns zero for an empty dataset, provided the classifier was fit.
    pub fn score<S, T>(
        &self,
        dataset: &DatasetBase<ArrayBase<S, Ix2>, ArrayBase<T, Ix1>>,
    ) -> Result<f64>
    where
        S: Data<Elem = F>,
        T: Data<Elem = L>,
    {
        self.training()?;
        if dataset.records.nrows() == 0 {
            return Ok(0.0);
        }

        let prediction = self.predict_batch(&dataset.records)?;
        let accuracy = prediction.confusion_matrix(&dataset.targets)?.accuracy();
        debug!(nsamples = dataset.records.nrows(), accuracy, "scored dataset");

        Ok(accuracy)
    }
}

/// Label with the most votes, the smallest label among equally popular ones
fn majority_vote<'a, L: Label + 'a>(votes: impl Iterator<Item = &'a L>) -> Result<L> {
    let mut tally = BTreeMap::new();
    for label in votes {
        *tally.entry(label).or_insert(0usize) += 1;
    }

    // labels are visited in ascending order, a later label needs strictly more votes
    let mut winner: Option<(&L, usize)> = None;
    for (label, count) in tally {
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((label, count)),
        }
    }

    winner
        .map(|(label, _)| label.clone())
        .ok_or(NnError::EmptyTrainingSet)
}

impl<F, L, D, S> Predict<&ArrayBase<S, Ix1>, Result<L>> for KNearestNeighbours<F, L, D>
where
    F: Float,
    L: Label,
    D: Distance<F>,
    S: Data<Elem = F>,
{
    fn predict(&self, x: &ArrayBase<S, Ix1>) -> Result<L> {
        self.predict_sample(x)
    }
}

impl<F, L, D, S> Predict<&ArrayBase<S, Ix2>, Result<Array1<L>>> for KNearestNeighbours<F, L, D>
where
    F: Float,
    L: Label,
    D: Distance<F>,
    S: Data<Elem = F>,
{
    fn predict(&self, x: &ArrayBase<S, Ix2>) -> Result<Array1<L>> {
        self.predict_batch(x)
    }
}

impl<F, L, D, S, T> Fit<ArrayBase<S, Ix2>, ArrayBase<T, Ix1>, NnError> for KnnValidParams<F, D>
where
    F: Float,
    L: Label,
    D: Distance<F> + Clone,
    S: Data<Elem = F>,
    T: Data<Elem = L>,
{
    type Object = KNearestNeighbours<F, L, D>;

    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<S, Ix2>, ArrayBase<T, Ix1>>,
    ) -> Result<Self::Object> {
        let mut model = KNearestNeighbours::new(self.clone());
        model.fit(dataset);

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{distance::LInfDist, KnnParams};
    use mlkit::ParamGuard;
    use ndarray::{array, Array2};

    fn fitted(k: usize) -> KNearestNeighbours<f64, i32, crate::distance::L2Dist> {
        let train = Dataset::new(
            array![[0., 0.], [0., 1.], [1., 0.], [10., 10.], [10., 11.]],
            array![0, 0, 0, 1, 1],
        );
        KnnParams::new().k(k).fit(&train).unwrap()
    }

    #[test]
    fn vote_breaks_ties_towards_smallest_label() {
        let labels = [3, 1, 3, 1, 2];
        assert_eq!(majority_vote(labels.iter()).unwrap(), 1);
        assert_eq!(majority_vote([5, 4].iter()).unwrap(), 4);
        assert_eq!(majority_vote(["b", "a", "b"].iter()).unwrap(), "b");
        assert!(majority_vote(Vec::<&i32>::new().into_iter()).is_err());
    }

    #[test]
    fn unfit_classifier() {
        let model: KNearestNeighbours<f64, i32, _> =
            KNearestNeighbours::new(KnnParams::new().k(1).check_unwrap());
        assert!(!model.is_fitted());

        assert!(matches!(
            model.predict_sample(&array![0., 0.]),
            Err(NnError::NotFitted)
        ));
        assert!(matches!(
            model.predict_batch(&Array2::<f64>::zeros((0, 2))),
            Err(NnError::NotFitted)
        ));
        let empty = Dataset::new(Array2::<f64>::zeros((0, 2)), Array1::<i32>::zeros(0));
        assert!(matches!(model.score(&empty), Err(NnError::NotFitted)));
    }

    #[test]
    fn errors_in_check_order() {
        let mut model = KNearestNeighbours::new(KnnParams::new().k(3).check_unwrap());
        model.fit(&Dataset::new(
            Array2::<f64>::zeros((0, 2)),
            Array1::<i32>::zeros(0),
        ));
        assert!(model.is_fitted());
        // empty training set wins over the wrong width
        assert!(matches!(
            model.predict_sample(&array![0., 0., 0.]),
            Err(NnError::EmptyTrainingSet)
        ));

        model.fit(&Dataset::new(array![[0., 0.], [1., 1.]], array![0, 1]));
        // k wins over the wrong width
        assert!(matches!(
            model.predict_sample(&array![0., 0., 0.]),
            Err(NnError::KTooLarge { k: 3, nsamples: 2 })
        ));

        let model = fitted(3);
        assert!(matches!(
            model.predict_sample(&array![0., 0., 0.]),
            Err(NnError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn non_finite_query_is_an_error() {
        let train = Dataset::new(array![[f64::INFINITY], [1.]], array![0, 1]);
        let model = KnnParams::new().k(1).fit(&train).unwrap();

        let err = model.predict_sample(&array![f64::INFINITY]).unwrap_err();
        assert!(matches!(err, NnError::NanDistance { idx: 0 }));
        assert_eq!(err.kind(), mlkit::ErrorKind::InvalidArgument);
        assert!(model.predict_sample(&array![f64::NAN]).is_err());
        assert_eq!(model.predict_sample(&array![2.]).unwrap(), 1);
    }

    #[test]
    fn neighbours_and_votes() {
        let model = fitted(3);

        let neighbours = model.k_nearest(&array![0.1, 0.1]).unwrap();
        assert_eq!(
            neighbours.iter().map(|(idx, _)| *idx).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(model.predict_sample(&array![0.1, 0.1]).unwrap(), 0);
        // the third neighbour belongs to label 0 and is outvoted
        assert_eq!(model.predict_sample(&array![9., 9.]).unwrap(), 1);
    }

    #[test]
    fn metric_changes_neighbours() {
        let train = Dataset::new(array![[3., 3.], [0., 3.5]], array![0, 1]);
        let query = array![0., 0.];

        let euclidean = KnnParams::new().k(1).fit(&train).unwrap();
        let chebyshev = KnnParams::new()
            .k(1)
            .distance(LInfDist)
            .fit(&train)
            .unwrap();

        assert_eq!(euclidean.predict_sample(&query).unwrap(), 1);
        assert_eq!(chebyshev.predict_sample(&query).unwrap(), 0);
    }

    #[test]
    fn predict_trait_on_views() {
        let model = fitted(1);
        let queries = array![[10., 10.5], [0.2, 0.3]];

        let batch: Array1<i32> = model.predict(&queries.view()).unwrap();
        assert_eq!(batch, array![1, 0]);
        let single: i32 = model.predict(&queries.row(0)).unwrap();
        assert_eq!(single, 1);
    }
}
