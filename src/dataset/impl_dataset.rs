use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Data, Ix1, Ix2};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use tracing::debug;

use super::{Dataset, DatasetBase, DatasetView, Float, Label, Records};
use crate::error::{Error, Result};

impl<F: Float, L: Label> Dataset<F, L> {
    /// Create a new dataset from records and targets
    ///
    /// # Panics
    ///
    /// Panics if the number of records does not match the number of targets.
    pub fn new(records: Array2<F>, targets: Array1<L>) -> Self {
        assert_eq!(
            records.nrows(),
            targets.len(),
            "The number of records must match the number of targets."
        );

        DatasetBase { records, targets }
    }

    /// Create a new dataset from parsed rows and their labels
    ///
    /// Every row must have the width of the first row and there has to be exactly one label per
    /// row, otherwise an error is returned and no dataset is created.
    pub fn from_rows(rows: Vec<Vec<F>>, labels: Vec<L>) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(Error::MismatchedShapes {
                records: rows.len(),
                targets: labels.len(),
            });
        }

        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(Error::RaggedRows {
                row,
                found,
                expected: width,
            });
        }

        let nrows = rows.len();
        let flat = rows.into_iter().flatten().collect::<Vec<_>>();
        let records = Array2::from_shape_vec((nrows, width), flat)?;

        Ok(DatasetBase {
            records,
            targets: Array1::from(labels),
        })
    }

    /// Returns a read only view of the dataset
    pub fn view(&self) -> DatasetView<'_, F, L> {
        DatasetBase {
            records: self.records.view(),
            targets: self.targets.view(),
        }
    }
}

impl<F: Float, L: Label> From<(Array2<F>, Array1<L>)> for Dataset<F, L> {
    fn from(rec_tar: (Array2<F>, Array1<L>)) -> Self {
        Dataset::new(rec_tar.0, rec_tar.1)
    }
}

impl<F, L, D, S> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>
where
    F: Float,
    L: Label,
    D: Data<Elem = F>,
    S: Data<Elem = L>,
{
    /// Return references to the records
    pub fn records(&self) -> &ArrayBase<D, Ix2> {
        &self.records
    }

    /// Return references to the targets
    pub fn targets(&self) -> &ArrayBase<S, Ix1> {
        &self.targets
    }

    /// Iterate over the samples, each row paired with its label
    pub fn sample_iter<'a>(&'a self) -> impl Iterator<Item = (ArrayView1<'a, F>, &'a L)>
    where
        L: 'a,
    {
        self.records.outer_iter().zip(self.targets.iter())
    }

    /// Count the occurrences of every label, ordered by label
    pub fn label_frequencies(&self) -> BTreeMap<L, usize> {
        let mut freqs = BTreeMap::new();
        for label in self.targets.iter() {
            *freqs.entry(label.clone()).or_insert(0) += 1;
        }

        freqs
    }

    /// Return a shuffled copy of the dataset
    ///
    /// Rows are permuted with a Fisher-Yates shuffle driven by `rng`, every record stays paired
    /// with its target.
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Dataset<F, L> {
        let indices = permutation(self.nsamples(), rng);

        self.gather(&indices)
    }

    /// Split dataset into two disjoint chunks
    ///
    /// This function splits the observations in a dataset into two disjoint chunks. The splitting
    /// threshold is calculated with the `ratio`. For example a ratio of `0.9` allocates 90% to the
    /// first chunks and 10% to the second. This is often used in training, validation splitting
    /// procedures. The rows keep their order, shuffle the dataset beforehand for a random split.
    pub fn split_with_ratio(&self, ratio: f32) -> (Dataset<F, L>, Dataset<F, L>) {
        let nsamples = self.nsamples();
        let n = ((nsamples as f32 * ratio).ceil() as usize).min(nsamples);
        let indices = (0..nsamples).collect::<Vec<_>>();
        let (first, second) = indices.split_at(n);

        (self.gather(first), self.gather(second))
    }

    /// Split the dataset into a training and a held-out part
    ///
    /// The rows are permuted with a Fisher-Yates shuffle driven by `Xoshiro256Plus` seeded with
    /// `seed`, so the same seed always yields the same partition. The held-out part contains the
    /// last `floor(nsamples * test_ratio)` permuted rows, the training part all others, both in
    /// permuted order. Each row of the dataset appears in exactly one of the two parts and both
    /// parts own copies of their data.
    ///
    /// Ratios close to zero or one may produce an empty part, which is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTestRatio`] if `test_ratio` is not in the open range `(0, 1)`.
    pub fn train_test_split(
        &self,
        test_ratio: f64,
        seed: u64,
    ) -> Result<(Dataset<F, L>, Dataset<F, L>)> {
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(Error::InvalidTestRatio(test_ratio));
        }

        let nsamples = self.nsamples();
        let test_size = (nsamples as f64 * test_ratio).floor() as usize;
        let train_size = nsamples - test_size;

        let mut rng = Xoshiro256Plus::seed_from_u64(seed);
        let indices = permutation(nsamples, &mut rng);
        let (train, test) = indices.split_at(train_size);

        debug!(nsamples, train_size, test_size, seed, "split dataset");

        Ok((self.gather(train), self.gather(test)))
    }

    /// Keep only the samples whose label is contained in `labels`
    pub fn with_labels(&self, labels: &[L]) -> Dataset<F, L> {
        let indices = self
            .targets
            .iter()
            .enumerate()
            .filter(|(_, label)| labels.contains(label))
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();

        self.gather(&indices)
    }

    /// Copy the samples at `indices`, in that order, into a new dataset
    fn gather(&self, indices: &[usize]) -> Dataset<F, L> {
        let records = Array2::from_shape_fn((indices.len(), self.records.ncols()), |(i, j)| {
            self.records[(indices[i], j)]
        });
        let targets = indices
            .iter()
            .map(|&idx| self.targets[idx].clone())
            .collect::<Array1<_>>();

        DatasetBase { records, targets }
    }
}

/// Fisher-Yates permutation of `0..n`
///
/// Walks the indices from the back and swaps each position `i` with a uniformly drawn position
/// in `0..=i`.
pub(crate) fn permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices = (0..n).collect::<Vec<_>>();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        indices.swap(i, j);
    }

    indices
}
