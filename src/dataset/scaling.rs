//! In-place rescaling of feature columns

use tracing::debug;

use super::{Dataset, Float, Label, Records};

impl<F: Float, L: Label> Dataset<F, L> {
    /// Rescale every feature column to the range `[0, 1]`
    ///
    /// Each value `x` of a column is replaced by `(x - min) / (max - min)`, with `min` and `max`
    /// taken over that column. Constant columns are left untouched. Labels are not affected and
    /// an empty dataset is left as it is.
    ///
    /// Normalizing an already normalized dataset does not change it.
    pub fn normalize(&mut self) {
        if self.nsamples() == 0 {
            return;
        }

        for mut column in self.records.columns_mut() {
            let (min, max) = column.fold((F::infinity(), F::neg_infinity()), |(min, max), &x| {
                (min.min(x), max.max(x))
            });
            // constant feature, don't scale
            if max > min {
                let range = max - min;
                column.mapv_inplace(|x| (x - min) / range);
            }
        }

        debug!(
            nsamples = self.nsamples(),
            nfeatures = self.nfeatures(),
            "normalized features to [0, 1]"
        );
    }

    /// Rescale every feature column to zero mean and unit standard deviation
    ///
    /// Each value `x` of a column is replaced by `(x - mean) / std`, where `std` is the sample
    /// standard deviation (normalized by `nsamples - 1`). Constant columns are left untouched, a
    /// standard deviation within rounding error of the column's magnitude counts as zero. The
    /// sample standard deviation is only defined for two or more samples, smaller datasets are
    /// left as they are.
    pub fn standardize(&mut self) {
        let nsamples = self.nsamples();
        if nsamples < 2 {
            return;
        }

        for mut column in self.records.columns_mut() {
            let mean = column.sum() / F::cast(nsamples);
            let std = column.std(F::one());
            let magnitude = column.fold(F::zero(), |max, &x| max.max(x.abs()));
            // constant feature, don't scale
            if std <= F::epsilon() * F::cast(nsamples) * magnitude {
                continue;
            }
            column.mapv_inplace(|x| (x - mean) / std);
        }

        debug!(
            nsamples,
            nfeatures = self.nfeatures(),
            "standardized features"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::Dataset;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2, Axis};
    use ndarray_rand::{rand::SeedableRng, rand_distr::Uniform, RandomExt};
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn test_normalize() {
        let mut dataset = Dataset::new(
            array![[1., -1., 2.], [2., 0., 2.], [3., 1., 2.], [5., 3., 2.]],
            array![0, 1, 0, 1],
        );
        dataset.normalize();

        assert_abs_diff_eq!(
            dataset.records,
            array![
                [0., 0., 2.],
                [0.25, 0.25, 2.],
                [0.5, 0.5, 2.],
                [1., 1., 2.]
            ]
        );
        assert_eq!(dataset.targets, array![0, 1, 0, 1]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        let records = Array2::random_using((40, 5), Uniform::new(-10., 25.), &mut rng);
        let mut dataset = Dataset::new(records, Array1::from_elem(40, 1usize));

        dataset.normalize();
        let once = dataset.records.clone();
        dataset.normalize();

        assert_abs_diff_eq!(dataset.records, once, epsilon = 1e-12);
        for column in once.columns() {
            let min = column.fold(f64::INFINITY, |a, &b| a.min(b));
            let max = column.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            assert_abs_diff_eq!(min, 0.);
            assert_abs_diff_eq!(max, 1.);
        }
    }

    #[test]
    fn test_standardize() {
        let mut dataset = Dataset::new(
            array![[1., -1., 2.], [2., 0., 0.], [0., 1., -1.]],
            array![0, 0, 1],
        );
        dataset.standardize();

        let means = dataset.records.mean_axis(Axis(0)).unwrap();
        let std_devs = dataset.records.std_axis(Axis(0), 1.);
        assert_abs_diff_eq!(means, array![0., 0., 0.], epsilon = 1e-12);
        assert_abs_diff_eq!(std_devs, array![1., 1., 1.], epsilon = 1e-12);
        // sample std of the first column is 1
        assert_abs_diff_eq!(dataset.records.column(0), array![0., 1., -1.], epsilon = 1e-12);
    }

    #[test]
    fn standardize_leaves_constant_columns() {
        let mut dataset = Dataset::new(
            array![[0.1, 4.], [0.1, 6.], [0.1, 8.]],
            array!["a", "b", "a"],
        );
        dataset.standardize();

        assert_abs_diff_eq!(dataset.records.column(0), array![0.1, 0.1, 0.1]);
        assert_abs_diff_eq!(dataset.records.column(1), array![-1., 0., 1.], epsilon = 1e-12);
    }

    #[test]
    fn standardize_tiny_and_offset_columns() {
        let mut dataset = Dataset::new(
            array![[1e-17, 1e8 + 0.1], [2e-17, 1e8 + 0.1], [3e-17, 1e8 + 0.1]],
            array![0, 1, 0],
        );
        dataset.standardize();

        // small scale is not the same as constant
        assert_abs_diff_eq!(dataset.records.column(0), array![-1., 0., 1.], epsilon = 1e-9);
        assert_eq!(dataset.records.column(1), array![1e8 + 0.1, 1e8 + 0.1, 1e8 + 0.1]);
    }

    #[test]
    fn rescaling_empty_or_single_sample_is_noop() {
        let mut empty = Dataset::new(Array2::<f64>::zeros((0, 3)), Array1::<i32>::zeros(0));
        empty.normalize();
        empty.standardize();
        assert_eq!(empty.records.dim(), (0, 3));

        let mut single = Dataset::new(array![[3., 7.]], array![1]);
        single.standardize();
        assert_eq!(single.records, array![[3., 7.]]);
        single.normalize();
        assert_eq!(single.records, array![[3., 7.]]);
    }
}
