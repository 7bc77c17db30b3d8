//! Exhaustive nearest neighbour search
use std::collections::BinaryHeap;

use mlkit::Float;
use ndarray::ArrayView2;

use crate::{distance::Distance, heap_elem::MaxHeapElem, NnError, Point, Result};

/// Compares a query against every row of a batch of points
///
/// Only the `k` best candidates are kept in a bounded max-heap, so a query costs `O(n log k)`
/// heap operations on top of the `n` distance evaluations.
pub struct LinearSearch<'a, F: Float, D: Distance<F>> {
    batch: ArrayView2<'a, F>,
    dist_fn: &'a D,
}

impl<'a, F: Float, D: Distance<F>> LinearSearch<'a, F, D> {
    /// Search the rows of `batch` with the metric `dist_fn`
    pub fn new(batch: ArrayView2<'a, F>, dist_fn: &'a D) -> Self {
        LinearSearch { batch, dist_fn }
    }

    /// Returns the index and distance of the `k` rows closest to `point`
    ///
    /// The result is sorted by ascending distance. Rows at equal distance are ordered by their
    /// index and when only some of them fit into the `k` results the lower indices are kept. At
    /// most `nrows` results are returned.
    ///
    /// Fails with [`NnError::NanDistance`] if the metric yields NaN for any row, which happens
    /// for example when the point or a row contains NaN, or both contain an infinity.
    pub fn k_nearest(&self, point: Point<F>, k: usize) -> Result<Vec<(usize, F)>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut heap = BinaryHeap::with_capacity(k.min(self.batch.nrows()));
        for (idx, row) in self.batch.rows().into_iter().enumerate() {
            let candidate = MaxHeapElem::new(self.dist_fn.rdistance(point.view(), row), idx)
                .ok_or(NnError::NanDistance { idx })?;

            if heap.len() < k {
                heap.push(candidate);
            } else if let Some(mut worst) = heap.peek_mut() {
                if candidate < *worst {
                    *worst = candidate;
                }
            }
        }

        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| (e.elem, self.dist_fn.rdist_to_dist(e.dist.raw())))
            .collect())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, arr2, Array1, Array2};
    use ndarray_rand::{rand::SeedableRng, rand_distr::Uniform, RandomExt};
    use rand_xoshiro::Xoshiro256Plus;

    use super::*;
    use crate::distance::{L1Dist, L2Dist};

    #[test]
    fn nearest_in_order() {
        let points = arr2(&[[0.0, 2.0], [10.0, 4.0], [4.0, 5.0]]);
        let nn = LinearSearch::new(points.view(), &L2Dist);

        let out = nn.k_nearest(points.row(0), 2).unwrap();
        assert_eq!(out.iter().map(|(idx, _)| *idx).collect::<Vec<_>>(), vec![0, 2]);
        assert_abs_diff_eq!(out[0].1, 0.0);
        assert_abs_diff_eq!(out[1].1, 5.0);
    }

    #[test]
    fn k_larger_than_batch() {
        let points = arr2(&[[1.0], [3.0]]);
        let nn = LinearSearch::new(points.view(), &L1Dist);

        assert_eq!(nn.k_nearest(arr1(&[0.0]).view(), 5).unwrap().len(), 2);
        assert!(nn.k_nearest(arr1(&[0.0]).view(), 0).unwrap().is_empty());
    }

    #[test]
    fn ties_keep_lower_index() {
        // all rows at distance 1 from the origin
        let points = arr2(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0], [5.0, 5.0]]);
        let nn = LinearSearch::new(points.view(), &L2Dist);

        let out = nn.k_nearest(arr1(&[0.0, 0.0]).view(), 3).unwrap();
        assert_eq!(out.iter().map(|(idx, _)| *idx).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn matches_full_sort() {
        let mut rng = Xoshiro256Plus::seed_from_u64(40);
        let distr = Uniform::new(-500., 500.);
        let points = Array2::random_using((500, 3), distr, &mut rng);
        let query = Array1::random_using(3, distr, &mut rng);
        let nn = LinearSearch::new(points.view(), &L2Dist);

        let mut expected = points
            .rows()
            .into_iter()
            .enumerate()
            .map(|(idx, row)| (idx, L2Dist.distance(query.view(), row)))
            .collect::<Vec<_>>();
        expected.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then(a.0.cmp(&b.0)));

        let out = nn.k_nearest(query.view(), 17).unwrap();
        assert_eq!(out.len(), 17);
        for ((idx, dist), (exp_idx, exp_dist)) in out.iter().zip(expected.iter()) {
            assert_eq!(idx, exp_idx);
            assert_abs_diff_eq!(*dist, *exp_dist, epsilon = 1e-9);
        }
    }

    #[test]
    fn nan_distance_is_an_error() {
        let points = arr2(&[[1.0], [f64::INFINITY], [3.0]]);
        let nn = LinearSearch::new(points.view(), &L2Dist);

        // infinity minus infinity
        let err = nn.k_nearest(arr1(&[f64::INFINITY]).view(), 1).unwrap_err();
        assert!(matches!(err, NnError::NanDistance { idx: 1 }));

        // infinite but well-defined distances are fine
        let out = nn.k_nearest(arr1(&[0.0]).view(), 3).unwrap();
        assert_eq!(out.iter().map(|(idx, _)| *idx).collect::<Vec<_>>(), vec![0, 2, 1]);
    }
}
