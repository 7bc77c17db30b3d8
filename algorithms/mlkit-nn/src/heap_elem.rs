use std::cmp::Ordering;

use mlkit::Float;
use noisy_float::{checkers::NumChecker, NoisyFloat};

/// Heap entry ordered by its distance first and its element second
pub(crate) struct HeapElem<D: Ord, T: Ord> {
    pub(crate) dist: D,
    pub(crate) elem: T,
}

impl<D: Ord, T: Ord> PartialEq for HeapElem<D, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<D: Ord, T: Ord> Eq for HeapElem<D, T> {}

impl<D: Ord, T: Ord> PartialOrd for HeapElem<D, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: Ord, T: Ord> Ord for HeapElem<D, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .cmp(&other.dist)
            .then_with(|| self.elem.cmp(&other.elem))
    }
}

/// Distance of a training sample to the query, keyed by the index of the sample
///
/// The largest entry sits on top of a `BinaryHeap`, so among equal distances the sample with the
/// higher index is evicted first.
pub(crate) type MaxHeapElem<F> = HeapElem<NoisyFloat<F, NumChecker>, usize>;

impl<F: Float> MaxHeapElem<F> {
    /// Returns `None` if the distance is NaN
    pub(crate) fn new(dist: F, idx: usize) -> Option<Self> {
        NoisyFloat::try_new(dist).map(|dist| Self { dist, elem: idx })
    }
}
