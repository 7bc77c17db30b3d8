use super::{DatasetBase, Float, Records};
use ndarray::{ArrayBase, Axis, Data, Ix2};

/// Implement records for NdArrays
///
/// An array without rows has no features, whatever its number of columns.
impl<F: Float, S: Data<Elem = F>> Records for ArrayBase<S, Ix2> {
    type Elem = F;

    fn nsamples(&self) -> usize {
        self.len_of(Axis(0))
    }

    fn nfeatures(&self) -> usize {
        if self.nsamples() == 0 {
            0
        } else {
            self.len_of(Axis(1))
        }
    }
}

/// Implement records for a DatasetBase
impl<F: Float, D: Records<Elem = F>, T> Records for DatasetBase<D, T> {
    type Elem = F;

    fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }
}

/// Implement records for references
impl<R: Records> Records for &R {
    type Elem = R::Elem;

    fn nsamples(&self) -> usize {
        (*self).nsamples()
    }

    fn nfeatures(&self) -> usize {
        (*self).nfeatures()
    }
}
