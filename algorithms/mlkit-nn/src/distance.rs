//! Distance metrics between two samples
//!
//! Every metric maps two points of equal length to a non-negative scalar and the distance of a
//! point to itself is zero. None of them checks the length of its arguments: the underlying
//! `Zip` panics if the points differ in length.
use std::fmt;

use mlkit::Float;
use ndarray::Zip;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{NnError, Point};

/// A metric measuring how far apart two points are
///
/// Should satisfy the triangle inequality, so the squared Euclidean distance is not a metric.
pub trait Distance<F: Float> {
    /// Distance between `a` and `b`, panics if they are not of equal dimension
    fn distance(&self, a: Point<F>, b: Point<F>) -> F;

    /// Fast distance metric that keeps the order of the distance function
    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        self.distance(a, b)
    }

    /// Converts the result of `rdistance` to `distance`
    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }

    /// Checks the parameters of the metric
    fn validate(&self) -> Result<(), NnError> {
        Ok(())
    }
}

/// Manhattan distance, the sum of absolute differences
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct L1Dist;
impl<F: Float> Distance<F> for L1Dist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &a, &b| acc + (a - b).abs())
    }
}

/// Euclidean distance, the square root of the summed squared differences
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct L2Dist;
impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        self.rdistance(a, b).sqrt()
    }

    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        Zip::from(&a).and(&b).fold(F::zero(), |acc, &a, &b| {
            let diff = a - b;
            acc + diff * diff
        })
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }
}

/// Chebyshev distance, the largest absolute difference
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LInfDist;
impl<F: Float> Distance<F> for LInfDist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &a, &b| acc.max((a - b).abs()))
    }
}

/// Minkowski distance of order `p`
///
/// Generalizes the other metrics: `p = 1` is the Manhattan and `p = 2` the Euclidean distance,
/// with `p` going to infinity it approaches the Chebyshev distance.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LpDist<F>(pub(crate) F);

impl<F: Float> LpDist<F> {
    /// Create a Minkowski distance of order `p`
    ///
    /// Fails with [`NnError::InvalidMinkowskiP`] if `p` is smaller than one or not finite.
    pub fn new(p: F) -> Result<Self, NnError> {
        check_minkowski_p(p)?;

        Ok(LpDist(p))
    }

    /// The order of the distance
    pub fn p(&self) -> F {
        self.0
    }
}

impl<F: Float> Distance<F> for LpDist<F> {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        self.rdist_to_dist(self.rdistance(a, b))
    }

    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &a, &b| acc + (a - b).abs().powf(self.0))
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.powf(F::one() / self.0)
    }

    fn validate(&self) -> Result<(), NnError> {
        check_minkowski_p(self.0)
    }
}

fn check_minkowski_p<F: Float>(p: F) -> Result<(), NnError> {
    // also rejects NaN
    if p.is_finite() && p >= F::one() {
        Ok(())
    } else {
        Err(NnError::InvalidMinkowskiP(p.to_f64().unwrap_or(f64::NAN)))
    }
}

/// The provided metrics, selectable at runtime
///
/// The Minkowski variant holds an [`LpDist`], so its order was checked on construction.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum CommonDistance<F> {
    /// Manhattan distance
    L1Dist,
    /// Euclidean distance
    L2Dist,
    /// Chebyshev distance
    LInfDist,
    /// Minkowski distance
    LpDist(LpDist<F>),
}

impl<F: Float> CommonDistance<F> {
    /// Minkowski distance of order `p`, fails like [`LpDist::new`]
    pub fn minkowski(p: F) -> Result<Self, NnError> {
        LpDist::new(p).map(Self::LpDist)
    }
}

impl<F: Float> Distance<F> for CommonDistance<F> {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        match self {
            Self::L1Dist => L1Dist.distance(a, b),
            Self::L2Dist => L2Dist.distance(a, b),
            Self::LInfDist => LInfDist.distance(a, b),
            Self::LpDist(lp) => lp.distance(a, b),
        }
    }

    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        match self {
            Self::L1Dist => L1Dist.rdistance(a, b),
            Self::L2Dist => L2Dist.rdistance(a, b),
            Self::LInfDist => LInfDist.rdistance(a, b),
            Self::LpDist(lp) => lp.rdistance(a, b),
        }
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        match self {
            Self::L1Dist => L1Dist.rdist_to_dist(rdist),
            Self::L2Dist => L2Dist.rdist_to_dist(rdist),
            Self::LInfDist => LInfDist.rdist_to_dist(rdist),
            Self::LpDist(lp) => lp.rdist_to_dist(rdist),
        }
    }

    fn validate(&self) -> Result<(), NnError> {
        match self {
            Self::LpDist(lp) => lp.validate(),
            _ => Ok(()),
        }
    }
}

/// Wraps any function of two points as a metric
///
/// The function is trusted to behave like a metric, in particular to be non-negative and zero
/// for identical points.
///
/// ```
/// use mlkit_nn::distance::{CustomDist, Distance};
/// use ndarray::array;
///
/// // Canberra distance
/// let canberra = CustomDist::new(|a: ndarray::ArrayView1<f64>, b: ndarray::ArrayView1<f64>| {
///     a.iter()
///         .zip(b.iter())
///         .map(|(x, y)| (x - y).abs() / (x.abs() + y.abs()))
///         .sum::<f64>()
/// });
///
/// let a = array![1., 2.];
/// let b = array![3., 2.];
/// assert_eq!(canberra.distance(a.view(), b.view()), 0.5);
/// ```
#[derive(Clone, Copy)]
pub struct CustomDist<Func>(Func);

impl<Func> CustomDist<Func> {
    pub fn new<F: Float>(func: Func) -> Self
    where
        Func: Fn(Point<F>, Point<F>) -> F,
    {
        CustomDist(func)
    }
}

impl<Func> fmt::Debug for CustomDist<Func> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CustomDist")
    }
}

impl<F: Float, Func: Fn(Point<F>, Point<F>) -> F> Distance<F> for CustomDist<Func> {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        (self.0)(a, b)
    }
}
