use mlkit::ErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NnError>;

/// Error returned when building or querying a nearest neighbour classifier
#[derive(Error, Debug, Clone)]
pub enum NnError {
    #[error("k should be at least 1")]
    InvalidK,
    #[error("Minkowski distance requires a finite p >= 1, but p is {0}")]
    InvalidMinkowskiP(f64),
    #[error("k ({k}) is larger than the number of training samples ({nsamples})")]
    KTooLarge { k: usize, nsamples: usize },
    #[error("the classifier has not been fit")]
    NotFitted,
    #[error("the classifier was fit on an empty dataset")]
    EmptyTrainingSet,
    #[error("query has {found} features, but the training samples have {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("distance to training sample {idx} is NaN")]
    NanDistance { idx: usize },
    #[error(transparent)]
    BaseCrate(#[from] mlkit::Error),
}

impl NnError {
    /// Classifies the error according to [`ErrorKind`]
    pub fn kind(&self) -> ErrorKind {
        match self {
            NnError::NotFitted | NnError::EmptyTrainingSet => ErrorKind::InvalidState,
            NnError::InvalidK
            | NnError::InvalidMinkowskiP(_)
            | NnError::KTooLarge { .. }
            | NnError::DimensionMismatch { .. }
            | NnError::NanDistance { .. } => ErrorKind::InvalidArgument,
            NnError::BaseCrate(err) => err.kind(),
        }
    }
}
