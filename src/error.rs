//! Error types in mlkit
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classes of failure shared by every crate of the toolkit.
///
/// All failures are contract violations reported synchronously to the caller. None of them
/// are transient, so there is nothing to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied parameter violates a stated precondition
    InvalidArgument,
    /// An operation was attempted before a required prior step
    InvalidState,
}

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
    #[error("number of records ({records}) does not match number of targets ({targets})")]
    MismatchedShapes { records: usize, targets: usize },
    #[error("row {row} has {found} features, but the first row has {expected}")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("test ratio should be in the open range (0, 1), but is {0}")]
    InvalidTestRatio(f64),
    #[error("Not enough samples to compute the metric")]
    NotEnoughSamples,
}

impl Error {
    /// Classifies the error according to [`ErrorKind`]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parameters(_)
            | Error::NdShape(_)
            | Error::MismatchedShapes { .. }
            | Error::RaggedRows { .. }
            | Error::InvalidTestRatio(_)
            | Error::NotEnoughSamples => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::InvalidTestRatio(1.5).to_string(),
            "test ratio should be in the open range (0, 1), but is 1.5"
        );
        assert_eq!(
            Error::RaggedRows {
                row: 3,
                found: 2,
                expected: 4
            }
            .to_string(),
            "row 3 has 2 features, but the first row has 4"
        );
        assert_eq!(
            Error::MismatchedShapes {
                records: 3,
                targets: 2
            }
            .to_string(),
            "number of records (3) does not match number of targets (2)"
        );
    }

    #[test]
    fn every_table_error_is_an_invalid_argument() {
        assert_eq!(Error::InvalidTestRatio(0.0).kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::NotEnoughSamples.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<Error>();
    }
}
