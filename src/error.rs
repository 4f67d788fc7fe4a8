//! Error type shared by curve evaluation, polar queries and decoding.

use thiserror::Error;

#[cfg(feature = "std")]
type IoError = std::io::Error;

/// Without `std` there is no byte stream to fail.
#[cfg(not(feature = "std"))]
type IoError = core::convert::Infallible;

/// Errors raised while building, sampling or decoding a polar.
#[derive(Debug, Error)]
pub enum PolarError {
    /// A search walked the whole curve without its stopping condition firing.
    #[error("{0}")]
    NotFound(&'static str),

    /// A Bezier parameter outside of `[0, 1]` was requested.
    #[error("the curve parameter must be between 0 and 1")]
    OutOfRange,

    /// Input that cannot form a valid polar.
    #[error("invalid polar: {0}")]
    Invalid(&'static str),

    /// A byte buffer ended before the declared number of records.
    #[error("polar data ended before the declared number of control points")]
    Truncated,

    /// Failure of the underlying reader or writer.
    #[error(transparent)]
    Io(#[from] IoError),
}

impl PolarError {
    /// True for failures of a geometric search to converge within the curve.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PolarError::NotFound(_))
    }
}
