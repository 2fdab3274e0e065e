//! Error type for strict lookups in the optics engine.
//!
//! Index computations themselves never fail: missing data propagates as NaN
//! through every derived quantity. The errors below are returned by the
//! strict variants of the string-keyed lookups and by spline construction.

use thiserror::Error;

/// Errors from the optics engine.
#[derive(Debug, Error, PartialEq)]
pub enum OpticsError {
    #[error("Unknown spectral line: '{0}'")]
    UnknownSpectralLine(String),

    #[error("Unknown glass property: '{0}'")]
    UnknownProperty(String),

    #[error("Spline needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("Spline abscissae must be strictly increasing at index {0}")]
    NotIncreasing(usize),

    #[error("Spline inputs differ in length: {xs} abscissae, {ys} ordinates")]
    LengthMismatch { xs: usize, ys: usize },
}
