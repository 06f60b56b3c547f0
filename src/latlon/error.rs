use crate::latlon::harness::Counterexample;
use thiserror::Error;

/// OracleError represents the errors raised while building shapes, queries
/// and harness runs.
#[derive(Error, Debug)]
pub enum OracleError {
    /// Latitude outside [-90, 90] (or not a number).
    #[error("invalid latitude {0}; must be between -90.0 and 90.0")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] (or not a number).
    #[error("invalid longitude {0}; must be between -180.0 and 180.0")]
    InvalidLongitude(f64),

    /// A line or ring was built with too few vertices.
    #[error("{kind} needs at least {required} vertices, got {actual}")]
    TooFewVertices {
        kind: &'static str,
        required: usize,
        actual: usize,
    },

    /// Invalid argument provided to a constructor.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed polygon input.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    /// Harness configuration rejected.
    #[error("configuration error: {0}")]
    Config(String),

    /// The system under test disagreed with the oracle.
    #[error("oracle mismatch\n{0}")]
    Mismatch(Box<Counterexample>),
}

/// Result type for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;
