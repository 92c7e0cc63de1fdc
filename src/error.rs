//! Error types for rnetcalc.

use thiserror::Error;

/// Errors reported for invalid query inputs.
///
/// Every variant is a rejection of the inputs themselves; validation happens
/// before any enumeration work starts and no partial results are produced.
/// Capacity truncation during enumeration is deliberate policy, not an error
/// (see [`RNetTable::dropped`](crate::RNetTable::dropped)).
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("catalog contains no resistor values")]
    EmptyCatalog,

    #[error("maximum network size must be at least 1, got {0}")]
    InvalidMaxSize(usize),

    #[error("target resistance must be greater than 0, got {0}")]
    NonPositiveTarget(f64),

    #[error("tolerance must not be negative, got {0}")]
    NegativeTolerance(f64),

    #[error("bit width must be between 2 and 24, got {0}")]
    BitsOutOfRange(u32),

    #[error("base resistance must be greater than 0, got {0}")]
    NonPositiveBase(f64),

    #[error("invalid filter bound: {0}")]
    FilterParse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
