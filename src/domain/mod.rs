/// Domain module containing the calendar primitives of the progress engine
///
/// This module defines day identifiers, view modes, habits, completion
/// records and the date-range generator. Everything here is pure: no clock,
/// no I/O, no logging.

pub mod habit;
pub mod range;
pub mod record;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use range::*;
pub use record::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur while building domain values
///
/// Only malformed caller input produces an error. Sparse data (no habits,
/// no records) is a normal state and never reaches this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed date '{0}': expected a real calendar date in YYYY-MM-DD form")]
    MalformedDate(String),

    #[error("Invalid range: end {end} precedes start {start}")]
    InvalidRange { start: String, end: String },

    #[error("Date out of supported range: {0}")]
    DateOutOfRange(String),

    #[error("Invalid view mode: {0}")]
    InvalidViewMode(String),

    #[error("Invalid direction: {0}")]
    InvalidDirection(String),
}
