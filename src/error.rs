//! Error types for tempora.
//!
//! All errors are strongly typed using thiserror. Note that "no definite
//! answer" is never an error in this engine: unknowns are first-class
//! [`Knowable`](crate::Knowable) values that flow through every operator.
//! Errors exist only at the construction and fact-store boundaries.

use chrono::NaiveDate;
use thiserror::Error;

/// Validation errors that occur while constructing timelines, recurrences,
/// or fact keys.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("A timeline must contain at least one breakpoint")]
    EmptyTimeline,

    #[error("A timeline must begin at the dawn of time, found first breakpoint {first}")]
    MissingDawn {
        first: NaiveDate,
    },

    #[error("Breakpoint dates must be strictly increasing: {next} does not follow {previous}")]
    NonIncreasingBreakpoint {
        previous: NaiveDate,
        next: NaiveDate,
    },

    #[error("Relationship name cannot be empty")]
    EmptyRelationship,

    #[error("Fact '{relationship}' holds a {actual} timeline, expected {expected}")]
    DomainMismatch {
        relationship: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Invalid span: start ({start}) must be before end ({end})")]
    EmptySpan {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Recurrence step must be at least one day")]
    ZeroRecurrenceStep,

    #[error("Recurrence stepping past {from} left the representable date range")]
    DateOverflow {
        from: NaiveDate,
    },

    #[error("Sliding window must cover at least one interval")]
    ZeroWindow,
}

/// Errors raised by fact-store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Fact not found: {key}")]
    FactNotFound {
        key: String,
    },

    #[error("Storage backend error: {message}")]
    Backend {
        message: String,
    },
}

/// Top-level error type for tempora.
///
/// This enum encompasses all possible errors that can occur when building
/// timelines or talking to the fact boundary.
#[derive(Debug, Error)]
pub enum TemporaError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl TemporaError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a store error.
    #[must_use]
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Result type alias for tempora operations.
pub type TemporaResult<T> = Result<T, TemporaError>;
