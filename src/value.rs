//! The closed union over the five timeline domains.
//!
//! The algebra itself is statically typed: each operator works on a
//! concrete [`Timeline<T>`]. At the fact boundary, however, a stored fact
//! can belong to any of the five payload domains, so [`TemporalValue`]
//! closes over exactly those and is resolved by exhaustive matching.
//! Combining mismatched domains is a programming error in the caller and
//! surfaces as a validation error at this boundary; it is never recovered
//! from inside the algebra.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::EntitySet;
use crate::timeline::Timeline;

/// A timeline of any payload domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", content = "timeline", rename_all = "snake_case")]
pub enum TemporalValue {
    /// A boolean conclusion, e.g. "is eligible".
    Bool(Timeline<bool>),
    /// A numeric quantity, e.g. an income or a count.
    Number(Timeline<f64>),
    /// A text value, e.g. a filing status.
    Text(Timeline<String>),
    /// A date value, e.g. a deadline.
    Date(Timeline<NaiveDate>),
    /// A set of entity references, e.g. the members of a household.
    Set(Timeline<EntitySet>),
}

impl TemporalValue {
    /// Returns a human-readable domain name.
    #[must_use]
    pub const fn domain_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Set(_) => "set",
        }
    }

    /// Number of breakpoints in the underlying timeline.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(t) => t.len(),
            Self::Number(t) => t.len(),
            Self::Text(t) => t.len(),
            Self::Date(t) => t.len(),
            Self::Set(t) => t.len(),
        }
    }

    /// Always false: timelines carry at least their dawn breakpoint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the underlying timeline is constant for all time.
    #[must_use]
    pub fn is_eternal(&self) -> bool {
        self.len() == 1
    }

    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<&Timeline<bool>> {
        match self {
            Self::Bool(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<&Timeline<f64>> {
        match self {
            Self::Number(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&Timeline<String>> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<&Timeline<NaiveDate>> {
        match self {
            Self::Date(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_set(&self) -> Option<&Timeline<EntitySet>> {
        match self {
            Self::Set(t) => Some(t),
            _ => None,
        }
    }

    /// Consumes the union, returning the boolean timeline or the original
    /// value for the caller's error reporting.
    pub fn into_bool(self) -> Result<Timeline<bool>, Self> {
        match self {
            Self::Bool(t) => Ok(t),
            other => Err(other),
        }
    }

    /// Consumes the union, returning the numeric timeline.
    pub fn into_number(self) -> Result<Timeline<f64>, Self> {
        match self {
            Self::Number(t) => Ok(t),
            other => Err(other),
        }
    }

    /// Consumes the union, returning the text timeline.
    pub fn into_text(self) -> Result<Timeline<String>, Self> {
        match self {
            Self::Text(t) => Ok(t),
            other => Err(other),
        }
    }

    /// Consumes the union, returning the date timeline.
    pub fn into_date(self) -> Result<Timeline<NaiveDate>, Self> {
        match self {
            Self::Date(t) => Ok(t),
            other => Err(other),
        }
    }

    /// Consumes the union, returning the set timeline.
    pub fn into_set(self) -> Result<Timeline<EntitySet>, Self> {
        match self {
            Self::Set(t) => Ok(t),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} timeline ({} breakpoints)", self.domain_name(), self.len())
    }
}

impl From<Timeline<bool>> for TemporalValue {
    fn from(t: Timeline<bool>) -> Self {
        Self::Bool(t)
    }
}

impl From<Timeline<f64>> for TemporalValue {
    fn from(t: Timeline<f64>) -> Self {
        Self::Number(t)
    }
}

impl From<Timeline<String>> for TemporalValue {
    fn from(t: Timeline<String>) -> Self {
        Self::Text(t)
    }
}

impl From<Timeline<NaiveDate>> for TemporalValue {
    fn from(t: Timeline<NaiveDate>) -> Self {
        Self::Date(t)
    }
}

impl From<Timeline<EntitySet>> for TemporalValue {
    fn from(t: Timeline<EntitySet>) -> Self {
        Self::Set(t)
    }
}
