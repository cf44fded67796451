//! The tagged value cell.
//!
//! A [`Knowable<T>`] is either a `Known` literal payload or one of the three
//! payload-free unknown markers. The sum type makes the "payload present iff
//! known" invariant structural: there is no way to build a marker that also
//! carries a value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::certainty::Certainty;

/// A value that may be unknown.
///
/// # Examples
///
/// ```
/// use tempora::{Certainty, Knowable};
///
/// let age = Knowable::Known(42.0);
/// assert!(age.is_known());
/// assert_eq!(age.certainty(), Certainty::Known);
///
/// let missing: Knowable<f64> = Knowable::Unstated;
/// assert_eq!(missing.known(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Knowable<T> {
    /// A literal value.
    Known(T),
    /// No fact has been supplied.
    Unstated,
    /// Conflicting or ambiguous input exists.
    Uncertain,
    /// The covering rule logic is deliberately unimplemented.
    Stub,
}

impl<T> Knowable<T> {
    /// Returns the certainty tag of this cell.
    #[must_use]
    pub const fn certainty(&self) -> Certainty {
        match self {
            Self::Known(_) => Certainty::Known,
            Self::Unstated => Certainty::Unstated,
            Self::Uncertain => Certainty::Uncertain,
            Self::Stub => Certainty::Stub,
        }
    }

    /// Returns true if a literal value is present.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Returns the literal payload, if present.
    #[must_use]
    pub const fn known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the cell and returns the literal payload, if present.
    #[must_use]
    pub fn into_known(self) -> Option<T> {
        match self {
            Self::Known(v) => Some(v),
            _ => None,
        }
    }

    /// Converts from `&Knowable<T>` to `Knowable<&T>`.
    #[must_use]
    pub const fn as_ref(&self) -> Knowable<&T> {
        match self {
            Self::Known(v) => Knowable::Known(v),
            Self::Unstated => Knowable::Unstated,
            Self::Uncertain => Knowable::Uncertain,
            Self::Stub => Knowable::Stub,
        }
    }

    /// Applies `f` to a `Known` payload, passing markers through unchanged.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Knowable<U> {
        match self {
            Self::Known(v) => Knowable::Known(f(v)),
            Self::Unstated => Knowable::Unstated,
            Self::Uncertain => Knowable::Uncertain,
            Self::Stub => Knowable::Stub,
        }
    }

    /// Returns true if this cell holds exactly the given literal.
    #[must_use]
    pub fn is_literal(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        matches!(self, Self::Known(v) if v == value)
    }
}

/// Builds the payload-free cell for a non-`Known` dominant certainty.
///
/// Callers gate on slices that carry at least one marker, and the dominance
/// orders return `Known` only when every input is `Known`.
pub(crate) fn marker_for<T>(dominant: Certainty) -> Knowable<T> {
    match dominant {
        Certainty::Unstated => Knowable::Unstated,
        Certainty::Uncertain => Knowable::Uncertain,
        Certainty::Stub => Knowable::Stub,
        Certainty::Known => unreachable!("marker requested for a fully known slice"),
    }
}

impl<T> From<T> for Knowable<T> {
    fn from(v: T) -> Self {
        Self::Known(v)
    }
}

impl<T: fmt::Display> fmt::Display for Knowable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{v}"),
            Self::Unstated => write!(f, "unstated"),
            Self::Uncertain => write!(f, "uncertain"),
            Self::Stub => write!(f, "stub"),
        }
    }
}
