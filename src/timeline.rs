//! The step-function timeline.
//!
//! A [`Timeline<T>`] is an ordered list of `(date, value)` breakpoints with
//! strictly increasing dates whose first date is the [`DAWN`] sentinel. It
//! denotes a step function: the value at date `d` is the entry with the
//! greatest date `<= d`. A timeline with exactly one breakpoint is *eternal*
//! (constant for all time).
//!
//! Operators consume timelines immutably and produce new ones. Appending
//! breakpoints via [`Timeline::push`] is only used while building a literal
//! or importing an external fact.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TemporaResult, ValidationError};
use crate::knowable::Knowable;

/// The start-of-time sentinel. Every timeline's first breakpoint sits here.
pub const DAWN: NaiveDate = NaiveDate::MIN;

/// A value that varies over time, represented as a step function.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tempora::{Knowable, Timeline};
///
/// let hired = NaiveDate::from_ymd_opt(2022, 5, 1).unwrap();
/// let employed = Timeline::from_changes(
///     Knowable::Known(false),
///     [(hired, Knowable::Known(true))],
/// )
/// .unwrap();
///
/// assert_eq!(employed.at(hired), &Knowable::Known(true));
/// assert_eq!(
///     employed.at(hired.pred_opt().unwrap()),
///     &Knowable::Known(false)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline<T> {
    entries: Vec<(NaiveDate, Knowable<T>)>,
}

impl<T> Timeline<T> {
    /// Creates a timeline that holds `value` for all time.
    #[must_use]
    pub fn eternal(value: Knowable<T>) -> Self {
        Self {
            entries: vec![(DAWN, value)],
        }
    }

    /// Creates a timeline that holds the literal `value` for all time.
    #[must_use]
    pub fn known(value: T) -> Self {
        Self::eternal(Knowable::Known(value))
    }

    /// The eternal `Unstated` timeline, the open-world default for a fact
    /// nobody has supplied.
    #[must_use]
    pub fn unstated() -> Self {
        Self::eternal(Knowable::Unstated)
    }

    /// The eternal `Uncertain` timeline.
    #[must_use]
    pub fn uncertain() -> Self {
        Self::eternal(Knowable::Uncertain)
    }

    /// The eternal `Stub` timeline.
    #[must_use]
    pub fn stub() -> Self {
        Self::eternal(Knowable::Stub)
    }

    /// Builds a timeline from explicit breakpoints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `entries` is empty, does not begin
    /// at [`DAWN`], or its dates are not strictly increasing.
    pub fn from_breakpoints(
        entries: impl IntoIterator<Item = (NaiveDate, Knowable<T>)>,
    ) -> TemporaResult<Self> {
        let entries: Vec<_> = entries.into_iter().collect();
        let Some((first, _)) = entries.first() else {
            return Err(ValidationError::EmptyTimeline.into());
        };
        if *first != DAWN {
            return Err(ValidationError::MissingDawn { first: *first }.into());
        }
        for pair in entries.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(ValidationError::NonIncreasingBreakpoint {
                    previous: pair[0].0,
                    next: pair[1].0,
                }
                .into());
            }
        }
        Ok(Self { entries })
    }

    /// Builds a timeline holding `initial` from the dawn of time, then
    /// switching value at each of `changes` (which must be strictly
    /// increasing and later than [`DAWN`]).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the change dates are not strictly
    /// increasing.
    pub fn from_changes(
        initial: Knowable<T>,
        changes: impl IntoIterator<Item = (NaiveDate, Knowable<T>)>,
    ) -> TemporaResult<Self> {
        let mut entries = vec![(DAWN, initial)];
        entries.extend(changes);
        Self::from_breakpoints(entries)
    }

    /// Internal constructor for entries whose invariants are inherited from
    /// an already-validated walk (lift and zip outputs).
    pub(crate) fn from_entries_unchecked(entries: Vec<(NaiveDate, Knowable<T>)>) -> Self {
        debug_assert!(!entries.is_empty());
        debug_assert_eq!(entries[0].0, DAWN);
        Self { entries }
    }

    /// Appends a breakpoint. Construction-time only: used while building a
    /// literal or importing an external fact, never on a timeline an
    /// operator has produced.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonIncreasingBreakpoint`] if `date` does
    /// not come strictly after the last breakpoint.
    pub fn push(&mut self, date: NaiveDate, value: Knowable<T>) -> TemporaResult<()> {
        let (last, _) = self.entries[self.entries.len() - 1];
        if date <= last {
            return Err(ValidationError::NonIncreasingBreakpoint {
                previous: last,
                next: date,
            }
            .into());
        }
        self.entries.push((date, value));
        Ok(())
    }

    /// Number of breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a timeline has at least its dawn breakpoint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if this timeline is constant for all time.
    #[must_use]
    pub fn is_eternal(&self) -> bool {
        self.entries.len() == 1
    }

    /// The first (dawn) entry.
    #[must_use]
    pub fn first(&self) -> &(NaiveDate, Knowable<T>) {
        &self.entries[0]
    }

    /// The last entry.
    #[must_use]
    pub fn last(&self) -> &(NaiveDate, Knowable<T>) {
        &self.entries[self.entries.len() - 1]
    }

    /// Iterates over `(date, value)` breakpoints in order.
    pub fn entries(&self) -> impl Iterator<Item = &(NaiveDate, Knowable<T>)> {
        self.entries.iter()
    }

    /// Iterates over breakpoint dates in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.iter().map(|(d, _)| *d)
    }

    /// Slice access for the synchronization engine.
    pub(crate) fn raw(&self) -> &[(NaiveDate, Knowable<T>)] {
        &self.entries
    }

    /// The value held at `date`: the entry with the greatest breakpoint
    /// `<= date`, found by binary search.
    #[must_use]
    pub fn at(&self, date: NaiveDate) -> &Knowable<T> {
        let idx = self.entries.partition_point(|(d, _)| *d <= date);
        // idx >= 1 because the first breakpoint is DAWN == NaiveDate::MIN.
        &self.entries[idx - 1].1
    }

    /// Returns true if every breakpoint holds a `Known` literal.
    #[must_use]
    pub fn is_fully_known(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_known())
    }

    /// Canonicalizes by deleting any breakpoint whose value equals the
    /// immediately preceding one. Idempotent; never increases the
    /// breakpoint count.
    #[must_use]
    pub fn lean(mut self) -> Self
    where
        T: PartialEq,
    {
        self.entries.dedup_by(|current, previous| current.1 == previous.1);
        self
    }
}

impl<T: Clone> Timeline<T> {
    /// The value held at a date that is itself time-varying.
    ///
    /// If `when` is not eternal, its *first* entry's date is used rather
    /// than performing a proper time-varying lookup. This mirrors the
    /// long-standing behavior of multi-valued date lookups; see the
    /// suspicious-lookup test before relying on it.
    ///
    /// If the selected entry of `when` is not `Known`, that unknown marker
    /// is returned.
    #[must_use]
    pub fn at_timeline(&self, when: &Timeline<NaiveDate>) -> Knowable<T> {
        let (_, date) = when.first();
        match date {
            Knowable::Known(d) => self.at(*d).clone(),
            Knowable::Unstated => Knowable::Unstated,
            Knowable::Uncertain => Knowable::Uncertain,
            Knowable::Stub => Knowable::Stub,
        }
    }
}

/// The union of the inputs' breakpoint dates, sorted and deduplicated: the
/// event calendar driving multi-timeline computation.
#[must_use]
pub fn breakpoints<'a, T: 'a>(
    timelines: impl IntoIterator<Item = &'a Timeline<T>>,
) -> Vec<NaiveDate> {
    let mut calendar = BTreeSet::new();
    for timeline in timelines {
        calendar.extend(timeline.dates());
    }
    calendar.into_iter().collect()
}
