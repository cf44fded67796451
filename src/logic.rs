//! Logical operators over boolean timelines.
//!
//! AND and OR short-circuit at two layers. Before any timeline work, an
//! eternal-False operand makes AND return eternal False without inspecting
//! the other operand at all (eternal True for OR); the lazy variants extend
//! this to skipping *evaluation* of the right operand, which is what keeps
//! unreachable fact queries out of a session's pending list. Within one
//! slice, a literal False trumps any unknown marker for AND (a literal True
//! for OR); only when no trumping literal exists does the slice fall back
//! to the logic dominance order.
//!
//! AND and OR are implemented independently. They are not De Morgan duals
//! once unknown states are involved, so neither may be derived from the
//! other through NOT.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::certainty::dominant_logic;
use crate::error::TemporaResult;
use crate::knowable::{marker_for, Knowable};
use crate::lift::lift1;
use crate::timeline::Timeline;
use crate::zip::zip2;

fn eternal_literal(t: &Timeline<bool>, value: bool) -> bool {
    t.is_eternal() && t.first().1.is_literal(&value)
}

/// Logical conjunction of two boolean timelines.
///
/// Eternal False on either side wins immediately. Within a slice a literal
/// False beats every unknown marker; a slice of literals is conjoined; any
/// remaining mix collapses under the logic dominance order.
#[must_use]
pub fn and(left: &Timeline<bool>, right: &Timeline<bool>) -> Timeline<bool> {
    if eternal_literal(left, false) || eternal_literal(right, false) {
        return Timeline::known(false);
    }

    let entries = zip2(left, right)
        .into_iter()
        .map(|slice| {
            let out = if slice.left.is_literal(&false) || slice.right.is_literal(&false) {
                Knowable::Known(false)
            } else {
                match (slice.left, slice.right) {
                    (Knowable::Known(a), Knowable::Known(b)) => Knowable::Known(*a && *b),
                    _ => marker_for(dominant_logic([
                        slice.left.certainty(),
                        slice.right.certainty(),
                    ])),
                }
            };
            (slice.date, out)
        })
        .collect();
    Timeline::from_entries_unchecked(entries).lean()
}

/// Logical disjunction of two boolean timelines.
///
/// Eternal True on either side wins immediately; a literal True beats every
/// unknown marker within a slice.
#[must_use]
pub fn or(left: &Timeline<bool>, right: &Timeline<bool>) -> Timeline<bool> {
    if eternal_literal(left, true) || eternal_literal(right, true) {
        return Timeline::known(true);
    }

    let entries = zip2(left, right)
        .into_iter()
        .map(|slice| {
            let out = if slice.left.is_literal(&true) || slice.right.is_literal(&true) {
                Knowable::Known(true)
            } else {
                match (slice.left, slice.right) {
                    (Knowable::Known(a), Knowable::Known(b)) => Knowable::Known(*a || *b),
                    _ => marker_for(dominant_logic([
                        slice.left.certainty(),
                        slice.right.certainty(),
                    ])),
                }
            };
            (slice.date, out)
        })
        .collect();
    Timeline::from_entries_unchecked(entries).lean()
}

/// Logical negation. Negates known booleans; unknown markers pass through
/// unchanged.
#[must_use]
pub fn not(operand: &Timeline<bool>) -> Timeline<bool> {
    lift1(operand, |v| !v)
}

/// Conjunction with a lazily evaluated right operand.
///
/// The right thunk is never invoked when the left operand is the eternal
/// False, so fact queries inside it never register as pending questions.
/// Pruning is deliberately shallow: a False buried inside an operand that
/// was already evaluated does not retroactively prune its siblings.
///
/// # Errors
///
/// Propagates any error from evaluating an operand.
pub fn and_lazy(
    left: impl FnOnce() -> TemporaResult<Timeline<bool>>,
    right: impl FnOnce() -> TemporaResult<Timeline<bool>>,
) -> TemporaResult<Timeline<bool>> {
    let l = left()?;
    if eternal_literal(&l, false) {
        return Ok(l);
    }
    let r = right()?;
    Ok(and(&l, &r))
}

/// Disjunction with a lazily evaluated right operand; the dual of
/// [`and_lazy`] with eternal True as the absorbing element.
///
/// # Errors
///
/// Propagates any error from evaluating an operand.
pub fn or_lazy(
    left: impl FnOnce() -> TemporaResult<Timeline<bool>>,
    right: impl FnOnce() -> TemporaResult<Timeline<bool>>,
) -> TemporaResult<Timeline<bool>> {
    let l = left()?;
    if eternal_literal(&l, true) {
        return Ok(l);
    }
    let r = right()?;
    Ok(or(&l, &r))
}

/// Conditional selection between two timelines of the same domain.
///
/// Three operands, so this rides the general synchronization path. Where
/// the condition is a marker, the marker is the result.
#[must_use]
pub fn if_then_else<T: Clone + PartialEq>(
    condition: &Timeline<bool>,
    then: &Timeline<T>,
    otherwise: &Timeline<T>,
) -> Timeline<T> {
    let mut calendar: BTreeSet<NaiveDate> = BTreeSet::new();
    calendar.extend(condition.dates());
    calendar.extend(then.dates());
    calendar.extend(otherwise.dates());

    let entries = calendar
        .into_iter()
        .map(|date| {
            let out = match condition.at(date) {
                Knowable::Known(true) => then.at(date).clone(),
                Knowable::Known(false) => otherwise.at(date).clone(),
                marker => marker_for(marker.certainty()),
            };
            (date, out)
        })
        .collect();
    Timeline::from_entries_unchecked(entries).lean()
}

/// Conditional selection with lazily evaluated branches.
///
/// When the condition is eternal, only the selected branch is evaluated; an
/// eternal unknown condition evaluates neither branch and returns that
/// marker. A time-varying condition forces both branches.
///
/// # Errors
///
/// Propagates any error from evaluating the condition or a taken branch.
pub fn if_then_else_lazy<T: Clone + PartialEq>(
    condition: impl FnOnce() -> TemporaResult<Timeline<bool>>,
    then: impl FnOnce() -> TemporaResult<Timeline<T>>,
    otherwise: impl FnOnce() -> TemporaResult<Timeline<T>>,
) -> TemporaResult<Timeline<T>> {
    let cond = condition()?;
    if cond.is_eternal() {
        return match &cond.first().1 {
            Knowable::Known(true) => then(),
            Knowable::Known(false) => otherwise(),
            marker => Ok(Timeline::eternal(marker_for(marker.certainty()))),
        };
    }
    let t = then()?;
    let e = otherwise()?;
    Ok(if_then_else(&cond, &t, &e))
}

/// Whether the timeline is `Known(true)` throughout `[from, to)`.
///
/// Any unknown marker in effect during the range collapses the answer to
/// that marker under the general order.
#[must_use]
pub fn is_always_true(t: &Timeline<bool>, from: NaiveDate, to: NaiveDate) -> Knowable<bool> {
    fold_range(t, from, to, |values| values.iter().all(|v| **v))
}

/// Whether the timeline is `Known(true)` at any point in `[from, to)`.
#[must_use]
pub fn is_ever_true(t: &Timeline<bool>, from: NaiveDate, to: NaiveDate) -> Knowable<bool> {
    fold_range(t, from, to, |values| values.iter().any(|v| **v))
}

fn fold_range(
    t: &Timeline<bool>,
    from: NaiveDate,
    to: NaiveDate,
    f: impl FnOnce(&[&bool]) -> bool,
) -> Knowable<bool> {
    let in_effect: Vec<&Knowable<bool>> = std::iter::once(t.at(from))
        .chain(
            t.entries()
                .filter(|(d, _)| *d > from && *d < to)
                .map(|(_, v)| v),
        )
        .collect();

    let knowns: Option<Vec<&bool>> = in_effect.iter().map(|v| v.known()).collect();
    match knowns {
        Some(values) => Knowable::Known(f(&values)),
        None => marker_for(crate::certainty::dominant_general(
            in_effect.iter().map(|v| v.certainty()),
        )),
    }
}
