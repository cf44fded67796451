//! Equality and ordering operators.
//!
//! Comparisons lift a pure payload comparison over the binary merge-join:
//! general dominance first, then the known-payload comparison. They work
//! for any payload domain with the matching capability — numbers, dates,
//! and strings order; booleans and entity sets only equate.

use crate::lift::lift2;
use crate::timeline::Timeline;

/// `left == right` at every point in time.
#[must_use]
pub fn eq<T: PartialEq>(left: &Timeline<T>, right: &Timeline<T>) -> Timeline<bool> {
    lift2(left, right, |a, b| a == b)
}

/// `left != right` at every point in time.
#[must_use]
pub fn ne<T: PartialEq>(left: &Timeline<T>, right: &Timeline<T>) -> Timeline<bool> {
    lift2(left, right, |a, b| a != b)
}

/// `left < right` at every point in time.
#[must_use]
pub fn lt<T: PartialOrd>(left: &Timeline<T>, right: &Timeline<T>) -> Timeline<bool> {
    lift2(left, right, |a, b| a < b)
}

/// `left <= right` at every point in time.
#[must_use]
pub fn le<T: PartialOrd>(left: &Timeline<T>, right: &Timeline<T>) -> Timeline<bool> {
    lift2(left, right, |a, b| a <= b)
}

/// `left > right` at every point in time.
#[must_use]
pub fn gt<T: PartialOrd>(left: &Timeline<T>, right: &Timeline<T>) -> Timeline<bool> {
    lift2(left, right, |a, b| a > b)
}

/// `left >= right` at every point in time.
#[must_use]
pub fn ge<T: PartialOrd>(left: &Timeline<T>, right: &Timeline<T>) -> Timeline<bool> {
    lift2(left, right, |a, b| a >= b)
}
