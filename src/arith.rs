//! Arithmetic operators over numeric timelines.
//!
//! Addition, subtraction, and modulo follow the plain lifted pattern:
//! general dominance, then the payload operation. Multiplication and
//! division carry operator-specific edge-case policies that override plain
//! dominance: a known zero factor makes a product zero even when other
//! factors are unknown (mirroring False-trumps-unknown in conjunction), and
//! a known zero denominator makes a quotient Uncertain even when the
//! numerator is unknown. Modulo has no special case; a zero modulus follows
//! IEEE semantics.

use crate::certainty::dominant_general;
use crate::compare::{eq, gt, lt};
use crate::knowable::{marker_for, Knowable};
use crate::lift::{lift1, lift2, lift_n};
use crate::logic::if_then_else;
use crate::timeline::Timeline;
use crate::zip::{zip2, zip_many};

/// `left + right`.
#[must_use]
pub fn add(left: &Timeline<f64>, right: &Timeline<f64>) -> Timeline<f64> {
    lift2(left, right, |a, b| a + b)
}

/// `left - right`.
#[must_use]
pub fn sub(left: &Timeline<f64>, right: &Timeline<f64>) -> Timeline<f64> {
    lift2(left, right, |a, b| a - b)
}

/// `left * right`.
///
/// A known zero on either side makes the slice a known zero even when the
/// other side is unknown.
#[must_use]
pub fn mul(left: &Timeline<f64>, right: &Timeline<f64>) -> Timeline<f64> {
    let entries = zip2(left, right)
        .into_iter()
        .map(|slice| {
            let out = if slice.left.is_literal(&0.0) || slice.right.is_literal(&0.0) {
                Knowable::Known(0.0)
            } else {
                match (slice.left, slice.right) {
                    (Knowable::Known(a), Knowable::Known(b)) => Knowable::Known(a * b),
                    _ => marker_for(dominant_general([
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

/// `left / right`.
///
/// A known zero denominator makes the slice Uncertain; this takes priority
/// over general dominance even when the numerator is unknown.
#[must_use]
pub fn div(left: &Timeline<f64>, right: &Timeline<f64>) -> Timeline<f64> {
    let entries = zip2(left, right)
        .into_iter()
        .map(|slice| {
            let out = if slice.right.is_literal(&0.0) {
                Knowable::Uncertain
            } else {
                match (slice.left, slice.right) {
                    (Knowable::Known(a), Knowable::Known(b)) => Knowable::Known(a / b),
                    _ => marker_for(dominant_general([
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

/// `left % right`. No special casing: a known zero modulus yields the IEEE
/// result (NaN) like any other payload operation.
#[must_use]
pub fn rem(left: &Timeline<f64>, right: &Timeline<f64>) -> Timeline<f64> {
    lift2(left, right, |a, b| a % b)
}

/// Sum of N operands, a fold over the general synchronization path.
#[must_use]
pub fn sum(operands: &[&Timeline<f64>]) -> Timeline<f64> {
    lift_n(operands, |values| values.iter().copied().sum())
}

/// Product of N operands.
///
/// Short-circuits per slice: a known zero anywhere makes the slice a known
/// zero even when other operands are unknown.
#[must_use]
pub fn product(operands: &[&Timeline<f64>]) -> Timeline<f64> {
    if operands.is_empty() {
        return Timeline::known(1.0);
    }

    let entries = zip_many(operands)
        .into_iter()
        .map(|slice| {
            let out = if slice.values.iter().any(|v| v.is_literal(&0.0)) {
                Knowable::Known(0.0)
            } else {
                let knowns: Option<Vec<&f64>> =
                    slice.values.iter().map(|v| v.known()).collect();
                match knowns {
                    Some(factors) => Knowable::Known(factors.iter().copied().product()),
                    None => marker_for(dominant_general(
                        slice.values.iter().map(|v| v.certainty()),
                    )),
                }
            };
            (slice.date, out)
        })
        .collect();
    Timeline::from_entries_unchecked(entries).lean()
}

/// Absolute value.
#[must_use]
pub fn abs(operand: &Timeline<f64>) -> Timeline<f64> {
    lift1(operand, |v| v.abs())
}

/// Pointwise minimum of two numeric timelines.
#[must_use]
pub fn min(left: &Timeline<f64>, right: &Timeline<f64>) -> Timeline<f64> {
    lift2(left, right, |a, b| a.min(*b))
}

/// Pointwise maximum of two numeric timelines.
#[must_use]
pub fn max(left: &Timeline<f64>, right: &Timeline<f64>) -> Timeline<f64> {
    lift2(left, right, |a, b| a.max(*b))
}

/// Rounds up to the next multiple of `multiple`, expressed as a conditional
/// combination of the modulo operator.
#[must_use]
pub fn round_up(operand: &Timeline<f64>, multiple: &Timeline<f64>) -> Timeline<f64> {
    let remainder = rem(operand, multiple);
    let down = sub(operand, &remainder);
    let up = add(&down, multiple);
    if_then_else(&eq(&remainder, &Timeline::known(0.0)), operand, &up)
}

/// Rounds down to the previous multiple of `multiple`.
#[must_use]
pub fn round_down(operand: &Timeline<f64>, multiple: &Timeline<f64>) -> Timeline<f64> {
    let remainder = rem(operand, multiple);
    sub(operand, &remainder)
}

/// Rounds to the nearest multiple of `multiple`. Ties round up unless
/// `break_ties_down` is set.
#[must_use]
pub fn round_to_nearest(
    operand: &Timeline<f64>,
    multiple: &Timeline<f64>,
    break_ties_down: bool,
) -> Timeline<f64> {
    let remainder = rem(operand, multiple);
    let down = sub(operand, &remainder);
    let up = add(&down, multiple);
    let doubled = mul(&remainder, &Timeline::known(2.0));
    let on_tie = if break_ties_down { &down } else { &up };

    if_then_else(
        &eq(&remainder, &Timeline::known(0.0)),
        operand,
        &if_then_else(
            &lt(&doubled, multiple),
            &down,
            &if_then_else(&gt(&doubled, multiple), &up, on_tie),
        ),
    )
}
