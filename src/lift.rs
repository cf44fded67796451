//! The function-lifting combinator.
//!
//! Lifting promotes a pure function over known payloads into a function
//! over timelines. At each synchronized slice the combinator first collapses
//! the operand certainties under the general order; if the result is not
//! `Known` it emits that marker and **does not invoke the function** — a
//! lifted function only ever sees fully known inputs. Every output passes
//! through lean, so operators built here always return minimal timelines.

use crate::certainty::dominant_general;
use crate::knowable::{marker_for, Knowable};
use crate::timeline::Timeline;
use crate::zip::{zip2, zip_many};

/// Lifts a unary function. Walks the single input's own breakpoints
/// directly; with nothing to synchronize, the zip engine is bypassed.
pub fn lift1<A, B: PartialEq>(input: &Timeline<A>, f: impl Fn(&A) -> B) -> Timeline<B> {
    let entries = input
        .entries()
        .map(|(date, value)| {
            let out = match value {
                Knowable::Known(a) => Knowable::Known(f(a)),
                other => marker_for(other.certainty()),
            };
            (*date, out)
        })
        .collect();
    Timeline::from_entries_unchecked(entries).lean()
}

/// Lifts a binary function over the merge-join fast path.
pub fn lift2<A, B, C: PartialEq>(
    left: &Timeline<A>,
    right: &Timeline<B>,
    f: impl Fn(&A, &B) -> C,
) -> Timeline<C> {
    let entries = zip2(left, right)
        .into_iter()
        .map(|slice| {
            let out = match (slice.left, slice.right) {
                (Knowable::Known(a), Knowable::Known(b)) => Knowable::Known(f(a, b)),
                _ => marker_for(dominant_general([
                    slice.left.certainty(),
                    slice.right.certainty(),
                ])),
            };
            (slice.date, out)
        })
        .collect();
    Timeline::from_entries_unchecked(entries).lean()
}

/// Lifts an N-ary function over the general synchronization path.
///
/// With no inputs, `f` is applied once to the empty slice and the result is
/// eternal.
pub fn lift_n<T, U: PartialEq>(inputs: &[&Timeline<T>], f: impl Fn(&[&T]) -> U) -> Timeline<U> {
    if inputs.is_empty() {
        return Timeline::eternal(Knowable::Known(f(&[])));
    }

    let entries = zip_many(inputs)
        .into_iter()
        .map(|slice| {
            let knowns: Option<Vec<&T>> = slice.values.iter().map(|v| v.known()).collect();
            let out = match knowns {
                Some(payloads) => Knowable::Known(f(&payloads)),
                None => marker_for(dominant_general(
                    slice.values.iter().map(|v| v.certainty()),
                )),
            };
            (slice.date, out)
        })
        .collect();
    Timeline::from_entries_unchecked(entries).lean()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::DAWN;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lift1_maps_known_and_passes_markers() {
        let t = Timeline::from_breakpoints([
            (DAWN, Knowable::Known(2.0)),
            (date(2024, 1, 1), Knowable::Unstated),
            (date(2024, 2, 1), Knowable::Known(3.0)),
        ])
        .unwrap();

        let doubled = lift1(&t, |v| v * 2.0);
        assert_eq!(doubled.at(DAWN), &Knowable::Known(4.0));
        assert_eq!(doubled.at(date(2024, 1, 15)), &Knowable::Unstated);
        assert_eq!(doubled.at(date(2024, 2, 1)), &Knowable::Known(6.0));
    }

    #[test]
    fn test_lift2_never_invokes_f_on_marker_slices() {
        let a = Timeline::from_changes(
            Knowable::Known(1.0),
            [(date(2024, 1, 1), Knowable::Stub)],
        )
        .unwrap();
        let b = Timeline::known(10.0);

        let out = lift2(&a, &b, |x: &f64, y: &f64| {
            assert!(x.is_finite() && y.is_finite());
            x + y
        });
        assert_eq!(out.at(DAWN), &Knowable::Known(11.0));
        assert_eq!(out.at(date(2024, 1, 1)), &Knowable::Stub);
    }

    #[test]
    fn test_lift2_uses_general_dominance() {
        let a: Timeline<f64> = Timeline::unstated();
        let b: Timeline<f64> = Timeline::stub();
        let out = lift2(&a, &b, |x, y| x + y);
        // Stub outranks Unstated under the general order.
        assert_eq!(out.at(DAWN), &Knowable::Stub);
    }

    #[test]
    fn test_lift_output_is_lean() {
        // Two different inputs that map to the same output collapse.
        let t = Timeline::from_changes(
            Knowable::Known(1.0),
            [(date(2024, 1, 1), Knowable::Known(-1.0))],
        )
        .unwrap();
        let abs = lift1(&t, |v: &f64| v.abs());
        assert!(abs.is_eternal());
        assert_eq!(abs.at(DAWN), &Knowable::Known(1.0));
    }

    #[test]
    fn test_lift_n_folds_across_inputs() {
        let a = Timeline::known(1.0);
        let b = Timeline::from_changes(
            Knowable::Known(2.0),
            [(date(2024, 6, 1), Knowable::Known(5.0))],
        )
        .unwrap();
        let c = Timeline::known(3.0);

        let total = lift_n(&[&a, &b, &c], |vs| vs.iter().copied().sum::<f64>());
        assert_eq!(total.at(DAWN), &Knowable::Known(6.0));
        assert_eq!(total.at(date(2024, 6, 1)), &Knowable::Known(9.0));
    }

    #[test]
    fn test_lift_n_marker_dominance() {
        let a = Timeline::known(1.0);
        let b: Timeline<f64> = Timeline::uncertain();
        let c: Timeline<f64> = Timeline::unstated();

        let total = lift_n(&[&a, &b, &c], |vs| vs.iter().copied().sum::<f64>());
        assert_eq!(total.at(DAWN), &Knowable::Uncertain);
    }

    #[test]
    fn test_lift_n_empty_input_applies_once() {
        let total: Timeline<f64> = lift_n(&[], |vs: &[&f64]| vs.iter().copied().sum());
        assert!(total.is_eternal());
        assert_eq!(total.at(DAWN), &Knowable::Known(0.0));
    }
}
