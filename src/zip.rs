//! The synchronization engine.
//!
//! Combining timelines requires aligning them on a shared event calendar:
//! one slice per date in the union of the inputs' breakpoints, where each
//! component is the value *held* by that input at that date (not
//! necessarily one of its own breakpoints).
//!
//! Two paths produce the same slices:
//!
//! - [`zip2`], a linear merge-join over exactly two inputs. This is the
//!   default for every two-operand operator and is orders of magnitude
//!   faster than the general path on long timelines; see `benches/zip.rs`.
//! - [`zip_many`], the general N-ary fallback that re-derives every input's
//!   value at every calendar date.
//!
//! For two inputs the paths must produce identical slice sequences (after
//! lean); the equivalence suite in `tests/` holds both to that.

use chrono::NaiveDate;

use crate::knowable::Knowable;
use crate::timeline::{breakpoints, Timeline};

/// One synchronized row across two inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice2<'a, A, B> {
    /// Calendar date of this slice.
    pub date: NaiveDate,
    /// Value held by the left input at `date`.
    pub left: &'a Knowable<A>,
    /// Value held by the right input at `date`.
    pub right: &'a Knowable<B>,
}

/// One synchronized row across N inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<'a, T> {
    /// Calendar date of this slice.
    pub date: NaiveDate,
    /// Value held by each input at `date`, in input order.
    pub values: Vec<&'a Knowable<T>>,
}

/// Merges two timelines into aligned slices with a linear merge-join.
///
/// One cursor per input starts at its first entry. Each step emits one
/// slice: if both inputs' next breakpoints coincide, both cursors advance;
/// otherwise only the non-exhausted input with the earlier next breakpoint
/// advances. An exhausted input never advances, since its held value cannot
/// change. Terminates when both inputs are exhausted.
///
/// Precondition (not re-validated here): each input's first breakpoint is
/// the dawn sentinel, which every constructor guarantees.
#[must_use]
pub fn zip2<'a, A, B>(left: &'a Timeline<A>, right: &'a Timeline<B>) -> Vec<Slice2<'a, A, B>> {
    let a = left.raw();
    let b = right.raw();
    let mut slices = Vec::with_capacity(a.len() + b.len());

    let mut ia = 0;
    let mut ib = 0;
    while ia < a.len() || ib < b.len() {
        let next_a = a[ia.min(a.len() - 1)].0;
        let next_b = b[ib.min(b.len() - 1)].0;

        let date = if ia < a.len() && ib < b.len() {
            match next_a.cmp(&next_b) {
                std::cmp::Ordering::Equal => {
                    ia += 1;
                    ib += 1;
                    next_a
                }
                std::cmp::Ordering::Less => {
                    ia += 1;
                    next_a
                }
                std::cmp::Ordering::Greater => {
                    ib += 1;
                    next_b
                }
            }
        } else if ia < a.len() {
            ia += 1;
            next_a
        } else {
            ib += 1;
            next_b
        };

        // Both cursors have consumed their dawn entry by the end of the
        // first step, so ia and ib are at least 1 here.
        slices.push(Slice2 {
            date,
            left: &a[ia - 1].1,
            right: &b[ib - 1].1,
        });
    }

    slices
}

/// Merges N timelines into aligned slices via the general path: for each
/// date in the union calendar, independently evaluate every input's held
/// value. Cost is proportional to breakpoints x N x lookup, which is why
/// two-operand operators use [`zip2`] instead.
#[must_use]
pub fn zip_many<'a, T>(inputs: &[&'a Timeline<T>]) -> Vec<Slice<'a, T>> {
    let calendar = breakpoints(inputs.iter().copied());
    calendar
        .into_iter()
        .map(|date| Slice {
            date,
            values: inputs.iter().map(|t| t.at(date)).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::DAWN;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stepped(changes: &[(NaiveDate, i32)]) -> Timeline<i32> {
        let mut t = Timeline::known(0);
        for &(d, v) in changes {
            t.push(d, Knowable::Known(v)).unwrap();
        }
        t
    }

    #[test]
    fn test_zip2_eternal_pair_yields_single_dawn_slice() {
        let a = Timeline::known(1);
        let b = Timeline::known(2);
        let slices = zip2(&a, &b);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].date, DAWN);
        assert_eq!(slices[0].left, &Knowable::Known(1));
        assert_eq!(slices[0].right, &Knowable::Known(2));
    }

    #[test]
    fn test_zip2_exhausted_input_holds_value() {
        let a = stepped(&[(date(2024, 2, 1), 5), (date(2024, 4, 1), 6)]);
        let b = Timeline::known(100);

        let slices = zip2(&a, &b);
        let dates: Vec<_> = slices.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![DAWN, date(2024, 2, 1), date(2024, 4, 1)]);
        // b is exhausted after dawn; its held value repeats.
        assert!(slices.iter().all(|s| s.right == &Knowable::Known(100)));
    }

    #[test]
    fn test_zip2_coinciding_breakpoints_advance_both() {
        let shared = date(2024, 3, 1);
        let a = stepped(&[(shared, 1)]);
        let b = stepped(&[(shared, 2)]);

        let slices = zip2(&a, &b);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].date, shared);
        assert_eq!(slices[1].left, &Knowable::Known(1));
        assert_eq!(slices[1].right, &Knowable::Known(2));
    }

    #[test]
    fn test_zip2_interleaved_breakpoints_cover_union() {
        let a = stepped(&[(date(2024, 1, 10), 1), (date(2024, 3, 10), 2)]);
        let b = stepped(&[(date(2024, 2, 10), 7)]);

        let slices = zip2(&a, &b);
        let dates: Vec<_> = slices.iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![DAWN, date(2024, 1, 10), date(2024, 2, 10), date(2024, 3, 10)]
        );

        // At b's breakpoint, a holds its January value.
        assert_eq!(slices[2].left, &Knowable::Known(1));
        assert_eq!(slices[2].right, &Knowable::Known(7));
    }

    #[test]
    fn test_zip2_mixed_payload_types() {
        let amounts = Timeline::known(10.0);
        let labels = Timeline::from_changes(
            Knowable::Known("low".to_string()),
            [(date(2024, 5, 1), Knowable::Known("high".to_string()))],
        )
        .unwrap();

        let slices = zip2(&amounts, &labels);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].left, &Knowable::Known(10.0));
    }

    #[test]
    fn test_zip_many_matches_zip2_on_pairs() {
        let a = stepped(&[(date(2024, 1, 5), 1), (date(2024, 6, 5), 2)]);
        let b = stepped(&[(date(2024, 3, 5), 9)]);

        let binary = zip2(&a, &b);
        let general = zip_many(&[&a, &b]);

        assert_eq!(binary.len(), general.len());
        for (bin, gen) in binary.iter().zip(general.iter()) {
            assert_eq!(bin.date, gen.date);
            assert_eq!(bin.left, gen.values[0]);
            assert_eq!(bin.right, gen.values[1]);
        }
    }

    #[test]
    fn test_zip_many_three_inputs() {
        let a = stepped(&[(date(2024, 1, 1), 1)]);
        let b = stepped(&[(date(2024, 2, 1), 2)]);
        let c = stepped(&[(date(2024, 3, 1), 3)]);

        let slices = zip_many(&[&a, &b, &c]);
        assert_eq!(slices.len(), 4);
        let last = &slices[3];
        assert_eq!(last.date, date(2024, 3, 1));
        assert_eq!(
            last.values,
            vec![&Knowable::Known(1), &Knowable::Known(2), &Knowable::Known(3)]
        );
    }

    #[test]
    fn test_zip_many_with_markers() {
        let a: Timeline<i32> = Timeline::unstated();
        let b = stepped(&[(date(2024, 1, 1), 4)]);

        let slices = zip_many(&[&a, &b]);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].values[0], &Knowable::Unstated);
        assert_eq!(slices[1].values[1], &Knowable::Known(4));
    }
}
