//! Elapsed-time and counting analytics.
//!
//! These functions walk an interval-indicator numeric timeline (whose
//! breakpoints mark interval boundaries, with a zero sentinel outside the
//! generated span) against a base timeline, counting or integrating per
//! whole interval.
//!
//! Unlike the per-slice propagation of the lifted operators, every function
//! here applies one coarse short-circuit first: if the analyzed timeline is
//! ever non-known, the *entire* result collapses to the single dominant
//! unknown marker.

use chrono::NaiveDate;

use crate::certainty::dominant_general;
use crate::error::{TemporaResult, ValidationError};
use crate::knowable::{marker_for, Knowable};
use crate::logic::is_always_true;
use crate::timeline::{Timeline, DAWN};

/// The whole-function short-circuit shared by this family: any unknown
/// marker anywhere in `t` collapses the result to the dominant marker.
fn short_circuit<T, U>(t: &Timeline<T>) -> Option<Timeline<U>> {
    if t.is_fully_known() {
        None
    } else {
        Some(Timeline::eternal(marker_for(dominant_general(
            t.entries().map(|(_, v)| v.certainty()),
        ))))
    }
}

/// Consecutive breakpoint pairs of the indicator that lie inside the
/// generated span: the starting value must be a known non-zero interval
/// number. The leading and trailing zero-sentinel regions produce no spans.
fn interval_spans(intervals: &Timeline<f64>) -> Vec<(NaiveDate, NaiveDate)> {
    intervals
        .raw()
        .windows(2)
        .filter_map(|pair| match &pair[0].1 {
            Knowable::Known(number) if *number != 0.0 => Some((pair[0].0, pair[1].0)),
            _ => None,
        })
        .collect()
}

/// Records `value` at `date`, overwriting the dawn seed when the first
/// interval starts at the dawn of time.
fn record(changes: &mut Vec<(NaiveDate, Knowable<f64>)>, date: NaiveDate, value: f64) {
    if date == DAWN {
        changes[0].1 = Knowable::Known(value);
    } else {
        changes.push((date, Knowable::Known(value)));
    }
}

/// Monotonically non-decreasing count of whole intervals throughout which
/// `base` is always true. Never resets; increments by one per qualifying
/// interval, recorded at that interval's start.
#[must_use]
pub fn running_elapsed_intervals(
    base: &Timeline<bool>,
    intervals: &Timeline<f64>,
) -> Timeline<f64> {
    if let Some(short) = short_circuit(base) {
        return short;
    }

    let mut changes = vec![(DAWN, Knowable::Known(0.0))];
    let mut count = 0.0;
    for (start, end) in interval_spans(intervals) {
        if is_always_true(base, start, end).is_literal(&true) {
            count += 1.0;
            record(&mut changes, start, count);
        }
    }
    Timeline::from_entries_unchecked(changes).lean()
}

/// Streak counter: counts like [`running_elapsed_intervals`] but resets to
/// zero the moment an interval fails the always-true test.
#[must_use]
pub fn continuous_elapsed_intervals(
    base: &Timeline<bool>,
    intervals: &Timeline<f64>,
) -> Timeline<f64> {
    if let Some(short) = short_circuit(base) {
        return short;
    }

    let mut changes = vec![(DAWN, Knowable::Known(0.0))];
    let mut streak = 0.0;
    for (start, end) in interval_spans(intervals) {
        streak = if is_always_true(base, start, end).is_literal(&true) {
            streak + 1.0
        } else {
            0.0
        };
        record(&mut changes, start, streak);
    }
    Timeline::from_entries_unchecked(changes).lean()
}

/// Bounded lookback: the sum of the 0/1 per-interval indicator over the
/// last `window` intervals ending at the current one.
///
/// # Errors
///
/// Returns [`ValidationError::ZeroWindow`] if `window` is zero.
pub fn sliding_elapsed_intervals(
    base: &Timeline<bool>,
    intervals: &Timeline<f64>,
    window: usize,
) -> TemporaResult<Timeline<f64>> {
    if window == 0 {
        return Err(ValidationError::ZeroWindow.into());
    }
    if let Some(short) = short_circuit(base) {
        return Ok(short);
    }

    let mut changes = vec![(DAWN, Knowable::Known(0.0))];
    let mut indicators: Vec<f64> = Vec::new();
    let mut in_window = 0.0;
    for (index, (start, end)) in interval_spans(intervals).into_iter().enumerate() {
        let qualified = if is_always_true(base, start, end).is_literal(&true) {
            1.0
        } else {
            0.0
        };
        indicators.push(qualified);
        in_window += qualified;
        if index >= window {
            in_window -= indicators[index - window];
        }
        record(&mut changes, start, in_window);
    }
    Ok(Timeline::from_entries_unchecked(changes).lean())
}

/// Whole intervals satisfied between `from` and `to`, computed as the
/// running counter's value at `to` minus its value at `from`. Valid because
/// the running counter is monotone.
#[must_use]
pub fn total_elapsed_intervals(
    base: &Timeline<bool>,
    intervals: &Timeline<f64>,
    from: NaiveDate,
    to: NaiveDate,
) -> Timeline<f64> {
    let running = running_elapsed_intervals(base, intervals);
    match (running.at(to), running.at(from)) {
        (Knowable::Known(at_end), Knowable::Known(at_start)) => {
            Timeline::known(at_end - at_start)
        }
        (end_value, start_value) => Timeline::eternal(marker_for(dominant_general([
            end_value.certainty(),
            start_value.certainty(),
        ]))),
    }
}

/// Integrates a per-interval `rate` over the intervals whose start falls in
/// `[from, to)`, yielding the eternal total.
#[must_use]
pub fn accumulated(
    rate: &Timeline<f64>,
    intervals: &Timeline<f64>,
    from: NaiveDate,
    to: NaiveDate,
) -> Timeline<f64> {
    if let Some(short) = short_circuit(rate) {
        return short;
    }

    let mut total = 0.0;
    for (start, _) in interval_spans(intervals) {
        if start < from || start >= to {
            continue;
        }
        if let Knowable::Known(value) = rate.at(start) {
            total += value;
        }
    }
    Timeline::known(total)
}

/// Integrates `rate` over a sliding window of the last `window` intervals,
/// maintaining the window total in O(1) per step: the sample leaving the
/// window is subtracted as the entering one is added.
///
/// The result's dawn value is seeded with the first complete window, so a
/// flat rate yields an eternal total. Leading partial windows are not
/// emitted.
///
/// # Errors
///
/// Returns [`ValidationError::ZeroWindow`] if `window` is zero.
pub fn accumulated_over(
    rate: &Timeline<f64>,
    intervals: &Timeline<f64>,
    window: usize,
) -> TemporaResult<Timeline<f64>> {
    if window == 0 {
        return Err(ValidationError::ZeroWindow.into());
    }
    if let Some(short) = short_circuit(rate) {
        return Ok(short);
    }

    let spans = interval_spans(intervals);
    let mut samples: Vec<f64> = Vec::with_capacity(spans.len());
    for (start, _) in &spans {
        if let Knowable::Known(value) = rate.at(*start) {
            samples.push(*value);
        }
    }

    let mut in_window = 0.0;
    let mut head: Option<f64> = None;
    let mut changes: Vec<(NaiveDate, Knowable<f64>)> = Vec::new();
    for (index, value) in samples.iter().enumerate() {
        in_window += value;
        if index >= window {
            in_window -= samples[index - window];
        }
        if index + 1 >= window {
            if head.is_none() {
                head = Some(in_window);
            }
            changes.push((spans[index].0, Knowable::Known(in_window)));
        }
    }

    let Some(head) = head else {
        // Fewer intervals than the window: nothing complete to report.
        return Ok(Timeline::known(0.0));
    };
    let mut entries = vec![(DAWN, Knowable::Known(head))];
    entries.extend(changes);
    Ok(Timeline::from_entries_unchecked(entries).lean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::Recurrence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn true_on(ranges: &[(NaiveDate, NaiveDate)]) -> Timeline<bool> {
        let mut t = Timeline::known(false);
        for &(from, to) in ranges {
            t.push(from, Knowable::Known(true)).unwrap();
            t.push(to, Knowable::Known(false)).unwrap();
        }
        t
    }

    #[test]
    fn test_running_counts_qualifying_days() {
        let day1 = date(2024, 1, 10);
        let day2 = date(2024, 1, 11);
        let day3 = date(2024, 1, 14);
        let day4 = date(2024, 1, 15);
        let base = true_on(&[(day1, day2), (day3, day4)]);

        let days = Recurrence::Day
            .intervals(date(2024, 1, 1), date(2024, 2, 1))
            .unwrap();
        let running = running_elapsed_intervals(&base, &days);

        assert_eq!(
            running.entries().cloned().collect::<Vec<_>>(),
            vec![
                (DAWN, Knowable::Known(0.0)),
                (day1, Knowable::Known(1.0)),
                (day3, Knowable::Known(2.0)),
            ]
        );
    }

    #[test]
    fn test_running_never_resets() {
        let base = true_on(&[(date(2024, 1, 5), date(2024, 1, 8))]);
        let days = Recurrence::Day
            .intervals(date(2024, 1, 1), date(2024, 1, 20))
            .unwrap();
        let running = running_elapsed_intervals(&base, &days);

        // Three qualifying days, then the count holds at 3 forever.
        assert_eq!(running.at(date(2024, 1, 7)), &Knowable::Known(3.0));
        assert_eq!(running.at(date(2030, 1, 1)), &Knowable::Known(3.0));
    }

    #[test]
    fn test_continuous_resets_on_failure() {
        let base = true_on(&[
            (date(2024, 1, 2), date(2024, 1, 4)),
            (date(2024, 1, 5), date(2024, 1, 6)),
        ]);
        let days = Recurrence::Day
            .intervals(date(2024, 1, 1), date(2024, 1, 10))
            .unwrap();
        let streak = continuous_elapsed_intervals(&base, &days);

        assert_eq!(streak.at(date(2024, 1, 3)), &Knowable::Known(2.0));
        // Jan 4 fails, so the streak restarts.
        assert_eq!(streak.at(date(2024, 1, 4)), &Knowable::Known(0.0));
        assert_eq!(streak.at(date(2024, 1, 5)), &Knowable::Known(1.0));
    }

    #[test]
    fn test_sliding_window_bounds_lookback() {
        let base = true_on(&[(date(2024, 1, 2), date(2024, 1, 6))]);
        let days = Recurrence::Day
            .intervals(date(2024, 1, 1), date(2024, 1, 12))
            .unwrap();
        let sliding = sliding_elapsed_intervals(&base, &days, 2).unwrap();

        assert_eq!(sliding.at(date(2024, 1, 3)), &Knowable::Known(2.0));
        // Two days after the stretch ends, the window has emptied.
        assert_eq!(sliding.at(date(2024, 1, 8)), &Knowable::Known(0.0));
    }

    #[test]
    fn test_sliding_rejects_zero_window() {
        let base = Timeline::known(true);
        let days = Recurrence::Day
            .intervals(date(2024, 1, 1), date(2024, 1, 5))
            .unwrap();
        assert!(sliding_elapsed_intervals(&base, &days, 0).is_err());
    }

    #[test]
    fn test_total_matches_running_difference() {
        let base = true_on(&[(date(2024, 1, 3), date(2024, 1, 9))]);
        let days = Recurrence::Day
            .intervals(date(2024, 1, 1), date(2024, 1, 20))
            .unwrap();

        let running = running_elapsed_intervals(&base, &days);
        for (from, to) in [
            (date(2024, 1, 1), date(2024, 1, 20)),
            (date(2024, 1, 4), date(2024, 1, 7)),
            (date(2024, 1, 5), date(2024, 1, 5)),
        ] {
            let total = total_elapsed_intervals(&base, &days, from, to);
            let expected = match (running.at(to), running.at(from)) {
                (Knowable::Known(e), Knowable::Known(s)) => e - s,
                _ => unreachable!(),
            };
            assert_eq!(total.first().1, Knowable::Known(expected), "{from}..{to}");
        }
    }

    #[test]
    fn test_flat_rate_accumulated_over_two_months_is_eternal() {
        let rate = Timeline::known(1000.0);
        let months = Recurrence::Month
            .intervals(date(2024, 1, 1), date(2024, 7, 1))
            .unwrap();

        let total = accumulated_over(&rate, &months, 2).unwrap();
        assert!(total.is_eternal());
        assert_eq!(total.first().1, Knowable::Known(2000.0));
    }

    #[test]
    fn test_accumulated_sums_range() {
        let rate = Timeline::from_changes(
            Knowable::Known(100.0),
            [(date(2024, 3, 1), Knowable::Known(200.0))],
        )
        .unwrap();
        let months = Recurrence::Month
            .intervals(date(2024, 1, 1), date(2024, 5, 1))
            .unwrap();

        // Jan + Feb at 100, Mar + Apr at 200.
        let total = accumulated(&rate, &months, date(2024, 1, 1), date(2024, 5, 1));
        assert_eq!(total.first().1, Knowable::Known(600.0));
    }

    #[test]
    fn test_unknown_base_short_circuits_whole_result() {
        let mut base = Timeline::known(true);
        base.push(date(2024, 1, 5), Knowable::Unstated).unwrap();
        let days = Recurrence::Day
            .intervals(date(2024, 1, 1), date(2024, 1, 10))
            .unwrap();

        let running = running_elapsed_intervals(&base, &days);
        assert!(running.is_eternal());
        assert_eq!(running.first().1, Knowable::Unstated);

        let streak = continuous_elapsed_intervals(&base, &days);
        assert_eq!(streak.first().1, Knowable::Unstated);

        let total = total_elapsed_intervals(&base, &days, date(2024, 1, 1), date(2024, 1, 9));
        assert_eq!(total.first().1, Knowable::Unstated);
    }

    #[test]
    fn test_unknown_rate_short_circuits_accumulation() {
        let mut rate = Timeline::known(50.0);
        rate.push(date(2024, 2, 1), Knowable::Uncertain).unwrap();
        let months = Recurrence::Month
            .intervals(date(2024, 1, 1), date(2024, 6, 1))
            .unwrap();

        let total = accumulated(&rate, &months, date(2024, 1, 1), date(2024, 6, 1));
        assert!(total.is_eternal());
        assert_eq!(total.first().1, Knowable::Uncertain);

        let windowed = accumulated_over(&rate, &months, 3).unwrap();
        assert_eq!(windowed.first().1, Knowable::Uncertain);
    }
}
