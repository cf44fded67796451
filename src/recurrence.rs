//! The interval-generator boundary.
//!
//! Elapsed-time analytics consume interval-indicator numeric timelines:
//! breakpoints mark interval boundaries, the value at each in-span boundary
//! is the interval's ordinal number, and a zero sentinel covers everything
//! outside the generated span. A [`Recurrence`] produces such indicators
//! for the standard calendar units or a custom day step over a bounded
//! historical-to-future span.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{TemporaResult, ValidationError};
use crate::knowable::Knowable;
use crate::timeline::Timeline;

/// A repeating interval unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// Calendar days.
    Day,
    /// Seven-day weeks.
    Week,
    /// Calendar months.
    Month,
    /// Calendar quarters (three months).
    Quarter,
    /// Calendar years.
    Year,
    /// A custom recurrence of every `n` days.
    EveryDays(u32),
}

impl Recurrence {
    /// The `n`th boundary on the grid anchored at `anchor`. Boundaries are
    /// always measured from the anchor rather than the previous boundary,
    /// so month-like units do not drift when a short month clamps a date.
    fn nth_boundary(self, anchor: NaiveDate, n: u32) -> Result<NaiveDate, ValidationError> {
        let next = match self {
            Self::Day => anchor.checked_add_days(Days::new(u64::from(n))),
            Self::Week => anchor.checked_add_days(Days::new(7 * u64::from(n))),
            Self::EveryDays(step) => {
                anchor.checked_add_days(Days::new(u64::from(step) * u64::from(n)))
            }
            Self::Month => anchor.checked_add_months(Months::new(n)),
            Self::Quarter => anchor.checked_add_months(Months::new(3 * n)),
            Self::Year => anchor.checked_add_months(Months::new(12 * n)),
        };
        next.ok_or(ValidationError::DateOverflow { from: anchor })
    }

    /// Generates the interval-indicator timeline covering `[span_start,
    /// span_end)`. Interval boundaries land on the recurrence grid anchored
    /// at `span_start`; the final boundary is the first grid point at or
    /// past `span_end`, where the indicator returns to the zero sentinel.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty span, a zero custom step,
    /// or a span that walks off the representable date range.
    pub fn intervals(
        self,
        span_start: NaiveDate,
        span_end: NaiveDate,
    ) -> TemporaResult<Timeline<f64>> {
        if span_start >= span_end {
            return Err(ValidationError::EmptySpan {
                start: span_start,
                end: span_end,
            }
            .into());
        }
        if let Self::EveryDays(0) = self {
            return Err(ValidationError::ZeroRecurrenceStep.into());
        }

        let mut indicator = Timeline::known(0.0);
        indicator.push(span_start, Knowable::Known(1.0))?;
        let mut n = 1u32;
        loop {
            let boundary = self.nth_boundary(span_start, n)?;
            if boundary >= span_end {
                indicator.push(boundary, Knowable::Known(0.0))?;
                break;
            }
            indicator.push(boundary, Knowable::Known(f64::from(n) + 1.0))?;
            n += 1;
        }
        Ok(indicator)
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
            Self::Year => write!(f, "year"),
            Self::EveryDays(step) => write!(f, "every {step} days"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::DAWN;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_intervals_number_in_order() {
        let t = Recurrence::Day
            .intervals(date(2024, 1, 1), date(2024, 1, 4))
            .unwrap();

        assert_eq!(t.at(DAWN), &Knowable::Known(0.0));
        assert_eq!(t.at(date(2024, 1, 1)), &Knowable::Known(1.0));
        assert_eq!(t.at(date(2024, 1, 2)), &Knowable::Known(2.0));
        assert_eq!(t.at(date(2024, 1, 3)), &Knowable::Known(3.0));
        // Back to the sentinel after the span.
        assert_eq!(t.at(date(2024, 1, 4)), &Knowable::Known(0.0));
    }

    #[test]
    fn test_sentinel_outside_span() {
        let t = Recurrence::Month
            .intervals(date(2024, 1, 1), date(2024, 3, 1))
            .unwrap();

        assert_eq!(t.at(date(2023, 12, 31)), &Knowable::Known(0.0));
        assert_eq!(t.at(date(2024, 2, 15)), &Knowable::Known(2.0));
        assert_eq!(t.at(date(2024, 3, 1)), &Knowable::Known(0.0));
        assert_eq!(t.at(date(2030, 1, 1)), &Knowable::Known(0.0));
    }

    #[test]
    fn test_month_boundaries_follow_calendar() {
        let t = Recurrence::Month
            .intervals(date(2024, 1, 31), date(2024, 4, 1))
            .unwrap();
        // chrono clamps month arithmetic to the end of shorter months.
        let dates: Vec<_> = t.dates().collect();
        assert_eq!(
            dates,
            vec![DAWN, date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]
        );
    }

    #[test]
    fn test_quarter_and_year_step() {
        let q = Recurrence::Quarter
            .intervals(date(2024, 1, 1), date(2024, 12, 31))
            .unwrap();
        assert_eq!(q.at(date(2024, 5, 1)), &Knowable::Known(2.0));

        let y = Recurrence::Year
            .intervals(date(2020, 1, 1), date(2023, 1, 1))
            .unwrap();
        assert_eq!(y.at(date(2022, 6, 1)), &Knowable::Known(3.0));
    }

    #[test]
    fn test_custom_step() {
        let t = Recurrence::EveryDays(14)
            .intervals(date(2024, 1, 1), date(2024, 2, 1))
            .unwrap();
        assert_eq!(t.at(date(2024, 1, 10)), &Knowable::Known(1.0));
        assert_eq!(t.at(date(2024, 1, 20)), &Knowable::Known(2.0));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(Recurrence::Day
            .intervals(date(2024, 1, 1), date(2024, 1, 1))
            .is_err());
        assert!(Recurrence::EveryDays(0)
            .intervals(date(2024, 1, 1), date(2024, 2, 1))
            .is_err());
    }

    #[test]
    fn test_recurrence_display() {
        assert_eq!(format!("{}", Recurrence::Quarter), "quarter");
        assert_eq!(format!("{}", Recurrence::EveryDays(10)), "every 10 days");
    }
}
