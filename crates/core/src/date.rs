use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DateError {
    #[error("date must use the YYYY-MM-DD format")]
    Malformed,

    #[error("date does not exist in the calendar")]
    OutOfRange,
}

//
// ─── CALENDAR DATE ─────────────────────────────────────────────────────────────
//

/// A civil calendar day, identified by its `YYYY-MM-DD` form.
///
/// No time zone or time-of-day information is attached; two dates compare by
/// calendar position alone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from calendar components.
    ///
    /// # Errors
    ///
    /// Returns `DateError::OutOfRange` if the components do not name a real
    /// day, or if the year does not fit the four-digit wire form.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(0..=9999).contains(&year) {
            return Err(DateError::OutOfRange);
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::OutOfRange)
    }

    /// Wraps an already-validated chrono date.
    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying chrono date.
    #[must_use]
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Day of the month, `1..=31`.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The previous calendar day, or `None` at the calendar's lower bound.
    #[must_use]
    pub fn prev_day(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Position within the Monday-started week, `0..=6`.
    #[must_use]
    pub fn weekday_index(&self) -> usize {
        self.0.weekday().num_days_from_monday() as usize
    }

    /// The Monday of the week containing this date.
    ///
    /// Clamps to this date at the calendar's lower bound.
    #[must_use]
    pub fn week_monday(&self) -> Self {
        let back = u64::from(self.0.weekday().num_days_from_monday());
        self.0.checked_sub_days(Days::new(back)).map_or(*self, Self)
    }

    /// The seven days of the Monday-started week containing this date.
    #[must_use]
    pub fn week_dates(&self) -> [Self; 7] {
        let monday = self.week_monday().0;
        std::array::from_fn(|i| {
            Self(
                monday
                    .checked_add_days(Days::new(i as u64))
                    .unwrap_or(monday),
            )
        })
    }
}

impl fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CalendarDate({self})")
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Parses the canonical `YYYY-MM-DD` form and nothing else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(DateError::Malformed);
        }
        if !bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
        {
            return Err(DateError::Malformed);
        }

        let year: i32 = s[0..4].parse().map_err(|_| DateError::Malformed)?;
        let month: u32 = s[5..7].parse().map_err(|_| DateError::Malformed)?;
        let day: u32 = s[8..10].parse().map_err(|_| DateError::Malformed)?;
        Self::from_ymd(year, month, day)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn parses_canonical_form() {
        let d = date("2023-11-14");
        assert_eq!(d, CalendarDate::from_ymd(2023, 11, 14).unwrap());
        assert_eq!(d.to_string(), "2023-11-14");
    }

    #[test]
    fn display_roundtrips() {
        let d = CalendarDate::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(d.to_string().parse::<CalendarDate>().unwrap(), d);
    }

    #[test]
    fn rejects_non_canonical_layouts() {
        for junk in [
            "",
            "2023-1-14",
            "2023-11-4",
            "23-11-14",
            "2023/11/14",
            "2023-11-14T00:00:00",
            "14-11-2023",
            "yyyy-mm-dd",
            "2023-11-1x",
        ] {
            assert_eq!(junk.parse::<CalendarDate>(), Err(DateError::Malformed), "{junk}");
        }
    }

    #[test]
    fn rejects_impossible_days() {
        assert_eq!("2023-02-30".parse::<CalendarDate>(), Err(DateError::OutOfRange));
        assert_eq!("2023-13-01".parse::<CalendarDate>(), Err(DateError::OutOfRange));
        assert_eq!("2023-00-10".parse::<CalendarDate>(), Err(DateError::OutOfRange));
    }

    #[test]
    fn orders_by_calendar_position() {
        assert!(date("2023-11-13") < date("2023-11-14"));
        assert!(date("2023-12-01") > date("2023-11-30"));
    }

    #[test]
    fn prev_day_crosses_month_boundary() {
        assert_eq!(date("2023-11-01").prev_day(), Some(date("2023-10-31")));
        assert_eq!(date("2024-01-01").prev_day(), Some(date("2023-12-31")));
    }

    #[test]
    fn weekday_index_starts_monday() {
        // 2023-11-13 is a Monday.
        assert_eq!(date("2023-11-13").weekday_index(), 0);
        assert_eq!(date("2023-11-14").weekday_index(), 1);
        assert_eq!(date("2023-11-19").weekday_index(), 6);
    }

    #[test]
    fn week_monday_is_stable_across_the_week() {
        let monday = date("2023-11-13");
        assert_eq!(monday.week_monday(), monday);
        assert_eq!(date("2023-11-16").week_monday(), monday);
        // Sunday still belongs to the week that started the previous Monday.
        assert_eq!(date("2023-11-19").week_monday(), monday);
    }

    #[test]
    fn week_dates_span_a_month_boundary() {
        // 2023-10-31 is a Tuesday; its week runs Oct 30 through Nov 5.
        let days = date("2023-10-31").week_dates();
        assert_eq!(days[0], date("2023-10-30"));
        assert_eq!(days[6], date("2023-11-05"));
        let day_numbers: Vec<u32> = days.iter().map(CalendarDate::day).collect();
        assert_eq!(day_numbers, vec![30, 31, 1, 2, 3, 4, 5]);
    }
}
