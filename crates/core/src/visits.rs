use std::collections::BTreeSet;

use crate::date::CalendarDate;

/// Outcome of toggling a day in the visit calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitToggle {
    /// The day is now marked as visited.
    Marked,
    /// The day's visit mark was removed.
    Cleared,
}

/// One cell of the Monday-to-Sunday week view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDay {
    pub date: CalendarDate,
    pub visited: bool,
}

/// The set of days on which the learner opened the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitLedger {
    days: BTreeSet<CalendarDate>,
}

impl VisitLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates the ledger from stored dates. Duplicates collapse.
    #[must_use]
    pub fn from_days(days: impl IntoIterator<Item = CalendarDate>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    /// Records a visit. Returns true if the day was not already marked.
    pub fn mark(&mut self, day: CalendarDate) -> bool {
        self.days.insert(day)
    }

    /// Marks or clears a specific day.
    pub fn toggle(&mut self, day: CalendarDate) -> VisitToggle {
        if self.days.remove(&day) {
            VisitToggle::Cleared
        } else {
            self.days.insert(day);
            VisitToggle::Marked
        }
    }

    #[must_use]
    pub fn contains(&self, day: CalendarDate) -> bool {
        self.days.contains(&day)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Visited days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.days.iter().copied()
    }

    /// Number of consecutive visited days ending at `today`.
    ///
    /// An unvisited `today` makes the streak zero regardless of earlier days.
    #[must_use]
    pub fn streak(&self, today: CalendarDate) -> u32 {
        let mut streak = 0;
        let mut cursor = today;
        while self.days.contains(&cursor) {
            streak += 1;
            match cursor.prev_day() {
                Some(prev) => cursor = prev,
                None => break,
            }
        }
        streak
    }

    /// The Monday-to-Sunday week containing `today`, with visit flags.
    #[must_use]
    pub fn week_of(&self, today: CalendarDate) -> [WeekDay; 7] {
        today.week_dates().map(|date| WeekDay {
            date,
            visited: self.days.contains(&date),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
