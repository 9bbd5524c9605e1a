//! Calendar values used to build consumption endpoint URLs.
//!
//! The portal's daily and monthly history endpoints take date ranges derived
//! from "now". Those values only change when the calendar day does, so the
//! context caches them and `refresh` is a no-op within the same day.

use chrono::{Datelike, Days, NaiveDate};

/// Dates derived from the current day, recomputed at most once per day.
#[derive(Debug, Clone, PartialEq)]
pub struct DateContext {
    today: NaiveDate,
    yesterday: NaiveDate,
    month_first_day: NaiveDate,
    month_last_day: NaiveDate,
}

impl DateContext {
    pub fn new(today: NaiveDate) -> Self {
        // Day 1 always exists for the month `today` belongs to.
        let month_first_day = today.with_day(1).unwrap();
        let month_last_day = last_day_of_month(today);
        Self {
            today,
            yesterday: today - Days::new(1),
            month_first_day,
            month_last_day,
        }
    }

    /// Recomputes the derived dates if the calendar day changed, otherwise
    /// keeps the cached values. Returns whether a recomputation happened.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        if today == self.today {
            return false;
        }
        *self = Self::new(today);
        true
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn yesterday(&self) -> NaiveDate {
        self.yesterday
    }

    pub fn month_first_day(&self) -> NaiveDate {
        self.month_first_day
    }

    pub fn month_last_day(&self) -> NaiveDate {
        self.month_last_day
    }

    /// Current month as a `YYYY-MM` string.
    ///
    /// Older revisions of the monthly consumption endpoint took this form
    /// instead of full start/end dates; it stays public as part of the date
    /// vocabulary for callers pinned to those revisions.
    pub fn year_month(&self) -> String {
        self.today.format("%Y-%m").to_string()
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // First of next month always exists; the day before it is the last day
    // of this month.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap() - Days::new(1)
}
