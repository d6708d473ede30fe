//! The committed date range and the calendar helpers shared by the presets and the calendar.

use std::fmt::{self, Display};

use serde::Serialize;
use time::{Date, Duration, Month, format_description::BorrowedFormatItem, macros::format_description};

/// The format used to display dates to the user, e.g. "05/01/2024".
const DISPLAY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:zero]/[month repr:numerical padding:zero]/[year]");

/// An inclusive range of calendar days.
///
/// The start date is never after the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Create a range spanning `a` and `b`, in either order.
    pub fn new(a: Date, b: Date) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A range covering the single day `date`.
    pub fn single_day(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The first day of the range.
    pub fn start(&self) -> Date {
        self.start
    }

    /// The last day of the range.
    pub fn end(&self) -> Date {
        self.end
    }

    /// Whether `date` falls within the range, including both ends.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_display_date(self.start),
            format_display_date(self.end)
        )
    }
}

/// Format `date` as "DD/MM/YYYY".
pub fn format_display_date(date: Date) -> String {
    date.format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// The first day of the month containing `date`.
pub fn first_of_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

/// The last day of the month containing `date`.
pub fn last_of_month(date: Date) -> Date {
    let last_day = last_day_of_month(date.year(), date.month());
    date.replace_day(last_day).unwrap_or(date)
}

/// The Monday on or before `date`.
pub fn start_of_week(date: Date) -> Date {
    let days_since_monday = date.weekday().number_days_from_monday() as i64;
    date - Duration::days(days_since_monday)
}

pub(crate) fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
