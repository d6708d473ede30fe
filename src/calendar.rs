//! The month shown by the calendar and the day grids rendered for it.

use time::{Date, Month};

use crate::date_range::{first_of_month, last_day_of_month, last_of_month};

/// The month currently displayed by the calendar.
///
/// Moving the cursor never changes the selected dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    first_day: Date,
}

impl CalendarCursor {
    /// A cursor pointing at the month containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            first_day: first_of_month(date),
        }
    }

    /// The displayed year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The displayed month.
    pub fn month(&self) -> Month {
        self.first_day.month()
    }

    /// The first day of the displayed month.
    pub fn first_day(&self) -> Date {
        self.first_day
    }

    /// The month before this one, rolling back a year after January.
    pub fn previous(self) -> Self {
        match self.first_day.previous_day() {
            Some(last_of_previous) => Self::containing(last_of_previous),
            None => self,
        }
    }

    /// The month after this one, rolling over a year after December.
    pub fn next(self) -> Self {
        match last_of_month(self.first_day).next_day() {
            Some(first_of_next) => Self::containing(first_of_next),
            None => self,
        }
    }

    /// The heading shown above the month's grid, e.g. "January 2024".
    pub fn title(&self) -> String {
        format!("{} {}", self.month(), self.year())
    }

    /// The day grid for the displayed month.
    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(*self)
    }
}

/// The days of one month laid out in Monday-first weeks.
///
/// Cells before the first and after the last day of the month are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    cursor: CalendarCursor,
    weeks: Vec<[Option<Date>; 7]>,
}

impl MonthGrid {
    fn new(cursor: CalendarCursor) -> Self {
        let first_day = cursor.first_day();
        let days_in_month = last_day_of_month(cursor.year(), cursor.month());
        let leading_blanks = first_day.weekday().number_days_from_monday() as usize;

        let mut weeks = Vec::with_capacity(6);
        let mut week = [None; 7];
        let mut column = leading_blanks;

        for day in 1..=days_in_month {
            week[column] = first_day.replace_day(day).ok();
            column += 1;

            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }

        if column != 0 {
            weeks.push(week);
        }

        Self { cursor, weeks }
    }

    /// The month this grid lays out.
    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    /// The weeks of the month, Monday first.
    pub fn weeks(&self) -> &[[Option<Date>; 7]] {
        &self.weeks
    }

    /// The days of the month in order.
    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        self.weeks.iter().flatten().flatten().copied()
    }
}

/// The short weekday names used for the grid's column headings.
pub const WEEKDAY_HEADINGS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
