//! Named date range shortcuts, e.g. "Today" or "Last month".

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

use crate::date_range::{DateRange, first_of_month, last_of_month, start_of_week};

/// A named range that resolves to concrete dates relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Just today.
    Today,
    /// Just the day before today.
    Yesterday,
    /// Monday of the current week up to today.
    ThisWeek,
    /// Monday to Sunday of the previous week.
    LastWeek,
    /// The six days before today and today.
    #[serde(rename = "last-7-days")]
    Last7Days,
    /// The 29 days before today and today.
    #[serde(rename = "last-30-days")]
    Last30Days,
    /// The first of the current month up to today.
    ThisMonth,
    /// The whole of the previous month.
    LastMonth,
    /// The first of January up to today.
    ThisYear,
}

impl Preset {
    /// Every preset in the order they are shown to the user.
    pub const ALL: [Preset; 9] = [
        Preset::Today,
        Preset::Yesterday,
        Preset::ThisWeek,
        Preset::LastWeek,
        Preset::Last7Days,
        Preset::Last30Days,
        Preset::ThisMonth,
        Preset::LastMonth,
        Preset::ThisYear,
    ];

    /// Resolve the preset to concrete dates, relative to `today`.
    ///
    /// The returned range never ends after `today`.
    pub fn resolve(self, today: Date) -> DateRange {
        match self {
            Preset::Today => DateRange::single_day(today),
            Preset::Yesterday => DateRange::single_day(today - Duration::days(1)),
            Preset::ThisWeek => DateRange::new(start_of_week(today), today),
            Preset::LastWeek => {
                let this_monday = start_of_week(today);
                DateRange::new(this_monday - Duration::weeks(1), this_monday - Duration::days(1))
            }
            Preset::Last7Days => DateRange::new(today - Duration::days(6), today),
            Preset::Last30Days => DateRange::new(today - Duration::days(29), today),
            // The month is still in progress, so the range stops at today.
            Preset::ThisMonth => DateRange::new(first_of_month(today), today),
            Preset::LastMonth => {
                let last_month_end = first_of_month(today) - Duration::days(1);
                DateRange::new(first_of_month(last_month_end), last_of_month(last_month_end))
            }
            Preset::ThisYear => {
                let start = Date::from_calendar_date(today.year(), Month::January, 1)
                    .unwrap_or(today);
                DateRange::new(start, today)
            }
        }
    }

    /// The name shown on the preset's button.
    pub fn label(self) -> &'static str {
        match self {
            Preset::Today => "Today",
            Preset::Yesterday => "Yesterday",
            Preset::ThisWeek => "This week",
            Preset::LastWeek => "Last week",
            Preset::Last7Days => "Last 7 days",
            Preset::Last30Days => "Last 30 days",
            Preset::ThisMonth => "This month",
            Preset::LastMonth => "Last month",
            Preset::ThisYear => "This year",
        }
    }

    /// The value used for the preset in URL query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Preset::Today => "today",
            Preset::Yesterday => "yesterday",
            Preset::ThisWeek => "this-week",
            Preset::LastWeek => "last-week",
            Preset::Last7Days => "last-7-days",
            Preset::Last30Days => "last-30-days",
            Preset::ThisMonth => "this-month",
            Preset::LastMonth => "last-month",
            Preset::ThisYear => "this-year",
        }
    }
}
