//! The two-click gesture used to pick a range from the calendar.

use time::Date;

use crate::date_range::DateRange;

/// Progress of a range selection made by clicking two days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// No day has been clicked yet.
    #[default]
    NoAnchor,
    /// The first day has been clicked and the second click is pending.
    Anchored(Date),
    /// The second click completed the range. The next click starts a new gesture.
    Committed(DateRange),
}

impl Selection {
    /// Advance the gesture with a click on `day`.
    pub fn click(self, day: Date) -> Self {
        match self {
            Selection::NoAnchor | Selection::Committed(_) => Selection::Anchored(day),
            Selection::Anchored(anchor) => Selection::Committed(DateRange::new(anchor, day)),
        }
    }

    /// The pending first click, if any.
    pub fn anchor(&self) -> Option<Date> {
        match self {
            Selection::Anchored(anchor) => Some(*anchor),
            Selection::NoAnchor | Selection::Committed(_) => None,
        }
    }
}
