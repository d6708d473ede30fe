//! URL encoding of the date filter's state and of the actions sent by the page.
//!
//! The server keeps no per-user state: every request carries the widget state
//! in its query string, the handler rebuilds the widget, applies one action and
//! renders the result.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    calendar::CalendarCursor,
    date_filter::DateFilter,
    date_range::DateRange,
    listeners::{Document, PointerTarget},
    preset::Preset,
};

/// The date filter's state as it appears in a URL query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterState {
    /// Whether the popover is open.
    #[serde(default)]
    pub open: bool,
    /// Whether the popover shows two months.
    #[serde(default)]
    pub detailed: bool,
    /// The first day of the displayed month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Date>,
    /// The first click of an unfinished calendar gesture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Date>,
    /// The start of the committed range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Date>,
    /// The end of the committed range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Date>,
    /// The text shown on the trigger button while no range is committed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FilterState {
    /// Capture the state of `filter`.
    pub fn from_filter<F>(filter: &DateFilter<F>) -> Self
    where
        F: FnMut(DateRange),
    {
        let committed = filter.committed();

        Self {
            open: filter.is_open(),
            detailed: filter.is_detailed(),
            cursor: filter.cursor().map(|cursor| cursor.first_day()),
            anchor: filter.selection().and_then(|selection| selection.anchor()),
            start: committed.map(|range| range.start()),
            end: committed.map(|range| range.end()),
            label: filter.label().map(str::to_owned),
        }
    }

    /// Rebuild the widget described by this state.
    ///
    /// A committed range is only restored when both `start` and `end` are set.
    /// `today` decides the displayed month when the popover is open but no
    /// month was given.
    pub fn into_filter<F>(self, today: Date, on_date_change: F) -> DateFilter<F>
    where
        F: FnMut(DateRange),
    {
        let mut filter = DateFilter::new(Document::new(), on_date_change);

        if let (Some(start), Some(end)) = (self.start, self.end) {
            filter = filter.with_range(DateRange::new(start, end));
        }

        if let Some(label) = self.label {
            filter = filter.with_label(label);
        }

        if self.open {
            match self.cursor {
                Some(cursor) => filter.open_at(CalendarCursor::containing(cursor), self.detailed),
                None => {
                    filter.open(today);

                    if self.detailed {
                        filter.toggle_detailed();
                    }
                }
            }

            if let Some(anchor) = self.anchor {
                filter.restore_anchor(anchor);
            }
        }

        filter
    }

    /// Encode the state as a URL query string, without the leading '?'.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self)
            .inspect_err(|error| tracing::error!("could not encode date filter state: {error}"))
            .unwrap_or_default()
    }

    /// The URL for sending `action` to `route` from this state.
    pub fn action_url(&self, route: &str, action: &ActionParams) -> String {
        let action_query = serde_urlencoded::to_string(action)
            .inspect_err(|error| tracing::error!("could not encode date filter action: {error}"))
            .unwrap_or_default();

        join_query(route, &[&self.to_query_string(), &action_query])
    }

    /// The URL for `route` with this state and no action.
    pub fn to_url(&self, route: &str) -> String {
        join_query(route, &[&self.to_query_string()])
    }
}

fn join_query(route: &str, parts: &[&str]) -> String {
    let query = parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        route.to_owned()
    } else {
        format!("{route}?{query}")
    }
}

/// An interaction with the date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterAction {
    /// The trigger button was clicked.
    ToggleOpen,
    /// The popover should close.
    Close,
    /// The detailed calendar button was clicked.
    ToggleDetailed,
    /// The previous month button was clicked.
    PreviousMonth,
    /// The next month button was clicked.
    NextMonth,
    /// A day was clicked. Needs `day`.
    Day,
    /// A preset was chosen. Needs `preset`.
    Preset,
    /// A pointer was pressed somewhere in the document. Needs `target`.
    PointerDown,
    /// A key was pressed somewhere in the document. Needs `key`.
    KeyDown,
}

/// The query parameters describing one action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionParams {
    /// The action to apply. Nothing happens when it is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<FilterAction>,
    /// The clicked day for [FilterAction::Day].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Date>,
    /// The chosen preset for [FilterAction::Preset].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    /// Where the pointer was pressed for [FilterAction::PointerDown].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PointerTarget>,
    /// The pressed key for [FilterAction::KeyDown].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ActionParams {
    /// An action that needs no extra parameters.
    pub fn new(action: FilterAction) -> Self {
        Self {
            action: Some(action),
            ..Default::default()
        }
    }

    /// A click on `day`.
    pub fn day(day: Date) -> Self {
        Self {
            day: Some(day),
            ..Self::new(FilterAction::Day)
        }
    }

    /// A click on `preset`.
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset: Some(preset),
            ..Self::new(FilterAction::Preset)
        }
    }

    /// A pointer press on `target`.
    pub fn pointer_down(target: PointerTarget) -> Self {
        Self {
            target: Some(target),
            ..Self::new(FilterAction::PointerDown)
        }
    }

    /// A press of `key`.
    pub fn key_down(key: &str) -> Self {
        Self {
            key: Some(key.to_owned()),
            ..Self::new(FilterAction::KeyDown)
        }
    }

    /// Apply the action to `filter`.
    ///
    /// Actions missing their parameter are ignored.
    pub fn apply<F>(&self, filter: &mut DateFilter<F>, today: Date)
    where
        F: FnMut(DateRange),
    {
        let Some(action) = self.action else {
            return;
        };

        match (action, self.day, self.preset, self.target, self.key.as_deref()) {
            (FilterAction::ToggleOpen, ..) => filter.toggle_open(today),
            (FilterAction::Close, ..) => filter.close(),
            (FilterAction::ToggleDetailed, ..) => filter.toggle_detailed(),
            (FilterAction::PreviousMonth, ..) => filter.previous_month(),
            (FilterAction::NextMonth, ..) => filter.next_month(),
            (FilterAction::Day, Some(day), ..) => filter.click_day(day),
            (FilterAction::Preset, _, Some(preset), ..) => filter.select_preset(preset, today),
            (FilterAction::PointerDown, _, _, Some(target), _) => {
                filter.pointer_down(target, today)
            }
            (FilterAction::KeyDown, .., Some(key)) => filter.key_down(key),
            (action, ..) => {
                tracing::debug!("ignoring date filter action {action:?} without its parameter")
            }
        }
    }
}

/// The form sent when text is pasted into the date filter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasteForm {
    /// The pasted text.
    pub text: String,
}
