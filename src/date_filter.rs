//! The date filter widget: a trigger button and a popover for picking a date range.
//!
//! Ranges can be committed three ways: by choosing a [Preset], by clicking two
//! days in the calendar, or by pasting text such as "01/01/2024 - 05/01/2024".
//! Every committed range is passed to the `on_date_change` callback exactly once.

use time::Date;

use crate::{
    calendar::CalendarCursor,
    date_range::DateRange,
    listeners::{DismissSubscription, Document, DocumentEvent, DocumentEventKind, PointerTarget},
    paste::parse_pasted_range,
    preset::Preset,
    selection::Selection,
};

/// The text shown on the trigger button when no range or label has been set.
pub const DEFAULT_TRIGGER_TEXT: &str = "Select dates";

/// The state that only exists while the popover is open.
#[derive(Debug)]
struct OpenPopover {
    cursor: CalendarCursor,
    selection: Selection,
    detailed: bool,
    dismiss: DismissSubscription,
}

#[derive(Debug)]
enum Popover {
    Closed,
    Open(OpenPopover),
}

/// A date range filter.
///
/// `F` is called with the new range every time a range is committed.
pub struct DateFilter<F>
where
    F: FnMut(DateRange),
{
    committed: Option<DateRange>,
    label: Option<String>,
    popover: Popover,
    document: Document,
    on_date_change: F,
}

impl<F> DateFilter<F>
where
    F: FnMut(DateRange),
{
    /// Create a closed date filter with no range, listening for dismissal events on `document`.
    pub fn new(document: Document, on_date_change: F) -> Self {
        Self {
            committed: None,
            label: None,
            popover: Popover::Closed,
            document,
            on_date_change,
        }
    }

    /// Start with `range` already committed. The callback is not invoked.
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.committed = Some(range);
        self
    }

    /// Show `label` on the trigger button while no range is committed.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The last committed range.
    pub fn committed(&self) -> Option<DateRange> {
        self.committed
    }

    /// Whether the popover is open.
    pub fn is_open(&self) -> bool {
        matches!(self.popover, Popover::Open(_))
    }

    /// The displayed month, if the popover is open.
    pub fn cursor(&self) -> Option<CalendarCursor> {
        self.open_popover().map(|open| open.cursor)
    }

    /// The progress of the calendar gesture, if the popover is open.
    pub fn selection(&self) -> Option<Selection> {
        self.open_popover().map(|open| open.selection)
    }

    /// Whether the popover shows two months instead of one.
    pub fn is_detailed(&self) -> bool {
        self.open_popover().is_some_and(|open| open.detailed)
    }

    /// The months the calendar currently shows, in order.
    ///
    /// Empty while the popover is closed.
    pub fn visible_months(&self) -> Vec<CalendarCursor> {
        match self.open_popover() {
            // The last representable month has no successor to show.
            Some(open) if open.detailed && open.cursor.next() != open.cursor => {
                vec![open.cursor, open.cursor.next()]
            }
            Some(open) => vec![open.cursor],
            None => Vec::new(),
        }
    }

    /// The text shown on the trigger button.
    pub fn trigger_text(&self) -> String {
        match (self.committed, &self.label) {
            (Some(range), _) => range.to_string(),
            (None, Some(label)) => label.clone(),
            (None, None) => DEFAULT_TRIGGER_TEXT.to_owned(),
        }
    }

    /// The optional trigger label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Open the popover, or close it if it is already open.
    pub fn toggle_open(&mut self, today: Date) {
        if self.is_open() {
            self.close();
        } else {
            self.open(today);
        }
    }

    /// Open the popover on the month of the committed range's end, or of `today`.
    ///
    /// Does nothing if the popover is already open.
    pub fn open(&mut self, today: Date) {
        if self.is_open() {
            return;
        }

        let shown_date = self.committed.map_or(today, |range| range.end());
        self.open_at(CalendarCursor::containing(shown_date), false);
    }

    /// Open the popover on a specific month, e.g. when restoring a previous state.
    ///
    /// Replaces any popover that is already open.
    pub fn open_at(&mut self, cursor: CalendarCursor, detailed: bool) {
        self.popover = Popover::Open(OpenPopover {
            cursor,
            selection: Selection::NoAnchor,
            detailed,
            dismiss: self.document.subscribe_dismiss(),
        });
        tracing::debug!("opened date filter on {}", cursor.title());
    }

    /// Close the popover, keeping the committed range.
    pub fn close(&mut self) {
        if self.is_open() {
            self.popover = Popover::Closed;
            tracing::debug!("closed date filter");
        }
    }

    /// Switch between showing one month and two adjacent months.
    pub fn toggle_detailed(&mut self) {
        if let Some(open) = self.open_popover_mut() {
            open.detailed = !open.detailed;
        }
    }

    /// Show the previous month.
    pub fn previous_month(&mut self) {
        if let Some(open) = self.open_popover_mut() {
            open.cursor = open.cursor.previous();
        }
    }

    /// Show the next month.
    pub fn next_month(&mut self) {
        if let Some(open) = self.open_popover_mut() {
            open.cursor = open.cursor.next();
        }
    }

    /// Click a day in the calendar.
    ///
    /// The first click anchors the range and the second commits it.
    /// Ignored while the popover is closed.
    pub fn click_day(&mut self, day: Date) {
        let Some(open) = self.open_popover_mut() else {
            tracing::debug!("ignoring click on {day} while the date filter is closed");
            return;
        };

        let selection = open.selection.click(day);
        open.selection = selection;

        if let Selection::Committed(range) = selection {
            self.commit(range);
        }
    }

    /// Resolve `preset` relative to `today` and commit the range.
    pub fn select_preset(&mut self, preset: Preset, today: Date) {
        let range = preset.resolve(today);
        self.reset_gesture(range);
        self.commit(range);
    }

    /// Commit the range in `text`, e.g. "01/01/2024 - 05/01/2024".
    ///
    /// Text that is not a valid range is ignored.
    pub fn paste(&mut self, text: &str) {
        match parse_pasted_range(text) {
            Ok(range) => {
                self.reset_gesture(range);
                self.commit(range);
            }
            Err(error) => tracing::debug!("ignoring pasted text: {error}"),
        }
    }

    /// Handle a pointer press anywhere in the document.
    ///
    /// A press outside the popover closes it. A press on the trigger button
    /// toggles the popover.
    pub fn pointer_down(&mut self, target: PointerTarget, today: Date) {
        let event = self
            .document
            .dispatch(DocumentEventKind::PointerDown(target));

        if self.should_dismiss(&event) {
            self.close();
        } else if target == PointerTarget::Trigger {
            self.toggle_open(today);
        }
    }

    /// Handle a key press anywhere in the document. Escape closes the popover.
    pub fn key_down(&mut self, key: &str) {
        let event = self
            .document
            .dispatch(DocumentEventKind::KeyDown(key.to_owned()));

        if self.should_dismiss(&event) {
            self.close();
        }
    }

    /// Restore the calendar gesture when rebuilding an open popover, e.g. from a URL.
    ///
    /// Ignored while the popover is closed.
    pub fn restore_anchor(&mut self, anchor: Date) {
        if let Some(open) = self.open_popover_mut() {
            open.selection = Selection::Anchored(anchor);
        }
    }

    fn should_dismiss(&self, event: &DocumentEvent) -> bool {
        self.open_popover()
            .is_some_and(|open| open.dismiss.should_dismiss(event))
    }

    /// Clear any half-finished gesture and show the month `range` ends in.
    fn reset_gesture(&mut self, range: DateRange) {
        if let Some(open) = self.open_popover_mut() {
            open.selection = Selection::Committed(range);
            open.cursor = CalendarCursor::containing(range.end());
        }
    }

    fn commit(&mut self, range: DateRange) {
        tracing::debug!("committed date range {range}");
        self.committed = Some(range);
        (self.on_date_change)(range);
    }

    fn open_popover(&self) -> Option<&OpenPopover> {
        match &self.popover {
            Popover::Open(open) => Some(open),
            Popover::Closed => None,
        }
    }

    fn open_popover_mut(&mut self) -> Option<&mut OpenPopover> {
        match &mut self.popover {
            Popover::Open(open) => Some(open),
            Popover::Closed => None,
        }
    }
}
