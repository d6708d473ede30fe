//! HTML rendering for the date filter.

use maud::{Markup, html};
use time::Date;

use crate::{
    calendar::{CalendarCursor, WEEKDAY_HEADINGS},
    date_filter::DateFilter,
    date_range::{DateRange, format_display_date},
    endpoints,
    filter_query::{ActionParams, FilterAction, FilterState},
    html::{BUTTON_ICON_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE},
    listeners::PointerTarget,
    preset::Preset,
};

/// The ID of the element the date filter's HTMX requests swap.
pub const DATE_FILTER_ID: &str = "date-filter";

const TRIGGER_STYLE: &str = "inline-flex items-center gap-2 px-4 py-2 text-sm \
    font-medium text-gray-900 bg-white rounded border border-gray-300 \
    hover:bg-gray-100 dark:bg-gray-800 dark:text-white dark:border-gray-600 \
    dark:hover:bg-gray-700";

const POPOVER_STYLE: &str = "absolute z-20 mt-2 flex flex-col gap-4 p-4 \
    bg-white rounded-lg shadow dark:bg-gray-800 dark:border dark:border-gray-700";

const PRESET_BUTTON_STYLE: &str = "w-full px-3 py-1 text-left text-sm rounded \
    text-gray-700 hover:bg-gray-100 dark:text-gray-200 dark:hover:bg-gray-700";

const DAY_BUTTON_STYLE: &str = "w-8 h-8 text-sm rounded-full \
    text-gray-900 hover:bg-blue-100 dark:text-white dark:hover:bg-blue-900";

const DAY_IN_RANGE_STYLE: &str = "w-8 h-8 text-sm rounded-full \
    text-white bg-blue-500 hover:bg-blue-600 dark:bg-blue-600";

const DAY_ANCHOR_STYLE: &str = "w-8 h-8 text-sm rounded-full \
    text-blue-700 ring-2 ring-blue-500 dark:text-blue-300";

/// Render the date filter: its trigger button and, when open, the popover.
pub fn date_filter_view<F>(filter: &DateFilter<F>, today: Date) -> Markup
where
    F: FnMut(DateRange),
{
    let state = FilterState::from_filter(filter);
    let toggle_url = state.action_url(
        endpoints::DATE_FILTER_API,
        &ActionParams::new(FilterAction::ToggleOpen),
    );
    let is_open = filter.is_open();

    html! {
        div
            id=(DATE_FILTER_ID)
            class="relative inline-block"
            hx-target={ "#" (DATE_FILTER_ID) }
            hx-swap="outerHTML"
            data-open=(is_open)
        {
            button
                type="button"
                aria-label="open date filter"
                aria-haspopup="dialog"
                aria-expanded=(is_open)
                hx-get=(toggle_url)
                class=(TRIGGER_STYLE)
            {
                span data-trigger-text { (filter.trigger_text()) }
            }

            @if is_open {
                (popover_view(filter, &state, today))
            }
        }
    }
}

fn popover_view<F>(filter: &DateFilter<F>, state: &FilterState, today: Date) -> Markup
where
    F: FnMut(DateRange),
{
    let route = endpoints::DATE_FILTER_API;
    let outside_url = state.action_url(route, &ActionParams::pointer_down(PointerTarget::Outside));
    let escape_url = state.action_url(route, &ActionParams::key_down("Escape"));
    let paste_url = state.to_url(endpoints::DATE_FILTER_PASTE);
    let anchor = filter.selection().and_then(|selection| selection.anchor());
    let committed = filter.committed();
    let is_detailed = filter.is_detailed();

    html! {
        div id="date-filter-popover" role="dialog" aria-label="date filter" class=(POPOVER_STYLE)
        {
            // Document-level listeners, only rendered while the popover is open.
            div
                hidden
                data-dismiss="pointerdown"
                hx-get=(outside_url)
                hx-trigger={ "pointerdown[!target.closest('#" (DATE_FILTER_ID) "')] from:document" }
            {}
            div
                hidden
                data-dismiss="keydown"
                hx-get=(escape_url)
                hx-trigger="keydown[key=='Escape'] from:document"
            {}

            div class="flex gap-4"
            {
                ul class="flex flex-col gap-1 min-w-32"
                {
                    @for preset in Preset::ALL {
                        li {
                            button
                                type="button"
                                aria-label=(preset.label())
                                hx-get=(state.action_url(route, &ActionParams::preset(preset)))
                                class=(PRESET_BUTTON_STYLE)
                            { (preset.label()) }
                        }
                    }
                }

                div class="flex flex-col gap-2"
                {
                    div class="flex items-center justify-between gap-2"
                    {
                        button
                            type="button"
                            aria-label="previous month"
                            hx-get=(state.action_url(route, &ActionParams::new(FilterAction::PreviousMonth)))
                            class=(BUTTON_ICON_STYLE)
                        { "‹" }

                        button
                            type="button"
                            aria-label="toggle detailed calendar"
                            aria-pressed=(is_detailed)
                            hx-get=(state.action_url(route, &ActionParams::new(FilterAction::ToggleDetailed)))
                            class=(LINK_STYLE)
                        {
                            @if is_detailed { "Show one month" } @else { "Show two months" }
                        }

                        button
                            type="button"
                            aria-label="next month"
                            hx-get=(state.action_url(route, &ActionParams::new(FilterAction::NextMonth)))
                            class=(BUTTON_ICON_STYLE)
                        { "›" }
                    }

                    div class="flex gap-4"
                    {
                        @for month in filter.visible_months() {
                            (month_view(month, state, anchor, committed, today))
                        }
                    }
                }
            }

            form
                hx-post=(paste_url)
                hx-trigger="submit, paste delay:50ms"
                class="flex flex-col gap-1"
            {
                input
                    type="text"
                    name="text"
                    aria-label="paste date range"
                    placeholder="DD/MM/YYYY - DD/MM/YYYY"
                    autocomplete="off"
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

fn month_view(
    month: CalendarCursor,
    state: &FilterState,
    anchor: Option<Date>,
    committed: Option<DateRange>,
    today: Date,
) -> Markup {
    let grid = month.grid();
    let title = month.title();
    let month_attr = format!("{}-{:02}", month.year(), u8::from(month.month()));

    html! {
        section data-month=(month_attr) aria-label=(title)
        {
            h3 class="mb-2 text-sm font-semibold text-center text-gray-900 dark:text-white"
            { (title) }

            table class="text-center"
            {
                thead
                {
                    tr
                    {
                        @for heading in WEEKDAY_HEADINGS {
                            th scope="col" class="w-8 text-xs font-medium text-gray-500 dark:text-gray-400"
                            { (heading) }
                        }
                    }
                }

                tbody
                {
                    @for week in grid.weeks() {
                        tr
                        {
                            @for cell in week {
                                td
                                {
                                    @if let Some(day) = cell {
                                        (day_button(*day, state, anchor, committed, today))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn day_button(
    day: Date,
    state: &FilterState,
    anchor: Option<Date>,
    committed: Option<DateRange>,
    today: Date,
) -> Markup {
    let is_anchor = anchor == Some(day);
    let in_range = committed.is_some_and(|range| range.contains(day));
    let style = if is_anchor {
        DAY_ANCHOR_STYLE
    } else if in_range {
        DAY_IN_RANGE_STYLE
    } else {
        DAY_BUTTON_STYLE
    };
    let url = state.action_url(endpoints::DATE_FILTER_API, &ActionParams::day(day));

    html! {
        button
            type="button"
            aria-label=(day.day())
            aria-pressed=(is_anchor || in_range)
            aria-current=[(day == today).then_some("date")]
            title=(format_display_date(day))
            data-date=(day)
            data-anchor[is_anchor]
            data-in-range[in_range]
            hx-get=(url)
            class=(style)
        { (day.day()) }
    }
}
