//! The route handlers for the date filter demo page and its HTMX endpoints.

use axum::{
    Form,
    extract::{Query, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;
use maud::{Markup, PreEscaped, html};
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    app_state::DateFilterState,
    date_filter::DateFilter,
    date_range::DateRange,
    filter_query::{ActionParams, FilterState, PasteForm},
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    timezone::current_local_date,
    view::date_filter_view,
};

const DATE_CHANGE_SCRIPT: &str = r#"
document.addEventListener("dateChange", (event) => {
    const output = document.getElementById("selected-range");
    if (output) {
        output.textContent = `${event.detail.start} to ${event.detail.end}`;
    }
});
"#;

/// Render the demo page with the date filter in the state given by the query string.
pub async fn get_date_filter_page(
    State(state): State<DateFilterState>,
    Query(filter_state): Query<FilterState>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let filter_state = with_default_label(filter_state, &state);
    let selected = match (filter_state.start, filter_state.end) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)),
        _ => None,
    };

    let (widget, _) = update_filter(filter_state, today, |_, _| {});

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="flex flex-col gap-4 w-full max-w-2xl"
            {
                h1 class="text-xl font-bold" { "Date Filter" }

                (widget)

                p class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Selected range: "
                    output id="selected-range" aria-live="polite"
                    {
                        @if let Some(range) = selected {
                            (range.start()) " to " (range.end())
                        } @else {
                            "none"
                        }
                    }
                }
            }
        }
    };

    let script = HeadElement::ScriptSource(PreEscaped(DATE_CHANGE_SCRIPT.to_owned()));

    Ok(base("Date Filter", &[script], &content).into_response())
}

/// Apply one action to the date filter and return the re-rendered widget.
///
/// If the action commits a range, the response carries an `HX-Trigger` header
/// that fires a `dateChange` event in the browser.
pub async fn date_filter_action(
    State(state): State<DateFilterState>,
    Query(filter_state): Query<FilterState>,
    Query(params): Query<ActionParams>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let filter_state = with_default_label(filter_state, &state);

    let (widget, changed) = update_filter(filter_state, today, |filter, today| {
        params.apply(filter, today)
    });

    Ok(date_change_response(widget, changed))
}

/// Commit the range pasted into the date filter and return the re-rendered widget.
///
/// Text that is not a date range leaves the widget unchanged.
pub async fn paste_date_range(
    State(state): State<DateFilterState>,
    Query(filter_state): Query<FilterState>,
    Form(form): Form<PasteForm>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let filter_state = with_default_label(filter_state, &state);

    let (widget, changed) = update_filter(filter_state, today, |filter, _| {
        filter.paste(&form.text)
    });

    Ok(date_change_response(widget, changed))
}

fn with_default_label(mut filter_state: FilterState, state: &DateFilterState) -> FilterState {
    if filter_state.label.is_none() {
        filter_state.label = state.default_label.clone();
    }

    filter_state
}

/// Rebuild the widget from `filter_state`, apply `action` and render the result.
///
/// Returns the markup and the last range committed by `action`, if any. The
/// widget is dropped before this function returns.
fn update_filter<A>(filter_state: FilterState, today: Date, action: A) -> (Markup, Option<DateRange>)
where
    A: FnOnce(&mut DateFilter<&mut dyn FnMut(DateRange)>, Date),
{
    let mut changed = None;

    let markup = {
        let mut record_change = |range: DateRange| changed = Some(range);
        let mut filter =
            filter_state.into_filter(today, &mut record_change as &mut dyn FnMut(DateRange));
        action(&mut filter, today);

        date_filter_view(&filter, today)
    };

    (markup, changed)
}

#[derive(Serialize)]
struct DateChangeTrigger {
    #[serde(rename = "dateChange")]
    date_change: DateRange,
}

fn date_change_response(widget: Markup, changed: Option<DateRange>) -> Response {
    let mut response = widget.into_response();

    let Some(range) = changed else {
        return response;
    };

    tracing::info!("date range changed to {range}");

    let header = serde_json::to_string(&DateChangeTrigger { date_change: range })
        .inspect_err(|error| tracing::error!("could not serialize date change event: {error}"))
        .ok()
        .and_then(|json| {
            HeaderValue::from_str(&json)
                .inspect_err(|error| tracing::error!("invalid HX-Trigger header: {error}"))
                .ok()
        });

    if let Some(header) = header {
        response.headers_mut().insert(HX_TRIGGER, header);
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        Form,
        extract::{Query, State},
        http::StatusCode,
    };
    use axum_htmx::HX_TRIGGER;
    use scraper::Selector;
    use time::{Date, macros::date};

    use crate::{
        Error,
        app_state::DateFilterState,
        date_range::DateRange,
        filter_query::{ActionParams, FilterAction, FilterState, PasteForm},
        listeners::PointerTarget,
        preset::Preset,
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html, get_header,
            parse_html_document, parse_html_fragment,
        },
        timezone::current_local_date,
    };

    use super::{date_filter_action, get_date_filter_page, paste_date_range};

    fn get_state() -> DateFilterState {
        DateFilterState {
            local_timezone: "Etc/UTC".to_owned(),
            default_label: None,
        }
    }

    fn today() -> Date {
        current_local_date("Etc/UTC").unwrap()
    }

    fn open_state() -> FilterState {
        FilterState {
            open: true,
            cursor: Some(date!(2024 - 01 - 01)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn page_renders_closed_filter() {
        let response = get_date_filter_page(State(get_state()), Query(FilterState::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let trigger = html
            .select(&Selector::parse("[aria-label='open date filter']").unwrap())
            .next()
            .expect("No trigger button");
        assert_eq!(trigger.text().collect::<String>().trim(), "Select dates");
        let output = html
            .select(&Selector::parse("#selected-range").unwrap())
            .next()
            .expect("No selected range output");
        assert_eq!(output.text().collect::<String>().trim(), "none");
    }

    #[tokio::test]
    async fn page_uses_default_label() {
        let state = DateFilterState {
            default_label: Some("Sales period".to_owned()),
            ..get_state()
        };

        let response = get_date_filter_page(State(state), Query(FilterState::default()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let trigger = html
            .select(&Selector::parse("[aria-label='open date filter']").unwrap())
            .next()
            .expect("No trigger button");
        assert_eq!(trigger.text().collect::<String>().trim(), "Sales period");
    }

    #[tokio::test]
    async fn toggle_open_renders_popover_without_trigger_header() {
        let response = date_filter_action(
            State(get_state()),
            Query(FilterState::default()),
            Query(ActionParams::new(FilterAction::ToggleOpen)),
        )
        .await
        .unwrap();

        assert_status_ok(&response);
        assert!(response.headers().get(HX_TRIGGER).is_none());
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert!(
            html.select(&Selector::parse("[role='dialog']").unwrap())
                .next()
                .is_some(),
            "popover should be open"
        );
    }

    #[tokio::test]
    async fn second_day_click_fires_date_change() {
        let state = FilterState {
            anchor: Some(date!(2024 - 01 - 10)),
            ..open_state()
        };

        let response = date_filter_action(
            State(get_state()),
            Query(state),
            Query(ActionParams::day(date!(2024 - 01 - 05))),
        )
        .await
        .unwrap();

        assert_eq!(
            get_header(&response, "hx-trigger"),
            r#"{"dateChange":{"start":"2024-01-05","end":"2024-01-10"}}"#
        );
        let html = parse_html_fragment(response).await;
        let trigger = html
            .select(&Selector::parse("[aria-label='open date filter']").unwrap())
            .next()
            .expect("No trigger button");
        assert_eq!(
            trigger.text().collect::<String>().trim(),
            "05/01/2024 - 10/01/2024"
        );
    }

    #[tokio::test]
    async fn first_day_click_does_not_fire_date_change() {
        let response = date_filter_action(
            State(get_state()),
            Query(open_state()),
            Query(ActionParams::day(date!(2024 - 01 - 05))),
        )
        .await
        .unwrap();

        assert!(response.headers().get(HX_TRIGGER).is_none());
        let html = parse_html_fragment(response).await;
        let anchors = html
            .select(&Selector::parse("button[data-anchor]").unwrap())
            .count();
        assert_eq!(anchors, 1);
    }

    #[tokio::test]
    async fn preset_fires_date_change() {
        let response = date_filter_action(
            State(get_state()),
            Query(open_state()),
            Query(ActionParams::preset(Preset::Today)),
        )
        .await
        .unwrap();

        let today = today();
        let want = format!(r#"{{"dateChange":{{"start":"{today}","end":"{today}"}}}}"#);
        assert_eq!(get_header(&response, "hx-trigger"), want);
    }

    #[tokio::test]
    async fn outside_pointer_down_closes_popover() {
        let response = date_filter_action(
            State(get_state()),
            Query(open_state()),
            Query(ActionParams::pointer_down(PointerTarget::Outside)),
        )
        .await
        .unwrap();

        let html = parse_html_fragment(response).await;
        let trigger = html
            .select(&Selector::parse("[aria-label='open date filter']").unwrap())
            .next()
            .expect("No trigger button");
        assert_eq!(trigger.value().attr("aria-expanded"), Some("false"));
    }

    #[tokio::test]
    async fn escape_closes_popover() {
        let response = date_filter_action(
            State(get_state()),
            Query(open_state()),
            Query(ActionParams::key_down("Escape")),
        )
        .await
        .unwrap();

        let html = parse_html_fragment(response).await;
        assert!(
            html.select(&Selector::parse("[role='dialog']").unwrap())
                .next()
                .is_none(),
            "popover should be closed"
        );
    }

    #[tokio::test]
    async fn paste_commits_range() {
        let response = paste_date_range(
            State(get_state()),
            Query(open_state()),
            Form(PasteForm {
                text: "01/03/2024 - 15/03/2024".to_owned(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(
            get_header(&response, "hx-trigger"),
            r#"{"dateChange":{"start":"2024-03-01","end":"2024-03-15"}}"#
        );
        let html = parse_html_fragment(response).await;
        let month = html
            .select(&Selector::parse("section[data-month]").unwrap())
            .next()
            .and_then(|section| section.value().attr("data-month"));
        assert_eq!(month, Some("2024-03"));
    }

    #[tokio::test]
    async fn invalid_paste_changes_nothing() {
        let state = FilterState {
            anchor: Some(date!(2024 - 01 - 10)),
            start: Some(date!(2024 - 01 - 02)),
            end: Some(date!(2024 - 01 - 04)),
            ..open_state()
        };

        let response = paste_date_range(
            State(get_state()),
            Query(state),
            Form(PasteForm {
                text: "not-a-date".to_owned(),
            }),
        )
        .await
        .unwrap();

        assert_status_ok(&response);
        assert!(response.headers().get(HX_TRIGGER).is_none());
        let html = parse_html_fragment(response).await;
        let trigger = html
            .select(&Selector::parse("[aria-label='open date filter']").unwrap())
            .next()
            .expect("No trigger button");
        assert_eq!(
            trigger.text().collect::<String>().trim(),
            "02/01/2024 - 04/01/2024"
        );
        let anchors: Vec<_> = html
            .select(&Selector::parse("button[data-anchor]").unwrap())
            .filter_map(|button| button.value().attr("data-date"))
            .collect();
        assert_eq!(anchors, ["2024-01-10"]);
        let in_range = html
            .select(&Selector::parse("button[data-in-range]").unwrap())
            .count();
        assert_eq!(in_range, 3);
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let state = DateFilterState {
            local_timezone: "Mars/Olympus_Mons".to_owned(),
            default_label: None,
        };

        let result = date_filter_action(
            State(state),
            Query(FilterState::default()),
            Query(ActionParams::new(FilterAction::ToggleOpen)),
        )
        .await;

        let error = result.err().expect("expected an error");
        assert_eq!(error, Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()));
        assert_eq!(
            axum::response::IntoResponse::into_response(error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn date_change_header_is_skipped_without_change() {
        let response = super::date_change_response(maud::html! {}, None);

        assert!(response.headers().get(HX_TRIGGER).is_none());
    }

    #[test]
    fn date_change_header_names_range() {
        let range = DateRange::new(date!(2024 - 02 - 01), date!(2024 - 02 - 29));

        let response = super::date_change_response(maud::html! {}, Some(range));

        assert_eq!(
            get_header(&response, "hx-trigger"),
            r#"{"dateChange":{"start":"2024-02-01","end":"2024-02-29"}}"#
        );
    }
}
