//! A date range filter served as HTML.
//!
//! The filter is a trigger button that opens a popover with quick presets,
//! a one or two month calendar and a text box that accepts pasted ranges such
//! as "01/01/2024 - 05/01/2024". The popover closes when the user presses
//! Escape or clicks outside it.
//!
//! [DateFilter] holds the widget's state and can be driven directly. The
//! HTTP server keeps no session state: each request carries the widget state
//! in its query string and gets the re-rendered widget back.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod calendar;
mod date_filter;
mod date_range;
mod endpoints;
mod error;
mod filter_page;
mod filter_query;
mod html;
mod internal_server_error;
mod listeners;
mod not_found;
mod paste;
mod preset;
mod routing;
mod selection;
mod timezone;
mod view;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use calendar::{CalendarCursor, MonthGrid, WEEKDAY_HEADINGS};
pub use date_filter::{DEFAULT_TRIGGER_TEXT, DateFilter};
pub use date_range::DateRange;
pub use error::Error;
pub use filter_query::{ActionParams, FilterAction, FilterState};
pub use listeners::{
    DismissSubscription, Document, DocumentEvent, DocumentEventKind, ListenerKind, PointerTarget,
};
pub use paste::{PasteError, parse_pasted_range};
pub use preset::Preset;
pub use routing::build_router;
pub use selection::Selection;
pub use view::date_filter_view;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
