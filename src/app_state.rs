//! Implements a struct that holds the state of the server.

use axum::extract::FromRef;

use crate::{Error, timezone::get_local_offset};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The text shown on the date filter's trigger button before a range is chosen.
    pub default_label: Option<String>,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(local_timezone: &str, default_label: Option<String>) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            default_label,
        })
    }
}

/// The state needed by the date filter's handlers.
#[derive(Debug, Clone)]
pub struct DateFilterState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The trigger label used when a request does not carry one.
    pub default_label: Option<String>,
}

impl FromRef<AppState> for DateFilterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            default_label: state.default_label.clone(),
        }
    }
}
