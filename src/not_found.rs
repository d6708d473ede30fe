//! The page to display when a route does not exist.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{Error, html::error_view};

pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Html(
                error_view(
                    "Not Found",
                    "404",
                    "Something's missing.",
                    "Sorry, we can't find that page. Check the address or head back to the date filter.",
                )
                .into_string(),
            ),
        )
            .into_response()
    }
}

/// The fallback for requests that match no route.
pub async fn get_404_not_found() -> Error {
    Error::NotFound
}
