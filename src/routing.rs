//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    filter_page::{date_filter_action, get_date_filter_page, paste_date_range},
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DATE_FILTER_VIEW, get(get_date_filter_page))
        .route(endpoints::DATE_FILTER_API, get(date_filter_action))
        .route(endpoints::DATE_FILTER_PASTE, post(paste_date_range))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the date filter page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DATE_FILTER_VIEW)
}
