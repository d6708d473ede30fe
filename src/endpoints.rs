//! The paths of the app's routes.

/// The root path, which redirects to [DATE_FILTER_VIEW].
pub const ROOT: &str = "/";
/// The page showing the date filter.
pub const DATE_FILTER_VIEW: &str = "/date-filter";
/// Applies one action to the date filter and returns the re-rendered widget.
pub const DATE_FILTER_API: &str = "/api/date-filter";
/// Accepts pasted text as a form and returns the re-rendered widget.
pub const DATE_FILTER_PASTE: &str = "/api/date-filter/paste";
/// The route for static files such as the stylesheet.
pub const STATIC: &str = "/static";
