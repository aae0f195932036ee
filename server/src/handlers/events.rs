use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::services::events::{get_event_by_slug, INVALID_SLUG, SLUG_REQUIRED};
use crate::state::AppState;
use crate::utils::response::{success, EventBody};
use crate::utils::AppError;

/// `GET /events/:slug`
pub async fn get_event(
    State(state): State<AppState>,
    slug: Result<Path<String>, PathRejection>,
) -> Response {
    // A segment that cannot be decoded (e.g. invalid UTF-8) is a malformed slug.
    let Path(slug) = match slug {
        Ok(slug) => slug,
        Err(rejection) => {
            debug!(error = %rejection, "Undecodable slug segment");
            return AppError::InvalidInput(INVALID_SLUG.to_string()).into_response();
        }
    };

    match get_event_by_slug(state.events.as_ref(), &slug).await {
        Ok(event) => success(EventBody {
            message: "Event fetched successfully",
            event,
        }),
        Err(e) => e.to_response(state.expose_error_details),
    }
}

/// `GET /events` or `GET /events/` with no slug segment.
pub async fn missing_slug() -> Response {
    AppError::InvalidInput(SLUG_REQUIRED.to_string()).into_response()
}
