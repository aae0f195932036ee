use tracing::debug;

use crate::db::EventStore;
use crate::models::Event;
use crate::normalize::is_valid_slug;
use crate::utils::AppError;

pub const SLUG_REQUIRED: &str = "Slug parameter is required";

pub const INVALID_SLUG: &str = "Invalid slug format. Slug must contain only lowercase letters, \
                                numbers, and hyphens (1-500 characters)";

/// Looks up one event by its slug.
///
/// The slug shape is checked before any store access. Store failures are
/// reported as internal errors carrying the original failure.
pub async fn get_event_by_slug<S>(store: &S, slug: &str) -> Result<Event, AppError>
where
    S: EventStore + ?Sized,
{
    if slug.is_empty() {
        return Err(AppError::InvalidInput(SLUG_REQUIRED.to_string()));
    }
    if !is_valid_slug(slug) {
        return Err(AppError::InvalidInput(INVALID_SLUG.to_string()));
    }

    debug!(%slug, "Fetching event");

    match store.find_event_by_slug(slug).await {
        Ok(Some(event)) => Ok(event),
        Ok(None) => Err(AppError::NotFound(format!(
            "Event with slug '{}' not found",
            slug
        ))),
        Err(e) => Err(AppError::internal("Failed to fetch event", e)),
    }
}
