use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::models::{Booking, BookingChanges, BookingRecord, NewBooking};
use crate::utils::AppError;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Answers whether an event currently exists.
///
/// Booking checks depend on this capability rather than on the event store
/// itself; any [`EventStore`](crate::db::EventStore) provides it.
pub trait EventLookup: Send + Sync {
    fn event_exists(&self, id: Uuid) -> BoxFuture<'_, Result<bool, AppError>>;
}

pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::InvalidInput("Email is required".to_string()));
    }
    if !EMAIL.is_match(&email) {
        return Err(AppError::InvalidInput(
            "Please provide a valid email address".to_string(),
        ));
    }
    Ok(email)
}

pub fn prepare_new_booking(input: NewBooking) -> Result<BookingRecord, AppError> {
    let event_id = input
        .event_id
        .ok_or_else(|| AppError::InvalidInput("Event ID is required".to_string()))?;

    Ok(BookingRecord {
        event_id,
        email: normalize_email(&input.email)?,
    })
}

/// Applies a partial update, returning the record and whether the event
/// reference changed.
pub fn apply_booking_changes(
    current: &Booking,
    changes: BookingChanges,
) -> Result<(BookingRecord, bool), AppError> {
    let mut record = BookingRecord::from(current.clone());
    let mut event_changed = false;

    if let Some(event_id) = changes.event_id {
        event_changed = event_id != record.event_id;
        record.event_id = event_id;
    }
    if let Some(email) = changes.email {
        record.email = normalize_email(&email)?;
    }

    Ok((record, event_changed))
}

/// Fails with `NotFound` unless the referenced event exists right now.
pub async fn verify_event_reference<L>(events: &L, event_id: Uuid) -> Result<(), AppError>
where
    L: EventLookup + ?Sized,
{
    if events.event_exists(event_id).await? {
        return Ok(());
    }

    Err(AppError::NotFound(format!(
        "Event with ID {} does not exist. Cannot create booking for non-existent event.",
        event_id
    )))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use futures::FutureExt;

    use super::*;

    struct KnownEvents(HashSet<Uuid>);

    impl EventLookup for KnownEvents {
        fn event_exists(&self, id: Uuid) -> BoxFuture<'_, Result<bool, AppError>> {
            let found = self.0.contains(&id);
            async move { Ok(found) }.boxed()
        }
    }

    struct BrokenLookup;

    impl EventLookup for BrokenLookup {
        fn event_exists(&self, _id: Uuid) -> BoxFuture<'_, Result<bool, AppError>> {
            async { Err(AppError::Database(sqlx::Error::PoolClosed)) }.boxed()
        }
    }

    #[test]
    fn test_email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
    }

    #[test]
    fn test_bad_emails_are_rejected() {
        assert_eq!(normalize_email("  ").unwrap_err().to_string(), "Email is required");
        for raw in ["ada", "ada@example", "ada @example.com", "@example.com", "ada@@x.io"] {
            assert_eq!(
                normalize_email(raw).unwrap_err().to_string(),
                "Please provide a valid email address",
                "{}",
                raw
            );
        }
    }

    #[test]
    fn test_new_booking_requires_event_id() {
        let input = NewBooking {
            event_id: None,
            email: "ada@example.com".to_string(),
        };
        assert_eq!(
            prepare_new_booking(input).unwrap_err().to_string(),
            "Event ID is required"
        );
    }

    #[test]
    fn test_changes_report_event_change() {
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            created_at: now,
            updated_at: now,
        };

        let (_, changed) = apply_booking_changes(
            &booking,
            BookingChanges {
                event_id: Some(booking.event_id),
                email: Some("ADA@example.com".to_string()),
            },
        )
        .unwrap();
        assert!(!changed);

        let (record, changed) = apply_booking_changes(
            &booking,
            BookingChanges {
                event_id: Some(Uuid::new_v4()),
                email: None,
            },
        )
        .unwrap();
        assert!(changed);
        assert_eq!(record.email, booking.email);
    }

    #[tokio::test]
    async fn test_reference_to_known_event_passes() {
        let id = Uuid::new_v4();
        let lookup = KnownEvents([id].into_iter().collect());

        assert!(verify_event_reference(&lookup, id).await.is_ok());
    }

    #[tokio::test]
    async fn test_reference_to_missing_event_names_the_id() {
        let id = Uuid::new_v4();
        let lookup = KnownEvents(HashSet::new());

        let err = verify_event_reference(&lookup, id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let err = verify_event_reference(&BrokenLookup, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
