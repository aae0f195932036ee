//! Write paths. Each operation runs the field rules for the record before
//! handing it to the store, so a rejected record never reaches storage.

use tracing::{debug, info};
use uuid::Uuid;

use crate::db::store::{BookingStore, EventStore};
use crate::models::{Booking, BookingChanges, Event, EventChanges, NewBooking, NewEvent};
use crate::normalize::{
    apply_booking_changes, apply_event_changes, prepare_new_booking, prepare_new_event,
    verify_event_reference, EventLookup,
};
use crate::utils::AppError;

pub async fn create_event<S>(store: &S, input: NewEvent) -> Result<Event, AppError>
where
    S: EventStore + ?Sized,
{
    let record = prepare_new_event(input)?;
    let event = store.insert_event(record).await?;

    info!(id = %event.id, slug = %event.slug, "Event created");
    Ok(event)
}

pub async fn update_event<S>(store: &S, id: Uuid, changes: EventChanges) -> Result<Event, AppError>
where
    S: EventStore + ?Sized,
{
    let current = store
        .find_event_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event with ID {} not found", id)))?;

    let record = apply_event_changes(&current, changes)?;
    if record.slug != current.slug {
        debug!(%id, from = %current.slug, to = %record.slug, "Event slug changed");
    }

    store.update_event(id, record).await
}

pub async fn create_booking<B, E>(
    bookings: &B,
    events: &E,
    input: NewBooking,
) -> Result<Booking, AppError>
where
    B: BookingStore + ?Sized,
    E: EventLookup + ?Sized,
{
    let record = prepare_new_booking(input)?;
    verify_event_reference(events, record.event_id).await?;

    let booking = bookings.insert_booking(record).await?;
    info!(id = %booking.id, event_id = %booking.event_id, "Booking created");
    Ok(booking)
}

/// Updates a booking, re-checking the event reference only when it changes.
pub async fn update_booking<B, E>(
    bookings: &B,
    events: &E,
    id: Uuid,
    changes: BookingChanges,
) -> Result<Booking, AppError>
where
    B: BookingStore + ?Sized,
    E: EventLookup + ?Sized,
{
    let current = bookings
        .find_booking_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with ID {} not found", id)))?;

    let (record, event_changed) = apply_booking_changes(&current, changes)?;
    if event_changed {
        verify_event_reference(events, record.event_id).await?;
    }

    bookings.update_booking(id, record).await
}
