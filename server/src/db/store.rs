use futures::future::{BoxFuture, FutureExt};
use uuid::Uuid;

use crate::models::{Booking, BookingRecord, Event, EventRecord};
use crate::normalize::EventLookup;
use crate::utils::AppError;

/// Raw event persistence. Implementations store what they are given; the
/// field rules run in [`repository`](crate::db::repository) beforehand.
pub trait EventStore: Send + Sync {
    fn find_event_by_slug<'a>(&'a self, slug: &'a str)
        -> BoxFuture<'a, Result<Option<Event>, AppError>>;

    fn find_event_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Event>, AppError>>;

    /// Fails with `Conflict` if the slug is already taken.
    fn insert_event(&self, record: EventRecord) -> BoxFuture<'_, Result<Event, AppError>>;

    /// Fails with `NotFound` if there is no such event and `Conflict` if the
    /// new slug belongs to another event.
    fn update_event(&self, id: Uuid, record: EventRecord)
        -> BoxFuture<'_, Result<Event, AppError>>;
}

/// Raw booking persistence.
pub trait BookingStore: Send + Sync {
    fn find_booking_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Booking>, AppError>>;

    /// Fails with `Conflict` if the event already has a booking for the email.
    fn insert_booking(&self, record: BookingRecord) -> BoxFuture<'_, Result<Booking, AppError>>;

    fn update_booking(&self, id: Uuid, record: BookingRecord)
        -> BoxFuture<'_, Result<Booking, AppError>>;
}

impl<S: EventStore + ?Sized> EventLookup for S {
    fn event_exists(&self, id: Uuid) -> BoxFuture<'_, Result<bool, AppError>> {
        self.find_event_by_id(id)
            .map(|found| found.map(|event| event.is_some()))
            .boxed()
    }
}
