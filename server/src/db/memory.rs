use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use futures::future::{self, BoxFuture, FutureExt};
use uuid::Uuid;

use crate::db::postgres::{already_booked, slug_taken};
use crate::db::store::{BookingStore, EventStore};
use crate::models::{Booking, BookingRecord, Event, EventRecord};
use crate::utils::AppError;

/// An in-process store enforcing the same uniqueness rules as the database
/// schema: one event per slug and one booking per event and email.
#[derive(Default)]
pub struct MemoryStore {
    events: RwLock<HashMap<Uuid, Event>>,
    bookings: RwLock<HashMap<Uuid, Booking>>,
    event_reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of event lookups served so far. Test instrumentation.
    #[doc(hidden)]
    pub fn event_reads(&self) -> usize {
        self.event_reads.load(Ordering::SeqCst)
    }

    fn find_event(&self, matches: impl Fn(&Event) -> bool) -> Option<Event> {
        self.event_reads.fetch_add(1, Ordering::SeqCst);
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        events.values().find(|event| matches(event)).cloned()
    }

    fn put_event(&self, id: Option<Uuid>, record: EventRecord) -> Result<Event, AppError> {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);

        let clash = events
            .values()
            .any(|event| event.slug == record.slug && Some(event.id) != id);
        if clash {
            return Err(AppError::Conflict(slug_taken(&record.slug)));
        }

        let now = Utc::now();
        let (id, created_at) = match id {
            Some(id) => match events.get(&id) {
                Some(existing) => (id, existing.created_at),
                None => return Err(AppError::NotFound(format!("Event with ID {} not found", id))),
            },
            None => (Uuid::new_v4(), now),
        };

        let event = Event {
            id,
            title: record.title,
            slug: record.slug,
            description: record.description,
            overview: record.overview,
            image: record.image,
            venue: record.venue,
            location: record.location,
            date: record.date,
            time: record.time,
            mode: record.mode,
            audience: record.audience,
            agenda: record.agenda,
            organizer: record.organizer,
            tags: record.tags,
            created_at,
            updated_at: now,
        };
        events.insert(id, event.clone());

        Ok(event)
    }

    fn put_booking(&self, id: Option<Uuid>, record: BookingRecord) -> Result<Booking, AppError> {
        let mut bookings = self.bookings.write().unwrap_or_else(PoisonError::into_inner);

        let clash = bookings.values().any(|booking| {
            booking.event_id == record.event_id
                && booking.email == record.email
                && Some(booking.id) != id
        });
        if clash {
            return Err(AppError::Conflict(already_booked(&record)));
        }

        let now = Utc::now();
        let (id, created_at) = match id {
            Some(id) => match bookings.get(&id) {
                Some(existing) => (id, existing.created_at),
                None => {
                    return Err(AppError::NotFound(format!("Booking with ID {} not found", id)))
                }
            },
            None => (Uuid::new_v4(), now),
        };

        let booking = Booking {
            id,
            event_id: record.event_id,
            email: record.email,
            created_at,
            updated_at: now,
        };
        bookings.insert(id, booking.clone());

        Ok(booking)
    }
}

impl EventStore for MemoryStore {
    fn find_event_by_slug<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, Result<Option<Event>, AppError>> {
        future::ready(Ok(self.find_event(|event| event.slug == slug))).boxed()
    }

    fn find_event_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Event>, AppError>> {
        future::ready(Ok(self.find_event(|event| event.id == id))).boxed()
    }

    fn insert_event(&self, record: EventRecord) -> BoxFuture<'_, Result<Event, AppError>> {
        future::ready(self.put_event(None, record)).boxed()
    }

    fn update_event(
        &self,
        id: Uuid,
        record: EventRecord,
    ) -> BoxFuture<'_, Result<Event, AppError>> {
        future::ready(self.put_event(Some(id), record)).boxed()
    }
}

impl BookingStore for MemoryStore {
    fn find_booking_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Booking>, AppError>> {
        let bookings = self.bookings.read().unwrap_or_else(PoisonError::into_inner);
        future::ready(Ok(bookings.get(&id).cloned())).boxed()
    }

    fn insert_booking(&self, record: BookingRecord) -> BoxFuture<'_, Result<Booking, AppError>> {
        future::ready(self.put_booking(None, record)).boxed()
    }

    fn update_booking(
        &self,
        id: Uuid,
        record: BookingRecord,
    ) -> BoxFuture<'_, Result<Booking, AppError>> {
        future::ready(self.put_booking(Some(id), record)).boxed()
    }
}
