use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use sqlx::postgres::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::db::connection::{ConnectionManager, PgConnector};
use crate::db::store::{BookingStore, EventStore};
use crate::models::{Booking, BookingRecord, Event, EventRecord};
use crate::utils::AppError;

const EVENT_COLUMNS: &str = "id, title, slug, description, overview, image, venue, location, \
     date, time, mode, audience, agenda, organizer, tags, created_at, updated_at";

const BOOKING_COLUMNS: &str = "id, event_id, email, created_at, updated_at";

/// Postgres-backed store. Every operation goes through the shared
/// [`ConnectionManager`], so the pool is opened at most once per process.
#[derive(Clone)]
pub struct PgStore {
    connections: Arc<ConnectionManager<PgConnector>>,
}

impl PgStore {
    pub fn new(connections: Arc<ConnectionManager<PgConnector>>) -> Self {
        Self { connections }
    }

    async fn pool(&self) -> Result<PgPool, AppError> {
        Ok(self.connections.acquire().await?)
    }
}

impl EventStore for PgStore {
    fn find_event_by_slug<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, Result<Option<Event>, AppError>> {
        find_event_by_slug(self, slug).boxed()
    }

    fn find_event_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Event>, AppError>> {
        find_event_by_id(self, id).boxed()
    }

    fn insert_event(&self, record: EventRecord) -> BoxFuture<'_, Result<Event, AppError>> {
        insert_event(self, record).boxed()
    }

    fn update_event(
        &self,
        id: Uuid,
        record: EventRecord,
    ) -> BoxFuture<'_, Result<Event, AppError>> {
        update_event(self, id, record).boxed()
    }
}

impl BookingStore for PgStore {
    fn find_booking_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Booking>, AppError>> {
        find_booking_by_id(self, id).boxed()
    }

    fn insert_booking(&self, record: BookingRecord) -> BoxFuture<'_, Result<Booking, AppError>> {
        insert_booking(self, record).boxed()
    }

    fn update_booking(
        &self,
        id: Uuid,
        record: BookingRecord,
    ) -> BoxFuture<'_, Result<Booking, AppError>> {
        update_booking(self, id, record).boxed()
    }
}

async fn find_event_by_slug(store: &PgStore, slug: &str) -> Result<Option<Event>, AppError> {
    let pool = store.pool().await?;
    let sql = format!("SELECT {} FROM events WHERE slug = $1", EVENT_COLUMNS);

    let event = sqlx::query_as::<_, Event>(&sql)
        .bind(slug)
        .fetch_optional(&pool)
        .await?;

    Ok(event)
}

async fn find_event_by_id(store: &PgStore, id: Uuid) -> Result<Option<Event>, AppError> {
    let pool = store.pool().await?;
    let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);

    let event = sqlx::query_as::<_, Event>(&sql)
        .bind(id)
        .fetch_optional(&pool)
        .await?;

    Ok(event)
}

async fn insert_event(store: &PgStore, record: EventRecord) -> Result<Event, AppError> {
    let pool = store.pool().await?;
    let sql = format!(
        "INSERT INTO events (id, title, slug, description, overview, image, venue, location, \
         date, time, mode, audience, agenda, organizer, tags) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
         RETURNING {}",
        EVENT_COLUMNS
    );

    let id = Uuid::new_v4();
    let slug = record.slug.clone();
    debug!(%id, %slug, "Inserting event");

    sqlx::query_as::<_, Event>(&sql)
        .bind(id)
        .bind(record.title)
        .bind(record.slug)
        .bind(record.description)
        .bind(record.overview)
        .bind(record.image)
        .bind(record.venue)
        .bind(record.location)
        .bind(record.date)
        .bind(record.time)
        .bind(record.mode)
        .bind(record.audience)
        .bind(record.agenda)
        .bind(record.organizer)
        .bind(record.tags)
        .fetch_one(&pool)
        .await
        .map_err(|e| conflict_or(e, || slug_taken(&slug)))
}

async fn update_event(store: &PgStore, id: Uuid, record: EventRecord) -> Result<Event, AppError> {
    let pool = store.pool().await?;
    let sql = format!(
        "UPDATE events SET title = $2, slug = $3, description = $4, overview = $5, image = $6, \
         venue = $7, location = $8, date = $9, time = $10, mode = $11, audience = $12, \
         agenda = $13, organizer = $14, tags = $15, updated_at = now() \
         WHERE id = $1 RETURNING {}",
        EVENT_COLUMNS
    );

    let slug = record.slug.clone();
    debug!(%id, %slug, "Updating event");

    sqlx::query_as::<_, Event>(&sql)
        .bind(id)
        .bind(record.title)
        .bind(record.slug)
        .bind(record.description)
        .bind(record.overview)
        .bind(record.image)
        .bind(record.venue)
        .bind(record.location)
        .bind(record.date)
        .bind(record.time)
        .bind(record.mode)
        .bind(record.audience)
        .bind(record.agenda)
        .bind(record.organizer)
        .bind(record.tags)
        .fetch_optional(&pool)
        .await
        .map_err(|e| conflict_or(e, || slug_taken(&slug)))?
        .ok_or_else(|| AppError::NotFound(format!("Event with ID {} not found", id)))
}

async fn find_booking_by_id(store: &PgStore, id: Uuid) -> Result<Option<Booking>, AppError> {
    let pool = store.pool().await?;
    let sql = format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS);

    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(&pool)
        .await?;

    Ok(booking)
}

async fn insert_booking(store: &PgStore, record: BookingRecord) -> Result<Booking, AppError> {
    let pool = store.pool().await?;
    let sql = format!(
        "INSERT INTO bookings (id, event_id, email) VALUES ($1, $2, $3) RETURNING {}",
        BOOKING_COLUMNS
    );

    let id = Uuid::new_v4();
    debug!(%id, event_id = %record.event_id, "Inserting booking");

    sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .bind(record.event_id)
        .bind(&record.email)
        .fetch_one(&pool)
        .await
        .map_err(|e| conflict_or(e, || already_booked(&record)))
}

async fn update_booking(
    store: &PgStore,
    id: Uuid,
    record: BookingRecord,
) -> Result<Booking, AppError> {
    let pool = store.pool().await?;
    let sql = format!(
        "UPDATE bookings SET event_id = $2, email = $3, updated_at = now() \
         WHERE id = $1 RETURNING {}",
        BOOKING_COLUMNS
    );

    sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .bind(record.event_id)
        .bind(&record.email)
        .fetch_optional(&pool)
        .await
        .map_err(|e| conflict_or(e, || already_booked(&record)))?
        .ok_or_else(|| AppError::NotFound(format!("Booking with ID {} not found", id)))
}

/// Maps a unique-constraint violation to `Conflict`, anything else to a
/// database error.
fn conflict_or(e: sqlx::Error, message: impl FnOnce() -> String) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(message()),
        _ => AppError::Database(e),
    }
}

pub(crate) fn slug_taken(slug: &str) -> String {
    format!("An event with slug '{}' already exists", slug)
}

pub(crate) fn already_booked(record: &BookingRecord) -> String {
    format!(
        "A booking for {} already exists for event {}",
        record.email, record.event_id
    )
}
