use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A reservation of one email address against one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub event_id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewBooking {
    pub event_id: Option<Uuid>,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingChanges {
    pub event_id: Option<Uuid>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub event_id: Uuid,
    pub email: String,
}

impl From<Booking> for BookingRecord {
    fn from(booking: Booking) -> Self {
        BookingRecord {
            event_id: booking.event_id,
            email: booking.email,
        }
    }
}
