//! Field rules applied to records immediately before they are written.
//!
//! Every function here is pure apart from [`verify_event_reference`], which
//! performs a single lookup through the capability it is handed.

pub mod booking;
pub mod date;
pub mod event;
pub mod slug;
pub mod time;

pub use booking::{
    apply_booking_changes, normalize_email, prepare_new_booking, verify_event_reference,
    EventLookup,
};
pub use date::normalize_date;
pub use event::{apply_event_changes, prepare_new_event};
pub use slug::{derive_slug, is_valid_slug};
pub use time::normalize_time;
