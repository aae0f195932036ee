pub mod booking;
pub mod event;
pub mod samples;

pub use booking::{Booking, BookingChanges, BookingRecord, NewBooking};
pub use event::{Event, EventChanges, EventMode, EventRecord, NewEvent};
