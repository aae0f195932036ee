pub mod events;
pub mod seed;

pub use events::get_event_by_slug;
pub use seed::seed_sample_events;
