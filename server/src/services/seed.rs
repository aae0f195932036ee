use tracing::{info, warn};

use crate::db::repository::create_event;
use crate::db::EventStore;
use crate::models::samples::{SampleEvent, SAMPLE_EVENTS};
use crate::models::NewEvent;
use crate::utils::AppError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
}

/// Inserts the sample listing as full events. Entries whose slug is already
/// taken are skipped, so seeding twice is harmless.
///
/// Seeded events are addressed by the slug derived from their title; the
/// listing's own `slug` is display-only and never routable.
pub async fn seed_sample_events<S>(store: &S) -> Result<SeedReport, AppError>
where
    S: EventStore + ?Sized,
{
    let mut report = SeedReport::default();

    for sample in SAMPLE_EVENTS {
        match create_event(store, expand(sample)).await {
            Ok(event) => {
                info!(slug = %event.slug, listing_slug = sample.slug, "Seeded sample event");
                report.created += 1;
            }
            Err(AppError::Conflict(message)) => {
                warn!(listing_slug = sample.slug, %message, "Sample event already present");
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(created = report.created, skipped = report.skipped, "Seeding finished");
    Ok(report)
}

fn expand(sample: &SampleEvent) -> NewEvent {
    NewEvent {
        title: sample.title.to_string(),
        description: format!("{} in {}.", sample.title, sample.location),
        overview: format!("Join us on {} at {} for {}.", sample.date, sample.time, sample.title),
        image: sample.image.to_string(),
        venue: sample.location.to_string(),
        location: sample.location.to_string(),
        date: sample.date.to_string(),
        time: sample.time.to_string(),
        mode: "offline".to_string(),
        audience: "Developers".to_string(),
        agenda: vec![
            format!("{} Registration", sample.time),
            "Talks".to_string(),
            "Networking".to_string(),
        ],
        organizer: "Eventful".to_string(),
        tags: vec!["conference".to_string(), "developers".to_string()],
    }
}
