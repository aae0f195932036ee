use crate::models::{Event, EventChanges, EventMode, EventRecord, NewEvent};
use crate::normalize::{derive_slug, normalize_date, normalize_time};
use crate::utils::AppError;

/// Validates and canonicalizes a brand new event. Every field counts as
/// changed, so slug, date and time are all derived here.
pub fn prepare_new_event(input: NewEvent) -> Result<EventRecord, AppError> {
    let title = required("Title", &input.title)?;
    let slug = slug_for(&title)?;

    Ok(EventRecord {
        slug,
        title,
        description: required("Description", &input.description)?,
        overview: required("Overview", &input.overview)?,
        image: required("Image", &input.image)?,
        venue: required("Venue", &input.venue)?,
        location: required("Location", &input.location)?,
        date: normalize_date(&required("Date", &input.date)?)?,
        time: normalize_time(&required("Time", &input.time)?)?,
        mode: mode(&input.mode)?,
        audience: required("Audience", &input.audience)?,
        agenda: non_empty("Agenda", input.agenda)?,
        organizer: required("Organizer", &input.organizer)?,
        tags: non_empty("Tags", input.tags)?,
    })
}

/// Applies a partial update on top of the stored event.
///
/// The slug is re-derived only when the trimmed title differs from the stored
/// one; date and time are re-normalized only when the supplied value differs
/// from what is stored.
pub fn apply_event_changes(current: &Event, changes: EventChanges) -> Result<EventRecord, AppError> {
    let mut record = EventRecord::from(current.clone());

    if let Some(title) = changes.title {
        let title = required("Title", &title)?;
        if title != record.title {
            record.slug = slug_for(&title)?;
            record.title = title;
        }
    }

    if let Some(date) = changes.date {
        let date = required("Date", &date)?;
        if date != record.date {
            record.date = normalize_date(&date)?;
        }
    }

    if let Some(time) = changes.time {
        let time = required("Time", &time)?;
        if time != record.time {
            record.time = normalize_time(&time)?;
        }
    }

    if let Some(mode_raw) = changes.mode {
        record.mode = mode(&mode_raw)?;
    }
    if let Some(agenda) = changes.agenda {
        record.agenda = non_empty("Agenda", agenda)?;
    }
    if let Some(tags) = changes.tags {
        record.tags = non_empty("Tags", tags)?;
    }

    replace_required(&mut record.description, "Description", changes.description)?;
    replace_required(&mut record.overview, "Overview", changes.overview)?;
    replace_required(&mut record.image, "Image", changes.image)?;
    replace_required(&mut record.venue, "Venue", changes.venue)?;
    replace_required(&mut record.location, "Location", changes.location)?;
    replace_required(&mut record.audience, "Audience", changes.audience)?;
    replace_required(&mut record.organizer, "Organizer", changes.organizer)?;

    Ok(record)
}

fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn replace_required(
    slot: &mut String,
    field: &str,
    value: Option<String>,
) -> Result<(), AppError> {
    if let Some(value) = value {
        *slot = required(field, &value)?;
    }
    Ok(())
}

fn non_empty(field: &str, items: Vec<String>) -> Result<Vec<String>, AppError> {
    if items.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "{} must contain at least one item",
            field
        )));
    }
    Ok(items)
}

fn mode(raw: &str) -> Result<EventMode, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::InvalidInput("Mode is required".to_string()));
    }
    raw.parse()
}

fn slug_for(title: &str) -> Result<String, AppError> {
    let slug = derive_slug(title);
    if slug.is_empty() {
        return Err(AppError::InvalidInput(
            "Title must contain at least one letter or digit".to_string(),
        ));
    }
    Ok(slug)
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    pub(crate) fn sample_input(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: " A day of talks ".to_string(),
            overview: "Overview".to_string(),
            image: "/images/event1.png".to_string(),
            venue: "Moscone Center".to_string(),
            location: "San Francisco, CA".to_string(),
            date: "2025-02-15".to_string(),
            time: "9:00 AM".to_string(),
            mode: "Hybrid".to_string(),
            audience: "Developers".to_string(),
            agenda: vec!["Keynote".to_string()],
            organizer: "React Community".to_string(),
            tags: vec!["react".to_string()],
        }
    }

    fn stored(record: EventRecord) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
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
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_prepare_new_event_normalizes_fields() {
        let record = prepare_new_event(sample_input("  React Summit 2025 ")).unwrap();

        assert_eq!(record.title, "React Summit 2025");
        assert_eq!(record.slug, "react-summit-2025");
        assert_eq!(record.description, "A day of talks");
        assert_eq!(record.date, "2025-02-15");
        assert_eq!(record.time, "09:00");
        assert_eq!(record.mode, EventMode::Hybrid);
    }

    #[test]
    fn test_prepare_new_event_requires_fields() {
        let mut input = sample_input("React Summit 2025");
        input.venue = "   ".to_string();
        let err = prepare_new_event(input).unwrap_err();
        assert_eq!(err.to_string(), "Venue is required");

        let mut input = sample_input("React Summit 2025");
        input.tags.clear();
        let err = prepare_new_event(input).unwrap_err();
        assert_eq!(err.to_string(), "Tags must contain at least one item");
    }

    #[test]
    fn test_prepare_new_event_rejects_bad_date_and_time() {
        let mut input = sample_input("React Summit 2025");
        input.date = "2025-02-30".to_string();
        assert!(matches!(prepare_new_event(input), Err(AppError::InvalidInput(_))));

        let mut input = sample_input("React Summit 2025");
        input.time = "9:5".to_string();
        assert!(matches!(prepare_new_event(input), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_prepare_new_event_rejects_slugless_title() {
        let err = prepare_new_event(sample_input("???")).unwrap_err();
        assert_eq!(err.to_string(), "Title must contain at least one letter or digit");
    }

    #[test]
    fn test_changes_rederive_slug_only_when_title_differs() {
        let current = stored(prepare_new_event(sample_input("React Summit 2025")).unwrap());

        let same = EventChanges {
            title: Some(" React Summit 2025 ".to_string()),
            ..Default::default()
        };
        let record = apply_event_changes(&current, same).unwrap();
        assert_eq!(record.slug, "react-summit-2025");

        let renamed = EventChanges {
            title: Some("React Summit Europe".to_string()),
            ..Default::default()
        };
        let record = apply_event_changes(&current, renamed).unwrap();
        assert_eq!(record.title, "React Summit Europe");
        assert_eq!(record.slug, "react-summit-europe");
    }

    #[test]
    fn test_changes_leave_untouched_fields_alone() {
        let current = stored(prepare_new_event(sample_input("React Summit 2025")).unwrap());

        let changes = EventChanges {
            time: Some("6:30 PM".to_string()),
            venue: Some(" Pier 27 ".to_string()),
            ..Default::default()
        };
        let record = apply_event_changes(&current, changes).unwrap();

        assert_eq!(record.time, "18:30");
        assert_eq!(record.venue, "Pier 27");
        assert_eq!(record.date, current.date);
        assert_eq!(record.slug, current.slug);
    }

    #[test]
    fn test_changes_validate_new_date() {
        let current = stored(prepare_new_event(sample_input("React Summit 2025")).unwrap());

        let changes = EventChanges {
            date: Some("2025-02-30".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            apply_event_changes(&current, changes),
            Err(AppError::InvalidInput(_))
        ));
    }
}
