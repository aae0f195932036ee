use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::AppError;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("iso date regex"));

/// Canonicalizes a `YYYY-MM-DD` date, rejecting anything that is not a real
/// calendar day.
pub fn normalize_date(raw: &str) -> Result<String, AppError> {
    let invalid = |msg: &str| AppError::InvalidInput(msg.to_string());

    let caps = ISO_DATE
        .captures(raw.trim())
        .ok_or_else(|| invalid("Date must be in YYYY-MM-DD format"))?;

    // The regex guarantees ASCII digits of bounded width.
    let year: i32 = caps[1].parse().map_err(|_| invalid("Date must be in YYYY-MM-DD format"))?;
    let month: u32 = caps[2].parse().map_err(|_| invalid("Date must be in YYYY-MM-DD format"))?;
    let day: u32 = caps[3].parse().map_err(|_| invalid("Date must be in YYYY-MM-DD format"))?;

    if !(1..=12).contains(&month) {
        return Err(invalid("Month must be between 01 and 12"));
    }
    if !(1..=31).contains(&day) {
        return Err(invalid("Day must be between 01 and 31"));
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .filter(|d| d.year() == year && d.month() == month && d.day() == day)
        .ok_or_else(|| invalid("Invalid date (e.g., February 30th does not exist)"))?;

    Ok(format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()))
}
