use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::AppError;

static TIME_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").expect("24h time regex"));

static TIME_12H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(0?[1-9]|1[0-2]):([0-5][0-9])\s?(AM|PM)$").expect("12h time regex")
});

/// Canonicalizes a time of day to 24-hour `HH:MM`.
///
/// Accepts `H:MM`/`HH:MM` on a 24-hour clock and `H:MM AM`/`HH:MMpm` style
/// 12-hour times.
pub fn normalize_time(raw: &str) -> Result<String, AppError> {
    let raw = raw.trim();

    if let Some(caps) = TIME_24H.captures(raw) {
        return Ok(format!("{:0>2}:{}", &caps[1], &caps[2]));
    }

    if let Some(caps) = TIME_12H.captures(raw) {
        let hours: u32 = caps[1].parse().map_err(|_| malformed())?;
        let pm = caps[3].eq_ignore_ascii_case("PM");

        let hours = match (hours, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };

        return Ok(format!("{:02}:{}", hours, &caps[2]));
    }

    Err(malformed())
}

fn malformed() -> AppError {
    AppError::InvalidInput("Time must be in HH:MM or HH:MM AM/PM format".to_string())
}
