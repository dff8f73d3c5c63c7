use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%d.%m.%Y"];

/// Converts a platform date string to a unix timestamp (seconds, UTC).
///
/// Accepts RFC 3339 values with an offset, naive date-times (read as UTC) and
/// plain dates (midnight UTC). Returns `None` for anything else.
pub fn unified_timestamp(date_str: &str) -> Option<i64> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.timestamp());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(dt.and_utc().timestamp());
        }
    }

    parse_date(date_str)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Converts a platform date string to a `YYYYMMDD` day string.
///
/// Date-times keep the calendar day as written, without shifting time zones.
pub fn unified_strdate(date_str: &str) -> Option<String> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    let day = parse_date(date_str)
        .or_else(|| {
            DateTime::parse_from_rfc3339(date_str)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(date_str, f).ok())
                .map(|dt| dt.date())
        })?;

    Some(day.format("%Y%m%d").to_string())
}

fn parse_date(date_str: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(date_str, f).ok())
}

/// Upper-cases the first character, like `tracks` -> `Tracks`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats seconds as `m:ss`, or `h:mm:ss` past one hour.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.round() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
