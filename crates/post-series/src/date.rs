use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses a front matter date into a naive UTC date-time.
///
/// Accepts RFC 3339 timestamps, local date-times (`2024-01-01T09:30:00`), and
/// bare dates (`2024-01-01`, treated as midnight).
pub fn parse_date(date: &str) -> Option<NaiveDateTime> {
    if date.contains('T') {
        if let Ok(datetime) = DateTime::parse_from_rfc3339(date) {
            return Some(datetime.naive_utc());
        }

        return ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok());
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn format_date(date: &str, format: &str) -> Option<String> {
    parse_date(date).map(|date| date.format(format).to_string())
}
