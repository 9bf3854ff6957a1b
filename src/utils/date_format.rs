use time::{Date, macros::format_description};

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// Date-time strings such as `2021-04-12T00:00:00.000Z` are accepted too;
/// only the date part is kept.
pub fn parse_iso_date(date_str: &str) -> Result<Date, String> {
    let format = format_description!("[year]-[month]-[day]");

    // If the string contains a 'T', it might be a datetime string - extract just the date part
    let date_part = match date_str.split_once('T') {
        Some((date_part, _)) => date_part,
        None => date_str,
    };

    Date::parse(date_part.trim(), &format)
        .map_err(|e| format!("Failed to parse date '{date_str}': {e}"))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: Date) -> Result<String, String> {
    date.format(&format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("Failed to format date {date}: {e}"))
}
