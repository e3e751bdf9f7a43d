use chrono::{DateTime, Datelike, NaiveDate};

/// Rendered in place of a date the backend sent in a shape we cannot parse
pub const INVALID_DATE: &str = "Invalid Date";

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Format a backend date string for the history table, e.g. "January 15, 2025".
/// Accepts RFC 3339 timestamps and bare YYYY-MM-DD dates; anything else
/// renders as the explicit invalid-date marker rather than failing the row.
pub fn format_history_date(raw: &str) -> String {
    match parse_backend_date(raw) {
        Some(date) => format!(
            "{} {}, {}",
            MONTH_NAMES[date.month0() as usize],
            date.day(),
            date.year()
        ),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_backend_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Current date in YYYY-MM-DD format, for prefilling the document date
pub fn get_current_date() -> String {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    format!("{:04}-{:02}-{:02}", year as u32, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rfc3339_timestamp() {
        assert_eq!(
            format_history_date("2025-01-15T10:00:00Z"),
            "January 15, 2025"
        );
        assert_eq!(
            format_history_date("2024-12-31T23:59:59+07:00"),
            "December 31, 2024"
        );
    }

    #[test]
    fn test_format_bare_date() {
        assert_eq!(format_history_date("2025-06-01"), "June 1, 2025");
    }

    #[test]
    fn test_format_invalid_input() {
        assert_eq!(format_history_date("not a date"), INVALID_DATE);
        assert_eq!(format_history_date(""), INVALID_DATE);
        assert_eq!(format_history_date("2025-13-40"), INVALID_DATE);
    }
}
