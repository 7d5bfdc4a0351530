/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application

/// Format ISO datetime string to YYYY-MM-DD HH:MM for table cells
/// Example: "2025-03-02T10:15:26.123Z" -> "2025-03-02 10:15"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date, time)) = datetime_str.split_once('T') {
        if let Some(hhmm) = time.get(..5) {
            return format!("{} {}", date, hhmm);
        }
    }
    datetime_str.to_string()
}

/// Full-precision variant for invoices: RFC 3339 -> "YYYY-MM-DD HH:MM:SS".
/// Falls back to the raw string when the input does not parse.
pub fn format_datetime_full(datetime_str: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(datetime_str) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => datetime_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2025-03-02T10:15:26.123Z"),
            "2025-03-02 10:15"
        );
        assert_eq!(format_datetime("2024-12-31T23:59:59Z"), "2024-12-31 23:59");
    }

    #[test]
    fn test_format_datetime_full() {
        assert_eq!(
            format_datetime_full("2025-03-02T10:15:26.123Z"),
            "2025-03-02 10:15:26"
        );
    }

    #[test]
    fn test_invalid_input_passes_through() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_datetime_full("invalid"), "invalid");
    }
}
