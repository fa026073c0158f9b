//! Shared utility functions for RegNeS crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// ISO calendar date format used by every backend endpoint.
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)?)
    }

    /// True if `s` is a zero-padded ISO 8601 calendar date.
    ///
    /// Date axes are sorted as plain strings, which only matches
    /// chronological order for dates in this exact form.
    pub fn is_canonical_iso(s: &str) -> bool {
        match NaiveDate::parse_from_str(s, ISO_FORMAT) {
            Ok(date) => format_date(&date) == s,
            Err(_) => false,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2024-06-05");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_date("05.06.2024").is_err());
            assert!(parse_date("").is_err());
        }

        #[test]
        fn test_is_canonical_iso() {
            assert!(is_canonical_iso("2024-01-01"));
            assert!(is_canonical_iso("1999-12-31"));
            // chrono accepts unpadded fields, but they do not sort as strings
            assert!(!is_canonical_iso("2024-1-1"));
            assert!(!is_canonical_iso("2024-01-01T00:00:00"));
            assert!(!is_canonical_iso("2024-02-30"));
        }
    }
}

/// Comma-separated list helpers for query strings and CLI arguments.
pub mod lists {
    use std::fmt::Display;

    /// Join items with commas, e.g. `[101, 102]` -> `"101,102"`.
    pub fn join_csv<T: Display>(items: &[T]) -> String {
        items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Split a comma-separated argument, trimming blanks and dropping empty entries.
    pub fn split_csv(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    }

}
