//! Shared utility functions for quake crates.

/// Lenient numeric coercion for feed columns.
///
/// The upstream feed is produced for browser consumers, so a cell counts as
/// numeric when it *starts* with a number (`"4.5 km"` is `4.5`). Anything
/// without a numeric prefix, and any `NaN`, coerces to `0.0`.
pub mod numbers {
    /// Parse the longest decimal prefix of `raw` as a float, or `0.0`.
    pub fn parse_float_or_zero(raw: &str) -> f64 {
        let trimmed = raw.trim_start();
        let (sign, unsigned) = split_sign(trimmed);
        if unsigned.starts_with("Infinity") {
            return sign * f64::INFINITY;
        }
        let prefix = float_prefix(unsigned);
        if prefix.is_empty() {
            return 0.0;
        }
        match prefix.parse::<f64>() {
            Ok(value) => not_nan_or_zero(sign * value),
            Err(_) => 0.0,
        }
    }

    /// Parse the leading base-10 integer of `raw`, or `0.0`.
    ///
    /// Returned as `f64` because the record keeps every measurement as a
    /// float; `"12.9"` yields `12.0`.
    pub fn parse_int_or_zero(raw: &str) -> f64 {
        let trimmed = raw.trim_start();
        let (sign, unsigned) = split_sign(trimmed);
        let digits = unsigned
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return 0.0;
        }
        match unsigned[..digits].parse::<f64>() {
            Ok(value) => not_nan_or_zero(sign * value),
            Err(_) => 0.0,
        }
    }

    /// Fixed two-decimal rendering used by table cells.
    pub fn format_fixed2(value: f64) -> String {
        format!("{:.2}", value)
    }

    fn split_sign(s: &str) -> (f64, &str) {
        match s.as_bytes().first() {
            Some(b'-') => (-1.0, &s[1..]),
            Some(b'+') => (1.0, &s[1..]),
            _ => (1.0, s),
        }
    }

    // Both NaN and negative zero are falsy upstream and collapse to 0.
    fn not_nan_or_zero(value: f64) -> f64 {
        if value.is_nan() || value == 0.0 {
            0.0
        } else {
            value
        }
    }

    fn float_prefix(s: &str) -> &str {
        let bytes = s.as_bytes();
        let mut end = 0;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        let mut digits = end;
        if end < bytes.len() && bytes[end] == b'.' {
            let mut frac_end = end + 1;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            digits += frac_end - end - 1;
            if digits > 0 {
                end = frac_end;
            }
        }
        if digits == 0 {
            return "";
        }
        if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut exp_end = end + 1;
            if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
                exp_end += 1;
            }
            let exp_digits_start = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits_start {
                end = exp_end;
            }
        }
        &s[..end]
    }

}

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

    /// Display format for event dates: "YYYY-MM-DD"
    pub const DISPLAY_FORMAT: &str = "%Y-%m-%d";

    /// Parse a feed timestamp.
    ///
    /// Accepts RFC 3339 (`2024-05-01T12:34:56.789Z`), a naive ISO date-time
    /// (taken as UTC) or a bare date.
    pub fn parse_event_time(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, DISPLAY_FORMAT)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Format a feed timestamp as "YYYY-MM-DD", or return it unchanged when it
    /// does not parse.
    pub fn format_event_date(raw: &str) -> String {
        match parse_event_time(raw) {
            Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
            None => raw.to_string(),
        }
    }

}
