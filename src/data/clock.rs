use chrono::{DateTime, FixedOffset, Utc};

/// Offset of the dashboard's display timezone, Pakistan Standard Time
/// (UTC+5). PKT does not observe daylight saving, so a fixed offset is
/// sufficient.
const DISPLAY_OFFSET_SECS: i32 = 5 * 3600;

/// Short label shown next to the dashboard clock.
pub const DISPLAY_TZ_LABEL: &str = "PKT";

fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_OFFSET_SECS).expect("display offset is in range")
}

/// Parse a feed timestamp like "2024-10-10T08:15:30Z" (RFC 3339).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Time-only display string for a reading timestamp.
pub fn time_of_day(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Current wall-clock time in the display timezone.
pub fn current_display_time() -> String {
    Utc::now()
        .with_timezone(&display_offset())
        .format("%H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_utc() {
        let ts = parse_timestamp("2024-10-10T08:15:30Z").unwrap();
        assert_eq!(time_of_day(&ts), "08:15:30");
    }

    #[test]
    fn test_parse_normalizes_offsets_to_utc() {
        let ts = parse_timestamp("2024-10-10T08:15:30+05:00").unwrap();
        assert_eq!(time_of_day(&ts), "03:15:30");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2024-10-10").is_none());
        assert!(parse_timestamp("not a timestamp").is_none());
    }

    #[test]
    fn test_display_clock_format() {
        let now = current_display_time();
        assert_eq!(now.len(), 8);
        assert_eq!(now.as_bytes()[2], b':');
        assert_eq!(now.as_bytes()[5], b':');
    }
}
