use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};

/// Get the current time as an RFC 3339 string (UTC, microsecond precision).
pub fn now_rfc3339() -> String {
    format_stamp(Utc::now())
}

fn format_stamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a record timestamp.
///
/// Accepts full RFC 3339 stamps and bare `YYYY-MM-DD` dates (read as
/// midnight UTC); seed and imported data often carry the latter.
pub fn parse_stamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// A fresh stamp strictly later than every stamp in `previous`.
///
/// Normally this is just "now". When the clock has not moved past the
/// latest previous stamp (same tick, or clock skew) the result is that
/// stamp plus one microsecond. Unparseable entries are ignored.
pub fn stamp_after(previous: &[&str]) -> String {
    let now = Utc::now();
    let latest = previous.iter().filter_map(|s| parse_stamp(s)).max();
    match latest {
        Some(prev) if prev >= now => format_stamp(prev + Duration::microseconds(1)),
        _ => format_stamp(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.contains('T'));
        assert!(ts.ends_with('Z'));
        assert!(parse_stamp(&ts).is_some());
    }

    #[test]
    fn parse_accepts_bare_dates() {
        let d = parse_stamp("2024-01-15").unwrap();
        assert_eq!(format_stamp(d), "2024-01-15T00:00:00.000000Z");
        assert!(parse_stamp("15/01/2024").is_none());
        assert!(parse_stamp("").is_none());
    }

    #[test]
    fn stamp_after_is_strictly_later() {
        let future = "2999-01-01T00:00:00.000000Z";
        let next = stamp_after(&[future, "2024-01-15"]);
        assert_eq!(next, "2999-01-01T00:00:00.000001Z");

        let past = stamp_after(&["2024-01-15"]);
        assert!(parse_stamp(&past).unwrap() > parse_stamp("2024-01-15").unwrap());

        // Garbage is ignored rather than poisoning the result.
        assert!(parse_stamp(&stamp_after(&["not a date"])).is_some());
    }
}
