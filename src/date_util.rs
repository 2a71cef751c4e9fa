use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a configured timestamp literal.
///
/// Accepts RFC 3339, RFC 2822, a zone-less `YYYY-MM-DDTHH:MM[:SS[.f]]`
/// (read as UTC), a bare `YYYY-MM-DD`, `YYYY-MM` or `YYYY` (start of that
/// day, month or year, UTC), or an integer of more than four digits counting
/// milliseconds since the Unix epoch.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Some(date) = parse_partial_date(s) {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }
    // Four digits or fewer is a year, handled above.
    if s.len() > 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis);
    }
    None
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`, with missing parts taken as the first.
fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    let mut parts = s.split('-');
    let year = parts.next().filter(|y| is_digits(y, 4))?;
    let month = match parts.next() {
        None => "1",
        Some(m) if is_digits(m, 2) => m,
        Some(_) => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
