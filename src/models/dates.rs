//! Date parsing and formatting shared by the derived fields and the form checklists

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Canonical `YYYY-MM-DD` rendering used by every derived date string
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Calendar dates in extended, basic or reduced-precision form:
/// `YYYY-MM-DD`, `YYYYMMDD`, `YYYY-MM` and `YYYY`
fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    let (year, month, day) = match value.split('-').collect::<Vec<_>>()[..] {
        [y, m, d] if digits(y, 4) && digits(m, 2) && digits(d, 2) => (y, m, d),
        [y, m] if digits(y, 4) && digits(m, 2) => (y, m, "01"),
        [y] if digits(y, 8) => (&y[..4], &y[4..6], &y[6..]),
        [y] if digits(y, 4) => (y, "01", "01"),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Parses an ISO-8601 date or date-time.
///
/// Plain dates are taken as midnight UTC; a reduced-precision date starts at
/// the first day of its month or year. Date-times without an offset are taken
/// as UTC.
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Some(date) = parse_calendar_date(value) {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y%m%dT%H%M%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Parses an ISO-8601 value down to its UTC calendar date
pub fn parse_iso8601_date(value: &str) -> Option<NaiveDate> {
    parse_iso8601(value).map(|dt| dt.date_naive())
}
