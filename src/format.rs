//! Display Formatting
//!
//! Date text for cards and lists, `<input type="date">` conversion, and
//! avatar initials.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

const DAY_MS: f64 = 86_400_000.0;

/// Whole days from `now` to `date`, rounded up
fn day_offset(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff = (date - now).num_milliseconds() as f64;
    (diff / DAY_MS).ceil() as i64
}

/// "Today", "Tomorrow", "Yesterday", "in N days" or "N days ago"
pub fn relative_day(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match day_offset(date, now) {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        n if n > 1 => format!("in {} days", n),
        n => format!("{} days ago", -n),
    }
}

pub fn is_overdue(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    due.is_some_and(|d| d < now)
}

/// Value for a date input, empty when unset
pub fn to_input_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Parse a date input's `YYYY-MM-DD` value as UTC midnight
pub fn parse_input_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// "Mar 4, 2025"
pub fn short_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Mar 4, 2025, 14:05"
pub fn timestamp(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y, %H:%M").to_string()
}

/// First letter of each name, uppercased; "??" when neither is known
pub fn initials(first: &str, last: &str) -> String {
    let letters: String = [first, last]
        .iter()
        .filter_map(|name| name.trim().chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "??".to_string()
    } else {
        letters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_day_rounds_up() {
        let now = now();
        assert_eq!(relative_day(now, now), "Today");
        assert_eq!(relative_day(now + Duration::hours(3), now), "Tomorrow");
        assert_eq!(relative_day(now + Duration::days(1), now), "Tomorrow");
        assert_eq!(relative_day(now + Duration::days(3), now), "in 3 days");
        assert_eq!(relative_day(now - Duration::hours(3), now), "Today");
        assert_eq!(relative_day(now - Duration::days(1), now), "Yesterday");
        assert_eq!(relative_day(now - Duration::days(5), now), "5 days ago");
    }

    #[test]
    fn test_overdue() {
        let now = now();
        assert!(is_overdue(Some(now - Duration::minutes(1)), now));
        assert!(!is_overdue(Some(now + Duration::minutes(1)), now));
        assert!(!is_overdue(None, now));
    }

    #[test]
    fn test_input_date_conversion() {
        let parsed = parse_input_date("2025-03-04").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap());
        assert_eq!(to_input_date(Some(now())), "2025-03-04");
        assert_eq!(to_input_date(None), "");
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("04/03/2025"), None);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ada", "lovelace"), "AL");
        assert_eq!(initials("Ada", ""), "A");
        assert_eq!(initials(" ", ""), "??");
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date(now()), "Mar 4, 2025");
        assert_eq!(timestamp(now()), "Mar 4, 2025, 12:00");
    }
}
