//! Date parsing for the tabular exports.
//!
//! Docking and coating sheets use US-style `M/D/YYYY` without zero padding;
//! voyage events carry `yyyy-MM-dd HH:mm:ss` timestamps.

use chrono::NaiveDate;

/// Parse `M/D/YYYY` (also `MM/DD/YYYY`). Anything else is `None`.
pub fn parse_mdy(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Calendar date of an event timestamp (its leading `yyyy-MM-dd`).
pub fn parse_event_date(timestamp: &str) -> Option<NaiveDate> {
    let date_part = timestamp.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mdy_without_padding() {
        assert_eq!(parse_mdy("6/30/2023"), NaiveDate::from_ymd_opt(2023, 6, 30));
        assert_eq!(parse_mdy(" 11/2/2024 "), NaiveDate::from_ymd_opt(2024, 11, 2));
    }

    #[test]
    fn day_first_dates_are_rejected() {
        assert_eq!(parse_mdy("30/6/2023"), None);
    }

    #[test]
    fn malformed_mdy() {
        assert_eq!(parse_mdy(""), None);
        assert_eq!(parse_mdy("6/30"), None);
        assert_eq!(parse_mdy("6/30/2023/1"), None);
        assert_eq!(parse_mdy("2023-06-30"), None);
    }

    #[test]
    fn event_date_takes_leading_date() {
        assert_eq!(
            parse_event_date("2025-03-14 08:15:00"),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
        assert_eq!(parse_event_date("2025-03-14"), NaiveDate::from_ymd_opt(2025, 3, 14));
    }

    #[test]
    fn short_or_bad_timestamp() {
        assert_eq!(parse_event_date("2025-3-1"), None);
        assert_eq!(parse_event_date("14/03/2025 08:15"), None);
    }
}
