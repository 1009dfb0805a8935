//! Due-date parsing and formatting.
//!
//! Due dates are plain calendar dates (`NaiveDate`). Nothing here ever
//! returns an error: input that cannot be understood means "no due date".

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "monday", "next monday", "this friday" (and three-letter forms)
/// - "end of week" / "eow", "end of month" / "eom"
/// - "in 3d", "in 2w", "in 1m"
/// - "YYYY-MM-DD" and RFC 3339 timestamps
pub fn parse_due_input(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = input.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        "end of week" | "eow" => return Some(end_of_week(today)),
        "end of month" | "eom" => return end_of_month(today),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        return parse_offset(rest.trim(), today);
    }

    if let Some(date) = parse_weekday(&s, today) {
        return Some(date);
    }

    parse_date_text(input)
}

/// Parse an absolute date: `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// A timestamp is reduced to its local calendar date, which recovers the
/// day of a value stored as local midnight.
pub fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

fn parse_offset(rest: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (unit_start, _) = rest.char_indices().last()?;
    let (count, unit) = rest.split_at(unit_start);
    let count: i64 = count.trim().parse().ok()?;
    let days = match unit {
        "d" => count,
        "w" => count.checked_mul(7)?,
        // Approximate: 30 days per month
        "m" => count.checked_mul(30)?,
        _ => return None,
    };
    today.checked_add_signed(Duration::try_days(days)?)
}

fn parse_weekday(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    const WEEKDAYS: [(&str, &str); 7] = [
        ("monday", "mon"),
        ("tuesday", "tue"),
        ("wednesday", "wed"),
        ("thursday", "thu"),
        ("friday", "fri"),
        ("saturday", "sat"),
        ("sunday", "sun"),
    ];

    let (next_week, name) = match s.strip_prefix("next ") {
        Some(name) => (true, name),
        None => (false, s.strip_prefix("this ").unwrap_or(s)),
    };
    let target = WEEKDAYS
        .iter()
        .position(|(long, short)| name == *long || name == *short)? as i64;
    let current = today.weekday().num_days_from_monday() as i64;
    let days_ahead = (target + 7 - current) % 7;
    let days = if next_week { days_ahead + 7 } else { days_ahead };
    Some(today + Duration::days(days))
}

/// The Sunday closing the ISO week that contains `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_monday() as i64;
    date + Duration::days(6 - weekday)
}

/// The last day of the month that contains `date`.
pub fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let days = (d - today).num_days();
            match days {
                0 => "today".into(),
                1 => "tomorrow".into(),
                n if n > 1 => format!("in {n}d"),
                n => format!("{}d late", -n),
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDueDate {
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Serde helper for persisted due dates.
///
/// Malformed or non-string values load as `None` rather than failing the
/// surrounding record.
pub fn lenient_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDueDate>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawDueDate::Text(text)) => parse_date_text(&text),
        Some(RawDueDate::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-05-15 is a Wednesday.
    const TODAY: (i32, u32, u32) = (2024, 5, 15);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn test_relative_words() {
        assert_eq!(parse_due_input("today", today()), Some(today()));
        assert_eq!(parse_due_input(" Tomorrow ", today()), Some(date(2024, 5, 16)));
        assert_eq!(parse_due_input("yesterday", today()), Some(date(2024, 5, 14)));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(parse_due_input("in 3d", today()), Some(date(2024, 5, 18)));
        assert_eq!(parse_due_input("in 2w", today()), Some(date(2024, 5, 29)));
        assert_eq!(parse_due_input("in 1m", today()), Some(date(2024, 6, 14)));
        assert_eq!(parse_due_input("in xd", today()), None);
        assert_eq!(parse_due_input("in ", today()), None);
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(parse_due_input("friday", today()), Some(date(2024, 5, 17)));
        assert_eq!(parse_due_input("wed", today()), Some(today()));
        assert_eq!(parse_due_input("this mon", today()), Some(date(2024, 5, 20)));
        assert_eq!(parse_due_input("next friday", today()), Some(date(2024, 5, 24)));
    }

    #[test]
    fn test_end_of_periods() {
        assert_eq!(parse_due_input("eow", today()), Some(date(2024, 5, 19)));
        assert_eq!(parse_due_input("end of month", today()), Some(date(2024, 5, 31)));
        assert_eq!(end_of_month(date(2024, 12, 3)), Some(date(2024, 12, 31)));
        assert_eq!(end_of_week(date(2024, 5, 19)), date(2024, 5, 19));
    }

    #[test]
    fn test_absolute_dates() {
        assert_eq!(parse_due_input("2024-07-01", today()), Some(date(2024, 7, 1)));
        assert_eq!(parse_date_text("2024-02-30"), None);
        assert_eq!(parse_due_input("not a date", today()), None);
        assert_eq!(parse_due_input("", today()), None);
    }

    #[test]
    fn test_rfc3339_keeps_local_calendar_day() {
        let local_noon = date(2024, 7, 1)
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .single()
            .unwrap();
        assert_eq!(parse_date_text(&local_noon.to_rfc3339()), Some(date(2024, 7, 1)));
    }

    #[test]
    fn test_format_due_relative() {
        assert_eq!(format_due_relative(None, today()), "-");
        assert_eq!(format_due_relative(Some(today()), today()), "today");
        assert_eq!(format_due_relative(Some(date(2024, 5, 16)), today()), "tomorrow");
        assert_eq!(format_due_relative(Some(date(2024, 5, 20)), today()), "in 5d");
        assert_eq!(format_due_relative(Some(date(2024, 5, 13)), today()), "2d late");
    }

    #[test]
    fn test_lenient_due_date() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "lenient_due_date")]
            due: Option<NaiveDate>,
        }

        let ok: Holder = serde_json::from_str(r#"{"due":"2024-07-01"}"#).unwrap();
        assert_eq!(ok.due, Some(date(2024, 7, 1)));
        let bad: Holder = serde_json::from_str(r#"{"due":"Invalid Date"}"#).unwrap();
        assert_eq!(bad.due, None);
        let number: Holder = serde_json::from_str(r#"{"due":1714521600000}"#).unwrap();
        assert_eq!(number.due, None);
        let null: Holder = serde_json::from_str(r#"{"due":null}"#).unwrap();
        assert_eq!(null.due, None);
        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.due, None);
    }
}
