//! Date-window evaluation.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::model::Event;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Is `now` inside the event's `[start, end]` window?
///
/// Both bounds are taken at midnight and compared against the full
/// timestamp, so the last day only counts at exactly 00:00:00.
pub fn is_active(event: &Event, now: NaiveDateTime) -> Result<bool> {
    let start = parse_midnight(event, "start", &event.start)?;
    let end = parse_midnight(event, "end", &event.end)?;
    Ok(start <= now && now <= end)
}

fn parse_midnight(event: &Event, field: &'static str, value: &str) -> Result<NaiveDateTime> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|source| Error::MalformedDate {
            event: event.name.clone(),
            field,
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewEvent;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn march() -> Event {
        NewEvent::new("Spring Fest", "2024-03-01", "2024-03-31").build()
    }

    #[test]
    fn inside_window() {
        assert!(is_active(&march(), at("2024-03-15", "12:00:00")).unwrap());
    }

    #[test]
    fn boundaries_are_inclusive_at_midnight() {
        assert!(is_active(&march(), at("2024-03-01", "00:00:00")).unwrap());
        assert!(is_active(&march(), at("2024-03-31", "00:00:00")).unwrap());
    }

    #[test]
    fn last_day_after_midnight_is_inactive() {
        // Bounds are midnight-anchored; the end day does not extend to 23:59.
        assert!(!is_active(&march(), at("2024-03-31", "10:00:00")).unwrap());
    }

    #[test]
    fn outside_window() {
        assert!(!is_active(&march(), at("2024-02-29", "23:59:59")).unwrap());
        assert!(!is_active(&march(), at("2024-04-01", "00:00:00")).unwrap());
    }

    #[test]
    fn inverted_window_is_never_active() {
        let event = NewEvent::new("Backwards", "2024-03-31", "2024-03-01").build();
        assert!(!is_active(&event, at("2024-03-15", "00:00:00")).unwrap());
        assert!(!is_active(&event, at("2024-03-31", "00:00:00")).unwrap());
    }

    #[test]
    fn single_day_window_holds_only_at_midnight() {
        let event = NewEvent::new("Flash", "2024-05-05", "2024-05-05").build();
        assert!(is_active(&event, at("2024-05-05", "00:00:00")).unwrap());
        assert!(!is_active(&event, at("2024-05-05", "00:00:01")).unwrap());
    }

    #[test]
    fn malformed_dates_are_reported() {
        let event = NewEvent::new("Broken", "2024/03/01", "2024-03-31").build();
        let err = is_active(&event, at("2024-03-15", "00:00:00")).unwrap_err();
        match err {
            Error::MalformedDate { event, field, value, .. } => {
                assert_eq!(event, "Broken");
                assert_eq!(field, "start");
                assert_eq!(value, "2024/03/01");
            }
            other => panic!("expected MalformedDate, got {other:?}"),
        }

        let event = NewEvent::new("Broken", "2024-03-01", "").build();
        assert!(matches!(
            is_active(&event, at("2024-03-15", "00:00:00")),
            Err(Error::MalformedDate { field: "end", .. })
        ));
    }
}
