use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Time remaining until the event, split the way the page displays it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    pub fn is_zero(self) -> bool {
        self == Self::default()
    }
}

/// Parses the event timestamp as stored in the data document.
///
/// Accepts RFC 3339 plus the datetime-local shapes the admin UI emits
/// (`YYYY-MM-DDTHH:MM[:SS]`, with a space in place of the `T`, or a bare
/// date meaning midnight). Naive stamps are taken as UTC. Returns `None`
/// for anything else; callers render a blank rather than erroring.
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Remaining time until `target`, or `None` when the target does not parse.
/// A target already in the past counts down to all zeros and stays there.
pub fn time_left(target: &str, now: DateTime<Utc>) -> Option<TimeLeft> {
    let target = parse_event_date(target)?;
    let remaining = target.signed_duration_since(now).num_seconds();
    if remaining <= 0 {
        return Some(TimeLeft::default());
    }

    let secs = remaining as u64;
    Some(TimeLeft {
        days: secs / 86_400,
        hours: secs / 3_600 % 24,
        minutes: secs / 60 % 60,
        seconds: secs % 60,
    })
}

/// Human-readable date for the card face, e.g. `October 10, 2026`.
pub fn format_display_date(raw: &str) -> Option<String> {
    parse_event_date(raw).map(|dt| dt.format("%B %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn accepts_admin_ui_shapes() {
        assert_eq!(
            parse_event_date("2026-10-10T11:00"),
            Some(at(2026, 10, 10, 11, 0, 0))
        );
        assert_eq!(
            parse_event_date("2026-10-10 11:00:30"),
            Some(at(2026, 10, 10, 11, 0, 30))
        );
        assert_eq!(parse_event_date("2026-10-10"), Some(at(2026, 10, 10, 0, 0, 0)));
        assert_eq!(
            parse_event_date("2026-10-10T11:00:00+09:00"),
            Some(at(2026, 10, 10, 2, 0, 0))
        );
    }

    #[test]
    fn rejects_garbage_without_panicking() {
        assert_eq!(parse_event_date(""), None);
        assert_eq!(parse_event_date("   "), None);
        assert_eq!(parse_event_date("next summer"), None);
        assert_eq!(parse_event_date("2026-13-40"), None);
    }

    #[test]
    fn splits_a_known_delta() {
        let now = at(2026, 10, 8, 10, 58, 57);
        // 2 days, 0 hours, 1 minute, 3 seconds short of the event.
        let left = time_left("2026-10-10T11:00", now).unwrap();
        assert_eq!(
            left,
            TimeLeft {
                days: 2,
                hours: 0,
                minutes: 1,
                seconds: 3,
            }
        );
    }

    #[test]
    fn past_target_is_all_zero() {
        let now = at(2027, 1, 1, 0, 0, 0);
        let left = time_left("2026-10-10", now).unwrap();
        assert!(left.is_zero());
    }

    #[test]
    fn unparseable_target_is_none() {
        let now = at(2026, 1, 1, 0, 0, 0);
        assert_eq!(time_left("someday", now), None);
    }

    #[test]
    fn display_date_formats_long_form() {
        assert_eq!(
            format_display_date("2026-10-10T11:00").as_deref(),
            Some("October 10, 2026")
        );
        assert_eq!(format_display_date("nope"), None);
    }
}
