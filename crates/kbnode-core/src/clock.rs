use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format an instant as `YYYY-MM-DDTHH:mm:ss.sssZ`.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Read `clock` and format the result as a node timestamp.
pub fn current_timestamp(clock: &dyn Clock) -> String {
    format_timestamp(clock.now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed(value: &str) -> FixedClock {
        let parsed = DateTime::parse_from_rfc3339(value)
            .expect("valid instant")
            .with_timezone(&Utc);
        FixedClock(parsed)
    }

    #[test]
    fn formats_with_millis_and_zulu_suffix() {
        let clock = fixed("2024-01-15T10:30:00Z");
        assert_eq!(current_timestamp(&clock), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn sub_millisecond_precision_is_truncated() {
        let instant = Utc
            .with_ymd_and_hms(2023, 7, 4, 8, 5, 9)
            .single()
            .expect("valid instant")
            + chrono::Duration::microseconds(123_987);
        assert_eq!(format_timestamp(instant), "2023-07-04T08:05:09.123Z");
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let clock = fixed("2024-01-15T12:30:00.250+02:00");
        assert_eq!(current_timestamp(&clock), "2024-01-15T10:30:00.250Z");
    }

    #[test]
    fn system_clock_round_trips_through_parse() {
        let stamp = current_timestamp(&SystemClock);
        assert_eq!(stamp.len(), 24);
        assert!(stamp.ends_with('Z'));
        let parsed = DateTime::parse_from_rfc3339(&stamp).expect("iso 8601 instant");
        assert_eq!(format_timestamp(parsed.with_timezone(&Utc)), stamp);
    }
}
