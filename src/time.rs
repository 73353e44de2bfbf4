use chrono::{DateTime, Local, TimeZone, Utc};

/// Pattern of timestamped run directory names (`yyyyMMdd-HHmmssSSS`)
pub const RUN_ID_FORMAT: &str = "%Y%m%d-%H%M%S%3f";

pub fn now_unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Run directory name for a point in time
pub fn run_id<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(RUN_ID_FORMAT).to_string()
}

pub fn now_run_id() -> String {
    run_id(&Local::now())
}

/// Local time for an epoch millisecond value, `None` when out of range
pub fn local_from_millis(millis: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap()
            + chrono::Duration::milliseconds(45);
        assert_eq!(run_id(&at), "20240307-090502045");
    }

    #[test]
    fn test_local_from_millis() {
        let local = local_from_millis(1_700_000_000_123).unwrap();
        assert_eq!(local.timestamp_millis(), 1_700_000_000_123);
    }
}
