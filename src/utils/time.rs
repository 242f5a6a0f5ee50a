use chrono::{DateTime, Utc};

/// Current time at the millisecond precision timestamps are stored with.
pub fn time_now() -> DateTime<Utc> {
  let now = Utc::now();
  DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
