//! Formatting utilities for terminal output.

use chrono::{DateTime, Utc};

/// Render the distance between two instants in compact form.
///
/// Returns strings like `"42 s"`, `"5 m"`, `"3 h"`, `"12 d"` (rounded).
/// Distances of a year or more render as an empty string; the recent panel
/// never shows anything that old.
pub fn time_since(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let secs = (end - start).num_milliseconds() as f64 / 1000.0;
    if secs < 60.0 {
        return format!("{} s", secs.round() as i64);
    }
    let mins = secs / 60.0;
    if mins < 60.0 {
        return format!("{} m", mins.round() as i64);
    }
    let hours = mins / 60.0;
    if hours < 24.0 {
        return format!("{} h", hours.round() as i64);
    }
    let days = hours / 24.0;
    if days < 365.0 {
        return format!("{} d", days.round() as i64);
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2015-01-10T18:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_seconds() {
        assert_eq!(time_since(now() - Duration::seconds(42), now()), "42 s");
    }

    #[test]
    fn test_minutes_round() {
        assert_eq!(time_since(now() - Duration::seconds(150), now()), "3 m");
    }

    #[test]
    fn test_hours() {
        assert_eq!(time_since(now() - Duration::hours(3), now()), "3 h");
    }

    #[test]
    fn test_days() {
        assert_eq!(time_since(now() - Duration::days(12), now()), "12 d");
    }

    #[test]
    fn test_a_year_or_more_is_blank() {
        assert_eq!(time_since(now() - Duration::days(400), now()), "");
    }
}
