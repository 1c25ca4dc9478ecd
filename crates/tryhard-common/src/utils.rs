//! Shared formatting helpers for timestamps and durations.

use chrono::NaiveTime;

/// Formats a number of seconds as a short human-readable delay ("1h",
/// "30min", "45s"). Sub-unit remainders are truncated.
pub fn format_delay(seconds: u64) -> String {
    if seconds >= 3600 {
        format!("{}h", seconds / 3600)
    } else if seconds >= 60 {
        format!("{}min", seconds / 60)
    } else {
        format!("{seconds}s")
    }
}

/// Formats a time of day the way the poll announcements spell it ("21h00").
pub fn format_hour_label(time: NaiveTime) -> String {
    time.format("%Hh%M").to_string()
}

/// Formats a time of day as "HH:MM".
pub fn format_hour_minute(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(3600), "1h");
        assert_eq!(format_delay(7200), "2h");
        assert_eq!(format_delay(5400), "1h");
        assert_eq!(format_delay(90), "1min");
        assert_eq!(format_delay(60), "1min");
        assert_eq!(format_delay(45), "45s");
        assert_eq!(format_delay(0), "0s");
    }

    #[test]
    fn test_format_hour_label() {
        let time = NaiveTime::from_hms_opt(21, 0, 0).unwrap();
        assert_eq!(format_hour_label(time), "21h00");

        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_hour_label(time), "09h05");
    }

    #[test]
    fn test_format_hour_minute() {
        let time = NaiveTime::from_hms_opt(22, 30, 15).unwrap();
        assert_eq!(format_hour_minute(time), "22:30");
    }
}
