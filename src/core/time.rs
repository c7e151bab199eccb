//! Time representation using nanoseconds for boundary-accurate trimming.
//! The media element reports seconds as f64; everything inside the timeline is nanoseconds.

/// Time in nanoseconds since media start
pub type Time = i64;

/// Time constants for conversions
pub mod constants {
    use super::Time;

    pub const NANOS_PER_SECOND: Time = 1_000_000_000;
    pub const NANOS_PER_MILLI: Time = 1_000_000;
}

/// Convert seconds (f64) to nanoseconds (i64), rounding to the nearest nanosecond
#[inline]
pub fn from_seconds(seconds: f64) -> Time {
    (seconds * constants::NANOS_PER_SECOND as f64).round() as Time
}

/// Convert nanoseconds (i64) to seconds (f64)
#[inline]
pub fn to_seconds(nanos: Time) -> f64 {
    nanos as f64 / constants::NANOS_PER_SECOND as f64
}

/// Convert nanoseconds to milliseconds
#[inline]
pub fn to_millis(nanos: Time) -> i64 {
    nanos / constants::NANOS_PER_MILLI
}

/// Position of `nanos` within `duration` as a percentage.
/// Returns 0 for an empty duration.
#[inline]
pub fn percent_of(nanos: Time, duration: Time) -> f64 {
    if duration <= 0 {
        return 0.0;
    }
    nanos as f64 * 100.0 / duration as f64
}

/// Format time as HH:MM:SS.mmm
pub fn format_time(nanos: Time) -> String {
    let nanos = nanos.max(0);
    let total_seconds = to_seconds(nanos);
    let hours = (total_seconds / 3600.0).floor() as i64;
    let minutes = ((total_seconds % 3600.0) / 60.0).floor() as i64;
    let seconds = (total_seconds % 60.0).floor() as i64;
    let millis = to_millis(nanos) % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_conversion() {
        let time = from_seconds(1.5);
        assert_eq!(time, 1_500_000_000);
        assert!((to_seconds(time) - 1.5).abs() < 0.000001);
    }

    #[test]
    fn test_from_seconds_rounds() {
        // 4.9 * 1e9 is not exactly representable; rounding keeps it on the intended nanosecond
        assert_eq!(from_seconds(4.9), 4_900_000_000);
        assert_eq!(from_seconds(0.2), 200_000_000);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(from_seconds(5.0), from_seconds(10.0)), 50.0);
        assert_eq!(percent_of(from_seconds(5.0), 0), 0.0);
    }

    #[test]
    fn test_format_time() {
        let time = from_seconds(3661.5); // 1 hour, 1 minute, 1.5 seconds
        assert_eq!(format_time(time), "01:01:01.500");
        assert_eq!(format_time(-5), "00:00:00.000");
    }
}
