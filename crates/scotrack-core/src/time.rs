//! SCORM 1.2 time formatting.
//!
//! The data model stores interaction times as fixed-width strings:
//! CMITime (`HH:MM:SS.SS`) for `cmi.interactions.N.time` and
//! CMITimespan (`HHHH:MM:SS.SS`) for `cmi.interactions.N.latency`.

use chrono::{Duration, NaiveTime, Timelike};

/// Format a wall-clock time as CMITime, `HH:MM:SS.SS` with two-digit
/// centiseconds.
pub fn format_time(t: NaiveTime) -> String {
    let centis = t.nanosecond() / 10_000_000;
    format!(
        "{:02}:{:02}:{:02}.{:02}",
        t.hour(),
        t.minute(),
        t.second(),
        centis
    )
}

/// Format an elapsed span as CMITimespan, `HHHH:MM:SS.SS` with a
/// zero-padded four-digit hour field.
///
/// Negative spans clamp to zero. Spans of 10000 hours or more saturate
/// the hour field at `9999` — the format has nowhere wider to go.
pub fn format_timespan(span: Duration) -> String {
    let total_centis = span.num_milliseconds().max(0) / 10;
    let centis = total_centis % 100;
    let total_secs = total_centis / 100;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = (total_secs / 3600).min(9999);
    format!("{hours:04}:{mins:02}:{secs:02}.{centis:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timespan_five_seconds_and_a_quarter() {
        let span = Duration::milliseconds(5250);
        assert_eq!(format_timespan(span), "0000:00:05.25");
    }

    #[test]
    fn timespan_zero() {
        assert_eq!(format_timespan(Duration::zero()), "0000:00:00.00");
    }

    #[test]
    fn timespan_negative_clamps_to_zero() {
        assert_eq!(
            format_timespan(Duration::milliseconds(-1500)),
            "0000:00:00.00"
        );
    }

    #[test]
    fn timespan_carries_minutes_and_hours() {
        let span = Duration::seconds(90 * 60 + 7) + Duration::milliseconds(40);
        assert_eq!(format_timespan(span), "0001:30:07.04");
    }

    #[test]
    fn timespan_saturates_hour_field() {
        let span = Duration::hours(12_000);
        assert!(format_timespan(span).starts_with("9999:"));
    }

    #[test]
    fn time_of_day() {
        let t = NaiveTime::from_hms_milli_opt(14, 3, 9, 250).unwrap();
        assert_eq!(format_time(t), "14:03:09.25");
    }
}
