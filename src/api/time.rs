//! Time parsing and formatting utilities for "HH:MM" task times

use chrono::{Local, NaiveTime, Timelike};

use crate::config::ClockFormat;

/// Minutes per default add slot; new tasks start on a half-hour boundary
pub const SLOT_MINUTES: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse "HH:MM" to minutes since midnight.
/// Empty, unparsable or out-of-range input yields 0, a missing minute part counts as 0.
pub fn parse_time_to_minutes(time: &str) -> i32 {
    let time = time.trim();
    if time.is_empty() {
        return 0;
    }

    let mut parts = time.split(':');
    let Some(hours) = parts.next().and_then(|h| h.trim().parse::<i32>().ok()) else {
        return 0;
    };
    let minutes = parts
        .next()
        .and_then(|m| m.trim().parse::<i32>().ok())
        .unwrap_or(0);

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .unwrap_or(0)
}

/// Format minutes since midnight as "HH:MM".
/// Hours are not wrapped, so 1470 formats as "24:30".
pub fn format_minutes_to_time(minutes: i32) -> String {
    let hours = minutes.div_euclid(60);
    let mins = minutes.rem_euclid(60);
    format!("{:02}:{:02}", hours, mins)
}

/// Duration of a task in hours, 1.0 when either bound is missing
pub fn event_duration_hours(start_time: &str, end_time: &str) -> f64 {
    if start_time.trim().is_empty() || end_time.trim().is_empty() {
        return 1.0;
    }

    let start = parse_time_to_minutes(start_time);
    let end = parse_time_to_minutes(end_time);
    (f64::from(end) - f64::from(start)) / 60.0
}

/// Minute-of-hour of `start_time` as a 0-100 percentage of the hour row
pub fn start_time_offset(start_time: &str) -> f64 {
    if start_time.trim().is_empty() {
        return 0.0;
    }

    let minute = start_time
        .split(':')
        .nth(1)
        .and_then(|m| m.trim().parse::<u32>().ok())
        .unwrap_or(0);
    f64::from(minute) / 60.0 * 100.0
}

/// Default end time: one hour after `start_time`, on the same day's timeline
pub fn default_end_time(start_time: &str) -> String {
    format_minutes_to_time(parse_time_to_minutes(start_time).saturating_add(60))
}

/// Current local time rounded up to the next half-hour slot
pub fn current_rounded_time() -> String {
    round_up_to_slot(Local::now().time(), SLOT_MINUTES)
}

/// Round `time` up to the next multiple of `slot` minutes.
/// A rounded minute of 60 carries into the hour and the hour wraps at midnight,
/// so the result is always a valid clock time.
pub fn round_up_to_slot(time: NaiveTime, slot: u32) -> String {
    let slot = slot.max(1);
    let minute = time.minute();
    let rounded = minute.div_ceil(slot) * slot;
    let total = (time.hour() * 60 + rounded) % MINUTES_PER_DAY;

    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Half-open overlap test: touching ranges do not overlap
pub fn time_ranges_overlap(start_a: &str, end_a: &str, start_b: &str, end_b: &str) -> bool {
    let start_a = parse_time_to_minutes(start_a);
    let end_a = parse_time_to_minutes(end_a);
    let start_b = parse_time_to_minutes(start_b);
    let end_b = parse_time_to_minutes(end_b);

    start_a < end_b && end_a > start_b
}

/// Format a time string "HH:MM" according to clock format
pub fn format_clock_time(time_24: &str, clock_format: ClockFormat) -> String {
    match clock_format {
        ClockFormat::Hour24 => time_24.to_string(),
        ClockFormat::Hour12 => {
            let parts: Vec<&str> = time_24.split(':').collect();
            if parts.len() >= 2 {
                if let (Ok(hour), Ok(min)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                    let hour = hour % 24;
                    let (h12, ampm) = if hour == 0 {
                        (12, "am")
                    } else if hour < 12 {
                        (hour, "am")
                    } else if hour == 12 {
                        (12, "pm")
                    } else {
                        (hour - 12, "pm")
                    };
                    return format!("{}:{:02}{}", h12, min, ampm);
                }
            }
            time_24.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parse_and_format_agree_over_a_day() {
        for m in 0..1440 {
            assert_eq!(parse_time_to_minutes(&format_minutes_to_time(m)), m);
        }
    }

    #[test]
    fn parse_tolerates_bad_input() {
        assert_eq!(parse_time_to_minutes(""), 0);
        assert_eq!(parse_time_to_minutes("   "), 0);
        assert_eq!(parse_time_to_minutes("ab:cd"), 0);
        assert_eq!(parse_time_to_minutes("9"), 540);
        assert_eq!(parse_time_to_minutes("09:xx"), 540);
        assert_eq!(parse_time_to_minutes("14:30"), 870);
    }

    #[test]
    fn oversized_hours_do_not_overflow() {
        assert_eq!(parse_time_to_minutes("40000000"), 0);
        assert_eq!(parse_time_to_minutes("2147483647:00"), 0);
        assert_eq!(parse_time_to_minutes("35791394:07"), i32::MAX);
        assert_eq!(parse_time_to_minutes("35791394:08"), 0);
        assert_eq!(parse_time_to_minutes("-2147483648:00"), 0);

        // an out-of-range start reads as midnight
        assert!(time_ranges_overlap("40000000", "10:00", "09:00", "11:00"));
        assert_eq!(default_end_time("2147483647:00"), "01:00");
        assert_eq!(default_end_time("35791394:07"), "35791394:07");
        assert_eq!(event_duration_hours("-35791394:00", "35791394:00"), 71582788.0);
    }

    #[test]
    fn format_does_not_wrap_hours() {
        assert_eq!(format_minutes_to_time(0), "00:00");
        assert_eq!(format_minutes_to_time(545), "09:05");
        assert_eq!(format_minutes_to_time(1470), "24:30");
    }

    #[test]
    fn duration_defaults_to_one_hour() {
        assert_eq!(event_duration_hours("", "10:00"), 1.0);
        assert_eq!(event_duration_hours("09:00", ""), 1.0);
        assert_eq!(event_duration_hours("09:00", "10:30"), 1.5);
        assert_eq!(event_duration_hours("14:00", "15:00"), 1.0);
    }

    #[test]
    fn start_offset_is_percentage_of_hour() {
        assert_eq!(start_time_offset("09:00"), 0.0);
        assert_eq!(start_time_offset("09:30"), 50.0);
        assert_eq!(start_time_offset("09:45"), 75.0);
        assert_eq!(start_time_offset(""), 0.0);
    }

    #[test]
    fn default_end_is_one_hour_later() {
        assert_eq!(default_end_time("09:00"), "10:00");
        assert_eq!(default_end_time("09:45"), "10:45");
        assert_eq!(default_end_time("23:30"), "24:30");
    }

    #[test]
    fn rounding_carries_into_the_hour() {
        assert_eq!(round_up_to_slot(hm(10, 0), 30), "10:00");
        assert_eq!(round_up_to_slot(hm(10, 1), 30), "10:30");
        assert_eq!(round_up_to_slot(hm(10, 30), 30), "10:30");
        assert_eq!(round_up_to_slot(hm(10, 59), 30), "11:00");
        assert_eq!(round_up_to_slot(hm(23, 59), 30), "00:00");
    }

    #[test]
    fn current_rounded_time_is_a_valid_clock_time() {
        let rounded = current_rounded_time();
        assert!(NaiveTime::parse_from_str(&rounded, "%H:%M").is_ok(), "{}", rounded);
        assert!(rounded.ends_with(":00") || rounded.ends_with(":30"));
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!time_ranges_overlap("09:00", "10:00", "10:00", "11:00"));
        assert!(time_ranges_overlap("09:00", "10:30", "10:00", "11:00"));
        assert!(time_ranges_overlap("10:00", "11:00", "09:00", "12:00"));
        assert!(!time_ranges_overlap("12:00", "13:00", "09:00", "10:00"));
    }

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(format_clock_time("00:15", ClockFormat::Hour12), "12:15am");
        assert_eq!(format_clock_time("12:00", ClockFormat::Hour12), "12:00pm");
        assert_eq!(format_clock_time("14:30", ClockFormat::Hour12), "2:30pm");
        assert_eq!(format_clock_time("14:30", ClockFormat::Hour24), "14:30");
    }
}
