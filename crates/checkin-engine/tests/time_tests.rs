//! Tests for the time codec: strict parsing, formatting, lenient extraction,
//! and elapsed-time calculation.

use checkin_engine::time::{
    add_duration, elapsed_minutes, extract_time_of_day, extract_time_of_day_in,
    format_for_display, to_minutes, to_time_string, TimeOfDay,
};
use checkin_engine::CheckinError;
use chrono::Utc;

// ─────────────────────────────────────────────────────────────────────────────
// Strict parsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn to_minutes_parses_hh_mm() {
    assert_eq!(to_minutes("00:00").unwrap(), 0);
    assert_eq!(to_minutes("19:30").unwrap(), 1170);
    assert_eq!(to_minutes("23:59").unwrap(), 1439);
}

#[test]
fn to_minutes_accepts_session_hours_past_midnight() {
    // Session start times after midnight keep counting: 01:30 next day = 25:30.
    assert_eq!(to_minutes("25:30").unwrap(), 1530);
    assert_eq!(to_minutes("26:00").unwrap(), 1560);
}

#[test]
fn to_minutes_rejects_malformed_input() {
    for input in ["", "19", "19:30:00", "ab:cd", "19:", ":30", "-1:30", "19:60", " 19:30"] {
        let err = to_minutes(input).unwrap_err();
        assert!(
            matches!(err, CheckinError::MalformedTime(ref s) if s == input),
            "'{}' should be malformed, got {:?}",
            input,
            err
        );
    }
}

#[test]
fn to_time_string_zero_pads() {
    assert_eq!(to_time_string(0), "00:00");
    assert_eq!(to_time_string(65), "01:05");
    assert_eq!(to_time_string(1439), "23:59");
}

#[test]
fn to_time_string_wraps_into_one_day() {
    assert_eq!(to_time_string(1440), "00:00");
    assert_eq!(to_time_string(1530), "01:30");
    assert_eq!(to_time_string(-30), "23:30");
}

#[test]
fn add_duration_rolls_past_midnight() {
    assert_eq!(add_duration("19:00", 90).unwrap(), "20:30");
    assert_eq!(add_duration("23:30", 90).unwrap(), "01:00");
    assert_eq!(add_duration("25:30", 30).unwrap(), "02:00");
}

#[test]
fn add_duration_propagates_malformed_start() {
    assert!(matches!(
        add_duration("7pm", 30),
        Err(CheckinError::MalformedTime(_))
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Display formatting
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_for_display_uses_twelve_hour_clock() {
    assert_eq!(format_for_display("00:00").unwrap(), "12:00 AM");
    assert_eq!(format_for_display("00:45").unwrap(), "12:45 AM");
    assert_eq!(format_for_display("09:05").unwrap(), "9:05 AM");
    assert_eq!(format_for_display("12:00").unwrap(), "12:00 PM");
    assert_eq!(format_for_display("13:05").unwrap(), "1:05 PM");
    assert_eq!(format_for_display("23:59").unwrap(), "11:59 PM");
}

#[test]
fn format_for_display_folds_session_hours() {
    assert_eq!(format_for_display("25:30").unwrap(), "1:30 AM");
}

#[test]
fn time_of_day_display_and_session_string() {
    let t = TimeOfDay::from_hm(25, 30);
    assert_eq!(t.to_string(), "01:30");
    assert_eq!(t.to_session_string(), "25:30");
    assert_eq!(t.hour(), 25);
    assert_eq!(t.wrapped(), TimeOfDay::from_hm(1, 30));
}

#[test]
fn time_of_day_serializes_as_wrapped_string() {
    let json = serde_json::to_string(&TimeOfDay::from_hm(24, 15)).unwrap();
    assert_eq!(json, r#""00:15""#);

    let parsed: TimeOfDay = serde_json::from_str(r#""19:45""#).unwrap();
    assert_eq!(parsed, TimeOfDay::from_hm(19, 45));

    assert!(serde_json::from_str::<TimeOfDay>(r#""nope""#).is_err());
}

#[test]
fn minutes_until_assumes_one_midnight_crossing() {
    let eleven_pm = TimeOfDay::from_hm(23, 0);
    assert_eq!(eleven_pm.minutes_until(TimeOfDay::from_hm(23, 45)), 45);
    assert_eq!(eleven_pm.minutes_until(TimeOfDay::from_hm(1, 0)), 120);
    assert_eq!(eleven_pm.minutes_until(TimeOfDay::from_hm(25, 0)), 120);
    assert_eq!(eleven_pm.minutes_until(eleven_pm), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Lenient extraction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn extract_returns_bare_time_unchanged() {
    assert_eq!(extract_time_of_day("19:30"), "19:30");
}

#[test]
fn extract_finds_time_in_full_timestamp() {
    assert_eq!(extract_time_of_day("2024-01-01T10:30:00+00:00"), "10:30");
    assert_eq!(extract_time_of_day("2024-01-01 22:05:00+00"), "22:05");
}

#[test]
fn extract_returns_first_embedded_match() {
    assert_eq!(extract_time_of_day("from 18:00 to 20:00"), "18:00");
}

#[test]
fn extract_falls_back_to_date_time_parsing() {
    assert_eq!(extract_time_of_day_in("20240101T103000", &Utc), "10:30");
    assert_eq!(extract_time_of_day_in("20240101T2315", &Utc), "23:15");
}

#[test]
fn extract_passes_unparseable_input_through() {
    assert_eq!(extract_time_of_day("half past seven"), "half past seven");
    assert_eq!(extract_time_of_day(""), "");
}

// ─────────────────────────────────────────────────────────────────────────────
// Elapsed minutes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn elapsed_minutes_same_day() {
    assert_eq!(elapsed_minutes("19:00", "20:30").unwrap(), 90);
    assert_eq!(elapsed_minutes("19:00", "19:00").unwrap(), 0);
}

#[test]
fn elapsed_minutes_crosses_midnight() {
    assert_eq!(elapsed_minutes("23:30", "01:00").unwrap(), 90);
}

#[test]
fn elapsed_minutes_accepts_timestamps() {
    assert_eq!(
        elapsed_minutes("2024-01-01T21:00:00+00:00", "2024-01-02T00:15:00+00:00").unwrap(),
        195
    );
}

#[test]
fn elapsed_minutes_enforces_strict_parse_after_extraction() {
    assert!(matches!(
        elapsed_minutes("whenever", "20:00"),
        Err(CheckinError::MalformedTime(_))
    ));
}
