//! Tests for start-time and duration options.

use checkin_engine::{candidate_durations, candidate_start_times, SessionWindow, TimeOfDay};

fn session_strings(times: impl Iterator<Item = TimeOfDay>) -> Vec<String> {
    times.map(TimeOfDay::to_session_string).collect()
}

#[test]
fn start_times_begin_at_five_pm_before_session_opens() {
    let times = session_strings(candidate_start_times(TimeOfDay::from_hm(12, 10)));

    assert_eq!(times.first().map(String::as_str), Some("17:00"));
    assert_eq!(times.last().map(String::as_str), Some("26:00"));
    // 17:00 through 26:00 inclusive, every half hour.
    assert_eq!(times.len(), 19);
}

#[test]
fn start_times_at_exactly_five_pm_start_at_five_pm() {
    let times = session_strings(candidate_start_times(TimeOfDay::from_hm(17, 0)));
    assert_eq!(times[0], "17:00");
}

#[test]
fn start_times_round_up_to_next_half_hour_once_open() {
    let cases = [
        ((17, 1), "17:30"),
        ((18, 10), "18:30"),
        ((18, 30), "18:30"),
        ((18, 31), "19:00"),
        ((23, 45), "24:00"),
    ];
    for ((h, m), expected) in cases {
        let times = session_strings(candidate_start_times(TimeOfDay::from_hm(h, m)));
        assert_eq!(times[0], expected, "reference {:02}:{:02}", h, m);
    }
}

#[test]
fn start_times_keep_hours_past_midnight() {
    let times = session_strings(candidate_start_times(TimeOfDay::from_hm(23, 45)));
    assert_eq!(times, ["24:00", "24:30", "25:00", "25:30", "26:00"]);
}

#[test]
fn start_times_are_restartable() {
    let slots = candidate_start_times(TimeOfDay::from_hm(20, 0));
    let first_pass: Vec<TimeOfDay> = slots.clone().collect();
    let second_pass: Vec<TimeOfDay> = slots.collect();
    assert_eq!(first_pass, second_pass);
    assert!(!first_pass.is_empty());
}

#[test]
fn custom_session_window() {
    let window = SessionWindow {
        opens: TimeOfDay::from_hm(20, 0),
        closes: TimeOfDay::from_hm(22, 0),
        step_minutes: 60,
    };
    let times = session_strings(window.start_times(TimeOfDay::from_hm(9, 0)));
    assert_eq!(times, ["20:00", "21:00", "22:00"]);
}

#[test]
fn session_window_deserializes_with_defaults() {
    let window: SessionWindow = serde_json::from_str(r#"{"closes":"25:00"}"#).unwrap();
    assert_eq!(window.opens, TimeOfDay::from_hm(17, 0));
    assert_eq!(window.closes, TimeOfDay::from_hm(25, 0));
    assert_eq!(window.step_minutes, 30);
}

#[test]
fn anchor_moves_morning_times_onto_the_next_day() {
    let window = SessionWindow::default();

    assert_eq!(window.anchor(TimeOfDay::from_hm(0, 30)), TimeOfDay::from_hm(24, 30));
    assert_eq!(window.anchor(TimeOfDay::from_hm(16, 59)), TimeOfDay::from_hm(40, 59));
}

#[test]
fn anchor_keeps_session_times() {
    let window = SessionWindow::default();

    assert_eq!(window.anchor(TimeOfDay::from_hm(17, 0)), TimeOfDay::from_hm(17, 0));
    assert_eq!(window.anchor(TimeOfDay::from_hm(23, 59)), TimeOfDay::from_hm(23, 59));
    assert_eq!(window.anchor(TimeOfDay::from_hm(24, 30)), TimeOfDay::from_hm(24, 30));
}

#[test]
fn duration_options_without_start() {
    let options = candidate_durations(None);

    let minutes: Vec<u32> = options.iter().map(|o| o.minutes).collect();
    // Quarter hours up to an hour, then every half hour from 1.5 to 6 hours.
    assert_eq!(
        minutes,
        [15, 30, 45, 60, 90, 120, 150, 180, 210, 240, 270, 300, 330, 360]
    );
    assert!(options.iter().all(|o| o.end_time.is_none()));
}

#[test]
fn duration_labels() {
    let labels: Vec<String> = candidate_durations(None)
        .into_iter()
        .map(|o| o.label)
        .collect();

    assert_eq!(labels[0], "15 min");
    assert_eq!(labels[2], "45 min");
    assert_eq!(labels[3], "1 hour");
    assert_eq!(labels[4], "1.5 hours");
    assert_eq!(labels[5], "2 hours");
    assert_eq!(labels[6], "2.5 hours");
    assert_eq!(labels[13], "6 hours");
}

#[test]
fn duration_options_carry_end_time_when_start_given() {
    let options = candidate_durations(Some(TimeOfDay::from_hm(23, 30)));

    assert_eq!(options.len(), 14);
    assert_eq!(options[0].end_time.as_deref(), Some("23:45"));
    assert_eq!(options[4].end_time.as_deref(), Some("01:00"));
    assert_eq!(options[13].end_time.as_deref(), Some("05:30"));
}
