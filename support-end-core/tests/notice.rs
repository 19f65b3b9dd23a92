use chrono::{NaiveDate, NaiveDateTime};
use support_end_core::{Deadline, Message, Remaining, Severity, decide};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn deadline(y: i32, m: u32, d: u32) -> Deadline {
    Deadline::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

#[test]
fn remaining_days_are_truncated() {
    let msg = decide(at(2030, 1, 1, 12, 0, 0), deadline(2030, 1, 10));
    assert_eq!(msg, Message::EndsIn { days: 8 });
    assert_eq!(msg.summary(), "Support for this OS ends in 8 days");
    assert_eq!(msg.severity(), Severity::Normal);
}

#[test]
fn past_deadline_always_reports_ended() {
    let end = deadline(2025, 6, 1);
    for now in [at(2025, 6, 1, 0, 0, 1), at(2025, 7, 1, 0, 0, 0), at(2040, 1, 1, 0, 0, 0)] {
        let msg = decide(now, end);
        assert_eq!(msg, Message::Ended);
        assert_eq!(msg.to_string(), "Support for this OS has ended");
        assert_eq!(msg.severity(), Severity::Critical);
    }
}

#[test]
fn deadline_instant_itself_is_not_yet_ended() {
    let end = deadline(2025, 6, 1);
    assert_eq!(decide(end.at(), end), Message::EndsIn { days: 0 });
    assert_eq!(
        decide(at(2025, 5, 31, 0, 0, 0), end).summary(),
        "Support for this OS ends in 1 day"
    );
}

#[test]
fn every_message_uses_the_warning_icon() {
    assert_eq!(Message::Ended.icon(), "dialog-warning");
    assert_eq!(Message::EndsIn { days: 3 }.icon(), "dialog-warning");
}

#[test]
fn remaining_renders_days_and_clock() {
    let end = deadline(2025, 6, 1);
    let left = Remaining::between(at(2025, 5, 1, 12, 30, 15), end);
    assert_eq!(left.to_string(), "30 days, 11:29:45 left");

    let soon = Remaining::between(at(2025, 5, 31, 0, 0, 0), end);
    assert_eq!(soon.to_string(), "1 day, 00:00:00 left");

    let past = Remaining::between(at(2025, 6, 3, 1, 0, 0), end);
    assert_eq!(past.to_string(), "ended 2 days, 01:00:00 ago");
}
