use chrono::NaiveDate;
use shiftclock::errors::AppError;
use shiftclock::models::action::ClockAction;
use shiftclock::models::status::WorkStatus;
use shiftclock::utils::date::{describe_range, parse_range, resolve_range};
use shiftclock::utils::mins2readable;
use shiftclock::utils::table::strip_ansi;
use shiftclock::utils::time::{minutes_between, parse_timestamp};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_parse_range_shapes() {
    assert_eq!(parse_range("2025").unwrap(), (d(2025, 1, 1), d(2025, 12, 31)));
    assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
    assert_eq!(parse_range("2025-09-15").unwrap(), (d(2025, 9, 15), d(2025, 9, 15)));
    assert_eq!(
        parse_range("2025-09:2025-11").unwrap(),
        (d(2025, 9, 1), d(2025, 11, 30))
    );
}

#[test]
fn test_parse_range_rejects_bad_input() {
    for bad in ["2025-9", "2025-09:2025", "2025-13", "2025-10:2025-09", "soon"] {
        assert!(
            matches!(parse_range(bad), Err(AppError::InvalidDate(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_resolve_range_defaults_to_current_month() {
    let today = d(2025, 12, 10);
    assert_eq!(
        resolve_range(None, today).unwrap(),
        Some((d(2025, 12, 1), d(2025, 12, 31)))
    );
    assert_eq!(resolve_range(Some("all"), today).unwrap(), None);
}

#[test]
fn test_describe_range() {
    assert_eq!(describe_range(&None), "all dates");
    assert_eq!(
        describe_range(&Some((d(2025, 9, 1), d(2025, 9, 30)))),
        "September 2025"
    );
    assert_eq!(describe_range(&Some((d(2025, 9, 3), d(2025, 9, 3)))), "2025-09-03");
}

#[test]
fn test_mins2readable() {
    assert_eq!(mins2readable(485, false, false), "08h 05m");
    assert_eq!(mins2readable(450, false, true), "07:30");
    assert_eq!(mins2readable(30, true, false), "+00h 30m");
    assert_eq!(mins2readable(-75, true, false), "-01h 15m");
    assert_eq!(mins2readable(0, true, false), "00h 00m");
}

#[test]
fn test_minutes_between_truncates_and_floors() {
    let a = parse_timestamp("2025-09-15T09:00:00Z").unwrap();
    let b = parse_timestamp("2025-09-15T09:10:59Z").unwrap();
    assert_eq!(minutes_between(a, b), 10);
    assert_eq!(minutes_between(b, a), 0);
}

#[test]
fn test_parse_timestamp_rejects_garbage() {
    assert!(parse_timestamp("yesterday").is_err());
}

#[test]
fn test_actions_allowed_per_status() {
    use ClockAction::*;
    use WorkStatus::*;

    assert!(ClockIn.allowed_from(ClockedOut));
    assert!(!ClockIn.allowed_from(Working));
    assert!(!ClockIn.allowed_from(OnBreak));

    assert!(ClockOut.allowed_from(Working));
    assert!(ClockOut.allowed_from(OnBreak));
    assert!(!ClockOut.allowed_from(ClockedOut));

    assert!(StartBreak.allowed_from(Working));
    assert!(!StartBreak.allowed_from(OnBreak));

    assert!(EndBreak.allowed_from(OnBreak));
    assert!(!EndBreak.allowed_from(Working));
}

#[test]
fn test_status_badge_strips_to_label() {
    assert_eq!(strip_ansi(&WorkStatus::OnBreak.badge()), "● On Break");
    assert_eq!(WorkStatus::ClockedOut.to_string(), "clocked_out");
}
