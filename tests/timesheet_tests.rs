mod common;
use common::{at, open_pool};

use shiftclock::core::clock::ClockLogic;
use shiftclock::core::profiles::UserLogic;
use shiftclock::core::session::SessionLogic;
use shiftclock::core::timesheet::{Scope, TimesheetLogic, shift_durations};
use shiftclock::db::pool::DbPool;
use shiftclock::errors::AppError;
use shiftclock::models::breaks::Break;
use shiftclock::models::profile::Profile;
use shiftclock::models::role::Role;
use shiftclock::models::shift::Shift;
use shiftclock::utils::clock::FixedClock;

/// Admin Grace and user Ada, with Grace signed in.
fn two_users(pool: &mut DbPool) -> (Profile, Profile) {
    let t = at("2025-09-01T08:00:00Z");
    let grace = UserLogic::add(pool, "Grace Hopper", "grace@example.com", Role::Admin, t).unwrap();
    SessionLogic::sign_in(pool, "grace@example.com", t).unwrap();
    let ada = UserLogic::add(pool, "Ada Lovelace", "ada@example.com", Role::User, t).unwrap();
    (grace, ada)
}

fn work_day(pool: &mut DbPool, user: &Profile, day: &str, break_mins: bool) {
    let t = |hm: &str| FixedClock(at(&format!("{day}T{hm}:00Z")));
    ClockLogic::clock_in(pool, user, &t("09:00")).unwrap();
    if break_mins {
        ClockLogic::start_break(pool, user, &t("12:00")).unwrap();
        ClockLogic::end_break(pool, user, &t("12:30")).unwrap();
    }
    ClockLogic::clock_out(pool, user, &t("17:00")).unwrap();
}

#[test]
fn test_worked_minutes_are_span_minus_breaks() {
    let shift = Shift {
        id: 1,
        user_id: 1,
        clock_in: at("2025-09-15T09:00:00Z"),
        clock_out: Some(at("2025-09-15T17:00:00Z")),
    };
    let breaks = vec![
        Break {
            id: 1,
            shift_id: 1,
            break_start: at("2025-09-15T12:00:00Z"),
            break_end: Some(at("2025-09-15T12:30:00Z")),
        },
        Break {
            id: 2,
            shift_id: 1,
            break_start: at("2025-09-15T15:00:00Z"),
            break_end: Some(at("2025-09-15T15:10:00Z")),
        },
    ];

    let d = shift_durations(&shift, &breaks, at("2025-09-20T00:00:00Z"));
    assert_eq!(d.span_minutes, 480);
    assert_eq!(d.break_minutes, 40);
    assert_eq!(d.worked_minutes, 440);
}

#[test]
fn test_open_shift_and_break_count_up_to_now() {
    let shift = Shift {
        id: 1,
        user_id: 1,
        clock_in: at("2025-09-15T09:00:00Z"),
        clock_out: None,
    };
    let breaks = vec![Break {
        id: 1,
        shift_id: 1,
        break_start: at("2025-09-15T11:00:00Z"),
        break_end: None,
    }];

    let d = shift_durations(&shift, &breaks, at("2025-09-15T11:15:30Z"));
    assert_eq!(d.span_minutes, 135);
    assert_eq!(d.break_minutes, 15);
    assert_eq!(d.worked_minutes, 120);
}

#[test]
fn test_own_timesheet_for_regular_user() {
    let mut pool = open_pool("ts_own");
    let (_grace, ada) = two_users(&mut pool);

    work_day(&mut pool, &ada, "2025-09-15", true);
    work_day(&mut pool, &ada, "2025-09-16", false);

    let sheet = TimesheetLogic::build(
        &pool.conn,
        &ada,
        &Scope::Own,
        None,
        at("2025-09-30T12:00:00Z"),
    )
    .unwrap();

    assert_eq!(sheet.lines.len(), 2);
    assert_eq!(sheet.lines[0].durations.worked_minutes, 450);
    assert_eq!(sheet.lines[1].durations.worked_minutes, 480);
    assert_eq!(sheet.totals.len(), 1);
    assert_eq!(sheet.totals[0].shifts, 2);
    assert_eq!(sheet.totals[0].break_minutes, 30);
    assert_eq!(sheet.total_worked_minutes(), 930);
}

#[test]
fn test_admin_sees_totals_for_every_user() {
    let mut pool = open_pool("ts_admin_all");
    let (grace, ada) = two_users(&mut pool);

    work_day(&mut pool, &grace, "2025-09-15", false);
    work_day(&mut pool, &ada, "2025-09-15", true);
    work_day(&mut pool, &ada, "2025-09-16", true);

    let sheet = TimesheetLogic::build(
        &pool.conn,
        &grace,
        &Scope::All,
        None,
        at("2025-09-30T12:00:00Z"),
    )
    .unwrap();

    assert_eq!(sheet.lines.len(), 3);
    assert_eq!(sheet.totals.len(), 2);

    let grace_totals = sheet.totals.iter().find(|t| t.user_id == grace.id).unwrap();
    let ada_totals = sheet.totals.iter().find(|t| t.user_id == ada.id).unwrap();
    assert_eq!(grace_totals.worked_minutes, 480);
    assert_eq!(ada_totals.shifts, 2);
    assert_eq!(ada_totals.worked_minutes, 900);
    assert_eq!(ada_totals.employee, "Ada Lovelace");
}

#[test]
fn test_range_filters_by_clock_in_date() {
    let mut pool = open_pool("ts_range");
    let (_grace, ada) = two_users(&mut pool);

    work_day(&mut pool, &ada, "2025-08-29", false);
    work_day(&mut pool, &ada, "2025-09-15", false);

    let bounds = shiftclock::utils::date::resolve_range(
        Some("2025-09"),
        at("2025-09-30T12:00:00Z").date_naive(),
    )
    .unwrap();
    let sheet =
        TimesheetLogic::build(&pool.conn, &ada, &Scope::Own, bounds, at("2025-09-30T12:00:00Z"))
            .unwrap();

    assert_eq!(sheet.lines.len(), 1);
    assert_eq!(sheet.lines[0].shift.clock_in, at("2025-09-15T09:00:00Z"));
}

#[test]
fn test_regular_user_cannot_view_other_users() {
    let mut pool = open_pool("ts_forbidden");
    let (grace, ada) = two_users(&mut pool);
    let now = at("2025-09-30T12:00:00Z");

    let err = TimesheetLogic::build(&pool.conn, &ada, &Scope::All, None, now).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = TimesheetLogic::build(
        &pool.conn,
        &ada,
        &Scope::User(grace.email.clone()),
        None,
        now,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Naming yourself is fine.
    let sheet =
        TimesheetLogic::build(&pool.conn, &ada, &Scope::User(ada.id.to_string()), None, now)
            .unwrap();
    assert!(sheet.is_empty());
}

#[test]
fn test_unknown_user_scope() {
    let mut pool = open_pool("ts_unknown_user");
    let (grace, _ada) = two_users(&mut pool);

    let err = TimesheetLogic::build(
        &pool.conn,
        &grace,
        &Scope::User("nobody@example.com".into()),
        None,
        at("2025-09-30T12:00:00Z"),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::UnknownUser(_)));
}

#[test]
fn test_scope_from_flags() {
    assert_eq!(Scope::from_flags(false, None), Scope::Own);
    assert_eq!(Scope::from_flags(true, None), Scope::All);
    assert_eq!(
        Scope::from_flags(false, Some("ada@example.com")),
        Scope::User("ada@example.com".into())
    );
}

#[test]
fn test_admin_timesheet_over_many_shifts() {
    use chrono::Duration;
    use shiftclock::utils::time::to_db;

    const SHIFTS: i64 = 33_000;

    let mut pool = open_pool("ts_many_shifts");
    let (grace, ada) = two_users(&mut pool);
    let base = at("2020-01-01T09:00:00Z");

    let tx = pool.conn.unchecked_transaction().unwrap();
    {
        let mut shift_stmt = tx
            .prepare("INSERT INTO shifts (user_id, clock_in, clock_out) VALUES (?1, ?2, ?3)")
            .unwrap();
        let mut break_stmt = tx
            .prepare("INSERT INTO breaks (shift_id, break_start, break_end) VALUES (?1, ?2, ?3)")
            .unwrap();
        for i in 0..SHIFTS {
            let user = if i % 2 == 0 { grace.id } else { ada.id };
            let start = base + Duration::hours(i);
            shift_stmt
                .execute(rusqlite::params![
                    user,
                    to_db(start),
                    to_db(start + Duration::minutes(50))
                ])
                .unwrap();
            let shift_id = tx.last_insert_rowid();
            break_stmt
                .execute(rusqlite::params![
                    shift_id,
                    to_db(start + Duration::minutes(20)),
                    to_db(start + Duration::minutes(30))
                ])
                .unwrap();
        }
    }
    tx.commit().unwrap();

    let sheet = TimesheetLogic::build(
        &pool.conn,
        &grace,
        &Scope::All,
        None,
        at("2026-01-01T00:00:00Z"),
    )
    .unwrap();

    assert_eq!(sheet.lines.len() as i64, SHIFTS);
    assert!(sheet.lines.iter().all(|l| l.breaks.len() == 1));
    assert!(sheet.lines.iter().all(|l| l.durations.worked_minutes == 40));
    assert_eq!(sheet.total_worked_minutes(), SHIFTS * 40);

    let ada_only = TimesheetLogic::build(
        &pool.conn,
        &grace,
        &Scope::User(ada.email.clone()),
        None,
        at("2026-01-01T00:00:00Z"),
    )
    .unwrap();
    assert_eq!(ada_only.lines.len() as i64, SHIFTS / 2);
    assert!(ada_only.lines.iter().all(|l| l.breaks.len() == 1));
}

#[test]
fn test_range_filter_applies_to_breaks_too() {
    let mut pool = open_pool("ts_range_breaks");
    let (_grace, ada) = two_users(&mut pool);

    work_day(&mut pool, &ada, "2025-08-29", true);
    work_day(&mut pool, &ada, "2025-09-15", true);

    let bounds = shiftclock::utils::date::parse_range("2025-09").map(Some).unwrap();
    let sheet =
        TimesheetLogic::build(&pool.conn, &ada, &Scope::Own, bounds, at("2025-09-30T12:00:00Z"))
            .unwrap();

    assert_eq!(sheet.lines.len(), 1);
    assert_eq!(sheet.lines[0].breaks.len(), 1);
    assert_eq!(sheet.lines[0].breaks[0].shift_id, sheet.lines[0].shift.id);
}
