mod common;
use common::{at, open_pool};

use shiftclock::core::clock::ClockLogic;
use shiftclock::core::profiles::UserLogic;
use shiftclock::core::status::StatusResolver;
use shiftclock::db::pool::DbPool;
use shiftclock::db::queries::{load_breaks_for_shift, load_shifts};
use shiftclock::errors::AppError;
use shiftclock::models::action::ClockAction;
use shiftclock::models::profile::Profile;
use shiftclock::models::role::Role;
use shiftclock::models::status::WorkStatus;
use shiftclock::utils::clock::FixedClock;

fn first_user(pool: &mut DbPool) -> Profile {
    UserLogic::add(
        pool,
        "Ada Lovelace",
        "ada@example.com",
        Role::User,
        at("2025-09-01T08:00:00Z"),
    )
    .expect("add first profile")
}

fn status_of(pool: &DbPool, user: &Profile) -> WorkStatus {
    StatusResolver::resolve(&pool.conn, user.id)
        .expect("resolve status")
        .status
}

#[test]
fn test_fresh_user_is_clocked_out() {
    let mut pool = open_pool("core_fresh_user");
    let ada = first_user(&mut pool);

    let snap = StatusResolver::resolve(&pool.conn, ada.id).unwrap();
    assert_eq!(snap.status, WorkStatus::ClockedOut);
    assert!(snap.shift.is_none());
    assert!(snap.open_break.is_none());
}

#[test]
fn test_full_shift_cycle_with_break() {
    let mut pool = open_pool("core_full_cycle");
    let ada = first_user(&mut pool);

    let t0 = at("2025-09-15T09:00:00Z");
    let t1 = at("2025-09-15T12:00:00Z");
    let t2 = at("2025-09-15T12:30:00Z");
    let t3 = at("2025-09-15T17:00:00Z");

    let out = ClockLogic::clock_in(&mut pool, &ada, &FixedClock(t0)).unwrap();
    assert_eq!(out.status, WorkStatus::Working);
    assert_eq!(out.at, t0);

    let out = ClockLogic::start_break(&mut pool, &ada, &FixedClock(t1)).unwrap();
    assert_eq!(out.status, WorkStatus::OnBreak);
    assert!(out.break_id.is_some());

    let out = ClockLogic::end_break(&mut pool, &ada, &FixedClock(t2)).unwrap();
    assert_eq!(out.status, WorkStatus::Working);

    let out = ClockLogic::clock_out(&mut pool, &ada, &FixedClock(t3)).unwrap();
    assert_eq!(out.status, WorkStatus::ClockedOut);
    assert_eq!(out.break_id, None, "no break was open at clock-out");

    let shifts = load_shifts(&pool.conn, Some(ada.id), None).unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].clock_in, t0);
    assert_eq!(shifts[0].clock_out, Some(t3));

    let breaks = load_breaks_for_shift(&pool.conn, shifts[0].id).unwrap();
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].break_start, t1);
    assert_eq!(breaks[0].break_end, Some(t2));
}

#[test]
fn test_clock_out_while_on_break_closes_break_at_same_instant() {
    let mut pool = open_pool("core_clock_out_on_break");
    let ada = first_user(&mut pool);

    let t0 = at("2025-09-16T09:00:00Z");
    let t1 = at("2025-09-16T13:00:00Z");
    let t2 = at("2025-09-16T13:20:00Z");

    ClockLogic::clock_in(&mut pool, &ada, &FixedClock(t0)).unwrap();
    ClockLogic::start_break(&mut pool, &ada, &FixedClock(t1)).unwrap();

    let out = ClockLogic::clock_out(&mut pool, &ada, &FixedClock(t2)).unwrap();
    assert_eq!(out.status, WorkStatus::ClockedOut);
    assert!(out.break_id.is_some());

    let shift = &load_shifts(&pool.conn, Some(ada.id), None).unwrap()[0];
    let breaks = load_breaks_for_shift(&pool.conn, shift.id).unwrap();

    assert_eq!(shift.clock_out, Some(t2));
    assert_eq!(breaks[0].break_end, Some(t2));
    assert!(breaks[0].break_end <= shift.clock_out);
}

#[test]
fn test_clock_in_while_working_is_rejected_without_writes() {
    let mut pool = open_pool("core_double_clock_in");
    let ada = first_user(&mut pool);

    ClockLogic::clock_in(&mut pool, &ada, &FixedClock(at("2025-09-17T09:00:00Z"))).unwrap();

    let err = ClockLogic::clock_in(&mut pool, &ada, &FixedClock(at("2025-09-17T09:01:00Z")))
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            action: ClockAction::ClockIn,
            status: WorkStatus::Working
        }
    ));
    assert_eq!(err.to_string(), "Cannot clock in while working");

    let shifts = load_shifts(&pool.conn, Some(ada.id), None).unwrap();
    assert_eq!(shifts.len(), 1, "at most one open shift per user");
}

#[test]
fn test_preconditions_of_every_action() {
    let mut pool = open_pool("core_preconditions");
    let ada = first_user(&mut pool);
    let clock = FixedClock(at("2025-09-18T09:00:00Z"));

    // clocked_out: only clock in is allowed
    for action in [
        ClockAction::ClockOut,
        ClockAction::StartBreak,
        ClockAction::EndBreak,
    ] {
        let err = ClockLogic::apply(&mut pool, &ada, action, &clock).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { status: WorkStatus::ClockedOut, .. }));
    }

    ClockLogic::clock_in(&mut pool, &ada, &clock).unwrap();

    // working: no end break
    let err = ClockLogic::end_break(&mut pool, &ada, &clock).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { status: WorkStatus::Working, .. }));

    ClockLogic::start_break(&mut pool, &ada, &clock).unwrap();

    // on_break: no second break, no clock in
    let err = ClockLogic::start_break(&mut pool, &ada, &clock).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { status: WorkStatus::OnBreak, .. }));
    let err = ClockLogic::clock_in(&mut pool, &ada, &clock).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { status: WorkStatus::OnBreak, .. }));

    assert_eq!(status_of(&pool, &ada), WorkStatus::OnBreak);
}

#[test]
fn test_actions_before_clock_in_time_are_rejected() {
    let mut pool = open_pool("core_time_order");
    let ada = first_user(&mut pool);

    ClockLogic::clock_in(&mut pool, &ada, &FixedClock(at("2025-09-19T09:00:00Z"))).unwrap();

    let err = ClockLogic::clock_out(&mut pool, &ada, &FixedClock(at("2025-09-19T08:59:00Z")))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));
    assert_eq!(status_of(&pool, &ada), WorkStatus::Working);

    ClockLogic::start_break(&mut pool, &ada, &FixedClock(at("2025-09-19T10:00:00Z"))).unwrap();
    let err = ClockLogic::end_break(&mut pool, &ada, &FixedClock(at("2025-09-19T09:30:00Z")))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));
    assert_eq!(status_of(&pool, &ada), WorkStatus::OnBreak);
}

#[test]
fn test_users_have_independent_status() {
    let mut pool = open_pool("core_two_users");
    let grace = UserLogic::add(
        &mut pool,
        "Grace Hopper",
        "grace@example.com",
        Role::Admin,
        at("2025-09-01T08:00:00Z"),
    )
    .unwrap();
    shiftclock::core::session::SessionLogic::sign_in(
        &mut pool,
        "grace@example.com",
        at("2025-09-01T08:00:00Z"),
    )
    .unwrap();
    let ada = UserLogic::add(
        &mut pool,
        "Ada Lovelace",
        "ada@example.com",
        Role::User,
        at("2025-09-01T08:01:00Z"),
    )
    .unwrap();

    let clock = FixedClock(at("2025-09-20T09:00:00Z"));
    ClockLogic::clock_in(&mut pool, &grace, &clock).unwrap();
    ClockLogic::clock_in(&mut pool, &ada, &clock).unwrap();
    ClockLogic::start_break(&mut pool, &ada, &clock).unwrap();

    assert_eq!(status_of(&pool, &grace), WorkStatus::Working);
    assert_eq!(status_of(&pool, &ada), WorkStatus::OnBreak);
}

#[test]
fn test_clock_out_cannot_precede_an_ended_break() {
    let mut pool = open_pool("core_clock_out_before_break_end");
    let ada = first_user(&mut pool);

    ClockLogic::clock_in(&mut pool, &ada, &FixedClock(at("2025-09-15T09:00:00Z"))).unwrap();
    ClockLogic::start_break(&mut pool, &ada, &FixedClock(at("2025-09-15T12:00:00Z"))).unwrap();
    ClockLogic::end_break(&mut pool, &ada, &FixedClock(at("2025-09-15T13:00:00Z"))).unwrap();

    let err = ClockLogic::clock_out(&mut pool, &ada, &FixedClock(at("2025-09-15T12:10:00Z")))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));
    assert_eq!(status_of(&pool, &ada), WorkStatus::Working);

    let shift = &load_shifts(&pool.conn, Some(ada.id), None).unwrap()[0];
    assert!(shift.is_open());

    // At the break end itself it is fine.
    ClockLogic::clock_out(&mut pool, &ada, &FixedClock(at("2025-09-15T13:00:00Z"))).unwrap();
}

#[test]
fn test_breaks_of_a_shift_never_overlap() {
    let mut pool = open_pool("core_overlapping_breaks");
    let ada = first_user(&mut pool);

    ClockLogic::clock_in(&mut pool, &ada, &FixedClock(at("2025-09-15T09:00:00Z"))).unwrap();
    ClockLogic::start_break(&mut pool, &ada, &FixedClock(at("2025-09-15T12:00:00Z"))).unwrap();
    ClockLogic::end_break(&mut pool, &ada, &FixedClock(at("2025-09-15T13:00:00Z"))).unwrap();

    let err = ClockLogic::start_break(&mut pool, &ada, &FixedClock(at("2025-09-15T12:00:00Z")))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));

    let shift = &load_shifts(&pool.conn, Some(ada.id), None).unwrap()[0];
    assert_eq!(load_breaks_for_shift(&pool.conn, shift.id).unwrap().len(), 1);

    ClockLogic::start_break(&mut pool, &ada, &FixedClock(at("2025-09-15T15:00:00Z"))).unwrap();
}

#[test]
fn test_clock_in_cannot_precede_the_previous_clock_out() {
    let mut pool = open_pool("core_clock_in_before_last_out");
    let ada = first_user(&mut pool);

    ClockLogic::clock_in(&mut pool, &ada, &FixedClock(at("2025-09-15T09:00:00Z"))).unwrap();
    ClockLogic::clock_out(&mut pool, &ada, &FixedClock(at("2025-09-15T17:00:00Z"))).unwrap();

    let err = ClockLogic::clock_in(&mut pool, &ada, &FixedClock(at("2025-09-15T16:00:00Z")))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));
    assert_eq!(load_shifts(&pool.conn, Some(ada.id), None).unwrap().len(), 1);

    ClockLogic::clock_in(&mut pool, &ada, &FixedClock(at("2025-09-16T09:00:00Z"))).unwrap();
    assert_eq!(status_of(&pool, &ada), WorkStatus::Working);
}
