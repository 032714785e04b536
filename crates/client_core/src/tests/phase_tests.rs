use std::time::{Duration, Instant};

use crate::phase::{AuthFieldError, Phase, PhaseMachine, SPLASH_DURATION};

#[test]
fn splash_auto_advances_after_the_deadline() {
    let start = Instant::now();
    let mut machine = PhaseMachine::new(start);
    assert_eq!(machine.phase(), Phase::Splash);

    assert!(!machine.tick(start + Duration::from_millis(1_000)));
    assert_eq!(machine.phase(), Phase::Splash);

    assert!(machine.tick(start + SPLASH_DURATION));
    assert_eq!(machine.phase(), Phase::Auth);

    // The timer only fires once.
    assert!(!machine.tick(start + SPLASH_DURATION * 2));
}

#[test]
fn explicit_enter_skips_the_splash_timer() {
    let start = Instant::now();
    let mut machine = PhaseMachine::new(start);
    machine.skip_splash();
    assert_eq!(machine.phase(), Phase::Auth);
    // The already-armed deadline must not fire a second transition.
    assert!(!machine.tick(start + SPLASH_DURATION));
}

#[test]
fn teardown_before_the_deadline_prevents_any_later_transition() {
    let start = Instant::now();
    let mut machine = PhaseMachine::new(start);
    // Unmounted after 1 time unit, before the 2.6-unit timer fires.
    machine.cancel_splash();
    assert!(!machine.tick(start + SPLASH_DURATION * 3));
    assert_eq!(machine.phase(), Phase::Splash);
}

#[test]
fn empty_fields_are_rejected_locally_with_an_inline_error() {
    let mut machine = PhaseMachine::new(Instant::now());
    machine.skip_splash();

    assert_eq!(
        machine.begin_submit("alice", ""),
        Err(AuthFieldError::EmptyFields)
    );
    assert!(machine.field_error());
    assert!(!machine.is_submitting());
    assert_eq!(machine.phase(), Phase::Auth);

    assert_eq!(
        machine.begin_submit("   ", "hunter2"),
        Err(AuthFieldError::EmptyFields)
    );

    // The error auto-clears on the next edit.
    machine.note_field_edited();
    assert!(!machine.field_error());
}

#[test]
fn duplicate_submissions_are_suppressed_while_one_is_in_flight() {
    let mut machine = PhaseMachine::new(Instant::now());
    machine.skip_splash();

    let ticket = machine.begin_submit("alice", "hunter2").unwrap();
    assert!(machine.is_submitting());
    assert_eq!(
        machine.begin_submit("alice", "hunter2"),
        Err(AuthFieldError::AlreadySubmitting)
    );

    assert!(machine.submit_succeeded(ticket));
    assert_eq!(machine.phase(), Phase::App);
    assert!(!machine.is_submitting());
}

#[test]
fn failed_submission_stays_in_auth_and_allows_retry() {
    let mut machine = PhaseMachine::new(Instant::now());
    machine.skip_splash();

    let ticket = machine.begin_submit("alice", "wrong").unwrap();
    assert!(machine.submit_failed(ticket));
    assert_eq!(machine.phase(), Phase::Auth);
    assert!(!machine.is_submitting());

    assert!(machine.begin_submit("alice", "right").is_ok());
}

#[test]
fn stale_submission_tickets_are_ignored() {
    let mut machine = PhaseMachine::new(Instant::now());
    machine.skip_splash();

    let stale = machine.begin_submit("alice", "pw").unwrap();
    assert!(machine.submit_failed(stale));
    let current = machine.begin_submit("alice", "pw").unwrap();

    // The old ticket resolving late must not complete the new submission.
    assert!(!machine.submit_succeeded(stale));
    assert_eq!(machine.phase(), Phase::Auth);
    assert!(machine.is_submitting());

    assert!(machine.submit_succeeded(current));
    assert_eq!(machine.phase(), Phase::App);
}

#[test]
fn logout_is_the_only_edge_back_to_auth() {
    let mut machine = PhaseMachine::new(Instant::now());
    machine.skip_splash();
    let ticket = machine.begin_submit("alice", "pw").unwrap();
    machine.submit_succeeded(ticket);
    assert_eq!(machine.phase(), Phase::App);

    machine.logout();
    assert_eq!(machine.phase(), Phase::Auth);

    // Logout from Auth is a no-op.
    machine.logout();
    assert_eq!(machine.phase(), Phase::Auth);
}
