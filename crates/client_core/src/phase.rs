//! Top-level phase state machine: splash, authentication, application.
//!
//! The machine is clock-driven through explicit `Instant`s so tests can run
//! it against a synthetic timeline. It owns no rendering; the GUI reads the
//! current phase and draws the matching scene.

use std::time::{Duration, Instant};

use tracing::debug;

/// Splash auto-advances after this long unless skipped or torn down first.
pub const SPLASH_DURATION: Duration = Duration::from_millis(2_600);

/// Identity token for the auth card. The dashboard header claims the same
/// token so the card morphs into it across the phase boundary instead of
/// being discarded and replaced.
pub const AUTH_ANCHOR_ID: &str = "auth-shell";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Splash,
    Auth,
    App,
}

/// Tag for one credential submission; stale completions are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFieldError {
    /// A required field is empty; rejected locally with no network call.
    EmptyFields,
    /// A submission is already in flight; duplicates are suppressed.
    AlreadySubmitting,
}

#[derive(Debug)]
pub struct PhaseMachine {
    phase: Phase,
    /// `None` once fired, skipped, or cancelled by teardown.
    splash_deadline: Option<Instant>,
    submit_generation: u64,
    in_flight: Option<SubmitTicket>,
    field_error: bool,
}

impl PhaseMachine {
    pub fn new(now: Instant) -> Self {
        Self {
            phase: Phase::Splash,
            splash_deadline: Some(now + SPLASH_DURATION),
            submit_generation: 0,
            in_flight: None,
            field_error: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance the splash timer. Returns true when this call performed the
    /// Splash -> Auth transition.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Splash {
            return false;
        }
        match self.splash_deadline {
            Some(deadline) if now >= deadline => {
                self.splash_deadline = None;
                self.phase = Phase::Auth;
                debug!("splash timer elapsed; entering auth");
                true
            }
            _ => false,
        }
    }

    /// Explicit user "enter" action during the splash.
    pub fn skip_splash(&mut self) {
        if self.phase == Phase::Splash {
            self.splash_deadline = None;
            self.phase = Phase::Auth;
        }
    }

    /// Teardown of the splash view: disarm the timer so no later `tick`
    /// can transition on behalf of a view that no longer exists.
    pub fn cancel_splash(&mut self) {
        self.splash_deadline = None;
    }

    /// Validate locally and mark a submission in flight. Empty fields are
    /// rejected without any network call and raise the inline field error;
    /// repeated submissions while one is pending are suppressed.
    pub fn begin_submit(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<SubmitTicket, AuthFieldError> {
        if self.in_flight.is_some() {
            return Err(AuthFieldError::AlreadySubmitting);
        }
        if username.trim().is_empty() || password.is_empty() {
            self.field_error = true;
            return Err(AuthFieldError::EmptyFields);
        }
        self.field_error = false;
        self.submit_generation += 1;
        let ticket = SubmitTicket(self.submit_generation);
        self.in_flight = Some(ticket);
        Ok(ticket)
    }

    /// Successful credential round trip: Auth -> App. Stale tickets are
    /// ignored.
    pub fn submit_succeeded(&mut self, ticket: SubmitTicket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        if self.phase == Phase::Auth {
            self.phase = Phase::App;
            return true;
        }
        false
    }

    /// Rejected credentials: stay in Auth, clear the busy flag so the user
    /// can retry. The caller surfaces the failure via the notification
    /// collaborator.
    pub fn submit_failed(&mut self, ticket: SubmitTicket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn field_error(&self) -> bool {
        self.field_error
    }

    /// Editing any field clears the inline validation error.
    pub fn note_field_edited(&mut self) {
        self.field_error = false;
    }

    /// The only App -> Auth edge: an explicit sign-out.
    pub fn logout(&mut self) {
        if self.phase == Phase::App {
            self.phase = Phase::Auth;
            self.in_flight = None;
            self.field_error = false;
            debug!("signed out; returning to auth");
        }
    }
}
