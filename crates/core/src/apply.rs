// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{ProjectState, TransitionResult, signup_snapshot};
use chrono::NaiveDateTime;
use vol_hours_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use vol_hours_domain::{
    CheckOutAdjustment, DomainError, Schedule, Session, SessionPhase, Signup, SignupStatus,
    adjust_check_outs, format_instant,
};

/// Applies a command to the current state, producing a new state and audit event.
///
/// # Arguments
///
/// * `state` - The current project state (immutable)
/// * `command` - The command to apply
/// * `now` - The current wall-clock instant, used to classify the session
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and exactly one audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The signup or session does not exist
/// - The project is cancelled
/// - The session's hours are already published
/// - The session's phase does not permit the operation
/// - A check-out is recorded without a check-in
/// - The signup was rejected
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &ProjectState,
    command: Command,
    now: NaiveDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let action_name: &'static str = command.name();

    match command {
        Command::RecordCheckIn { signup_id, at } => {
            let signup: &Signup = state.find_signup(&signup_id)?;
            let session: Session = ensure_signup_session_open(
                state,
                signup,
                now,
                "record check-in",
                SessionPhase::permits_attendance_recording,
            )?;

            let mut updated: Signup = signup.clone();
            updated.check_in_time = Some(at);
            updated.status = SignupStatus::Attended;

            Ok(signup_transition(
                state,
                signup,
                updated,
                &session,
                Action::new(
                    String::from(action_name),
                    Some(format!("Checked in at {}", format_instant(&at))),
                ),
                actor,
                cause,
            ))
        }
        Command::RecordCheckOut { signup_id, at } => {
            let signup: &Signup = state.find_signup(&signup_id)?;
            let session: Session = ensure_signup_session_open(
                state,
                signup,
                now,
                "record check-out",
                SessionPhase::permits_attendance_recording,
            )?;

            if signup.check_in_time.is_none() {
                return Err(DomainError::MissingCheckIn { signup_id }.into());
            }

            let mut updated: Signup = signup.clone();
            updated.check_out_time = Some(at);

            Ok(signup_transition(
                state,
                signup,
                updated,
                &session,
                Action::new(
                    String::from(action_name),
                    Some(format!("Checked out at {}", format_instant(&at))),
                ),
                actor,
                cause,
            ))
        }
        Command::EditAttendance {
            signup_id,
            check_in,
            check_out,
        } => {
            let signup: &Signup = state.find_signup(&signup_id)?;
            let session: Session = ensure_signup_session_open(
                state,
                signup,
                now,
                "edit attendance",
                SessionPhase::permits_attendance_edit,
            )?;

            if check_in.is_none() && check_out.is_some() {
                return Err(DomainError::MissingCheckIn { signup_id }.into());
            }

            let mut updated: Signup = signup.clone();
            updated.check_in_time = check_in;
            updated.check_out_time = check_out;
            if check_in.is_some() {
                updated.status = SignupStatus::Attended;
            }

            Ok(signup_transition(
                state,
                signup,
                updated,
                &session,
                Action::new(String::from(action_name), Some(String::from("Attendance corrected"))),
                actor,
                cause,
            ))
        }
        Command::AdjustCheckOuts {
            session_id,
            offset_minutes,
        } => adjust_session_check_outs(
            state,
            &session_id,
            offset_minutes,
            now,
            Action::new(
                String::from(action_name),
                Some(format!("Shifted check-outs by {offset_minutes} minutes")),
            ),
            actor,
            cause,
        ),
    }
}

/// Ensures the session a signup belongs to accepts an attendance change.
fn ensure_signup_session_open(
    state: &ProjectState,
    signup: &Signup,
    now: NaiveDateTime,
    operation: &str,
    permits: fn(&SessionPhase) -> bool,
) -> Result<Session, CoreError> {
    if signup.status == SignupStatus::Rejected {
        return Err(DomainError::SignupRejected {
            signup_id: signup.signup_id.clone(),
        }
        .into());
    }

    let (schedule, session) = state.resolve_session(&signup.schedule_id)?;
    ensure_session_open(state, &schedule, &session, now, operation, permits)?;
    Ok(session)
}

/// Ensures a session's current phase permits the operation.
///
/// A published session rejects every attendance change regardless of phase.
fn ensure_session_open(
    state: &ProjectState,
    schedule: &Schedule,
    session: &Session,
    now: NaiveDateTime,
    operation: &str,
    permits: fn(&SessionPhase) -> bool,
) -> Result<(), CoreError> {
    if state.is_cancelled() {
        return Err(DomainError::ProjectCancelled {
            project_id: state.project.project_id.clone(),
        }
        .into());
    }

    let phase: SessionPhase = state.session_phase(schedule, session, now);
    if phase == SessionPhase::Published {
        return Err(DomainError::SessionAlreadyPublished {
            session_id: session.key.to_string(),
        }
        .into());
    }
    if !permits(&phase) {
        return Err(DomainError::SessionNotEditable {
            session_id: session.key.to_string(),
            phase: phase.to_string(),
            operation: operation.to_string(),
        }
        .into());
    }
    Ok(())
}

fn signup_transition(
    state: &ProjectState,
    before: &Signup,
    updated: Signup,
    session: &Session,
    action: Action,
    actor: Actor,
    cause: Cause,
) -> TransitionResult {
    let before_snapshot: StateSnapshot = signup_snapshot(before);
    let after_snapshot: StateSnapshot = signup_snapshot(&updated);
    let new_state: ProjectState = state.with_signup(updated.clone());

    let audit_event: AuditEvent = AuditEvent::new(
        state.project.project_id.clone(),
        Some(session.key.clone()),
        actor,
        cause,
        action,
        before_snapshot,
        after_snapshot,
    );

    TransitionResult {
        new_state,
        changed_signups: vec![updated],
        audit_event,
        adjustments: Vec::new(),
    }
}

fn adjust_session_check_outs(
    state: &ProjectState,
    session_id: &str,
    offset_minutes: i64,
    now: NaiveDateTime,
    action: Action,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let (schedule, session) = state.resolve_session(session_id)?;
    ensure_session_open(
        state,
        &schedule,
        &session,
        now,
        "adjust check-outs",
        |phase| *phase == SessionPhase::AttendanceEditing,
    )?;

    let targets: Vec<&Signup> = state
        .session_signups(&schedule, &session.key)
        .into_iter()
        .filter(|signup| signup.status != SignupStatus::Rejected)
        .collect();
    let adjustments: Vec<CheckOutAdjustment> =
        adjust_check_outs(targets.iter().copied(), offset_minutes);

    let mut new_state: ProjectState = state.clone();
    let mut changed_signups: Vec<Signup> = Vec::new();
    for adjustment in adjustments.iter().filter(|adjustment| adjustment.applied) {
        if let Some(signup) = new_state
            .signups
            .iter_mut()
            .find(|signup| signup.signup_id == adjustment.signup_id)
        {
            signup.check_out_time = adjustment.adjusted_check_out;
            changed_signups.push(signup.clone());
        }
    }

    let invalid_after: usize = adjustments
        .iter()
        .filter(|adjustment| !adjustment.duration.is_valid)
        .count();
    let audit_event: AuditEvent = AuditEvent::new(
        state.project.project_id.clone(),
        Some(session.key.clone()),
        actor,
        cause,
        action,
        StateSnapshot::new(format!("session={},signups={}", session.key, targets.len())),
        StateSnapshot::new(format!(
            "session={},adjusted={},invalid={invalid_after}",
            session.key,
            changed_signups.len()
        )),
    );

    Ok(TransitionResult {
        new_state,
        changed_signups,
        audit_event,
        adjustments,
    })
}
