// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    attended_signup, create_test_actor, create_test_cause, create_test_signup, instant,
    multi_day_project, one_time_project, one_time_state_with_attendance,
};
use crate::{Command, CoreError, ProjectState, TransitionResult, apply};
use vol_hours_domain::{
    DomainError, InvalidDurationReason, ProjectStatus, SessionKey, Signup, SignupStatus,
};

fn one_time_state(signups: Vec<Signup>) -> ProjectState {
    ProjectState::new(one_time_project(), signups)
}

fn run(state: &ProjectState, command: Command, now: &str) -> Result<TransitionResult, CoreError> {
    apply(
        state,
        command,
        instant(now),
        create_test_actor(),
        create_test_cause(),
    )
}

#[test]
fn test_check_in_during_check_in_window_records_attendance() {
    let state: ProjectState = one_time_state(vec![create_test_signup("s1", "oneTime")]);
    let command: Command = Command::RecordCheckIn {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T08:05"),
    };

    let transition: TransitionResult = run(&state, command, "2025-06-01T08:05").unwrap();

    let updated: &Signup = &transition.new_state.signups[0];
    assert_eq!(updated.check_in_time, Some(instant("2025-06-01T08:05")));
    assert_eq!(updated.status, SignupStatus::Attended);
    assert_eq!(transition.changed_signups, vec![updated.clone()]);
    assert!(transition.adjustments.is_empty());
}

#[test]
fn test_check_in_emits_one_session_scoped_audit_event() {
    let state: ProjectState = one_time_state(vec![create_test_signup("s1", "oneTime")]);
    let command: Command = Command::RecordCheckIn {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T08:05"),
    };

    let transition: TransitionResult = run(&state, command, "2025-06-01T08:05").unwrap();

    assert_eq!(transition.audit_event.action.name, "RecordCheckIn");
    assert_eq!(transition.audit_event.actor.id, "organizer-1");
    assert_eq!(transition.audit_event.cause.id, "req-456");
    assert_eq!(transition.audit_event.project_id, "project-1");
    assert_eq!(
        transition.audit_event.session_key,
        Some(SessionKey::new("oneTime"))
    );
    assert!(transition.audit_event.before.data.contains("check_in=none"));
    assert!(
        transition
            .audit_event
            .after
            .data
            .contains("check_in=2025-06-01T08:05:00")
    );
}

#[test]
fn test_apply_does_not_mutate_input_state() {
    let state: ProjectState = one_time_state(vec![create_test_signup("s1", "oneTime")]);
    let original: ProjectState = state.clone();
    let command: Command = Command::RecordCheckIn {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T09:00"),
    };

    run(&state, command, "2025-06-01T09:00").unwrap();

    assert_eq!(state, original);
}

#[test]
fn test_check_in_before_window_is_rejected() {
    let state: ProjectState = one_time_state(vec![create_test_signup("s1", "oneTime")]);
    let command: Command = Command::RecordCheckIn {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T07:30"),
    };

    let result = run(&state, command, "2025-06-01T07:30");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SessionNotEditable { ref phase, .. }))
            if phase == "upcoming"
    ));
}

#[test]
fn test_check_in_after_deadline_is_rejected() {
    let state: ProjectState = one_time_state(vec![create_test_signup("s1", "oneTime")]);
    let command: Command = Command::RecordCheckIn {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T09:00"),
    };

    let result = run(&state, command, "2025-06-03T12:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SessionNotEditable { ref phase, .. }))
            if phase == "closed"
    ));
}

#[test]
fn test_unknown_signup_is_rejected() {
    let state: ProjectState = one_time_state(Vec::new());
    let command: Command = Command::RecordCheckIn {
        signup_id: String::from("missing"),
        at: instant("2025-06-01T09:00"),
    };

    let result = run(&state, command, "2025-06-01T09:00");

    assert!(matches!(
        result,
        Err(CoreError::SignupNotFound { ref signup_id }) if signup_id == "missing"
    ));
}

#[test]
fn test_rejected_signup_cannot_check_in() {
    let mut signup: Signup = create_test_signup("s1", "oneTime");
    signup.status = SignupStatus::Rejected;
    let state: ProjectState = one_time_state(vec![signup]);
    let command: Command = Command::RecordCheckIn {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T09:00"),
    };

    let result = run(&state, command, "2025-06-01T09:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SignupRejected { .. }))
    ));
}

#[test]
fn test_signup_for_removed_session_is_unavailable() {
    let state: ProjectState = one_time_state(vec![create_test_signup("s1", "2025-06-01-0")]);
    let command: Command = Command::RecordCheckIn {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T09:00"),
    };

    let result = run(&state, command, "2025-06-01T09:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SessionNotFound { .. }))
    ));
}

#[test]
fn test_check_out_requires_check_in() {
    let state: ProjectState = one_time_state(vec![create_test_signup("s1", "oneTime")]);
    let command: Command = Command::RecordCheckOut {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T12:00"),
    };

    let result = run(&state, command, "2025-06-01T12:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::MissingCheckIn { .. }))
    ));
}

#[test]
fn test_check_out_after_session_end_is_accepted() {
    let mut signup: Signup = create_test_signup("s1", "oneTime");
    signup.check_in_time = Some(instant("2025-06-01T08:55"));
    let state: ProjectState = one_time_state(vec![signup]);
    let command: Command = Command::RecordCheckOut {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T12:20"),
    };

    let transition: TransitionResult = run(&state, command, "2025-06-01T12:20").unwrap();

    assert_eq!(
        transition.new_state.signups[0].check_out_time,
        Some(instant("2025-06-01T12:20"))
    );
}

#[test]
fn test_published_session_rejects_every_attendance_change() {
    let mut state: ProjectState = one_time_state_with_attendance();
    state.project.published.latch(&SessionKey::new("oneTime"));

    let commands: Vec<Command> = vec![
        Command::RecordCheckIn {
            signup_id: String::from("s1"),
            at: instant("2025-06-01T09:00"),
        },
        Command::RecordCheckOut {
            signup_id: String::from("s1"),
            at: instant("2025-06-01T12:00"),
        },
        Command::EditAttendance {
            signup_id: String::from("s1"),
            check_in: Some(instant("2025-06-01T09:00")),
            check_out: Some(instant("2025-06-01T12:00")),
        },
        Command::AdjustCheckOuts {
            session_id: String::from("oneTime"),
            offset_minutes: 10,
        },
    ];

    for command in commands {
        let result = run(&state, command, "2025-06-01T13:00");
        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(DomainError::SessionAlreadyPublished { .. }))
        ));
    }
}

#[test]
fn test_latch_written_under_alias_locks_session() {
    let mut project = multi_day_project();
    project.published.latch(&SessionKey::new("day-0-slot-1"));
    let state: ProjectState = ProjectState::new(
        project,
        vec![attended_signup(
            "s1",
            "2025-07-10-1",
            "2025-07-10T13:00",
            "2025-07-10T15:00",
        )],
    );
    let command: Command = Command::EditAttendance {
        signup_id: String::from("s1"),
        check_in: Some(instant("2025-07-10T13:00")),
        check_out: Some(instant("2025-07-10T14:00")),
    };

    let result = run(&state, command, "2025-07-10T16:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SessionAlreadyPublished { ref session_id }))
            if session_id == "2025-07-10-1"
    ));
}

#[test]
fn test_cancelled_project_rejects_attendance() {
    let mut state: ProjectState = one_time_state(vec![create_test_signup("s1", "oneTime")]);
    state.project.status = ProjectStatus::Cancelled;
    let command: Command = Command::RecordCheckIn {
        signup_id: String::from("s1"),
        at: instant("2025-06-01T09:00"),
    };

    let result = run(&state, command, "2025-06-01T09:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::ProjectCancelled { .. }))
    ));
}

#[test]
fn test_edit_attendance_during_editing_window() {
    let state: ProjectState = one_time_state_with_attendance();
    let command: Command = Command::EditAttendance {
        signup_id: String::from("s2"),
        check_in: Some(instant("2025-06-01T09:00")),
        check_out: Some(instant("2025-06-01T12:00")),
    };

    let transition: TransitionResult = run(&state, command, "2025-06-02T10:00").unwrap();

    let updated: &Signup = &transition.new_state.signups[1];
    assert_eq!(updated.signup_id, "s2");
    assert_eq!(updated.check_out_time, Some(instant("2025-06-01T12:00")));
    assert_eq!(transition.audit_event.action.name, "EditAttendance");
    assert_eq!(transition.new_state.signups[0], state.signups[0]);
}

#[test]
fn test_edit_attendance_rejects_check_out_without_check_in() {
    let state: ProjectState = one_time_state_with_attendance();
    let command: Command = Command::EditAttendance {
        signup_id: String::from("s2"),
        check_in: None,
        check_out: Some(instant("2025-06-01T12:00")),
    };

    let result = run(&state, command, "2025-06-02T10:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::MissingCheckIn { .. }))
    ));
}

#[test]
fn test_edit_attendance_not_allowed_before_session_starts() {
    let state: ProjectState = one_time_state_with_attendance();
    let command: Command = Command::EditAttendance {
        signup_id: String::from("s2"),
        check_in: Some(instant("2025-06-01T09:00")),
        check_out: None,
    };

    let result = run(&state, command, "2025-06-01T08:30");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SessionNotEditable { .. }))
    ));
}

#[test]
fn test_adjust_check_outs_reports_every_signup() {
    let mut no_check_out: Signup = create_test_signup("s4", "oneTime");
    no_check_out.check_in_time = Some(instant("2025-06-01T09:00"));
    let mut state: ProjectState = one_time_state_with_attendance();
    state.signups.push(no_check_out);

    let command: Command = Command::AdjustCheckOuts {
        session_id: String::from("oneTime"),
        offset_minutes: -110,
    };

    let transition: TransitionResult = run(&state, command, "2025-06-02T10:00").unwrap();

    assert_eq!(transition.adjustments.len(), 4);
    assert_eq!(transition.changed_signups.len(), 3);

    // s1: 08:50 -> 10:15
    assert!(transition.adjustments[0].applied);
    assert_eq!(transition.adjustments[0].duration.minutes, 85);
    // s2: 09:00 -> 09:10
    assert!(transition.adjustments[1].duration.is_valid);
    // s3: 10:15 -> 10:10, now invalid but still applied
    assert!(transition.adjustments[2].applied);
    assert_eq!(
        transition.adjustments[2].duration.reason,
        Some(InvalidDurationReason::CheckOutPrecedesCheckIn)
    );
    assert_eq!(
        transition.new_state.signups[2].check_out_time,
        Some(instant("2025-06-01T10:10"))
    );
    // s4: nothing to shift
    assert!(!transition.adjustments[3].applied);
    assert_eq!(transition.new_state.signups[3].check_out_time, None);

    assert_eq!(transition.audit_event.action.name, "AdjustCheckOuts");
    assert!(transition.audit_event.after.data.contains("invalid=2"));
}

#[test]
fn test_adjust_check_outs_only_touches_addressed_session() {
    let state: ProjectState = ProjectState::new(
        multi_day_project(),
        vec![
            attended_signup("a", "2025-07-10-0", "2025-07-10T09:00", "2025-07-10T11:00"),
            attended_signup("b", "day-0-slot-1", "2025-07-10T13:00", "2025-07-10T15:00"),
        ],
    );
    let command: Command = Command::AdjustCheckOuts {
        session_id: String::from("0-1"),
        offset_minutes: 15,
    };

    let transition: TransitionResult = run(&state, command, "2025-07-11T09:00").unwrap();

    assert_eq!(transition.adjustments.len(), 1);
    assert_eq!(transition.adjustments[0].signup_id, "b");
    assert_eq!(transition.new_state.signups[0], state.signups[0]);
    assert_eq!(
        transition.new_state.signups[1].check_out_time,
        Some(instant("2025-07-10T15:15"))
    );
    assert_eq!(
        transition.audit_event.session_key,
        Some(SessionKey::new("2025-07-10-1"))
    );
}

#[test]
fn test_adjust_check_outs_requires_editing_phase() {
    let state: ProjectState = one_time_state_with_attendance();
    let command: Command = Command::AdjustCheckOuts {
        session_id: String::from("oneTime"),
        offset_minutes: 5,
    };

    let result = run(&state, command, "2025-06-01T10:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SessionNotEditable { ref phase, .. }))
            if phase == "active"
    ));
}

#[test]
fn test_adjust_check_outs_unknown_session() {
    let state: ProjectState = one_time_state_with_attendance();
    let command: Command = Command::AdjustCheckOuts {
        session_id: String::from("Registration"),
        offset_minutes: 5,
    };

    let result = run(&state, command, "2025-06-02T10:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SessionNotFound { .. }))
    ));
}
