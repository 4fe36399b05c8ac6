// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    MemoryStore, attended_signup, create_test_actor, create_test_cause, create_test_signup,
    instant, multi_day_project, one_time_state_with_attendance,
};
use crate::{
    CoreError, PublicationDecision, PublicationPlan, PublicationResult, PublicationStage,
    ProjectState, execute_publication, plan_publication, publish,
};
use vol_hours_domain::{
    DomainError, InvalidDurationReason, ProjectStatus, SessionKey, Signup, SignupStatus,
    VolunteerIdentity,
};

const EDITING_NOW: &str = "2025-06-02T10:00";

fn run_publish(
    store: &mut MemoryStore,
    state: &ProjectState,
    session_id: &str,
    now: &str,
) -> Result<PublicationResult, CoreError> {
    publish(
        store,
        state,
        session_id,
        instant(now),
        create_test_actor(),
        create_test_cause(),
    )
}

fn expect_plan(state: &ProjectState, session_id: &str, now: &str) -> PublicationPlan {
    match plan_publication(state, session_id, instant(now)).unwrap() {
        PublicationDecision::Publish(plan) => plan,
        PublicationDecision::AlreadyPublished { .. } => panic!("expected a publication plan"),
    }
}

#[test]
fn test_publishing_twice_creates_certificates_once() {
    let state: ProjectState = one_time_state_with_attendance();
    let mut store: MemoryStore = MemoryStore::default();

    let first: PublicationResult = run_publish(&mut store, &state, "oneTime", EDITING_NOW).unwrap();
    assert_eq!(first.outcome.certificates_created, 3);
    assert!(!first.outcome.already_published);
    assert!(first.audit_event.is_some());
    assert_eq!(store.certificates.len(), 3);
    assert!(
        store
            .latches
            .contains(&(String::from("project-1"), String::from("oneTime")))
    );

    let second: PublicationResult =
        run_publish(&mut store, &state, "oneTime", EDITING_NOW).unwrap();
    assert_eq!(second.outcome.certificates_created, 0);
    assert!(second.outcome.already_published);
    assert!(second.audit_event.is_none());
    assert_eq!(store.certificates.len(), 3);
}

#[test]
fn test_publishing_a_latched_state_is_a_no_op() {
    let mut state: ProjectState = one_time_state_with_attendance();
    state.project.published.latch(&SessionKey::new("oneTime"));
    let mut store: MemoryStore = MemoryStore::default();

    let decision = plan_publication(&state, "oneTime", instant(EDITING_NOW)).unwrap();
    assert_eq!(
        decision,
        PublicationDecision::AlreadyPublished {
            session_key: SessionKey::new("oneTime"),
        }
    );

    let result: PublicationResult = run_publish(&mut store, &state, "oneTime", EDITING_NOW).unwrap();
    assert!(result.outcome.already_published);
    assert!(store.certificates.is_empty());
}

#[test]
fn test_plan_builds_certificate_requests() {
    let state: ProjectState = one_time_state_with_attendance();
    let plan: PublicationPlan = expect_plan(&state, "oneTime", EDITING_NOW);

    assert_eq!(plan.session_key, SessionKey::new("oneTime"));
    assert_eq!(plan.requests.len(), 3);
    assert!(plan.excluded.is_empty());

    let first = &plan.requests[0];
    assert_eq!(first.signup_id, "s1");
    assert_eq!(first.user_id, Some(String::from("user-s1")));
    assert_eq!(first.email, Some(String::from("s1@example.org")));
    assert_eq!(first.check_in, instant("2025-06-01T08:50"));
    assert_eq!(first.check_out, instant("2025-06-01T12:05"));
    assert_eq!(first.minutes, 195);

    let certificates = plan.certificates();
    assert_eq!(certificates[0].event_start, first.check_in);
    assert_eq!(certificates[0].duration_minutes, 195);
    assert_eq!(certificates[0].organization.name, "Downtown Food Bank");
    assert_eq!(certificates[0].project.project_id, "project-1");
    assert!(certificates[0].is_certified);
}

#[test]
fn test_anonymous_volunteer_has_no_user_id() {
    let mut anonymous: Signup =
        attended_signup("anon", "oneTime", "2025-06-01T09:00", "2025-06-01T10:00");
    anonymous.identity = VolunteerIdentity::Anonymous {
        anonymous_signup_id: String::from("anon-token"),
    };
    anonymous.email = None;
    let mut state: ProjectState = one_time_state_with_attendance();
    state.signups = vec![anonymous];

    let plan: PublicationPlan = expect_plan(&state, "oneTime", EDITING_NOW);

    assert_eq!(plan.requests[0].user_id, None);
    assert_eq!(plan.requests[0].email, None);
}

#[test]
fn test_invalid_entries_are_excluded_and_reported() {
    let mut state: ProjectState = one_time_state_with_attendance();
    state.signups.push(attended_signup(
        "backwards",
        "oneTime",
        "2025-06-01T09:00",
        "2025-06-01T08:59",
    ));
    let mut never_left: Signup = create_test_signup("never-left", "oneTime");
    never_left.check_in_time = Some(instant("2025-06-01T09:00"));
    state.signups.push(never_left);
    let mut pending: Signup =
        attended_signup("pending", "oneTime", "2025-06-01T09:00", "2025-06-01T10:00");
    pending.status = SignupStatus::Pending;
    state.signups.push(pending);

    let mut store: MemoryStore = MemoryStore::default();
    let result: PublicationResult = run_publish(&mut store, &state, "oneTime", EDITING_NOW).unwrap();

    assert_eq!(result.outcome.certificates_created, 3);
    assert_eq!(result.outcome.excluded_count(), 2);
    assert_eq!(result.outcome.excluded[0].signup_id, "backwards");
    assert_eq!(
        result.outcome.excluded[0].reason,
        InvalidDurationReason::CheckOutPrecedesCheckIn
    );
    assert_eq!(
        result.outcome.excluded[1].reason,
        InvalidDurationReason::MissingTimestamp
    );
    let details = result.audit_event.unwrap().action.details.unwrap();
    assert!(details.contains("excluded 2"));
}

#[test]
fn test_publication_before_session_ends_is_rejected() {
    let state: ProjectState = one_time_state_with_attendance();
    let mut store: MemoryStore = MemoryStore::default();

    let result = run_publish(&mut store, &state, "oneTime", "2025-06-01T11:00");

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SessionNotEditable { ref phase, .. }))
            if phase == "active"
    ));
    assert!(store.certificates.is_empty());
    assert!(store.latches.is_empty());
}

#[test]
fn test_publication_after_editing_deadline_is_allowed() {
    let state: ProjectState = one_time_state_with_attendance();
    let mut store: MemoryStore = MemoryStore::default();

    let result: PublicationResult =
        run_publish(&mut store, &state, "oneTime", "2025-06-04T00:00").unwrap();

    assert_eq!(result.outcome.certificates_created, 3);
}

#[test]
fn test_cancelled_project_cannot_publish() {
    let mut state: ProjectState = one_time_state_with_attendance();
    state.project.status = ProjectStatus::Cancelled;

    let result = plan_publication(&state, "oneTime", instant(EDITING_NOW));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::ProjectCancelled { .. }))
    ));
}

#[test]
fn test_unknown_session_is_unavailable() {
    let state: ProjectState = one_time_state_with_attendance();

    let result = plan_publication(&state, "2025-06-01-0", instant(EDITING_NOW));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SessionNotFound { .. }))
    ));
}

#[test]
fn test_alias_session_id_publishes_under_canonical_key() {
    let state: ProjectState = ProjectState::new(
        multi_day_project(),
        vec![
            attended_signup("a", "2025-07-10-0", "2025-07-10T09:00", "2025-07-10T11:00"),
            attended_signup("b", "day-0-slot-1", "2025-07-10T13:00", "2025-07-10T15:00"),
        ],
    );
    let mut store: MemoryStore = MemoryStore::default();

    let result: PublicationResult =
        run_publish(&mut store, &state, "day-0-slot-1", "2025-07-11T09:00").unwrap();

    assert_eq!(result.outcome.session_key, SessionKey::new("2025-07-10-1"));
    assert_eq!(result.outcome.certificates_created, 1);
    assert!(
        store
            .certificates
            .contains_key(&(String::from("b"), String::from("2025-07-10-1")))
    );
    assert!(
        store
            .latches
            .contains(&(String::from("project-1"), String::from("2025-07-10-1")))
    );
}

#[test]
fn test_failed_issuance_leaves_latch_unset_and_is_retriable() {
    let state: ProjectState = one_time_state_with_attendance();
    let plan: PublicationPlan = expect_plan(&state, "oneTime", EDITING_NOW);
    let mut store: MemoryStore = MemoryStore {
        fail_issuance_after: Some(1),
        ..MemoryStore::default()
    };

    let result = execute_publication(&mut store, &plan);

    assert!(matches!(
        result,
        Err(CoreError::PublicationFailed {
            stage: PublicationStage::CertificateIssuance,
            ..
        })
    ));
    assert!(store.latches.is_empty());
    assert_eq!(store.certificates.len(), 1);

    store.fail_issuance_after = None;
    let retry = execute_publication(&mut store, &plan).unwrap();

    assert_eq!(retry.certificates_created, 2);
    assert_eq!(store.certificates.len(), 3);
    assert_eq!(store.latches.len(), 1);
}

#[test]
fn test_failed_latch_set_reports_created_certificates() {
    let state: ProjectState = one_time_state_with_attendance();
    let plan: PublicationPlan = expect_plan(&state, "oneTime", EDITING_NOW);
    let mut store: MemoryStore = MemoryStore {
        fail_latch_set: true,
        ..MemoryStore::default()
    };

    let result = execute_publication(&mut store, &plan);

    assert!(matches!(
        result,
        Err(CoreError::PublicationFailed {
            stage: PublicationStage::LatchSet,
            certificates_created: 3,
            ..
        })
    ));

    store.fail_latch_set = false;
    let retry = execute_publication(&mut store, &plan).unwrap();

    assert_eq!(retry.certificates_created, 0);
    assert!(!retry.already_published);
    assert_eq!(store.certificates.len(), 3);
    assert_eq!(store.latches.len(), 1);
}

#[test]
fn test_failed_latch_check_touches_nothing() {
    let state: ProjectState = one_time_state_with_attendance();
    let plan: PublicationPlan = expect_plan(&state, "oneTime", EDITING_NOW);
    let mut store: MemoryStore = MemoryStore {
        fail_latch_check: true,
        ..MemoryStore::default()
    };

    let result = execute_publication(&mut store, &plan);

    assert!(matches!(
        result,
        Err(CoreError::PublicationFailed {
            stage: PublicationStage::LatchCheck,
            ..
        })
    ));
    assert!(store.certificates.is_empty());
}

#[test]
fn test_publication_failure_message_is_explicit() {
    let err: CoreError = CoreError::PublicationFailed {
        session_key: String::from("oneTime"),
        stage: PublicationStage::LatchSet,
        message: String::from("disk full"),
        certificates_created: 3,
    };

    assert_eq!(
        err.to_string(),
        "Publication of session 'oneTime' failed during latch_set (3 certificates created): disk full"
    );
}
