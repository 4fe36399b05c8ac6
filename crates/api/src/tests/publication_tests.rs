// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vol_hours_persistence::Persistence;

use super::helpers::{
    create_test_actor, create_test_cause, instant, setup_multi_day, setup_one_time,
    setup_one_time_after_session, signup_request,
};
use crate::error::ApiError;
use crate::handlers::{
    create_signup, edit_attendance, get_audit_event, get_project, get_session_hours,
    list_certificates, publish_hours,
};
use crate::request_response::{
    EditAttendanceRequest, GetProjectResponse, ListCertificatesResponse, PublishHoursResponse,
};

fn publish_at(
    persistence: &mut Persistence,
    session_id: &str,
    now: &str,
) -> Result<PublishHoursResponse, ApiError> {
    publish_hours(
        persistence,
        "project-1",
        session_id,
        create_test_actor(),
        create_test_cause(),
        instant(now),
    )
}

#[test]
fn test_publish_issues_certificates_for_valid_entries_only() {
    let mut persistence: Persistence = setup_one_time_after_session();

    let response: PublishHoursResponse =
        publish_at(&mut persistence, "oneTime", "2025-06-01T13:00").unwrap();

    assert_eq!(response.session_key, "oneTime");
    assert_eq!(response.certificates_created, 2);
    assert_eq!(response.excluded_count, 1);
    assert_eq!(response.excluded[0].signup_id, "s3");
    assert_eq!(response.excluded[0].reason, "missing check-in or check-out");
    assert!(!response.already_published);
    assert_eq!(
        response.message,
        "Issued 2 certificates, excluded 1 invalid entries"
    );

    let event_id: i64 = response.event_id.unwrap();
    let event = get_audit_event(&mut persistence, event_id).unwrap();
    assert_eq!(event.action_name, "PublishHours");

    let certificates: ListCertificatesResponse =
        list_certificates(&mut persistence, "project-1", Some("oneTime")).unwrap();
    let minutes: Vec<(String, i64)> = certificates
        .certificates
        .iter()
        .map(|certificate| (certificate.signup_id.clone(), certificate.duration_minutes))
        .collect();
    assert_eq!(
        minutes,
        vec![(String::from("s1"), 195), (String::from("s2"), 120)]
    );
    assert_eq!(
        certificates.certificates[0].organization_name,
        "Friends of the River"
    );
}

#[test]
fn test_second_publish_is_a_no_op() {
    let mut persistence: Persistence = setup_one_time_after_session();
    publish_at(&mut persistence, "oneTime", "2025-06-01T13:00").unwrap();

    let response: PublishHoursResponse =
        publish_at(&mut persistence, "oneTime", "2025-06-01T13:05").unwrap();

    assert!(response.already_published);
    assert_eq!(response.certificates_created, 0);
    assert_eq!(response.event_id, None);
    let certificates: ListCertificatesResponse =
        list_certificates(&mut persistence, "project-1", None).unwrap();
    assert_eq!(certificates.certificates.len(), 2);
}

#[test]
fn test_publish_while_active_is_rejected() {
    let mut persistence: Persistence = setup_one_time();

    let result = publish_at(&mut persistence, "oneTime", "2025-06-01T10:00");

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "session_phase"
    ));
}

#[test]
fn test_publish_after_deadline_is_accepted() {
    let mut persistence: Persistence = setup_one_time_after_session();

    let response: PublishHoursResponse =
        publish_at(&mut persistence, "oneTime", "2025-06-10T00:00").unwrap();

    assert_eq!(response.certificates_created, 2);
}

#[test]
fn test_published_session_locks_attendance() {
    let mut persistence: Persistence = setup_one_time_after_session();
    publish_at(&mut persistence, "oneTime", "2025-06-01T13:00").unwrap();

    let result = edit_attendance(
        &mut persistence,
        "project-1",
        "s3",
        &EditAttendanceRequest {
            check_in: Some(String::from("2025-06-01T10:15")),
            check_out: Some(String::from("2025-06-01T12:00")),
        },
        create_test_actor(),
        create_test_cause(),
        instant("2025-06-01T14:00"),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "session_published"
    ));

    let hours = get_session_hours(
        &mut persistence,
        "project-1",
        "oneTime",
        instant("2025-06-01T14:00"),
    )
    .unwrap();
    assert!(hours.published);
    assert_eq!(hours.phase, "published");

    let project: GetProjectResponse =
        get_project(&mut persistence, "project-1", instant("2025-06-01T14:00")).unwrap();
    assert_eq!(project.derived_status, "completed");
}

#[test]
fn test_publish_through_alias_latches_canonical_session() {
    let mut persistence: Persistence = setup_multi_day();
    create_signup(
        &mut persistence,
        "project-2",
        &signup_request("m1", "2025-07-10-0"),
        instant("2025-07-01T12:00"),
    )
    .unwrap();

    let response: PublishHoursResponse = publish_hours(
        &mut persistence,
        "project-2",
        "day-0-slot-0",
        create_test_actor(),
        create_test_cause(),
        instant("2025-07-10T12:00"),
    )
    .unwrap();

    assert_eq!(response.session_key, "2025-07-10-0");
    assert_eq!(response.certificates_created, 0);
    assert_eq!(response.excluded_count, 1);

    let project: GetProjectResponse =
        get_project(&mut persistence, "project-2", instant("2025-07-10T12:00")).unwrap();
    assert_eq!(project.sessions[0].phase, "published");
    assert_eq!(project.sessions[1].phase, "check_in_open");
}

#[test]
fn test_publish_for_missing_project_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = publish_at(&mut persistence, "oneTime", "2025-06-01T13:00");

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Project"
    ));
}
