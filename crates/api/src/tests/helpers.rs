// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API tests.

use chrono::NaiveDateTime;
use vol_hours_audit::{Actor, Cause};
use vol_hours_domain::{DayDocument, ScheduleDocument, SlotDocument, parse_instant};
use vol_hours_persistence::Persistence;

use crate::handlers::{create_project, create_signup, record_check_in, record_check_out};
use crate::request_response::{CreateProjectRequest, CreateSignupRequest, RecordAttendanceRequest};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("organizer-1"), String::from("organizer"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn instant(value: &str) -> NaiveDateTime {
    parse_instant(value).unwrap()
}

/// Before any session of the test projects opens for check-in.
pub fn before_events() -> NaiveDateTime {
    instant("2025-05-20T12:00")
}

fn slot(date: Option<&str>, start: &str, end: &str, capacity: u32) -> SlotDocument {
    SlotDocument {
        date: date.map(String::from),
        start_time: Some(String::from(start)),
        end_time: Some(String::from(end)),
        volunteer_capacity: Some(capacity),
    }
}

/// One-time session on 2025-06-01 from 09:00 to 12:00.
pub fn one_time_request() -> CreateProjectRequest {
    one_time_request_with_capacity(25)
}

pub fn one_time_request_with_capacity(capacity: u32) -> CreateProjectRequest {
    CreateProjectRequest {
        project_id: String::from("project-1"),
        name: String::from("River Cleanup"),
        organization_name: String::from("Friends of the River"),
        event_type: String::from("oneTime"),
        schedule: ScheduleDocument {
            one_time: Some(slot(Some("2025-06-01"), "09:00", "12:00", capacity)),
            ..ScheduleDocument::default()
        },
        verification_method: String::from("qr-code"),
    }
}

/// 2025-07-10 with slots 09:00-11:00 and 13:00-15:00, 2025-07-11 with 09:00-11:00.
pub fn multi_day_request() -> CreateProjectRequest {
    CreateProjectRequest {
        project_id: String::from("project-2"),
        name: String::from("Food Bank Week"),
        organization_name: String::from("Eastside Pantry"),
        event_type: String::from("multiDay"),
        schedule: ScheduleDocument {
            multi_day: Some(vec![
                DayDocument {
                    date: Some(String::from("2025-07-10")),
                    slots: Some(vec![
                        slot(None, "09:00", "11:00", 10),
                        slot(None, "13:00", "15:00", 10),
                    ]),
                },
                DayDocument {
                    date: Some(String::from("2025-07-11")),
                    slots: Some(vec![slot(None, "09:00", "11:00", 10)]),
                },
            ]),
            ..ScheduleDocument::default()
        },
        verification_method: String::from("manual"),
    }
}

pub fn signup_request(signup_id: &str, session_id: &str) -> CreateSignupRequest {
    CreateSignupRequest {
        signup_id: String::from(signup_id),
        session_id: String::from(session_id),
        user_id: Some(format!("user-{signup_id}")),
        anonymous_signup_id: None,
        name: format!("Volunteer {signup_id}"),
        email: Some(format!("{signup_id}@example.org")),
        status: Some(String::from("approved")),
    }
}

/// The one-time project with approved signups `s1`, `s2`, `s3` and no attendance yet.
pub fn setup_one_time() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_project(
        &mut persistence,
        &one_time_request(),
        instant("2025-05-01T10:00"),
    )
    .unwrap();
    for signup_id in ["s1", "s2", "s3"] {
        create_signup(
            &mut persistence,
            "project-1",
            &signup_request(signup_id, "oneTime"),
            before_events(),
        )
        .unwrap();
    }
    persistence
}

pub fn setup_multi_day() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_project(
        &mut persistence,
        &multi_day_request(),
        instant("2025-05-01T10:00"),
    )
    .unwrap();
    persistence
}

/// Records a check-in and a check-out for a signup of the one-time project.
pub fn record_attendance(
    persistence: &mut Persistence,
    signup_id: &str,
    check_in: &str,
    check_out: &str,
) {
    record_check_in(
        persistence,
        "project-1",
        signup_id,
        &RecordAttendanceRequest {
            at: Some(String::from(check_in)),
        },
        create_test_actor(),
        create_test_cause(),
        instant(check_in),
    )
    .unwrap();
    record_check_out(
        persistence,
        "project-1",
        signup_id,
        &RecordAttendanceRequest {
            at: Some(String::from(check_out)),
        },
        create_test_actor(),
        create_test_cause(),
        instant(check_out),
    )
    .unwrap();
}

/// The one-time project after the session ended: s1 08:50-12:05,
/// s2 09:00-11:00, and s3 checked in at 10:15 but never checked out.
pub fn setup_one_time_after_session() -> Persistence {
    let mut persistence: Persistence = setup_one_time();
    record_attendance(&mut persistence, "s1", "2025-06-01T08:50", "2025-06-01T12:05");
    record_attendance(&mut persistence, "s2", "2025-06-01T09:00", "2025-06-01T11:00");
    record_check_in(
        &mut persistence,
        "project-1",
        "s3",
        &RecordAttendanceRequest {
            at: Some(String::from("2025-06-01T10:15")),
        },
        create_test_actor(),
        create_test_cause(),
        instant("2025-06-01T10:15"),
    )
    .unwrap();
    persistence
}
