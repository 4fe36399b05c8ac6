// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod project_tests;

use crate::Persistence;
use chrono::NaiveDateTime;
use vol_hours_audit::{Actor, Cause};
use vol_hours_domain::{
    DayDocument, EventType, Project, ProjectStatus, PublicationLatch, ScheduleDocument, Signup,
    SignupStatus, SlotDocument, VerificationMethod, VolunteerIdentity, parse_instant,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("organizer-1"), String::from("organizer"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn instant(value: &str) -> NaiveDateTime {
    parse_instant(value).unwrap()
}

fn slot(date: Option<&str>, start: &str, end: &str) -> SlotDocument {
    SlotDocument {
        date: date.map(String::from),
        start_time: Some(String::from(start)),
        end_time: Some(String::from(end)),
        volunteer_capacity: Some(25),
    }
}

fn create_test_project(
    project_id: &str,
    event_type: EventType,
    schedule: ScheduleDocument,
) -> Project {
    Project {
        project_id: String::from(project_id),
        name: String::from("River Cleanup"),
        organization_name: String::from("Friends of the River"),
        event_type,
        schedule,
        created_at: instant("2025-05-01T10:00:00"),
        status: ProjectStatus::Upcoming,
        verification_method: VerificationMethod::QrCode,
        published: PublicationLatch::new(),
    }
}

/// One-time session on 2025-06-01 from 09:00 to 12:00.
pub fn one_time_project() -> Project {
    create_test_project(
        "project-1",
        EventType::OneTime,
        ScheduleDocument {
            one_time: Some(slot(Some("2025-06-01"), "09:00", "12:00")),
            ..ScheduleDocument::default()
        },
    )
}

/// 2025-07-10 with slots 09:00-11:00 and 13:00-15:00.
pub fn multi_day_project() -> Project {
    create_test_project(
        "project-2",
        EventType::MultiDay,
        ScheduleDocument {
            multi_day: Some(vec![DayDocument {
                date: Some(String::from("2025-07-10")),
                slots: Some(vec![
                    slot(None, "09:00", "11:00"),
                    slot(None, "13:00", "15:00"),
                ]),
            }]),
            ..ScheduleDocument::default()
        },
    )
}

pub fn create_test_signup(project_id: &str, signup_id: &str, schedule_id: &str) -> Signup {
    Signup {
        signup_id: String::from(signup_id),
        project_id: String::from(project_id),
        schedule_id: String::from(schedule_id),
        identity: VolunteerIdentity::User {
            user_id: format!("user-{signup_id}"),
        },
        name: format!("Volunteer {signup_id}"),
        email: Some(format!("{signup_id}@example.org")),
        status: SignupStatus::Approved,
        check_in_time: None,
        check_out_time: None,
    }
}

pub fn attended_signup(
    project_id: &str,
    signup_id: &str,
    schedule_id: &str,
    check_in: &str,
    check_out: &str,
) -> Signup {
    let mut signup: Signup = create_test_signup(project_id, signup_id, schedule_id);
    signup.status = SignupStatus::Attended;
    signup.check_in_time = Some(instant(check_in));
    signup.check_out_time = Some(instant(check_out));
    signup
}

/// Creates a persistence instance holding `project` and `signups`.
pub fn create_persistence_with(project: &Project, signups: &[Signup]) -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.create_project(project).unwrap();
    for signup in signups {
        persistence.create_signup(signup).unwrap();
    }
    persistence
}

/// The one-time project with three valid and one invalid attendance record.
pub fn create_one_time_persistence() -> Persistence {
    create_persistence_with(
        &one_time_project(),
        &[
            attendance("s1", "2025-06-01T08:50", "2025-06-01T12:05"),
            attendance("s2", "2025-06-01T09:00", "2025-06-01T11:00"),
            attendance("s3", "2025-06-01T10:15", "2025-06-01T12:00"),
            attendance("s4", "2025-06-01T11:00", "2025-06-01T10:00"),
        ],
    )
}

fn attendance(signup_id: &str, check_in: &str, check_out: &str) -> Signup {
    attended_signup("project-1", signup_id, "oneTime", check_in, check_out)
}
