// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DayDocument, EventType, MultiAreaDocument, Project, ProjectStatus, PublicationLatch,
    RoleDocument, ScheduleDocument, Signup, SignupStatus, SlotDocument, VerificationMethod,
    VolunteerIdentity, parse_instant,
};
use chrono::NaiveDateTime;

pub fn instant(value: &str) -> NaiveDateTime {
    parse_instant(value).unwrap()
}

pub fn slot(date: Option<&str>, start: &str, end: &str, capacity: u32) -> SlotDocument {
    SlotDocument {
        date: date.map(String::from),
        start_time: Some(String::from(start)),
        end_time: Some(String::from(end)),
        volunteer_capacity: Some(capacity),
    }
}

pub fn role(name: &str, start: &str, end: &str, capacity: u32) -> RoleDocument {
    RoleDocument {
        name: Some(String::from(name)),
        start_time: Some(String::from(start)),
        end_time: Some(String::from(end)),
        volunteer_capacity: Some(capacity),
    }
}

pub fn project_with(event_type: EventType, schedule: ScheduleDocument) -> Project {
    Project {
        project_id: String::from("project-1"),
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

/// 2025-06-01, 09:00-12:00.
pub fn one_time_document() -> ScheduleDocument {
    ScheduleDocument {
        one_time: Some(slot(Some("2025-06-01"), "09:00", "12:00", 20)),
        ..ScheduleDocument::default()
    }
}

pub fn one_time_project() -> Project {
    project_with(EventType::OneTime, one_time_document())
}

/// 2025-07-10 with 09:00-11:00 and 13:00-15:00, then 2025-07-11 with 10:00-12:00.
pub fn multi_day_document() -> ScheduleDocument {
    ScheduleDocument {
        multi_day: Some(vec![
            DayDocument {
                date: Some(String::from("2025-07-10")),
                slots: Some(vec![
                    slot(None, "09:00", "11:00", 5),
                    slot(None, "13:00", "15:00", 8),
                ]),
            },
            DayDocument {
                date: Some(String::from("2025-07-11")),
                slots: Some(vec![slot(None, "10:00", "12:00", 6)]),
            },
        ]),
        ..ScheduleDocument::default()
    }
}

pub fn multi_day_project() -> Project {
    project_with(EventType::MultiDay, multi_day_document())
}

/// 2025-08-02 with three roles, one of which contains hyphens and digits.
pub fn multi_area_document() -> ScheduleDocument {
    ScheduleDocument {
        same_day_multi_area: Some(MultiAreaDocument {
            date: Some(String::from("2025-08-02")),
            roles: Some(vec![
                role("Registration", "08:00", "10:00", 4),
                role("Water Station - 2", "09:00", "13:00", 10),
                role("Cleanup", "13:00", "15:00", 6),
            ]),
        }),
        ..ScheduleDocument::default()
    }
}

pub fn multi_area_project() -> Project {
    project_with(EventType::SameDayMultiArea, multi_area_document())
}

pub fn create_test_signup(signup_id: &str, schedule_id: &str) -> Signup {
    Signup {
        signup_id: String::from(signup_id),
        project_id: String::from("project-1"),
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
