// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ProjectState, PublicationStore};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};
use vol_hours_audit::{Actor, Cause};
use vol_hours_domain::{
    Certificate, DayDocument, EventType, Project, ProjectStatus, PublicationLatch,
    ScheduleDocument, SessionKey, Signup, SignupStatus, SlotDocument, VerificationMethod,
    VolunteerIdentity, parse_instant,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("organizer-1"), String::from("organizer"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Organizer request"))
}

pub fn instant(value: &str) -> NaiveDateTime {
    parse_instant(value).unwrap()
}

fn slot(date: Option<&str>, start: &str, end: &str) -> SlotDocument {
    SlotDocument {
        date: date.map(String::from),
        start_time: Some(String::from(start)),
        end_time: Some(String::from(end)),
        volunteer_capacity: Some(10),
    }
}

fn create_test_project(event_type: EventType, schedule: ScheduleDocument) -> Project {
    Project {
        project_id: String::from("project-1"),
        name: String::from("Food Bank Sorting"),
        organization_name: String::from("Downtown Food Bank"),
        event_type,
        schedule,
        created_at: instant("2025-05-01T10:00"),
        status: ProjectStatus::Upcoming,
        verification_method: VerificationMethod::Manual,
        published: PublicationLatch::new(),
    }
}

/// One-time session on 2025-06-01 from 09:00 to 12:00.
pub fn one_time_project() -> Project {
    create_test_project(
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

pub fn attended_signup(
    signup_id: &str,
    schedule_id: &str,
    check_in: &str,
    check_out: &str,
) -> Signup {
    let mut signup: Signup = create_test_signup(signup_id, schedule_id);
    signup.status = SignupStatus::Attended;
    signup.check_in_time = Some(instant(check_in));
    signup.check_out_time = Some(instant(check_out));
    signup
}

/// Three valid attendance records for the one-time session.
pub fn one_time_state_with_attendance() -> ProjectState {
    ProjectState::new(
        one_time_project(),
        vec![
            attended_signup("s1", "oneTime", "2025-06-01T08:50", "2025-06-01T12:05"),
            attended_signup("s2", "oneTime", "2025-06-01T09:00", "2025-06-01T11:00"),
            attended_signup("s3", "oneTime", "2025-06-01T10:15", "2025-06-01T12:00"),
        ],
    )
}

/// An in-memory publication store with fault injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub latches: BTreeSet<(String, String)>,
    pub certificates: BTreeMap<(String, String), Certificate>,
    /// Fail issuance once this many certificates have been written in one call.
    pub fail_issuance_after: Option<usize>,
    pub fail_latch_set: bool,
    pub fail_latch_check: bool,
}

impl PublicationStore for MemoryStore {
    type Error = String;

    fn is_published(&mut self, project_id: &str, session_key: &SessionKey) -> Result<bool, String> {
        if self.fail_latch_check {
            return Err(String::from("store unavailable"));
        }
        Ok(self
            .latches
            .contains(&(project_id.to_string(), session_key.to_string())))
    }

    fn issue_certificates(
        &mut self,
        _project_id: &str,
        certificates: &[Certificate],
    ) -> Result<usize, String> {
        let mut created: usize = 0;
        for certificate in certificates {
            if self.fail_issuance_after == Some(created) {
                return Err(String::from("certificate write failed"));
            }
            let key = (
                certificate.signup_id.clone(),
                certificate.session_key.to_string(),
            );
            if !self.certificates.contains_key(&key) {
                self.certificates.insert(key, certificate.clone());
                created += 1;
            }
        }
        Ok(created)
    }

    fn set_published(&mut self, project_id: &str, session_key: &SessionKey) -> Result<(), String> {
        if self.fail_latch_set {
            return Err(String::from("latch write failed"));
        }
        self.latches
            .insert((project_id.to_string(), session_key.to_string()));
        Ok(())
    }
}
