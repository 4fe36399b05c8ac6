// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::error::PersistenceError;
use crate::tests::{
    attended_signup, create_persistence_with, create_test_signup, instant, multi_day_project,
    one_time_project,
};
use vol_hours::ProjectState;
use vol_hours_domain::{
    Project, ProjectStatus, SessionKey, Signup, SignupStatus, VolunteerIdentity,
};

#[test]
fn test_project_round_trips_through_storage() {
    let project: Project = multi_day_project();
    let mut persistence: Persistence = create_persistence_with(&project, &[]);

    let loaded: Project = persistence.get_project("project-2").unwrap();

    assert_eq!(loaded, project);
}

#[test]
fn test_duplicate_project_id_is_a_constraint_violation() {
    let mut persistence: Persistence = create_persistence_with(&one_time_project(), &[]);

    let result = persistence.create_project(&one_time_project());

    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));
}

#[test]
fn test_stored_latch_entries_are_loaded_as_written() {
    let mut project: Project = multi_day_project();
    project.status = ProjectStatus::InProgress;
    project.published.latch(&SessionKey::new("day-0-slot-1"));
    let mut persistence: Persistence = create_persistence_with(&project, &[]);

    let loaded: Project = persistence.get_project("project-2").unwrap();

    assert!(loaded.published.is_published(&SessionKey::new("day-0-slot-1")));
    assert!(!loaded.published.is_published(&SessionKey::new("2025-07-10-1")));
    assert_eq!(loaded.status, ProjectStatus::InProgress);
}

#[test]
fn test_project_state_includes_signups_in_id_order() {
    let project: Project = one_time_project();
    let mut persistence: Persistence = create_persistence_with(
        &project,
        &[
            create_test_signup("project-1", "s2", "oneTime"),
            attended_signup(
                "project-1",
                "s1",
                "oneTime",
                "2025-06-01T09:00",
                "2025-06-01T12:00",
            ),
        ],
    );

    let state: ProjectState = persistence.load_project_state("project-1").unwrap();

    let ids: Vec<&str> = state.signups.iter().map(|s| s.signup_id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s2"]);
    assert_eq!(state.signups[0].status, SignupStatus::Attended);
    assert_eq!(
        state.signups[0].check_out_time,
        Some(instant("2025-06-01T12:00"))
    );
    assert_eq!(state.signups[1].check_in_time, None);
}

#[test]
fn test_anonymous_signup_round_trips() {
    let mut signup: Signup = create_test_signup("project-1", "anon-1", "oneTime");
    signup.identity = VolunteerIdentity::Anonymous {
        anonymous_signup_id: String::from("walk-in-17"),
    };
    signup.email = None;
    let mut persistence: Persistence =
        create_persistence_with(&one_time_project(), &[signup.clone()]);

    let state: ProjectState = persistence.load_project_state("project-1").unwrap();

    assert_eq!(state.signups, vec![signup]);
}

#[test]
fn test_load_missing_project_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.load_project_state("nope");

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
