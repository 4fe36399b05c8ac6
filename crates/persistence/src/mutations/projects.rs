// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project and signup inserts.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;
use vol_hours_domain::{Project, Signup, format_instant};

use crate::diesel_schema::{projects, published_sessions, signups};
use crate::error::PersistenceError;

/// Inserts a project and any latch entries it already carries.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the project id is
/// taken, or an error if serialization or the insert fails.
pub fn insert_project(
    conn: &mut SqliteConnection,
    project: &Project,
) -> Result<(), PersistenceError> {
    let schedule_json: String = serde_json::to_string(&project.schedule)?;
    let created_at: String = format_instant(&project.created_at);

    diesel::insert_into(projects::table)
        .values((
            projects::project_id.eq(&project.project_id),
            projects::name.eq(&project.name),
            projects::organization_name.eq(&project.organization_name),
            projects::event_type.eq(project.event_type.as_str()),
            projects::schedule_json.eq(schedule_json),
            projects::status.eq(project.status.as_str()),
            projects::verification_method.eq(project.verification_method.as_str()),
            projects::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    for key in project.published.published_keys() {
        diesel::insert_or_ignore_into(published_sessions::table)
            .values((
                published_sessions::project_id.eq(&project.project_id),
                published_sessions::session_key.eq(key),
                published_sessions::published_at.eq(&created_at),
            ))
            .execute(conn)?;
    }

    debug!(project_id = %project.project_id, event_type = %project.event_type, "Inserted project");
    Ok(())
}

/// Inserts a signup.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the signup id is taken
/// or the project does not exist.
pub fn insert_signup(conn: &mut SqliteConnection, signup: &Signup) -> Result<(), PersistenceError> {
    diesel::insert_into(signups::table)
        .values((
            signups::signup_id.eq(&signup.signup_id),
            signups::project_id.eq(&signup.project_id),
            signups::schedule_id.eq(&signup.schedule_id),
            signups::user_id.eq(signup.identity.user_id()),
            signups::anonymous_signup_id.eq(signup.identity.anonymous_signup_id()),
            signups::name.eq(&signup.name),
            signups::email.eq(signup.email.as_deref()),
            signups::status.eq(signup.status.as_str()),
            signups::check_in_time.eq(signup.check_in_time.as_ref().map(format_instant)),
            signups::check_out_time.eq(signup.check_out_time.as_ref().map(format_instant)),
        ))
        .execute(conn)?;

    debug!(
        signup_id = %signup.signup_id,
        project_id = %signup.project_id,
        schedule_id = %signup.schedule_id,
        "Inserted signup"
    );
    Ok(())
}

/// Writes the attendance fields and status of an existing signup.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the signup does not exist.
pub fn update_signup_attendance(
    conn: &mut SqliteConnection,
    signup: &Signup,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        signups::table
            .filter(signups::signup_id.eq(&signup.signup_id))
            .filter(signups::project_id.eq(&signup.project_id)),
    )
    .set((
        signups::status.eq(signup.status.as_str()),
        signups::check_in_time.eq(signup.check_in_time.as_ref().map(format_instant)),
        signups::check_out_time.eq(signup.check_out_time.as_ref().map(format_instant)),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Signup '{}'",
            signup.signup_id
        )));
    }
    Ok(())
}
