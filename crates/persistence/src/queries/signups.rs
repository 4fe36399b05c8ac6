// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Signup queries and project state assembly.

use diesel::SqliteConnection;
use diesel::prelude::*;
use vol_hours::ProjectState;
use vol_hours_domain::{Project, Signup, VolunteerIdentity};

use crate::diesel_schema::signups;
use crate::error::PersistenceError;
use crate::queries::parse_optional_instant;
use crate::queries::projects::get_project;

/// Diesel Queryable struct for signup rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = signups)]
struct SignupRow {
    signup_id: String,
    project_id: String,
    schedule_id: String,
    user_id: Option<String>,
    anonymous_signup_id: Option<String>,
    name: String,
    email: Option<String>,
    status: String,
    check_in_time: Option<String>,
    check_out_time: Option<String>,
}

impl TryFrom<SignupRow> for Signup {
    type Error = PersistenceError;

    fn try_from(row: SignupRow) -> Result<Self, Self::Error> {
        let identity: VolunteerIdentity =
            VolunteerIdentity::from_columns(&row.signup_id, row.user_id, row.anonymous_signup_id)?;
        Ok(Self {
            status: row.status.parse()?,
            check_in_time: parse_optional_instant("check_in_time", row.check_in_time.as_deref())?,
            check_out_time: parse_optional_instant(
                "check_out_time",
                row.check_out_time.as_deref(),
            )?,
            signup_id: row.signup_id,
            project_id: row.project_id,
            schedule_id: row.schedule_id,
            identity,
            name: row.name,
            email: row.email,
        })
    }
}

/// Lists every signup of a project, ordered by signup id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_signups(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> Result<Vec<Signup>, PersistenceError> {
    signups::table
        .filter(signups::project_id.eq(project_id))
        .order(signups::signup_id.asc())
        .select(SignupRow::as_select())
        .load::<SignupRow>(conn)?
        .into_iter()
        .map(Signup::try_from)
        .collect()
}

/// Loads a project and all of its signups.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist.
pub fn load_project_state(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> Result<ProjectState, PersistenceError> {
    let project: Project = get_project(conn, project_id)?;
    let signups: Vec<Signup> = list_signups(conn, project_id)?;
    Ok(ProjectState::new(project, signups))
}
