// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project and publication latch queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use vol_hours_domain::{
    Project, PublicationLatch, Schedule, ScheduleDocument, SessionKey, canonicalize_latch,
};

use crate::diesel_schema::{projects, published_sessions};
use crate::error::PersistenceError;
use crate::queries::parse_stored_instant;

/// Diesel Queryable struct for project rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = projects)]
struct ProjectRow {
    project_id: String,
    name: String,
    organization_name: String,
    event_type: String,
    schedule_json: String,
    status: String,
    verification_method: String,
    created_at: String,
}

impl ProjectRow {
    fn into_project(self, published: PublicationLatch) -> Result<Project, PersistenceError> {
        let schedule: ScheduleDocument = serde_json::from_str(&self.schedule_json)?;
        Ok(Project {
            event_type: self.event_type.parse()?,
            status: self.status.parse()?,
            verification_method: self.verification_method.parse()?,
            created_at: parse_stored_instant("created_at", &self.created_at)?,
            project_id: self.project_id,
            name: self.name,
            organization_name: self.organization_name,
            schedule,
            published,
        })
    }
}

/// Loads a project together with its publication latch.
///
/// The latch is returned exactly as stored; historical rows may carry
/// alias-form keys. Use `canonicalize_latch` before consulting it.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no project has this id, or an
/// error if the stored row cannot be reconstructed.
pub fn get_project(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> Result<Project, PersistenceError> {
    let row: ProjectRow = projects::table
        .filter(projects::project_id.eq(project_id))
        .select(ProjectRow::as_select())
        .first::<ProjectRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Project '{project_id}'")))?;

    let published: PublicationLatch = load_latch(conn, project_id)?;
    row.into_project(published)
}

/// Loads the stored latch rows of a project.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_latch(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> Result<PublicationLatch, PersistenceError> {
    let keys: Vec<String> = published_sessions::table
        .filter(published_sessions::project_id.eq(project_id))
        .select(published_sessions::session_key)
        .order(published_sessions::session_key.asc())
        .load::<String>(conn)?;

    Ok(keys.into_iter().map(SessionKey::new).collect())
}

/// Returns true if a session of the project is published.
///
/// Stored keys are canonicalized against the project's schedule first, so a
/// latch row written under an alias still locks the session. If the stored
/// schedule is malformed, only an exact key match counts.
///
/// # Errors
///
/// Returns an error if the project does not exist or cannot be read.
pub fn is_session_published(
    conn: &mut SqliteConnection,
    project_id: &str,
    session_key: &SessionKey,
) -> Result<bool, PersistenceError> {
    let project: Project = get_project(conn, project_id)?;
    let latch: PublicationLatch = match Schedule::resolve(project.event_type, &project.schedule) {
        Ok(schedule) => canonicalize_latch(&schedule, &project.published),
        Err(_) => project.published,
    };
    Ok(latch.is_published(session_key))
}

/// Returns true if a latch row exists for exactly this key.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn latch_row_exists(
    conn: &mut SqliteConnection,
    project_id: &str,
    session_key: &SessionKey,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        published_sessions::table
            .filter(published_sessions::project_id.eq(project_id))
            .filter(published_sessions::session_key.eq(session_key.as_str())),
    ))
    .get_result::<bool>(conn)?)
}
