// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Certificate queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use vol_hours_domain::{
    Certificate, OrganizationSnapshot, ProjectSnapshot, SessionKey, VolunteerSnapshot,
};

use crate::diesel_schema::certificates;
use crate::error::PersistenceError;
use crate::queries::parse_stored_instant;

/// Diesel Queryable struct for certificate rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = certificates)]
struct CertificateRow {
    #[allow(dead_code)]
    certificate_id: i64,
    signup_id: String,
    session_key: String,
    project_id: String,
    user_id: Option<String>,
    volunteer_name: String,
    volunteer_email: Option<String>,
    project_name: String,
    event_type: String,
    organization_name: String,
    event_start: String,
    event_end: String,
    duration_minutes: i64,
    is_certified: bool,
}

impl TryFrom<CertificateRow> for Certificate {
    type Error = PersistenceError;

    fn try_from(row: CertificateRow) -> Result<Self, Self::Error> {
        Ok(Self {
            event_start: parse_stored_instant("event_start", &row.event_start)?,
            event_end: parse_stored_instant("event_end", &row.event_end)?,
            signup_id: row.signup_id,
            session_key: SessionKey::new(row.session_key),
            volunteer: VolunteerSnapshot {
                user_id: row.user_id,
                name: row.volunteer_name,
                email: row.volunteer_email,
            },
            project: ProjectSnapshot {
                project_id: row.project_id,
                name: row.project_name,
                event_type: row.event_type.parse()?,
            },
            organization: OrganizationSnapshot {
                name: row.organization_name,
            },
            duration_minutes: row.duration_minutes,
            is_certified: row.is_certified,
        })
    }
}

/// Lists the certificates of a project, optionally limited to one session.
///
/// Results are ordered by session key, then signup id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_certificates(
    conn: &mut SqliteConnection,
    project_id: &str,
    session_key: Option<&SessionKey>,
) -> Result<Vec<Certificate>, PersistenceError> {
    let mut query = certificates::table
        .filter(certificates::project_id.eq(project_id))
        .select(CertificateRow::as_select())
        .into_boxed();
    if let Some(key) = session_key {
        query = query.filter(certificates::session_key.eq(key.as_str()));
    }

    query
        .order((certificates::session_key.asc(), certificates::signup_id.asc()))
        .load::<CertificateRow>(conn)?
        .into_iter()
        .map(Certificate::try_from)
        .collect()
}
