// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The `SQLite` publication store.
//!
//! `publish_session` loads the project state, runs the publication gate,
//! and persists the audit event inside a single immediate transaction, so
//! the certificate batch, the latch row, and the audit record commit
//! together or not at all. The write lock taken at `BEGIN IMMEDIATE`
//! serializes concurrent publishers: the second one observes the latch and
//! resolves as a no-op.

use chrono::NaiveDateTime;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};
use vol_hours::{ProjectState, PublicationResult, PublicationStore, publish};
use vol_hours_audit::{Actor, Cause};
use vol_hours_domain::{Certificate, SessionKey, format_instant};

use crate::diesel_schema::{certificates, published_sessions};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::projects::latch_row_exists;
use crate::queries::signups::load_project_state;

/// A `PublicationStore` over an open `SQLite` connection.
///
/// Intended to be used inside a transaction owned by the caller.
pub struct SqlitePublicationStore<'a> {
    conn: &'a mut SqliteConnection,
    published_at: String,
}

impl<'a> SqlitePublicationStore<'a> {
    /// Creates a store that stamps latch rows with `published_at`.
    pub fn new(conn: &'a mut SqliteConnection, published_at: NaiveDateTime) -> Self {
        Self {
            conn,
            published_at: format_instant(&published_at),
        }
    }
}

impl PublicationStore for SqlitePublicationStore<'_> {
    type Error = PersistenceError;

    fn is_published(
        &mut self,
        project_id: &str,
        session_key: &SessionKey,
    ) -> Result<bool, Self::Error> {
        latch_row_exists(self.conn, project_id, session_key)
    }

    fn issue_certificates(
        &mut self,
        project_id: &str,
        certificates: &[Certificate],
    ) -> Result<usize, Self::Error> {
        let mut created: usize = 0;
        for certificate in certificates {
            created += diesel::insert_or_ignore_into(certificates::table)
                .values((
                    certificates::signup_id.eq(&certificate.signup_id),
                    certificates::session_key.eq(certificate.session_key.as_str()),
                    certificates::project_id.eq(project_id),
                    certificates::user_id.eq(certificate.volunteer.user_id.as_deref()),
                    certificates::volunteer_name.eq(&certificate.volunteer.name),
                    certificates::volunteer_email.eq(certificate.volunteer.email.as_deref()),
                    certificates::project_name.eq(&certificate.project.name),
                    certificates::event_type.eq(certificate.project.event_type.as_str()),
                    certificates::organization_name.eq(&certificate.organization.name),
                    certificates::event_start.eq(format_instant(&certificate.event_start)),
                    certificates::event_end.eq(format_instant(&certificate.event_end)),
                    certificates::duration_minutes.eq(certificate.duration_minutes),
                    certificates::is_certified.eq(certificate.is_certified),
                ))
                .execute(self.conn)?;
        }

        debug!(
            project_id,
            requested = certificates.len(),
            created,
            "Issued certificates"
        );
        Ok(created)
    }

    fn set_published(
        &mut self,
        project_id: &str,
        session_key: &SessionKey,
    ) -> Result<(), Self::Error> {
        diesel::insert_or_ignore_into(published_sessions::table)
            .values((
                published_sessions::project_id.eq(project_id),
                published_sessions::session_key.eq(session_key.as_str()),
                published_sessions::published_at.eq(&self.published_at),
            ))
            .execute(self.conn)?;
        Ok(())
    }
}

/// Publishes one session's hours.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `project_id` - The project the session belongs to
/// * `session_id` - The session id, in canonical or alias form
/// * `now` - The current wall-clock instant
/// * `actor` - The organizer or scheduled publisher
/// * `cause` - The reason for publishing
///
/// # Returns
///
/// The publication result. Its audit event carries the stored event id,
/// and is `None` when the session was already published.
///
/// # Errors
///
/// Returns `PersistenceError::TransitionRejected` if the gate rejects the
/// publication or a store stage fails, or `NotFound` if the project does
/// not exist. Nothing is committed on error.
pub fn publish_session(
    conn: &mut SqliteConnection,
    project_id: &str,
    session_id: &str,
    now: NaiveDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<PublicationResult, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let state: ProjectState = load_project_state(conn, project_id)?;

        let mut result: PublicationResult = {
            let mut store: SqlitePublicationStore<'_> = SqlitePublicationStore::new(conn, now);
            publish(&mut store, &state, session_id, now, actor, cause)?
        };

        if let Some(event) = result.audit_event.take() {
            let event_id: i64 = persist_audit_event(conn, &event)?;
            result.audit_event = Some(event.with_event_id(event_id));
            info!(
                project_id,
                session_key = %result.outcome.session_key,
                certificates_created = result.outcome.certificates_created,
                excluded = result.outcome.excluded_count(),
                event_id,
                "Published session hours"
            );
        } else {
            info!(
                project_id,
                session_key = %result.outcome.session_key,
                "Session already published; nothing to do"
            );
        }

        Ok(result)
    })
}
