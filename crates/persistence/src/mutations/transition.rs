// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Committing attendance transitions.

use diesel::Connection;
use diesel::SqliteConnection;
use tracing::{debug, warn};
use vol_hours::TransitionResult;
use vol_hours_domain::SessionKey;

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::projects::update_signup_attendance;
use crate::queries::projects::is_session_published;

/// Persists a transition result: its changed signups and its audit event.
///
/// Runs in one immediate transaction. The session's latch is re-read
/// inside the transaction; if the session was published after the state
/// was loaded, nothing is written and `SessionLocked` is returned.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The transition result to persist
///
/// # Returns
///
/// The event ID assigned to the persisted audit event.
///
/// # Errors
///
/// Returns an error if the session is locked or any write fails.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    let project_id: &str = &result.audit_event.project_id;

    conn.immediate_transaction(|conn| {
        if let Some(session_key) = &result.audit_event.session_key {
            ensure_session_unlocked(conn, project_id, session_key)?;
        }

        for signup in &result.changed_signups {
            update_signup_attendance(conn, signup)?;
        }
        let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;

        debug!(
            event_id,
            project_id,
            changed = result.changed_signups.len(),
            "Persisted transition"
        );
        Ok(event_id)
    })
}

fn ensure_session_unlocked(
    conn: &mut SqliteConnection,
    project_id: &str,
    session_key: &SessionKey,
) -> Result<(), PersistenceError> {
    if is_session_published(conn, project_id, session_key)? {
        warn!(project_id, session_key = %session_key, "Rejected write to published session");
        return Err(PersistenceError::SessionLocked {
            project_id: project_id.to_string(),
            session_key: session_key.to_string(),
        });
    }
    Ok(())
}
