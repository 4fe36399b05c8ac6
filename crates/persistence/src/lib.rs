// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the volunteer hours system.
//!
//! This crate stores projects, signups, the per-session publication latch,
//! issued certificates, and the audit trail in `SQLite` via Diesel.
//!
//! ## Atomicity
//!
//! - An attendance transition (changed signups plus its audit event) commits
//!   in one immediate transaction, after re-reading the session's latch
//! - A publication (certificates, latch row, audit event) commits in one
//!   immediate transaction; a concurrent second publisher observes the
//!   latch and resolves as a no-op
//! - Certificates are unique per `(signup_id, session_key)`, so a retried
//!   publication never issues duplicates
//!
//! ## Testing
//!
//! Tests run against isolated shared-cache in-memory databases, one per
//! `Persistence::new_in_memory()` call.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use chrono::NaiveDateTime;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use vol_hours::{ProjectState, PublicationResult, TransitionResult};
use vol_hours_audit::{Actor, AuditEvent, Cause};
use vol_hours_domain::{Certificate, Project, SessionKey, Signup};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::SqlitePublicationStore;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database via an atomic
    /// counter, so instances never see each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Projects & Signups
    // ========================================================================

    /// Stores a new project.
    ///
    /// The schedule document is stored as given; callers validate it first.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConstraintViolation` if the id is taken.
    pub fn create_project(&mut self, project: &Project) -> Result<(), PersistenceError> {
        mutations::insert_project(&mut self.conn, project)
    }

    /// Loads a project with its stored publication latch.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the project does not exist.
    pub fn get_project(&mut self, project_id: &str) -> Result<Project, PersistenceError> {
        queries::projects::get_project(&mut self.conn, project_id)
    }

    /// Stores a new signup.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConstraintViolation` if the id is taken,
    /// the project does not exist, or the identity columns are inconsistent.
    pub fn create_signup(&mut self, signup: &Signup) -> Result<(), PersistenceError> {
        mutations::insert_signup(&mut self.conn, signup)
    }

    /// Loads a project and all of its signups.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the project does not exist.
    pub fn load_project_state(
        &mut self,
        project_id: &str,
    ) -> Result<ProjectState, PersistenceError> {
        queries::signups::load_project_state(&mut self.conn, project_id)
    }

    // ========================================================================
    // Transitions & Publication
    // ========================================================================

    /// Persists a transition result (changed signups and its audit event).
    ///
    /// # Returns
    ///
    /// The event ID assigned to the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SessionLocked` if the session was published
    /// after the state was loaded, or an error if a write fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    /// Publishes a session's hours atomically.
    ///
    /// # Arguments
    ///
    /// * `project_id` - The project the session belongs to
    /// * `session_id` - The session id, in canonical or alias form
    /// * `now` - The current wall-clock instant
    /// * `actor` - The organizer or scheduled publisher
    /// * `cause` - The reason for publishing
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TransitionRejected` if the gate rejects the
    /// publication or a store stage fails.
    pub fn publish_session(
        &mut self,
        project_id: &str,
        session_id: &str,
        now: NaiveDateTime,
        actor: Actor,
        cause: Cause,
    ) -> Result<PublicationResult, PersistenceError> {
        mutations::publish_session(&mut self.conn, project_id, session_id, now, actor, cause)
    }

    // ========================================================================
    // Certificates & Audit
    // ========================================================================

    /// Lists issued certificates, optionally for one session only.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_certificates(
        &mut self,
        project_id: &str,
        session_key: Option<&SessionKey>,
    ) -> Result<Vec<Certificate>, PersistenceError> {
        queries::certificates::list_certificates(&mut self.conn, project_id, session_key)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the event does not exist.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit timeline of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events(
        &mut self,
        project_id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_audit_events(&mut self.conn, project_id)
    }
}
