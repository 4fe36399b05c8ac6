// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use chrono::NaiveDateTime;
use vol_hours_audit::{AuditEvent, StateSnapshot};
use vol_hours_domain::{
    CheckOutAdjustment, DomainError, Project, ProjectStatus, PublicationLatch, Schedule, Session,
    SessionKey, SessionPhase, Signup, canonicalize_latch, classify_session, format_instant,
    resolve_session_id, signup_session_key,
};

/// The state of one project: its definition and all of its signups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectState {
    pub project: Project,
    pub signups: Vec<Signup>,
}

impl ProjectState {
    /// Creates a new project state.
    ///
    /// # Arguments
    ///
    /// * `project` - The project definition, including its publication latch
    /// * `signups` - Every signup of the project, in any session
    #[must_use]
    pub const fn new(project: Project, signups: Vec<Signup>) -> Self {
        Self { project, signups }
    }

    /// Resolves the project's stored schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored schedule is malformed.
    pub fn schedule(&self) -> Result<Schedule, DomainError> {
        Schedule::resolve(self.project.event_type, &self.project.schedule)
    }

    /// Returns the project's latch with every entry under its canonical key.
    #[must_use]
    pub fn canonical_latch(&self, schedule: &Schedule) -> PublicationLatch {
        canonicalize_latch(schedule, &self.project.published)
    }

    /// Resolves a session id (canonical or alias) to its session.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule is malformed or the id names no session.
    pub fn resolve_session(&self, session_id: &str) -> Result<(Schedule, Session), CoreError> {
        let schedule: Schedule = self.schedule().map_err(|_| DomainError::SessionNotFound {
            session_id: session_id.to_string(),
        })?;
        let session: Session = resolve_session_id(&schedule, session_id)?.session;
        Ok((schedule, session))
    }

    /// Classifies a session of this project at `now`.
    #[must_use]
    pub fn session_phase(
        &self,
        schedule: &Schedule,
        session: &Session,
        now: NaiveDateTime,
    ) -> SessionPhase {
        classify_session(session, &self.canonical_latch(schedule), now)
    }

    /// Looks up a signup by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SignupNotFound` if no signup has this id.
    pub fn find_signup(&self, signup_id: &str) -> Result<&Signup, CoreError> {
        self.signups
            .iter()
            .find(|signup| signup.signup_id == signup_id)
            .ok_or_else(|| CoreError::SignupNotFound {
                signup_id: signup_id.to_string(),
            })
    }

    /// Returns the signups belonging to a session, whatever id form they were stored under.
    #[must_use]
    pub fn session_signups(&self, schedule: &Schedule, key: &SessionKey) -> Vec<&Signup> {
        self.signups
            .iter()
            .filter(|signup| signup_session_key(schedule, signup).as_ref() == Some(key))
            .collect()
    }

    /// Returns true if the project has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.project.status == ProjectStatus::Cancelled
    }

    /// Returns a copy of this state with one signup replaced.
    pub(crate) fn with_signup(&self, updated: Signup) -> Self {
        let mut next: Self = self.clone();
        if let Some(slot) = next
            .signups
            .iter_mut()
            .find(|signup| signup.signup_id == updated.signup_id)
        {
            *slot = updated;
        }
        next
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "project_id={},signups_count={},published_count={}",
            self.project.project_id,
            self.signups.len(),
            self.project.published.published_keys().count()
        ))
    }
}

/// Renders the attendance fields of a signup for an audit snapshot.
#[must_use]
pub fn signup_snapshot(signup: &Signup) -> StateSnapshot {
    let render = |instant: Option<NaiveDateTime>| {
        instant.map_or_else(|| String::from("none"), |value| format_instant(&value))
    };
    StateSnapshot::new(format!(
        "signup_id={},status={},check_in={},check_out={}",
        signup.signup_id,
        signup.status.as_str(),
        render(signup.check_in_time),
        render(signup.check_out_time)
    ))
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: ProjectState,
    /// The signups whose attendance changed, as they are in `new_state`.
    pub changed_signups: Vec<Signup>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// Per-signup report of a bulk check-out adjustment; empty for other commands.
    pub adjustments: Vec<CheckOutAdjustment>,
}
