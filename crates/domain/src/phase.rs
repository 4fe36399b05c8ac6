// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session phase classification.
//!
//! Each session moves through these phases in strict temporal order:
//!
//! ```text
//! Upcoming -> CheckInOpen -> Active -> AttendanceEditing -> Closed
//!                                            |
//!                                            +-> Published
//! ```
//!
//! The phase is the latest state whose lower boundary is at or before
//! "now". The publication latch overrides any time-based phase. `Closed`
//! and `Published` are the only terminal phases.
//!
//! Classification is recomputed on every call. A phase computed for one
//! "now" is never valid for another.

use crate::error::DomainError;
use crate::schedule::{Schedule, Session};
use crate::session_id::{SessionKey, canonicalize_latch};
use crate::types::{Project, ProjectStatus, PublicationLatch};
use crate::window::{SessionWindows, calculate_windows};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle phase of one session.
///
/// Variants are declared in lifecycle order; `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Before check-in opens.
    Upcoming,
    /// Check-in is open; the session has not started.
    CheckInOpen,
    /// The session is running.
    Active,
    /// The session ended; recorded attendance may be corrected.
    AttendanceEditing,
    /// The editing deadline passed without publication.
    Closed,
    /// Hours are published and certificates issued.
    Published,
}

impl SessionPhase {
    /// Returns the string representation of the phase.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::CheckInOpen => "check_in_open",
            Self::Active => "active",
            Self::AttendanceEditing => "attendance_editing",
            Self::Closed => "closed",
            Self::Published => "published",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "check_in_open" => Ok(Self::CheckInOpen),
            "active" => Ok(Self::Active),
            "attendance_editing" => Ok(Self::AttendanceEditing),
            "closed" => Ok(Self::Closed),
            "published" => Ok(Self::Published),
            _ => Err(DomainError::InvalidPhase(s.to_string())),
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Published)
    }

    /// Returns true if check-ins and check-outs may be recorded.
    #[must_use]
    pub const fn permits_attendance_recording(&self) -> bool {
        matches!(
            self,
            Self::CheckInOpen | Self::Active | Self::AttendanceEditing
        )
    }

    /// Returns true if recorded attendance may be corrected by an organizer.
    #[must_use]
    pub const fn permits_attendance_edit(&self) -> bool {
        matches!(self, Self::Active | Self::AttendanceEditing)
    }

    /// Returns true if the session's hours may be published.
    ///
    /// `Closed` is accepted so that a scheduled publisher running after the
    /// editing deadline can still publish.
    #[must_use]
    pub const fn permits_publication(&self) -> bool {
        matches!(self, Self::AttendanceEditing | Self::Closed)
    }
}

impl FromStr for SessionPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a session from its boundaries, the current instant, and the latch.
#[must_use]
pub fn classify(windows: &SessionWindows, now: NaiveDateTime, published: bool) -> SessionPhase {
    if published {
        return SessionPhase::Published;
    }

    if now >= windows.editing_deadline {
        SessionPhase::Closed
    } else if now >= windows.active_end {
        SessionPhase::AttendanceEditing
    } else if now >= windows.active_start {
        SessionPhase::Active
    } else if now >= windows.check_in_open {
        SessionPhase::CheckInOpen
    } else {
        SessionPhase::Upcoming
    }
}

/// Classifies one session given the (canonical) latch of its project.
#[must_use]
pub fn classify_session(
    session: &Session,
    latch: &PublicationLatch,
    now: NaiveDateTime,
) -> SessionPhase {
    classify(
        &calculate_windows(session),
        now,
        latch.is_published(&session.key),
    )
}

/// Returns the phase furthest from completion, i.e. the lowest in lifecycle order.
///
/// Returns `None` when there are no phases.
#[must_use]
pub fn aggregate_phase<I>(phases: I) -> Option<SessionPhase>
where
    I: IntoIterator<Item = SessionPhase>,
{
    phases.into_iter().min()
}

/// Phase information for one session of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPhaseEntry {
    pub session_key: SessionKey,
    pub phase: SessionPhase,
    pub windows: SessionWindows,
    pub volunteer_capacity: u32,
}

/// Phase information for a whole project at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPhaseSummary {
    /// Every session in schedule order.
    pub sessions: Vec<SessionPhaseEntry>,
    /// The phase of the most actionable session, if any sessions exist.
    pub aggregate: Option<SessionPhase>,
    /// The first session (in schedule order) whose phase equals `aggregate`.
    pub focus_session: Option<SessionKey>,
    /// Project status implied by the session phases.
    pub derived_status: ProjectStatus,
}

/// Classifies every session of a project and derives the aggregate phase.
///
/// A malformed schedule yields an empty summary with the project's stored
/// status; this is a displayable state, not an error.
#[must_use]
pub fn summarize_project(project: &Project, now: NaiveDateTime) -> ProjectPhaseSummary {
    let Ok(schedule) = Schedule::resolve(project.event_type, &project.schedule) else {
        return ProjectPhaseSummary {
            sessions: Vec::new(),
            aggregate: None,
            focus_session: None,
            derived_status: project.status,
        };
    };

    let latch: PublicationLatch = canonicalize_latch(&schedule, &project.published);
    let sessions: Vec<SessionPhaseEntry> = schedule
        .sessions()
        .into_iter()
        .map(|session| {
            let windows: SessionWindows = calculate_windows(&session);
            SessionPhaseEntry {
                phase: classify(&windows, now, latch.is_published(&session.key)),
                session_key: session.key,
                windows,
                volunteer_capacity: session.volunteer_capacity,
            }
        })
        .collect();

    let aggregate: Option<SessionPhase> = aggregate_phase(sessions.iter().map(|entry| entry.phase));
    let focus_session: Option<SessionKey> = aggregate.and_then(|target| {
        sessions
            .iter()
            .find(|entry| entry.phase == target)
            .map(|entry| entry.session_key.clone())
    });
    let derived_status: ProjectStatus = derive_status(project.status, &sessions);

    ProjectPhaseSummary {
        sessions,
        aggregate,
        focus_session,
        derived_status,
    }
}

fn derive_status(stored: ProjectStatus, sessions: &[SessionPhaseEntry]) -> ProjectStatus {
    if stored == ProjectStatus::Cancelled || sessions.is_empty() {
        return stored;
    }

    if sessions
        .iter()
        .all(|entry| entry.phase <= SessionPhase::CheckInOpen)
    {
        ProjectStatus::Upcoming
    } else if sessions.iter().all(|entry| entry.phase.is_terminal()) {
        ProjectStatus::Completed
    } else {
        ProjectStatus::InProgress
    }
}
