// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::schedule::ScheduleDocument;
use crate::session_id::SessionKey;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The scheduling shape of a project.
///
/// Exactly one schedule shape is populated per project, and it must match
/// the event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    /// A single session on one day.
    OneTime,
    /// A sequence of days, each with an ordered list of slots.
    MultiDay,
    /// One day split into parallel named roles.
    SameDayMultiArea,
}

impl EventType {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "oneTime",
            Self::MultiDay => "multiDay",
            Self::SameDayMultiArea => "sameDayMultiArea",
        }
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oneTime" => Ok(Self::OneTime),
            "multiDay" => Ok(Self::MultiDay),
            "sameDayMultiArea" => Ok(Self::SameDayMultiArea),
            _ => Err(DomainError::InvalidEventType(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored project status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "upcoming")]
    Upcoming,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl ProjectStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidProjectStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How attendance is verified for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationMethod {
    #[serde(rename = "qr-code")]
    QrCode,
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "signup-only")]
    SignupOnly,
}

impl VerificationMethod {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QrCode => "qr-code",
            Self::Manual => "manual",
            Self::Auto => "auto",
            Self::SignupOnly => "signup-only",
        }
    }
}

impl FromStr for VerificationMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qr-code" => Ok(Self::QrCode),
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            "signup-only" => Ok(Self::SignupOnly),
            _ => Err(DomainError::InvalidVerificationMethod(s.to_string())),
        }
    }
}

/// Signup review and attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStatus {
    Pending,
    Approved,
    Rejected,
    Attended,
}

impl SignupStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Attended => "attended",
        }
    }

    /// Returns true if hours recorded against this signup may be certified.
    #[must_use]
    pub const fn counts_toward_hours(&self) -> bool {
        matches!(self, Self::Approved | Self::Attended)
    }
}

impl FromStr for SignupStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "attended" => Ok(Self::Attended),
            _ => Err(DomainError::InvalidSignupStatus(s.to_string())),
        }
    }
}

/// The per-session publication latch of a project.
///
/// Maps canonical session keys to `true` once the session's hours are
/// published. Entries are only ever added; there is no unset operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationLatch {
    sessions: BTreeMap<String, bool>,
}

impl PublicationLatch {
    /// Creates an empty latch (nothing published).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
        }
    }

    /// Returns true if the session's hours are published.
    #[must_use]
    pub fn is_published(&self, key: &SessionKey) -> bool {
        self.sessions.get(key.as_str()).copied().unwrap_or(false)
    }

    /// Sets the latch for a session.
    ///
    /// Returns `true` if the latch was newly set, `false` if it was already set.
    pub fn latch(&mut self, key: &SessionKey) -> bool {
        let previous: Option<bool> = self.sessions.insert(key.as_str().to_string(), true);
        previous != Some(true)
    }

    /// Iterates over the keys of all published sessions.
    pub fn published_keys(&self) -> impl Iterator<Item = &str> {
        self.sessions
            .iter()
            .filter(|(_, published)| **published)
            .map(|(key, _)| key.as_str())
    }
}

impl FromIterator<SessionKey> for PublicationLatch {
    fn from_iter<I: IntoIterator<Item = SessionKey>>(iter: I) -> Self {
        let mut latch: Self = Self::new();
        for key in iter {
            latch.latch(&key);
        }
        latch
    }
}

/// A volunteer project with its schedule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub organization_name: String,
    pub event_type: EventType,
    /// The schedule as stored; resolved on demand by the schedule model.
    pub schedule: ScheduleDocument,
    pub created_at: NaiveDateTime,
    pub status: ProjectStatus,
    pub verification_method: VerificationMethod,
    pub published: PublicationLatch,
}

/// Who a signup belongs to: a registered user or an anonymous volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum VolunteerIdentity {
    User { user_id: String },
    Anonymous { anonymous_signup_id: String },
}

impl VolunteerIdentity {
    /// Builds an identity from the two nullable stored columns.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVolunteerIdentity` unless exactly one
    /// of the ids is present.
    pub fn from_columns(
        signup_id: &str,
        user_id: Option<String>,
        anonymous_signup_id: Option<String>,
    ) -> Result<Self, DomainError> {
        match (user_id, anonymous_signup_id) {
            (Some(user_id), None) => Ok(Self::User { user_id }),
            (None, Some(anonymous_signup_id)) => Ok(Self::Anonymous {
                anonymous_signup_id,
            }),
            _ => Err(DomainError::InvalidVolunteerIdentity {
                signup_id: signup_id.to_string(),
            }),
        }
    }

    /// Returns the registered user id, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Anonymous { .. } => None,
        }
    }

    /// Returns the anonymous signup id, if any.
    #[must_use]
    pub fn anonymous_signup_id(&self) -> Option<&str> {
        match self {
            Self::User { .. } => None,
            Self::Anonymous {
                anonymous_signup_id,
            } => Some(anonymous_signup_id),
        }
    }
}

/// A volunteer's signup for one session of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    pub signup_id: String,
    pub project_id: String,
    /// The session id this signup is for, as it was issued.
    ///
    /// May be a historical alias form; resolve it before comparing keys.
    pub schedule_id: String,
    pub identity: VolunteerIdentity,
    pub name: String,
    pub email: Option<String>,
    pub status: SignupStatus,
    pub check_in_time: Option<NaiveDateTime>,
    pub check_out_time: Option<NaiveDateTime>,
}

/// Snapshot of the volunteer at issuance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerSnapshot {
    pub user_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
}

/// Snapshot of the project at issuance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project_id: String,
    pub name: String,
    pub event_type: EventType,
}

/// Snapshot of the issuing organization at issuance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSnapshot {
    pub name: String,
}

/// A volunteer hours certificate.
///
/// Created exactly once per `(signup, session)` when the session's hours
/// are published. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub signup_id: String,
    pub session_key: SessionKey,
    pub volunteer: VolunteerSnapshot,
    pub project: ProjectSnapshot,
    pub organization: OrganizationSnapshot,
    /// Reconciled check-in instant.
    pub event_start: NaiveDateTime,
    /// Reconciled check-out instant.
    pub event_end: NaiveDateTime,
    pub duration_minutes: i64,
    pub is_certified: bool,
}
