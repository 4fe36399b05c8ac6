// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A schedule document is missing fields or carries invalid values.
    MalformedSchedule {
        /// Description of what is wrong with the schedule.
        reason: String,
    },
    /// The populated schedule shape does not match the project's event type.
    ScheduleMismatch {
        /// The project's declared event type.
        event_type: String,
        /// The schedule shapes actually populated.
        populated: String,
    },
    /// Two sessions in one schedule would share the same key.
    DuplicateSessionKey(String),
    /// Failed to parse a calendar date.
    InvalidDate {
        /// The invalid date string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a wall-clock time of day.
    InvalidTime {
        /// The invalid time string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a check-in or check-out instant.
    InvalidInstant {
        /// The invalid instant string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Event type string is not recognized.
    InvalidEventType(String),
    /// Project status string is not recognized.
    InvalidProjectStatus(String),
    /// Verification method string is not recognized.
    InvalidVerificationMethod(String),
    /// Signup status string is not recognized.
    InvalidSignupStatus(String),
    /// Session phase string is not recognized.
    InvalidPhase(String),
    /// A session id does not resolve to any session of the project.
    SessionNotFound {
        /// The id that could not be resolved.
        session_id: String,
    },
    /// The operation is not permitted in the session's current phase.
    SessionNotEditable {
        /// The canonical session key.
        session_id: String,
        /// The phase the session is in.
        phase: String,
        /// The operation that was attempted.
        operation: String,
    },
    /// The session's hours are published and its attendance is locked.
    SessionAlreadyPublished {
        /// The canonical session key.
        session_id: String,
    },
    /// A signup must carry exactly one of a user id or an anonymous signup id.
    InvalidVolunteerIdentity {
        /// The signup in question.
        signup_id: String,
    },
    /// The signup belongs to a different session than the one addressed.
    SignupNotInSession {
        /// The signup in question.
        signup_id: String,
        /// The session that was addressed.
        session_id: String,
    },
    /// A check-out was recorded without a prior check-in.
    MissingCheckIn {
        /// The signup in question.
        signup_id: String,
    },
    /// Attendance cannot be recorded for a rejected signup.
    SignupRejected {
        /// The signup in question.
        signup_id: String,
    },
    /// Attendance cannot be recorded for a cancelled project.
    ProjectCancelled {
        /// The project in question.
        project_id: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedSchedule { reason } => write!(f, "Malformed schedule: {reason}"),
            Self::ScheduleMismatch {
                event_type,
                populated,
            } => {
                write!(
                    f,
                    "Schedule does not match event type '{event_type}': populated shapes [{populated}]"
                )
            }
            Self::DuplicateSessionKey(key) => {
                write!(f, "Duplicate session key '{key}' in schedule")
            }
            Self::InvalidDate { value, error } => {
                write!(f, "Failed to parse date '{value}': {error}")
            }
            Self::InvalidTime { value, error } => {
                write!(f, "Failed to parse time '{value}': {error}")
            }
            Self::InvalidInstant { value, error } => {
                write!(f, "Failed to parse instant '{value}': {error}")
            }
            Self::InvalidEventType(value) => write!(f, "Invalid event type: {value}"),
            Self::InvalidProjectStatus(value) => write!(f, "Invalid project status: {value}"),
            Self::InvalidVerificationMethod(value) => {
                write!(f, "Invalid verification method: {value}")
            }
            Self::InvalidSignupStatus(value) => write!(f, "Invalid signup status: {value}"),
            Self::InvalidPhase(value) => write!(f, "Invalid session phase: {value}"),
            Self::SessionNotFound { session_id } => {
                write!(f, "Session '{session_id}' is unavailable")
            }
            Self::SessionNotEditable {
                session_id,
                phase,
                operation,
            } => {
                write!(
                    f,
                    "Cannot {operation} for session '{session_id}' while it is in phase '{phase}'"
                )
            }
            Self::SessionAlreadyPublished { session_id } => {
                write!(
                    f,
                    "Hours for session '{session_id}' are published and can no longer be changed"
                )
            }
            Self::InvalidVolunteerIdentity { signup_id } => {
                write!(
                    f,
                    "Signup '{signup_id}' must have exactly one of user id or anonymous signup id"
                )
            }
            Self::SignupNotInSession {
                signup_id,
                session_id,
            } => {
                write!(
                    f,
                    "Signup '{signup_id}' does not belong to session '{session_id}'"
                )
            }
            Self::MissingCheckIn { signup_id } => {
                write!(f, "Signup '{signup_id}' has no check-in recorded")
            }
            Self::SignupRejected { signup_id } => {
                write!(f, "Signup '{signup_id}' was rejected")
            }
            Self::ProjectCancelled { project_id } => {
                write!(f, "Project '{project_id}' is cancelled")
            }
        }
    }
}

impl std::error::Error for DomainError {}
