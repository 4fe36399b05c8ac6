// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use vol_hours::CoreError;
use vol_hours_domain::DomainError;
use vol_hours_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MalformedSchedule { reason } => ApiError::InvalidInput {
            field: String::from("schedule"),
            message: reason,
        },
        DomainError::ScheduleMismatch {
            event_type,
            populated,
        } => ApiError::InvalidInput {
            field: String::from("schedule"),
            message: format!(
                "Event type '{event_type}' requires its own schedule shape, found [{populated}]"
            ),
        },
        DomainError::DuplicateSessionKey(key) => ApiError::InvalidInput {
            field: String::from("schedule"),
            message: format!("Session key '{key}' appears more than once"),
        },
        DomainError::InvalidDate { value, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{value}': {error}"),
        },
        DomainError::InvalidTime { value, error } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Failed to parse time '{value}': {error}"),
        },
        DomainError::InvalidInstant { value, error } => ApiError::InvalidInput {
            field: String::from("timestamp"),
            message: format!("Failed to parse instant '{value}': {error}"),
        },
        DomainError::InvalidEventType(value) => ApiError::InvalidInput {
            field: String::from("event_type"),
            message: format!("Unknown event type '{value}'"),
        },
        DomainError::InvalidProjectStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown project status '{value}'"),
        },
        DomainError::InvalidVerificationMethod(value) => ApiError::InvalidInput {
            field: String::from("verification_method"),
            message: format!("Unknown verification method '{value}'"),
        },
        DomainError::InvalidSignupStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown signup status '{value}'"),
        },
        DomainError::InvalidPhase(value) => ApiError::InvalidInput {
            field: String::from("phase"),
            message: format!("Unknown session phase '{value}'"),
        },
        DomainError::SessionNotFound { session_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Session"),
            message: format!("Session '{session_id}' is unavailable"),
        },
        DomainError::SessionNotEditable {
            session_id,
            phase,
            operation,
        } => ApiError::DomainRuleViolation {
            rule: String::from("session_phase"),
            message: format!(
                "Cannot {operation} for session '{session_id}' while it is in phase '{phase}'"
            ),
        },
        DomainError::SessionAlreadyPublished { session_id } => ApiError::DomainRuleViolation {
            rule: String::from("session_published"),
            message: format!(
                "Hours for session '{session_id}' are published and can no longer be changed"
            ),
        },
        DomainError::InvalidVolunteerIdentity { signup_id } => ApiError::InvalidInput {
            field: String::from("user_id"),
            message: format!(
                "Signup '{signup_id}' must have exactly one of user id or anonymous signup id"
            ),
        },
        DomainError::SignupNotInSession {
            signup_id,
            session_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("signup_session"),
            message: format!("Signup '{signup_id}' does not belong to session '{session_id}'"),
        },
        DomainError::MissingCheckIn { signup_id } => ApiError::DomainRuleViolation {
            rule: String::from("check_in_required"),
            message: format!("Signup '{signup_id}' has no check-in recorded"),
        },
        DomainError::SignupRejected { signup_id } => ApiError::DomainRuleViolation {
            rule: String::from("signup_rejected"),
            message: format!("Signup '{signup_id}' was rejected"),
        },
        DomainError::ProjectCancelled { project_id } => ApiError::DomainRuleViolation {
            rule: String::from("project_cancelled"),
            message: format!("Project '{project_id}' is cancelled"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SignupNotFound { signup_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Signup"),
            message: format!("Signup '{signup_id}' does not exist"),
        },
        CoreError::PublicationFailed {
            session_key,
            stage,
            message,
            certificates_created,
        } => ApiError::Internal {
            message: format!(
                "Publication of session '{session_key}' failed during {stage} after \
                 {certificates_created} certificates; retry is safe: {message}"
            ),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Callers that know which resource they were loading should map
/// `PersistenceError::NotFound` themselves for a more precise message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::TransitionRejected(core_err) => translate_core_error(core_err),
        PersistenceError::SessionLocked {
            project_id,
            session_key,
        } => ApiError::DomainRuleViolation {
            rule: String::from("session_published"),
            message: format!(
                "Hours for session '{session_key}' of project '{project_id}' were published \
                 while the change was being made"
            ),
        },
        PersistenceError::ConstraintViolation(message) => ApiError::DomainRuleViolation {
            rule: String::from("storage_constraint"),
            message,
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vol_hours::PublicationStage;

    #[test]
    fn test_session_not_found_is_resource_not_found() {
        let err: ApiError = translate_domain_error(DomainError::SessionNotFound {
            session_id: String::from("day-9-slot-0"),
        });

        assert_eq!(
            err.to_string(),
            "Session not found: Session 'day-9-slot-0' is unavailable"
        );
    }

    #[test]
    fn test_publication_failure_is_internal_and_mentions_stage() {
        let err: ApiError = translate_core_error(CoreError::PublicationFailed {
            session_key: String::from("oneTime"),
            stage: PublicationStage::LatchSet,
            message: String::from("disk full"),
            certificates_created: 3,
        });

        match err {
            ApiError::Internal { message } => {
                assert!(message.contains("latch_set"));
                assert!(message.contains("3 certificates"));
            }
            other => panic!("Expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn test_session_locked_is_rule_violation() {
        let err: ApiError = translate_persistence_error(PersistenceError::SessionLocked {
            project_id: String::from("project-1"),
            session_key: String::from("oneTime"),
        });

        assert!(matches!(
            err,
            ApiError::DomainRuleViolation { ref rule, .. } if rule == "session_published"
        ));
    }

    #[test]
    fn test_rejected_transition_unwraps_core_error() {
        let err: ApiError = translate_persistence_error(PersistenceError::TransitionRejected(
            CoreError::SignupNotFound {
                signup_id: String::from("s9"),
            },
        ));

        assert_eq!(
            err,
            ApiError::ResourceNotFound {
                resource_type: String::from("Signup"),
                message: String::from("Signup 's9' does not exist"),
            }
        );
    }
}
