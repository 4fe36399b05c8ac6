// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The hours publication gate.
//!
//! Publication is the one-way transition of a session from editable to
//! published. It is split into two halves:
//!
//! - `plan_publication` is pure. It resolves the session, checks its phase,
//!   reconciles every eligible signup, and decides which certificates to
//!   request and which entries to exclude.
//! - `execute_publication` drives a `PublicationStore` through
//!   re-check latch, issue certificates, set latch.
//!
//! ## Failure semantics
//!
//! - If certificate issuance fails the latch is not set, so the session
//!   stays fully re-triable
//! - If setting the latch fails after certificates were created, the error
//!   reports how many were created; a retry is safe because issuance is
//!   idempotent per `(signup_id, session_key)`
//! - A latch that is already set resolves as an idempotent no-op success

use crate::error::{CoreError, PublicationStage};
use crate::state::ProjectState;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use vol_hours_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use vol_hours_domain::{
    AttendanceDuration, Certificate, DomainError, InvalidDurationReason, OrganizationSnapshot,
    ProjectSnapshot, Session, SessionKey, SessionPhase, Signup, VolunteerSnapshot,
    reconcile_signup,
};

/// One certificate-issuance request, built from a valid reconciled duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRequest {
    pub signup_id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub minutes: i64,
}

/// An eligible signup left out of publication because its duration is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedSignup {
    pub signup_id: String,
    pub reason: InvalidDurationReason,
}

/// Everything needed to publish one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationPlan {
    pub project: ProjectSnapshot,
    pub organization: OrganizationSnapshot,
    pub session_key: SessionKey,
    /// The phase the session was in when the plan was made.
    pub phase: SessionPhase,
    pub requests: Vec<CertificateRequest>,
    pub excluded: Vec<ExcludedSignup>,
}

impl PublicationPlan {
    /// Builds the certificate records for every request in the plan.
    #[must_use]
    pub fn certificates(&self) -> Vec<Certificate> {
        self.requests
            .iter()
            .map(|request| Certificate {
                signup_id: request.signup_id.clone(),
                session_key: self.session_key.clone(),
                volunteer: VolunteerSnapshot {
                    user_id: request.user_id.clone(),
                    name: request.name.clone(),
                    email: request.email.clone(),
                },
                project: self.project.clone(),
                organization: self.organization.clone(),
                event_start: request.check_in,
                event_end: request.check_out,
                duration_minutes: request.minutes,
                is_certified: true,
            })
            .collect()
    }
}

/// What the publication gate decided for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationDecision {
    /// The session may be published with this plan.
    Publish(PublicationPlan),
    /// The latch is already set; publishing again is a no-op.
    AlreadyPublished {
        /// The canonical session key.
        session_key: SessionKey,
    },
}

/// The result of running the publication gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationOutcome {
    pub session_key: SessionKey,
    /// Certificates newly created by this call.
    pub certificates_created: usize,
    /// Eligible signups excluded for an invalid duration.
    pub excluded: Vec<ExcludedSignup>,
    /// True if the session was already published and nothing was done.
    pub already_published: bool,
}

impl PublicationOutcome {
    /// Returns the number of excluded signups.
    #[must_use]
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    const fn no_op(session_key: SessionKey) -> Self {
        Self {
            session_key,
            certificates_created: 0,
            excluded: Vec::new(),
            already_published: true,
        }
    }
}

/// The storage collaborator that commits a publication.
///
/// Implementations that can do so should run `execute_publication` inside
/// one transaction so the certificate batch and the latch commit together.
pub trait PublicationStore {
    /// The storage error type.
    type Error: std::fmt::Display;

    /// Reads the latch for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn is_published(&mut self, project_id: &str, session_key: &SessionKey)
    -> Result<bool, Self::Error>;

    /// Creates certificates, skipping any `(signup_id, session_key)` that already exists.
    ///
    /// Returns the number of certificates newly created.
    ///
    /// # Errors
    ///
    /// Returns an error if any certificate cannot be written.
    fn issue_certificates(
        &mut self,
        project_id: &str,
        certificates: &[Certificate],
    ) -> Result<usize, Self::Error>;

    /// Sets the latch for a session. Setting an already-set latch is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the latch cannot be written.
    fn set_published(&mut self, project_id: &str, session_key: &SessionKey)
    -> Result<(), Self::Error>;
}

/// Decides whether and how a session may be published.
///
/// # Arguments
///
/// * `state` - The current project state
/// * `session_id` - The session id, in canonical or alias form
/// * `now` - The current wall-clock instant
///
/// # Errors
///
/// Returns an error if:
/// - The project is cancelled
/// - The session id does not resolve
/// - The session has not yet reached `AttendanceEditing`
pub fn plan_publication(
    state: &ProjectState,
    session_id: &str,
    now: NaiveDateTime,
) -> Result<PublicationDecision, CoreError> {
    if state.is_cancelled() {
        return Err(DomainError::ProjectCancelled {
            project_id: state.project.project_id.clone(),
        }
        .into());
    }

    let (schedule, session) = state.resolve_session(session_id)?;
    let phase: SessionPhase = state.session_phase(&schedule, &session, now);

    if phase == SessionPhase::Published {
        return Ok(PublicationDecision::AlreadyPublished {
            session_key: session.key,
        });
    }
    if !phase.permits_publication() {
        return Err(DomainError::SessionNotEditable {
            session_id: session.key.to_string(),
            phase: phase.to_string(),
            operation: String::from("publish hours"),
        }
        .into());
    }

    let eligible: Vec<&Signup> = state
        .session_signups(&schedule, &session.key)
        .into_iter()
        .filter(|signup| signup.status.counts_toward_hours())
        .collect();

    let mut requests: Vec<CertificateRequest> = Vec::with_capacity(eligible.len());
    let mut excluded: Vec<ExcludedSignup> = Vec::new();
    for signup in eligible {
        match certificate_request(signup) {
            Ok(request) => requests.push(request),
            Err(reason) => excluded.push(ExcludedSignup {
                signup_id: signup.signup_id.clone(),
                reason,
            }),
        }
    }

    Ok(PublicationDecision::Publish(build_plan(
        state, &session, phase, requests, excluded,
    )))
}

fn build_plan(
    state: &ProjectState,
    session: &Session,
    phase: SessionPhase,
    requests: Vec<CertificateRequest>,
    excluded: Vec<ExcludedSignup>,
) -> PublicationPlan {
    PublicationPlan {
        project: ProjectSnapshot {
            project_id: state.project.project_id.clone(),
            name: state.project.name.clone(),
            event_type: state.project.event_type,
        },
        organization: OrganizationSnapshot {
            name: state.project.organization_name.clone(),
        },
        session_key: session.key.clone(),
        phase,
        requests,
        excluded,
    }
}

fn certificate_request(signup: &Signup) -> Result<CertificateRequest, InvalidDurationReason> {
    let duration: AttendanceDuration = reconcile_signup(signup);
    match (duration.reason, signup.check_in_time, signup.check_out_time) {
        (None, Some(check_in), Some(check_out)) if duration.is_valid => Ok(CertificateRequest {
            signup_id: signup.signup_id.clone(),
            user_id: signup.identity.user_id().map(String::from),
            name: signup.name.clone(),
            email: signup.email.clone(),
            check_in,
            check_out,
            minutes: duration.minutes,
        }),
        (Some(reason), _, _) => Err(reason),
        _ => Err(InvalidDurationReason::MissingTimestamp),
    }
}

/// Commits a publication plan through a store.
///
/// # Arguments
///
/// * `store` - The storage collaborator
/// * `plan` - A plan from `plan_publication`
///
/// # Errors
///
/// Returns `CoreError::PublicationFailed` with the failing stage if any
/// store call fails. The latch is never set after a failed issuance.
pub fn execute_publication<S: PublicationStore>(
    store: &mut S,
    plan: &PublicationPlan,
) -> Result<PublicationOutcome, CoreError> {
    let project_id: &str = &plan.project.project_id;
    let failure = |stage: PublicationStage, message: String, certificates_created: usize| {
        CoreError::PublicationFailed {
            session_key: plan.session_key.to_string(),
            stage,
            message,
            certificates_created,
        }
    };

    let already_published: bool = store
        .is_published(project_id, &plan.session_key)
        .map_err(|e| failure(PublicationStage::LatchCheck, e.to_string(), 0))?;
    if already_published {
        return Ok(PublicationOutcome::no_op(plan.session_key.clone()));
    }

    let certificates_created: usize = store
        .issue_certificates(project_id, &plan.certificates())
        .map_err(|e| failure(PublicationStage::CertificateIssuance, e.to_string(), 0))?;

    store
        .set_published(project_id, &plan.session_key)
        .map_err(|e| {
            failure(
                PublicationStage::LatchSet,
                e.to_string(),
                certificates_created,
            )
        })?;

    Ok(PublicationOutcome {
        session_key: plan.session_key.clone(),
        certificates_created,
        excluded: plan.excluded.clone(),
        already_published: false,
    })
}

/// The result of a full publication, with the audit event when something changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationResult {
    pub outcome: PublicationOutcome,
    /// `None` for an idempotent no-op.
    pub audit_event: Option<AuditEvent>,
}

/// Runs the publication gate end to end: plan, execute, and audit.
///
/// # Arguments
///
/// * `store` - The storage collaborator
/// * `state` - The current project state
/// * `session_id` - The session id, in canonical or alias form
/// * `now` - The current wall-clock instant
/// * `actor` - The actor publishing (an organizer, or the scheduled publisher)
/// * `cause` - The cause or reason for publishing
///
/// # Errors
///
/// Returns an error if planning is rejected or the store fails.
pub fn publish<S: PublicationStore>(
    store: &mut S,
    state: &ProjectState,
    session_id: &str,
    now: NaiveDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<PublicationResult, CoreError> {
    let plan: PublicationPlan = match plan_publication(state, session_id, now)? {
        PublicationDecision::Publish(plan) => plan,
        PublicationDecision::AlreadyPublished { session_key } => {
            return Ok(PublicationResult {
                outcome: PublicationOutcome::no_op(session_key),
                audit_event: None,
            });
        }
    };

    let outcome: PublicationOutcome = execute_publication(store, &plan)?;
    if outcome.already_published {
        return Ok(PublicationResult {
            outcome,
            audit_event: None,
        });
    }

    let audit_event: AuditEvent = AuditEvent::new(
        state.project.project_id.clone(),
        Some(plan.session_key.clone()),
        actor,
        cause,
        Action::new(
            String::from("PublishHours"),
            Some(format!(
                "Issued {} certificates, excluded {} invalid entries",
                outcome.certificates_created,
                outcome.excluded_count()
            )),
        ),
        StateSnapshot::new(format!(
            "session={},phase={},published=false",
            plan.session_key, plan.phase
        )),
        StateSnapshot::new(format!(
            "session={},published=true,certificates={}",
            plan.session_key, outcome.certificates_created
        )),
    );

    Ok(PublicationResult {
        outcome,
        audit_event: Some(audit_event),
    })
}
