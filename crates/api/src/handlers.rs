// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the request instant `now` explicitly. Only the
//! outermost caller consults a clock.

use chrono::NaiveDateTime;
use std::str::FromStr;
use tracing::{debug, info};
use vol_hours::{
    Command, ProjectState, PublicationOutcome, PublicationResult, TransitionResult, apply,
};
use vol_hours_audit::{Actor, AuditEvent, Cause};
use vol_hours_domain::{
    AttendanceDuration, Certificate, CheckOutAdjustment, DomainError, EventType, Project,
    ProjectPhaseSummary, ProjectStatus, PublicationLatch, ResolvedSession, Schedule, Session,
    SessionKey, SessionPhase, SessionPhaseEntry, SessionWindows, Signup, SignupStatus,
    VerificationMethod, VolunteerIdentity, calculate_windows, format_instant, parse_instant,
    reconcile_signup, resolve_session_id, summarize_project,
};
use vol_hours_persistence::{Persistence, PersistenceError};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AdjustCheckOutsRequest, AdjustCheckOutsResponse, AdjustmentInfo, AttendanceResponse,
    AuditEventInfo, CertificateInfo, CreateProjectRequest, CreateProjectResponse,
    CreateSignupRequest, CreateSignupResponse, EditAttendanceRequest, ExcludedSignupInfo,
    GetAuditTimelineResponse, GetProjectResponse, GetSessionHoursResponse, GetSessionResponse,
    ListCertificatesResponse, PublishHoursResponse, RecordAttendanceRequest, SessionPhaseInfo,
    SessionWindowsInfo, SignupHoursInfo,
};

// ============================================================================
// Projects
// ============================================================================

/// Creates a new project after validating its schedule.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The project definition
/// * `now` - The request instant, recorded as the creation time
///
/// # Errors
///
/// Returns an error if:
/// - A required field is empty or an enum string is unknown
/// - The schedule is malformed or does not match the event type
/// - A project with the same id already exists
pub fn create_project(
    persistence: &mut Persistence,
    request: &CreateProjectRequest,
    now: NaiveDateTime,
) -> Result<CreateProjectResponse, ApiError> {
    require_non_empty("project_id", &request.project_id)?;
    require_non_empty("name", &request.name)?;

    let event_type: EventType =
        EventType::from_str(&request.event_type).map_err(translate_domain_error)?;
    let verification_method: VerificationMethod =
        VerificationMethod::from_str(&request.verification_method)
            .map_err(translate_domain_error)?;
    let schedule: Schedule =
        Schedule::resolve(event_type, &request.schedule).map_err(translate_domain_error)?;

    let project: Project = Project {
        project_id: request.project_id.clone(),
        name: request.name.clone(),
        organization_name: request.organization_name.clone(),
        event_type,
        schedule: request.schedule.clone(),
        created_at: now,
        status: ProjectStatus::Upcoming,
        verification_method,
        published: PublicationLatch::new(),
    };

    persistence
        .create_project(&project)
        .map_err(|err| match err {
            PersistenceError::ConstraintViolation(_) => ApiError::DomainRuleViolation {
                rule: String::from("unique_project"),
                message: format!("Project '{}' already exists", request.project_id),
            },
            other => translate_persistence_error(other),
        })?;

    let session_keys: Vec<String> = schedule
        .sessions()
        .into_iter()
        .map(|session| session.key.into_string())
        .collect();

    info!(
        project_id = %project.project_id,
        event_type = %event_type,
        sessions = session_keys.len(),
        "Created project"
    );

    Ok(CreateProjectResponse {
        project_id: project.project_id,
        message: format!("Created project with {} sessions", session_keys.len()),
        session_keys,
    })
}

/// Describes a project with the phase of every session at `now`.
///
/// A project whose stored schedule no longer resolves is reported with no
/// sessions and its stored status.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the project does not exist.
pub fn get_project(
    persistence: &mut Persistence,
    project_id: &str,
    now: NaiveDateTime,
) -> Result<GetProjectResponse, ApiError> {
    let project: Project = persistence
        .get_project(project_id)
        .map_err(|err| project_error(project_id, err))?;
    let summary: ProjectPhaseSummary = summarize_project(&project, now);

    debug!(
        project_id = %project_id,
        sessions = summary.sessions.len(),
        aggregate = ?summary.aggregate,
        "Summarized project phases"
    );

    Ok(GetProjectResponse {
        project_id: project.project_id,
        name: project.name,
        organization_name: project.organization_name,
        event_type: project.event_type.to_string(),
        status: project.status.to_string(),
        derived_status: summary.derived_status.to_string(),
        verification_method: project.verification_method.as_str().to_string(),
        aggregate_phase: summary.aggregate.map(|phase| phase.to_string()),
        focus_session: summary.focus_session.map(SessionKey::into_string),
        sessions: summary.sessions.iter().map(session_phase_info).collect(),
    })
}

// ============================================================================
// Signups & Sessions
// ============================================================================

/// Signs a volunteer up for one session of a project.
///
/// The signup is stored under the session's canonical key, whichever form
/// the request used.
///
/// # Errors
///
/// Returns an error if:
/// - The project does not exist or is cancelled
/// - The session id does not resolve
/// - Signups for the session have closed or the session is full
/// - The volunteer identity is not exactly one of user id or anonymous id
/// - A signup with the same id already exists
pub fn create_signup(
    persistence: &mut Persistence,
    project_id: &str,
    request: &CreateSignupRequest,
    now: NaiveDateTime,
) -> Result<CreateSignupResponse, ApiError> {
    require_non_empty("signup_id", &request.signup_id)?;
    require_non_empty("name", &request.name)?;

    let state: ProjectState = load_project_state(persistence, project_id)?;
    if state.is_cancelled() {
        return Err(translate_domain_error(DomainError::ProjectCancelled {
            project_id: project_id.to_string(),
        }));
    }

    let (schedule, session) = state
        .resolve_session(&request.session_id)
        .map_err(translate_core_error)?;

    let windows: SessionWindows = calculate_windows(&session);
    if !windows.can_sign_up(now) {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("signup_closed"),
            message: format!(
                "Signups for session '{}' closed at {}",
                session.key,
                format_instant(&windows.signup_cutoff)
            ),
        });
    }

    let taken: usize = state
        .session_signups(&schedule, &session.key)
        .into_iter()
        .filter(|signup| signup.status != SignupStatus::Rejected)
        .count();
    if u32::try_from(taken).unwrap_or(u32::MAX) >= session.volunteer_capacity {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("session_full"),
            message: format!(
                "Session '{}' is full ({} volunteers)",
                session.key, session.volunteer_capacity
            ),
        });
    }

    let identity: VolunteerIdentity = VolunteerIdentity::from_columns(
        &request.signup_id,
        request.user_id.clone(),
        request.anonymous_signup_id.clone(),
    )
    .map_err(translate_domain_error)?;
    let status: SignupStatus = request
        .status
        .as_deref()
        .map_or(Ok(SignupStatus::Pending), SignupStatus::from_str)
        .map_err(translate_domain_error)?;

    let signup: Signup = Signup {
        signup_id: request.signup_id.clone(),
        project_id: project_id.to_string(),
        schedule_id: session.key.to_string(),
        identity,
        name: request.name.clone(),
        email: request.email.clone(),
        status,
        check_in_time: None,
        check_out_time: None,
    };

    persistence
        .create_signup(&signup)
        .map_err(|err| match err {
            PersistenceError::ConstraintViolation(_) => ApiError::DomainRuleViolation {
                rule: String::from("unique_signup"),
                message: format!("Signup '{}' already exists", request.signup_id),
            },
            other => translate_persistence_error(other),
        })?;

    info!(
        project_id = %project_id,
        signup_id = %signup.signup_id,
        session_key = %session.key,
        "Created signup"
    );

    Ok(CreateSignupResponse {
        signup_id: signup.signup_id,
        session_key: session.key.into_string(),
        status: status.as_str().to_string(),
        message: String::from("Signed up"),
    })
}

/// Resolves a session id and describes the session at `now`.
///
/// Alias ids from earlier editors are accepted.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the project does not exist or
/// the id names no session.
pub fn get_session(
    persistence: &mut Persistence,
    project_id: &str,
    session_id: &str,
    now: NaiveDateTime,
) -> Result<GetSessionResponse, ApiError> {
    let state: ProjectState = load_project_state(persistence, project_id)?;
    let schedule: Schedule = state.schedule().map_err(|_| {
        translate_domain_error(DomainError::SessionNotFound {
            session_id: session_id.to_string(),
        })
    })?;
    let resolved: ResolvedSession =
        resolve_session_id(&schedule, session_id).map_err(translate_domain_error)?;
    let session: Session = resolved.session;

    let windows: SessionWindows = calculate_windows(&session);
    let phase: SessionPhase = state.session_phase(&schedule, &session, now);
    let signup_count: usize = state.session_signups(&schedule, &session.key).len();

    Ok(GetSessionResponse {
        requested_id: session_id.to_string(),
        session_key: session.key.to_string(),
        id_form: resolved.form.as_str().to_string(),
        phase: phase.to_string(),
        windows: windows_info(&windows),
        addressable: windows.is_addressable(now),
        volunteer_capacity: session.volunteer_capacity,
        signup_count,
    })
}

// ============================================================================
// Attendance
// ============================================================================

/// Records a volunteer's check-in.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `project_id` - The project the signup belongs to
/// * `signup_id` - The signup checking in
/// * `request` - The check-in instant; `now` when omitted
/// * `actor` - Who records the check-in
/// * `cause` - Why
/// * `now` - The request instant, used to classify the session
///
/// # Errors
///
/// Returns an error if the signup does not exist, was rejected, or its
/// session does not accept check-ins in its current phase.
pub fn record_check_in(
    persistence: &mut Persistence,
    project_id: &str,
    signup_id: &str,
    request: &RecordAttendanceRequest,
    actor: Actor,
    cause: Cause,
    now: NaiveDateTime,
) -> Result<AttendanceResponse, ApiError> {
    let at: NaiveDateTime = request
        .at
        .as_deref()
        .map_or(Ok(now), |value| parse_request_instant("at", value))?;

    let command: Command = Command::RecordCheckIn {
        signup_id: signup_id.to_string(),
        at,
    };
    let (result, event_id) =
        apply_and_persist(persistence, project_id, command, now, actor, cause)?;

    attendance_response(&result, event_id, "Checked in")
}

/// Records a volunteer's check-out.
///
/// # Errors
///
/// Returns an error if the signup has no check-in, does not exist, was
/// rejected, or its session does not accept check-outs in its current phase.
pub fn record_check_out(
    persistence: &mut Persistence,
    project_id: &str,
    signup_id: &str,
    request: &RecordAttendanceRequest,
    actor: Actor,
    cause: Cause,
    now: NaiveDateTime,
) -> Result<AttendanceResponse, ApiError> {
    let at: NaiveDateTime = request
        .at
        .as_deref()
        .map_or(Ok(now), |value| parse_request_instant("at", value))?;

    let command: Command = Command::RecordCheckOut {
        signup_id: signup_id.to_string(),
        at,
    };
    let (result, event_id) =
        apply_and_persist(persistence, project_id, command, now, actor, cause)?;

    attendance_response(&result, event_id, "Checked out")
}

/// Replaces a signup's check-in and check-out with corrected values.
///
/// # Errors
///
/// Returns an error if a timestamp does not parse, a check-out is given
/// without a check-in, or the session is not in an editable phase.
pub fn edit_attendance(
    persistence: &mut Persistence,
    project_id: &str,
    signup_id: &str,
    request: &EditAttendanceRequest,
    actor: Actor,
    cause: Cause,
    now: NaiveDateTime,
) -> Result<AttendanceResponse, ApiError> {
    let check_in: Option<NaiveDateTime> = request
        .check_in
        .as_deref()
        .map(|value| parse_request_instant("check_in", value))
        .transpose()?;
    let check_out: Option<NaiveDateTime> = request
        .check_out
        .as_deref()
        .map(|value| parse_request_instant("check_out", value))
        .transpose()?;

    let command: Command = Command::EditAttendance {
        signup_id: signup_id.to_string(),
        check_in,
        check_out,
    };
    let (result, event_id) =
        apply_and_persist(persistence, project_id, command, now, actor, cause)?;

    attendance_response(&result, event_id, "Attendance corrected")
}

/// Shifts every recorded check-out of a session by a signed offset.
///
/// A shift that leaves a duration invalid is still applied; the response
/// reports the outcome per signup.
///
/// # Errors
///
/// Returns an error if the session does not resolve or is not in its
/// attendance editing phase.
pub fn adjust_check_outs(
    persistence: &mut Persistence,
    project_id: &str,
    session_id: &str,
    request: &AdjustCheckOutsRequest,
    actor: Actor,
    cause: Cause,
    now: NaiveDateTime,
) -> Result<AdjustCheckOutsResponse, ApiError> {
    let command: Command = Command::AdjustCheckOuts {
        session_id: session_id.to_string(),
        offset_minutes: request.offset_minutes,
    };
    let (result, event_id) =
        apply_and_persist(persistence, project_id, command, now, actor, cause)?;

    let session_key: String = event_session_key(&result.audit_event);
    let adjustments: Vec<AdjustmentInfo> = result.adjustments.iter().map(adjustment_info).collect();
    let applied: usize = adjustments.iter().filter(|entry| entry.applied).count();

    info!(
        project_id = %project_id,
        session_key = %session_key,
        offset_minutes = request.offset_minutes,
        applied,
        "Adjusted check-outs"
    );

    Ok(AdjustCheckOutsResponse {
        message: format!(
            "Shifted {applied} check-outs by {} minutes",
            request.offset_minutes
        ),
        session_key,
        adjustments,
        event_id,
    })
}

// ============================================================================
// Publication & Hours
// ============================================================================

/// Publishes a session's hours, issuing one certificate per valid attendance.
///
/// Publishing an already published session is a successful no-op.
///
/// # Errors
///
/// Returns an error if the project does not exist or is cancelled, the
/// session does not resolve or has not ended, or a storage step fails.
pub fn publish_hours(
    persistence: &mut Persistence,
    project_id: &str,
    session_id: &str,
    actor: Actor,
    cause: Cause,
    now: NaiveDateTime,
) -> Result<PublishHoursResponse, ApiError> {
    let result: PublicationResult = persistence
        .publish_session(project_id, session_id, now, actor, cause)
        .map_err(|err| project_error(project_id, err))?;
    let outcome: PublicationOutcome = result.outcome;

    let message: String = if outcome.already_published {
        format!("Hours for session '{}' were already published", outcome.session_key)
    } else {
        format!(
            "Issued {} certificates, excluded {} invalid entries",
            outcome.certificates_created,
            outcome.excluded_count()
        )
    };

    Ok(PublishHoursResponse {
        session_key: outcome.session_key.to_string(),
        certificates_created: outcome.certificates_created,
        excluded_count: outcome.excluded_count(),
        excluded: outcome
            .excluded
            .iter()
            .map(|entry| ExcludedSignupInfo {
                signup_id: entry.signup_id.clone(),
                reason: entry.reason.to_string(),
            })
            .collect(),
        already_published: outcome.already_published,
        event_id: result.audit_event.and_then(|event| event.event_id),
        message,
    })
}

/// Lists the reconciled duration of every non-rejected signup of a session.
///
/// Invalid durations are reported with their reason rather than failing
/// the request.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the project or session does not exist.
pub fn get_session_hours(
    persistence: &mut Persistence,
    project_id: &str,
    session_id: &str,
    now: NaiveDateTime,
) -> Result<GetSessionHoursResponse, ApiError> {
    let state: ProjectState = load_project_state(persistence, project_id)?;
    let (schedule, session) = state
        .resolve_session(session_id)
        .map_err(translate_core_error)?;
    let phase: SessionPhase = state.session_phase(&schedule, &session, now);

    let entries: Vec<SignupHoursInfo> = state
        .session_signups(&schedule, &session.key)
        .into_iter()
        .filter(|signup| signup.status != SignupStatus::Rejected)
        .map(signup_hours_info)
        .collect();
    let total_valid_minutes: i64 = entries
        .iter()
        .filter(|entry| entry.is_valid)
        .map(|entry| entry.minutes)
        .sum();
    let invalid_count: usize = entries.iter().filter(|entry| !entry.is_valid).count();

    Ok(GetSessionHoursResponse {
        session_key: session.key.into_string(),
        phase: phase.to_string(),
        published: phase == SessionPhase::Published,
        total_valid_minutes,
        invalid_count,
        entries,
    })
}

/// Lists issued certificates, optionally for one session only.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the project or the named session
/// does not exist.
pub fn list_certificates(
    persistence: &mut Persistence,
    project_id: &str,
    session_id: Option<&str>,
) -> Result<ListCertificatesResponse, ApiError> {
    let state: ProjectState = load_project_state(persistence, project_id)?;
    let session_key: Option<SessionKey> = session_id
        .map(|id| state.resolve_session(id).map(|(_, session)| session.key))
        .transpose()
        .map_err(translate_core_error)?;

    let certificates: Vec<Certificate> = persistence
        .list_certificates(project_id, session_key.as_ref())
        .map_err(translate_persistence_error)?;

    Ok(ListCertificatesResponse {
        project_id: project_id.to_string(),
        certificates: certificates.iter().map(certificate_info).collect(),
    })
}

// ============================================================================
// Audit
// ============================================================================

/// Returns a project's audit timeline in recording order.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the project does not exist.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    project_id: &str,
) -> Result<GetAuditTimelineResponse, ApiError> {
    persistence
        .get_project(project_id)
        .map_err(|err| project_error(project_id, err))?;
    let events: Vec<AuditEvent> = persistence
        .list_audit_events(project_id)
        .map_err(translate_persistence_error)?;

    Ok(GetAuditTimelineResponse {
        project_id: project_id.to_string(),
        events: events.iter().map(audit_event_info).collect(),
    })
}

/// Returns one audit event.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the event does not exist.
pub fn get_audit_event(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<AuditEventInfo, ApiError> {
    let event: AuditEvent = persistence.get_audit_event(event_id).map_err(|err| match err {
        PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {event_id} does not exist"),
        },
        other => translate_persistence_error(other),
    })?;

    Ok(audit_event_info(&event))
}

// ============================================================================
// Helpers
// ============================================================================

fn load_project_state(
    persistence: &mut Persistence,
    project_id: &str,
) -> Result<ProjectState, ApiError> {
    persistence
        .load_project_state(project_id)
        .map_err(|err| project_error(project_id, err))
}

/// Maps a persistence error raised while loading a project.
fn project_error(project_id: &str, err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Project"),
            message: format!("Project '{project_id}' does not exist"),
        },
        other => translate_persistence_error(other),
    }
}

/// Loads the project, applies the command, and persists the result.
fn apply_and_persist(
    persistence: &mut Persistence,
    project_id: &str,
    command: Command,
    now: NaiveDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<(TransitionResult, i64), ApiError> {
    let state: ProjectState = load_project_state(persistence, project_id)?;
    let result: TransitionResult =
        apply(&state, command, now, actor, cause).map_err(translate_core_error)?;
    let event_id: i64 = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;
    Ok((result, event_id))
}

fn attendance_response(
    result: &TransitionResult,
    event_id: i64,
    message: &str,
) -> Result<AttendanceResponse, ApiError> {
    let signup: &Signup = result
        .changed_signups
        .first()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Attendance change produced no updated signup"),
        })?;

    info!(
        project_id = %signup.project_id,
        signup_id = %signup.signup_id,
        event_id,
        action = %result.audit_event.action.name,
        "Recorded attendance change"
    );

    Ok(AttendanceResponse {
        session_key: event_session_key(&result.audit_event),
        signup: signup_hours_info(signup),
        event_id,
        message: message.to_string(),
    })
}

fn event_session_key(event: &AuditEvent) -> String {
    event
        .session_key
        .as_ref()
        .map_or_else(String::new, ToString::to_string)
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("must not be empty"),
        });
    }
    Ok(())
}

fn parse_request_instant(field: &str, value: &str) -> Result<NaiveDateTime, ApiError> {
    parse_instant(value).map_err(|err| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    })
}

fn format_optional(instant: Option<NaiveDateTime>) -> Option<String> {
    instant.as_ref().map(format_instant)
}

fn windows_info(windows: &SessionWindows) -> SessionWindowsInfo {
    SessionWindowsInfo {
        signup_cutoff: format_instant(&windows.signup_cutoff),
        attendance_signup_cutoff: format_instant(&windows.attendance_signup_cutoff),
        check_in_open: format_instant(&windows.check_in_open),
        attendance_check_in_open: format_instant(&windows.attendance_check_in_open),
        active_start: format_instant(&windows.active_start),
        active_end: format_instant(&windows.active_end),
        editing_deadline: format_instant(&windows.editing_deadline),
        addressable_until: format_instant(&windows.addressable_until),
    }
}

fn session_phase_info(entry: &SessionPhaseEntry) -> SessionPhaseInfo {
    SessionPhaseInfo {
        session_key: entry.session_key.to_string(),
        phase: entry.phase.to_string(),
        windows: windows_info(&entry.windows),
        volunteer_capacity: entry.volunteer_capacity,
    }
}

fn signup_hours_info(signup: &Signup) -> SignupHoursInfo {
    let duration: AttendanceDuration = reconcile_signup(signup);
    SignupHoursInfo {
        signup_id: signup.signup_id.clone(),
        name: signup.name.clone(),
        status: signup.status.as_str().to_string(),
        check_in: format_optional(signup.check_in_time),
        check_out: format_optional(signup.check_out_time),
        minutes: duration.minutes,
        is_valid: duration.is_valid,
        invalid_reason: duration.reason.map(|reason| reason.to_string()),
    }
}

fn adjustment_info(adjustment: &CheckOutAdjustment) -> AdjustmentInfo {
    AdjustmentInfo {
        signup_id: adjustment.signup_id.clone(),
        applied: adjustment.applied,
        previous_check_out: format_optional(adjustment.previous_check_out),
        adjusted_check_out: format_optional(adjustment.adjusted_check_out),
        minutes: adjustment.duration.minutes,
        is_valid: adjustment.duration.is_valid,
        invalid_reason: adjustment.duration.reason.map(|reason| reason.to_string()),
    }
}

fn certificate_info(certificate: &Certificate) -> CertificateInfo {
    CertificateInfo {
        signup_id: certificate.signup_id.clone(),
        session_key: certificate.session_key.to_string(),
        volunteer_name: certificate.volunteer.name.clone(),
        volunteer_email: certificate.volunteer.email.clone(),
        project_name: certificate.project.name.clone(),
        organization_name: certificate.organization.name.clone(),
        event_start: format_instant(&certificate.event_start),
        event_end: format_instant(&certificate.event_end),
        duration_minutes: certificate.duration_minutes,
    }
}

fn audit_event_info(event: &AuditEvent) -> AuditEventInfo {
    AuditEventInfo {
        event_id: event.event_id,
        session_key: event.session_key.as_ref().map(ToString::to_string),
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
    }
}
