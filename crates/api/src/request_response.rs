// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Instants cross this boundary as wall-clock text (`YYYY-MM-DDTHH:MM[:SS]`).

use vol_hours_domain::ScheduleDocument;

/// API request to create a new project.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateProjectRequest {
    /// The project identifier chosen by the caller.
    pub project_id: String,
    /// The project's display name.
    pub name: String,
    /// The name of the organizing organization.
    pub organization_name: String,
    /// One of `oneTime`, `multiDay`, `sameDayMultiArea`.
    pub event_type: String,
    /// The schedule document; exactly one shape must be populated.
    pub schedule: ScheduleDocument,
    /// One of `qr-code`, `manual`, `auto`, `signup-only`.
    pub verification_method: String,
}

/// API response for a successful project creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateProjectResponse {
    /// The created project's identifier.
    pub project_id: String,
    /// Canonical keys of every session, in schedule order.
    pub session_keys: Vec<String>,
    /// A success message.
    pub message: String,
}

/// The boundary instants of a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionWindowsInfo {
    /// General signups close at this instant.
    pub signup_cutoff: String,
    /// Attendance-management signups close at this instant.
    pub attendance_signup_cutoff: String,
    /// General check-in opens at this instant.
    pub check_in_open: String,
    /// QR check-in opens at this instant.
    pub attendance_check_in_open: String,
    /// The session starts.
    pub active_start: String,
    /// The session ends.
    pub active_end: String,
    /// Attendance edits are accepted until this instant.
    pub editing_deadline: String,
    /// The session's QR link stops resolving at this instant.
    pub addressable_until: String,
}

/// Phase information for one session of a project.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionPhaseInfo {
    /// The canonical session key.
    pub session_key: String,
    /// The session's phase at the request instant.
    pub phase: String,
    /// The session's boundary instants.
    pub windows: SessionWindowsInfo,
    /// Maximum number of volunteers.
    pub volunteer_capacity: u32,
}

/// API response describing a project and the phase of each of its sessions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetProjectResponse {
    /// The project's identifier.
    pub project_id: String,
    /// The project's display name.
    pub name: String,
    /// The organizing organization.
    pub organization_name: String,
    /// The project's event type.
    pub event_type: String,
    /// The stored project status.
    pub status: String,
    /// The status implied by the session phases.
    pub derived_status: String,
    /// The verification method.
    pub verification_method: String,
    /// The phase of the most actionable session, absent when there are no sessions.
    pub aggregate_phase: Option<String>,
    /// The session that determined the aggregate phase.
    pub focus_session: Option<String>,
    /// Every session in schedule order.
    pub sessions: Vec<SessionPhaseInfo>,
}

/// API request to sign a volunteer up for a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateSignupRequest {
    /// The signup identifier chosen by the caller.
    pub signup_id: String,
    /// The session id, canonical or alias.
    pub session_id: String,
    /// The registered user, when the volunteer has an account.
    pub user_id: Option<String>,
    /// The anonymous signup id, when the volunteer has no account.
    pub anonymous_signup_id: Option<String>,
    /// The volunteer's name.
    pub name: String,
    /// The volunteer's email address.
    pub email: Option<String>,
    /// Initial review status; defaults to `pending`.
    pub status: Option<String>,
}

/// API response for a successful signup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateSignupResponse {
    /// The created signup's identifier.
    pub signup_id: String,
    /// The canonical key of the session signed up for.
    pub session_key: String,
    /// The signup's review status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API response describing one session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetSessionResponse {
    /// The id as requested.
    pub requested_id: String,
    /// The canonical session key.
    pub session_key: String,
    /// Which encoding the requested id used.
    pub id_form: String,
    /// The session's phase at the request instant.
    pub phase: String,
    /// The session's boundary instants.
    pub windows: SessionWindowsInfo,
    /// Whether the session's QR link resolves at the request instant.
    pub addressable: bool,
    /// Maximum number of volunteers.
    pub volunteer_capacity: u32,
    /// Number of signups for this session.
    pub signup_count: usize,
}

/// API request to record a check-in or a check-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordAttendanceRequest {
    /// The instant to record; the request instant when omitted.
    pub at: Option<String>,
}

/// API request to correct a signup's attendance.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EditAttendanceRequest {
    /// The corrected check-in, or none to clear it.
    pub check_in: Option<String>,
    /// The corrected check-out, or none to clear it.
    pub check_out: Option<String>,
}

/// A signup's attendance and reconciled duration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignupHoursInfo {
    /// The signup's identifier.
    pub signup_id: String,
    /// The volunteer's name.
    pub name: String,
    /// The signup's status.
    pub status: String,
    /// The recorded check-in.
    pub check_in: Option<String>,
    /// The recorded check-out.
    pub check_out: Option<String>,
    /// Whole minutes attended; zero when invalid.
    pub minutes: i64,
    /// Whether the duration can be certified.
    pub is_valid: bool,
    /// Why the duration cannot be certified.
    pub invalid_reason: Option<String>,
}

/// API response for a successful attendance change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttendanceResponse {
    /// The canonical key of the signup's session.
    pub session_key: String,
    /// The signup as it is after the change.
    pub signup: SignupHoursInfo,
    /// The persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to shift every check-out of a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdjustCheckOutsRequest {
    /// Minutes to add; negative values move check-outs earlier.
    pub offset_minutes: i64,
}

/// Per-signup outcome of a bulk check-out adjustment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdjustmentInfo {
    /// The signup's identifier.
    pub signup_id: String,
    /// Whether a check-out was present and shifted.
    pub applied: bool,
    /// The check-out before the shift.
    pub previous_check_out: Option<String>,
    /// The check-out after the shift.
    pub adjusted_check_out: Option<String>,
    /// Reconciled minutes after the shift.
    pub minutes: i64,
    /// Whether the shifted duration can be certified.
    pub is_valid: bool,
    /// Why the shifted duration cannot be certified.
    pub invalid_reason: Option<String>,
}

/// API response for a bulk check-out adjustment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdjustCheckOutsResponse {
    /// The canonical session key.
    pub session_key: String,
    /// One entry per non-rejected signup of the session.
    pub adjustments: Vec<AdjustmentInfo>,
    /// The persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// A signup left out of a publication.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExcludedSignupInfo {
    /// The signup's identifier.
    pub signup_id: String,
    /// Why its duration cannot be certified.
    pub reason: String,
}

/// API response for a publication.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublishHoursResponse {
    /// The canonical session key.
    pub session_key: String,
    /// Certificates issued by this request.
    pub certificates_created: usize,
    /// Number of signups left out with invalid durations.
    pub excluded_count: usize,
    /// The signups left out and why.
    pub excluded: Vec<ExcludedSignupInfo>,
    /// True when the session was already published and nothing changed.
    pub already_published: bool,
    /// The persisted audit event; absent for a no-op.
    pub event_id: Option<i64>,
    /// A summary for the organizer.
    pub message: String,
}

/// API response listing the reconciled hours of a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetSessionHoursResponse {
    /// The canonical session key.
    pub session_key: String,
    /// The session's phase at the request instant.
    pub phase: String,
    /// Whether the session's hours are published.
    pub published: bool,
    /// Sum of valid durations, in minutes.
    pub total_valid_minutes: i64,
    /// Number of entries with invalid durations.
    pub invalid_count: usize,
    /// Every non-rejected signup of the session.
    pub entries: Vec<SignupHoursInfo>,
}

/// An issued certificate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CertificateInfo {
    /// The signup the certificate was issued for.
    pub signup_id: String,
    /// The canonical session key.
    pub session_key: String,
    /// The volunteer's name at issuance.
    pub volunteer_name: String,
    /// The volunteer's email at issuance.
    pub volunteer_email: Option<String>,
    /// The project's name at issuance.
    pub project_name: String,
    /// The issuing organization.
    pub organization_name: String,
    /// Reconciled check-in.
    pub event_start: String,
    /// Reconciled check-out.
    pub event_end: String,
    /// Certified minutes.
    pub duration_minutes: i64,
}

/// API response listing certificates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListCertificatesResponse {
    /// The project's identifier.
    pub project_id: String,
    /// The certificates, ordered by session then signup.
    pub certificates: Vec<CertificateInfo>,
}

/// One entry of a project's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The event ID.
    pub event_id: Option<i64>,
    /// The session the event concerns, if any.
    pub session_key: Option<String>,
    /// The actor ID.
    pub actor_id: String,
    /// The actor type.
    pub actor_type: String,
    /// The cause ID.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action_name: String,
    /// Optional action details.
    pub action_details: Option<String>,
    /// State before the change.
    pub before_snapshot: String,
    /// State after the change.
    pub after_snapshot: String,
}

/// API response with a project's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetAuditTimelineResponse {
    /// The project's identifier.
    pub project_id: String,
    /// Events in the order they were recorded.
    pub events: Vec<AuditEventInfo>,
}
