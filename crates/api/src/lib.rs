// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the volunteer hours system.
//!
//! Handlers translate request DTOs into core commands, drive persistence,
//! and translate every lower-layer error into an `ApiError`. Authentication
//! happens upstream; handlers receive the acting `Actor` directly.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    adjust_check_outs, create_project, create_signup, edit_attendance, get_audit_event,
    get_audit_timeline, get_project, get_session, get_session_hours, list_certificates,
    publish_hours, record_check_in, record_check_out,
};
pub use request_response::{
    AdjustCheckOutsRequest, AdjustCheckOutsResponse, AdjustmentInfo, AttendanceResponse,
    AuditEventInfo, CertificateInfo, CreateProjectRequest, CreateProjectResponse,
    CreateSignupRequest, CreateSignupResponse, EditAttendanceRequest, ExcludedSignupInfo,
    GetAuditTimelineResponse, GetProjectResponse, GetSessionHoursResponse, GetSessionResponse,
    ListCertificatesResponse, PublishHoursResponse, RecordAttendanceRequest, SessionPhaseInfo,
    SessionWindowsInfo, SignupHoursInfo,
};
