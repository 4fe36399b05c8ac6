// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use vol_hours_api::{
    AdjustCheckOutsRequest, AdjustCheckOutsResponse, ApiError, AttendanceResponse, AuditEventInfo,
    CreateProjectRequest, CreateProjectResponse, CreateSignupRequest, CreateSignupResponse,
    EditAttendanceRequest, GetAuditTimelineResponse, GetProjectResponse, GetSessionHoursResponse,
    GetSessionResponse, ListCertificatesResponse, PublishHoursResponse, RecordAttendanceRequest,
    adjust_check_outs, create_project, create_signup, edit_attendance, get_audit_event,
    get_audit_timeline, get_project, get_session, get_session_hours, list_certificates,
    publish_hours, record_check_in, record_check_out,
};
use vol_hours_audit::{Actor, Cause};
use vol_hours_domain::{Clock, SystemClock};
use vol_hours_persistence::Persistence;

/// Volunteer Hours Server - HTTP server for session attendance and hours publication
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, and the clock every request reads "now" from.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for projects, signups, certificates and audit events.
    persistence: Arc<Mutex<Persistence>>,
    /// The wall clock.
    clock: Arc<dyn Clock + Send + Sync>,
}

/// Who performs a state-changing request and why.
///
/// Authentication happens upstream; these fields are taken as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Attribution {
    /// The actor performing this action.
    actor_id: String,
    /// The kind of actor (organizer, volunteer, scheduler).
    #[serde(default = "default_actor_type")]
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

fn default_actor_type() -> String {
    String::from("organizer")
}

impl Attribution {
    fn into_parts(self) -> (Actor, Cause) {
        (
            Actor::new(self.actor_id, self.actor_type),
            Cause::new(self.cause_id, self.cause_description),
        )
    }
}

/// A state-changing request body: attribution plus the operation's fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CommandRequest<T> {
    #[serde(flatten)]
    attribution: Attribution,
    #[serde(flatten)]
    body: T,
}

/// Query parameters for the certificate listing endpoint.
#[derive(Debug, Deserialize)]
struct CertificatesQuery {
    /// Restrict the listing to one session (canonical or alias id).
    session_id: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Handler for POST `/projects` endpoint.
async fn handle_create_project(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<CreateProjectResponse>, HttpError> {
    info!(
        project_id = %req.project_id,
        event_type = %req.event_type,
        "Handling create_project request"
    );

    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateProjectResponse = create_project(&mut persistence, &req, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/projects/{project_id}` endpoint.
///
/// Returns the project with the phase of every session at the current instant.
async fn handle_get_project(
    AxumState(app_state): AxumState<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<GetProjectResponse>, HttpError> {
    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: GetProjectResponse = get_project(&mut persistence, &project_id, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/projects/{project_id}/signups` endpoint.
async fn handle_create_signup(
    AxumState(app_state): AxumState<AppState>,
    Path(project_id): Path<String>,
    Json(req): Json<CreateSignupRequest>,
) -> Result<Json<CreateSignupResponse>, HttpError> {
    info!(
        project_id = %project_id,
        signup_id = %req.signup_id,
        session_id = %req.session_id,
        "Handling create_signup request"
    );

    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateSignupResponse = create_signup(&mut persistence, &project_id, &req, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/projects/{project_id}/sessions/{session_id}` endpoint.
///
/// Accepts canonical and alias session ids; this is what a scanned QR link resolves through.
async fn handle_get_session(
    AxumState(app_state): AxumState<AppState>,
    Path((project_id, session_id)): Path<(String, String)>,
) -> Result<Json<GetSessionResponse>, HttpError> {
    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: GetSessionResponse =
        get_session(&mut persistence, &project_id, &session_id, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/projects/{project_id}/signups/{signup_id}/check_in` endpoint.
async fn handle_check_in(
    AxumState(app_state): AxumState<AppState>,
    Path((project_id, signup_id)): Path<(String, String)>,
    Json(req): Json<CommandRequest<RecordAttendanceRequest>>,
) -> Result<Json<AttendanceResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        project_id = %project_id,
        signup_id = %signup_id,
        "Handling check_in request"
    );

    let (actor, cause) = req.attribution.into_parts();
    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: AttendanceResponse = record_check_in(
        &mut persistence,
        &project_id,
        &signup_id,
        &req.body,
        actor,
        cause,
        now,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/projects/{project_id}/signups/{signup_id}/check_out` endpoint.
async fn handle_check_out(
    AxumState(app_state): AxumState<AppState>,
    Path((project_id, signup_id)): Path<(String, String)>,
    Json(req): Json<CommandRequest<RecordAttendanceRequest>>,
) -> Result<Json<AttendanceResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        project_id = %project_id,
        signup_id = %signup_id,
        "Handling check_out request"
    );

    let (actor, cause) = req.attribution.into_parts();
    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: AttendanceResponse = record_check_out(
        &mut persistence,
        &project_id,
        &signup_id,
        &req.body,
        actor,
        cause,
        now,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/projects/{project_id}/signups/{signup_id}/attendance` endpoint.
async fn handle_edit_attendance(
    AxumState(app_state): AxumState<AppState>,
    Path((project_id, signup_id)): Path<(String, String)>,
    Json(req): Json<CommandRequest<EditAttendanceRequest>>,
) -> Result<Json<AttendanceResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        project_id = %project_id,
        signup_id = %signup_id,
        "Handling edit_attendance request"
    );

    let (actor, cause) = req.attribution.into_parts();
    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: AttendanceResponse = edit_attendance(
        &mut persistence,
        &project_id,
        &signup_id,
        &req.body,
        actor,
        cause,
        now,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/projects/{project_id}/sessions/{session_id}/adjust` endpoint.
async fn handle_adjust_check_outs(
    AxumState(app_state): AxumState<AppState>,
    Path((project_id, session_id)): Path<(String, String)>,
    Json(req): Json<CommandRequest<AdjustCheckOutsRequest>>,
) -> Result<Json<AdjustCheckOutsResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        project_id = %project_id,
        session_id = %session_id,
        offset_minutes = req.body.offset_minutes,
        "Handling adjust_check_outs request"
    );

    let (actor, cause) = req.attribution.into_parts();
    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: AdjustCheckOutsResponse = adjust_check_outs(
        &mut persistence,
        &project_id,
        &session_id,
        &req.body,
        actor,
        cause,
        now,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/projects/{project_id}/sessions/{session_id}/publish` endpoint.
///
/// Also the entry point for the scheduled publisher once the editing deadline passes.
async fn handle_publish_hours(
    AxumState(app_state): AxumState<AppState>,
    Path((project_id, session_id)): Path<(String, String)>,
    Json(req): Json<Attribution>,
) -> Result<Json<PublishHoursResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        project_id = %project_id,
        session_id = %session_id,
        "Handling publish_hours request"
    );

    let (actor, cause) = req.into_parts();
    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: PublishHoursResponse =
        publish_hours(&mut persistence, &project_id, &session_id, actor, cause, now)?;
    drop(persistence);

    info!(
        session_key = %response.session_key,
        certificates_created = response.certificates_created,
        excluded = response.excluded_count,
        already_published = response.already_published,
        "Publication finished"
    );

    Ok(Json(response))
}

/// Handler for GET `/projects/{project_id}/sessions/{session_id}/hours` endpoint.
async fn handle_get_session_hours(
    AxumState(app_state): AxumState<AppState>,
    Path((project_id, session_id)): Path<(String, String)>,
) -> Result<Json<GetSessionHoursResponse>, HttpError> {
    let now = app_state.clock.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: GetSessionHoursResponse =
        get_session_hours(&mut persistence, &project_id, &session_id, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/projects/{project_id}/certificates` endpoint.
async fn handle_list_certificates(
    AxumState(app_state): AxumState<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<CertificatesQuery>,
) -> Result<Json<ListCertificatesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListCertificatesResponse =
        list_certificates(&mut persistence, &project_id, query.session_id.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/projects/{project_id}/audit` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<GetAuditTimelineResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GetAuditTimelineResponse = get_audit_timeline(&mut persistence, &project_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/audit/event/{event_id}` endpoint.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditEventInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AuditEventInfo = get_audit_event(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/projects", post(handle_create_project))
        .route("/projects/{project_id}", get(handle_get_project))
        .route("/projects/{project_id}/signups", post(handle_create_signup))
        .route(
            "/projects/{project_id}/signups/{signup_id}/check_in",
            post(handle_check_in),
        )
        .route(
            "/projects/{project_id}/signups/{signup_id}/check_out",
            post(handle_check_out),
        )
        .route(
            "/projects/{project_id}/signups/{signup_id}/attendance",
            post(handle_edit_attendance),
        )
        .route(
            "/projects/{project_id}/sessions/{session_id}",
            get(handle_get_session),
        )
        .route(
            "/projects/{project_id}/sessions/{session_id}/adjust",
            post(handle_adjust_check_outs),
        )
        .route(
            "/projects/{project_id}/sessions/{session_id}/publish",
            post(handle_publish_hours),
        )
        .route(
            "/projects/{project_id}/sessions/{session_id}/hours",
            get(handle_get_session_hours),
        )
        .route(
            "/projects/{project_id}/certificates",
            get(handle_list_certificates),
        )
        .route("/projects/{project_id}/audit", get(handle_get_audit_timeline))
        .route("/audit/event/{event_id}", get(handle_get_audit_event))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Volunteer Hours Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(SystemClock),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
