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

mod mailer;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use causalex_api::{
    ApiError, AuthenticatedCaller, CreateCaseRequest, CreateCaseResponse, CreateLawyerRequest,
    CreateLawyerResponse, CreateSpecialtyRequest, CreateSpecialtyResponse, GetCaseResponse,
    ListCasesResponse, ListLawyersResponse, ListPendingInvitesResponse, ListSpecialtiesResponse,
    LoginRequest, LoginResponse, RespondToInviteRequest, RespondToInviteResponse,
    SetPasswordRequest, SetPasswordResponse, UpdateLawyerRequest, UpdateLawyerResponse,
    create_case, create_lawyer, create_specialty, get_case, list_lawyers, list_my_cases,
    list_pending_invites, list_practicing_lawyers, list_specialties, login, resolve_caller,
    respond_to_invite, set_lawyer_password, update_lawyer,
};
use causalex_persistence::Persistence;
use clap::Parser;
use mailer::{DisabledMailer, Mailer, SendgridMailer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Causalex Server - HTTP server for the case assignment engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// MySQL connection URL. Takes precedence over the `SQLite` options.
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex to allow safe concurrent
/// access; the mailer dispatches decision notifications after commits.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for cases, invitations, and the directory.
    persistence: Arc<Mutex<Persistence>>,
    /// The decision notification sender.
    mailer: Arc<dyn Mailer>,
}

/// API request for creating a case.
///
/// This includes the caller identity in addition to the case data.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateCaseApiRequest {
    /// The trusted uid of the caller.
    caller_uid: String,
    /// Tentative title.
    caratula_tentativa: String,
    /// The specialty the case falls under.
    specialty_id: String,
    /// The object of the claim.
    objeto: String,
    /// Free-text summary.
    resumen: String,
    /// Jurisdiction of the case.
    jurisdiccion: String,
    /// Whether the creator takes one of the seats.
    brought_by_participates: bool,
    /// How invitees are selected (`auto` or `direct`).
    assignment_mode: String,
    /// Named assignees; consulted only in direct mode.
    #[serde(default)]
    direct_assignees_uids: Vec<String>,
    /// Written justification; consulted only in direct mode.
    #[serde(default)]
    direct_justification: String,
}

/// API request for answering an invitation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RespondToInviteApiRequest {
    /// The trusted uid of the caller.
    caller_uid: String,
    /// The decision (`accepted` or `rejected`).
    decision: String,
}

/// API request for creating a lawyer account.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateLawyerApiRequest {
    /// The trusted uid of the caller.
    caller_uid: String,
    /// The new lawyer's uid.
    uid: String,
    /// The new lawyer's email.
    email: String,
    /// The initial password.
    password: String,
    /// The new lawyer's role (`lawyer` or `admin`).
    #[serde(default = "default_role")]
    role: String,
    /// Whether the lawyer currently takes cases.
    #[serde(default = "default_true")]
    is_practicing: bool,
    /// The specialties the lawyer covers.
    #[serde(default)]
    specialties: Vec<String>,
}

fn default_role() -> String {
    String::from("lawyer")
}

const fn default_true() -> bool {
    true
}

/// API request for updating a lawyer's profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateLawyerApiRequest {
    /// The trusted uid of the caller.
    caller_uid: String,
    /// The new email, if changing.
    #[serde(default)]
    email: Option<String>,
    /// The new practicing flag, if changing.
    #[serde(default)]
    is_practicing: Option<bool>,
    /// The new specialty set, if changing.
    #[serde(default)]
    specialties: Option<Vec<String>>,
}

/// API request for setting a lawyer's password.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetPasswordApiRequest {
    /// The trusted uid of the caller.
    caller_uid: String,
    /// The new password.
    password: String,
}

/// API request for creating a specialty.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateSpecialtyApiRequest {
    /// The trusted uid of the caller.
    caller_uid: String,
    /// The specialty identifier.
    specialty_id: String,
    /// The display name.
    name: String,
}

/// Query parameters carrying the caller identity on read endpoints.
#[derive(Debug, Deserialize)]
struct CallerQuery {
    /// The trusted uid of the caller.
    caller_uid: String,
}

/// API response for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `"ok"` while the server is up.
    status: String,
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
        let status = match &err {
            ApiError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            ApiError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::FailedPrecondition { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST /cases endpoint.
///
/// Creates a case and issues its initial invitations.
async fn handle_create_case(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCaseApiRequest>,
) -> Result<Json<CreateCaseResponse>, HttpError> {
    info!(
        caller_uid = %req.caller_uid,
        specialty_id = %req.specialty_id,
        mode = %req.assignment_mode,
        "Handling create_case request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let caller: AuthenticatedCaller = resolve_caller(&mut persistence, &req.caller_uid)?;

    let request: CreateCaseRequest = CreateCaseRequest {
        caratula_tentativa: req.caratula_tentativa,
        specialty_id: req.specialty_id,
        objeto: req.objeto,
        resumen: req.resumen,
        jurisdiccion: req.jurisdiccion,
        brought_by_participates: req.brought_by_participates,
        assignment_mode: req.assignment_mode,
        direct_assignees_uids: req.direct_assignees_uids,
        direct_justification: req.direct_justification,
    };

    let response: CreateCaseResponse = create_case(&mut persistence, request, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/cases/{case_id}/invites/{invite_id}/respond` endpoint.
///
/// Applies the caller's decision and, after the transaction commits,
/// attempts to notify the case creator. A failed send is reported in the
/// response data and never fails the call.
async fn handle_respond_to_invite(
    AxumState(app_state): AxumState<AppState>,
    Path((case_id, invite_id)): Path<(i64, i64)>,
    Json(req): Json<RespondToInviteApiRequest>,
) -> Result<Json<RespondToInviteResponse>, HttpError> {
    info!(
        caller_uid = %req.caller_uid,
        case_id,
        invite_id,
        decision = %req.decision,
        "Handling respond_to_invite request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let caller: AuthenticatedCaller = resolve_caller(&mut persistence, &req.caller_uid)?;

    let request: RespondToInviteRequest = RespondToInviteRequest {
        decision: req.decision,
    };
    let outcome = respond_to_invite(&mut persistence, case_id, invite_id, &request, &caller)?;
    drop(persistence);

    let mut response: RespondToInviteResponse = outcome.response;
    if let Some(notification) = outcome.notification {
        match app_state
            .mailer
            .send(
                &notification.recipient_email,
                &notification.subject,
                &notification.body,
            )
            .await
        {
            Ok(()) => response.email_sent = true,
            Err(err) => {
                warn!(error = %err, case_id, "Decision notification not delivered");
                response.email_error = Some(err.to_string());
            }
        }
    }

    Ok(Json(response))
}

/// Handler for GET `/cases/{case_id}` endpoint.
///
/// Returns a case with its confirmed set and invitations.
async fn handle_get_case(
    AxumState(app_state): AxumState<AppState>,
    Path(case_id): Path<i64>,
    Query(query): Query<CallerQuery>,
) -> Result<Json<GetCaseResponse>, HttpError> {
    info!(caller_uid = %query.caller_uid, case_id, "Handling get_case request");

    let mut persistence = app_state.persistence.lock().await;
    resolve_caller(&mut persistence, &query.caller_uid)?;

    let response: GetCaseResponse = get_case(&mut persistence, case_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /cases/mine endpoint.
///
/// Lists cases the caller created or is confirmed on, newest first.
async fn handle_list_my_cases(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CallerQuery>,
) -> Result<Json<ListCasesResponse>, HttpError> {
    info!(caller_uid = %query.caller_uid, "Handling list_my_cases request");

    let mut persistence = app_state.persistence.lock().await;
    let caller: AuthenticatedCaller = resolve_caller(&mut persistence, &query.caller_uid)?;

    let response: ListCasesResponse = list_my_cases(&mut persistence, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /invites/pending endpoint.
///
/// Lists pending invitations addressed to the caller, newest first.
async fn handle_list_pending_invites(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CallerQuery>,
) -> Result<Json<ListPendingInvitesResponse>, HttpError> {
    info!(caller_uid = %query.caller_uid, "Handling list_pending_invites request");

    let mut persistence = app_state.persistence.lock().await;
    let caller: AuthenticatedCaller = resolve_caller(&mut persistence, &query.caller_uid)?;

    let response: ListPendingInvitesResponse = list_pending_invites(&mut persistence, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /login endpoint.
///
/// Verifies credentials and returns the lawyer's profile.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(uid = %req.uid, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /admin/lawyers endpoint.
///
/// Creates a lawyer account. Admin only.
async fn handle_create_lawyer(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateLawyerApiRequest>,
) -> Result<Json<CreateLawyerResponse>, HttpError> {
    info!(
        caller_uid = %req.caller_uid,
        uid = %req.uid,
        "Handling create_lawyer request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let caller: AuthenticatedCaller = resolve_caller(&mut persistence, &req.caller_uid)?;

    let request: CreateLawyerRequest = CreateLawyerRequest {
        uid: req.uid,
        email: req.email,
        password: req.password,
        role: req.role,
        is_practicing: req.is_practicing,
        specialties: req.specialties,
    };

    let response: CreateLawyerResponse = create_lawyer(&mut persistence, request, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/admin/lawyers/{uid}` endpoint.
///
/// Updates a lawyer's profile. Admin only.
async fn handle_update_lawyer(
    AxumState(app_state): AxumState<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<UpdateLawyerApiRequest>,
) -> Result<Json<UpdateLawyerResponse>, HttpError> {
    info!(caller_uid = %req.caller_uid, uid = %uid, "Handling update_lawyer request");

    let mut persistence = app_state.persistence.lock().await;
    let caller: AuthenticatedCaller = resolve_caller(&mut persistence, &req.caller_uid)?;

    let request: UpdateLawyerRequest = UpdateLawyerRequest {
        email: req.email,
        is_practicing: req.is_practicing,
        specialties: req.specialties,
    };

    let response: UpdateLawyerResponse = update_lawyer(&mut persistence, &uid, request, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/admin/lawyers/{uid}/password` endpoint.
///
/// Sets a lawyer's password. Admin only.
async fn handle_set_lawyer_password(
    AxumState(app_state): AxumState<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<SetPasswordApiRequest>,
) -> Result<Json<SetPasswordResponse>, HttpError> {
    info!(caller_uid = %req.caller_uid, uid = %uid, "Handling set_lawyer_password request");

    let mut persistence = app_state.persistence.lock().await;
    let caller: AuthenticatedCaller = resolve_caller(&mut persistence, &req.caller_uid)?;

    let request: SetPasswordRequest = SetPasswordRequest {
        password: req.password,
    };

    let response: SetPasswordResponse =
        set_lawyer_password(&mut persistence, &uid, &request, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /admin/lawyers endpoint.
///
/// Lists every account in the directory. Admin only.
async fn handle_list_lawyers(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CallerQuery>,
) -> Result<Json<ListLawyersResponse>, HttpError> {
    info!(caller_uid = %query.caller_uid, "Handling list_lawyers request");

    let mut persistence = app_state.persistence.lock().await;
    let caller: AuthenticatedCaller = resolve_caller(&mut persistence, &query.caller_uid)?;

    let response: ListLawyersResponse = list_lawyers(&mut persistence, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /lawyers/practicing endpoint.
///
/// Lists practicing lawyers for the direct-assignment picker.
async fn handle_list_practicing_lawyers(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CallerQuery>,
) -> Result<Json<ListLawyersResponse>, HttpError> {
    info!(caller_uid = %query.caller_uid, "Handling list_practicing_lawyers request");

    let mut persistence = app_state.persistence.lock().await;
    resolve_caller(&mut persistence, &query.caller_uid)?;

    let response: ListLawyersResponse = list_practicing_lawyers(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /specialties endpoint.
///
/// Creates a specialty. Admin only.
async fn handle_create_specialty(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateSpecialtyApiRequest>,
) -> Result<Json<CreateSpecialtyResponse>, HttpError> {
    info!(
        caller_uid = %req.caller_uid,
        specialty_id = %req.specialty_id,
        "Handling create_specialty request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let caller: AuthenticatedCaller = resolve_caller(&mut persistence, &req.caller_uid)?;

    let request: CreateSpecialtyRequest = CreateSpecialtyRequest {
        specialty_id: req.specialty_id,
        name: req.name,
    };

    let response: CreateSpecialtyResponse = create_specialty(&mut persistence, &request, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /specialties endpoint.
///
/// Lists the specialty catalog.
async fn handle_list_specialties(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListSpecialtiesResponse>, HttpError> {
    info!("Handling list_specialties request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListSpecialtiesResponse = list_specialties(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /health endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/cases", post(handle_create_case))
        .route("/cases/mine", get(handle_list_my_cases))
        .route("/cases/{case_id}", get(handle_get_case))
        .route(
            "/cases/{case_id}/invites/{invite_id}/respond",
            post(handle_respond_to_invite),
        )
        .route("/invites/pending", get(handle_list_pending_invites))
        .route("/admin/lawyers", post(handle_create_lawyer))
        .route("/admin/lawyers", get(handle_list_lawyers))
        .route("/admin/lawyers/{uid}", put(handle_update_lawyer))
        .route(
            "/admin/lawyers/{uid}/password",
            put(handle_set_lawyer_password),
        )
        .route("/lawyers/practicing", get(handle_list_practicing_lawyers))
        .route("/specialties", post(handle_create_specialty))
        .route("/specialties", get(handle_list_specialties))
        .route("/health", get(handle_health))
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

    info!("Initializing Causalex Server");

    // Initialize persistence (MySQL, file-based, or in-memory based on CLI arguments)
    let persistence: Persistence = if let Some(mysql_url) = &args.mysql_url {
        info!("Using MySQL database");
        Persistence::new_with_mysql(mysql_url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    // Initialize the mailer from the environment
    let mailer: Arc<dyn Mailer> = match SendgridMailer::from_env() {
        Some(mailer) => {
            info!("Decision notifications enabled");
            Arc::new(mailer)
        }
        None => {
            info!("Decision notifications disabled: no mail credentials configured");
            Arc::new(DisabledMailer)
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        mailer,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
