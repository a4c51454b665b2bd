use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_types::{
    AddSessionCaseRequest, AppError, ConcludeSessionCaseRequest, CreateSessionRequest,
    SessionCaseResponse, SessionProgressResponse, SessionResponse, SetAttendanceRequest,
    UpdateSessionCaseStatusRequest, UpdateSessionStatusRequest,
};

use crate::db::Db;

/// POST /api/sessions
#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session scheduled", body = SessionResponse),
        (status = 400, description = "Invalid request", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn create_session(
    State(db): State<Db>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = crate::repo::session::create(&db, body)?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// GET /api/sessions
#[utoipa::path(
    get,
    path = "/api/sessions",
    responses(
        (status = 200, description = "List of sessions", body = Vec<SessionResponse>)
    ),
    tag = "sessions"
)]
pub async fn list_sessions(State(db): State<Db>) -> Json<Vec<SessionResponse>> {
    let sessions = crate::repo::session::list(&db);
    Json(sessions.into_iter().map(Into::into).collect())
}

/// GET /api/sessions/{id}
#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session found", body = SessionResponse),
        (status = 404, description = "Session not found", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = crate::repo::session::get(&db, id)?;
    Ok(Json(session.into()))
}

/// PATCH /api/sessions/{id}/status
#[utoipa::path(
    patch,
    path = "/api/sessions/{id}/status",
    params(("id" = String, Path, description = "Session id")),
    request_body = UpdateSessionStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = SessionResponse),
        (status = 409, description = "Illegal transition", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn update_session_status(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSessionStatusRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = crate::repo::session::transition_status(&db, id, &body)?;
    Ok(Json(session.into()))
}

/// PUT /api/sessions/{id}/attendance
#[utoipa::path(
    put,
    path = "/api/sessions/{id}/attendance",
    params(("id" = String, Path, description = "Session id")),
    request_body = SetAttendanceRequest,
    responses(
        (status = 200, description = "Attendance recorded", body = SessionResponse),
        (status = 409, description = "Session closed", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn set_attendance(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetAttendanceRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = crate::repo::session::set_attendance(&db, id, &body.member_ids)?;
    Ok(Json(session.into()))
}

/// POST /api/sessions/{id}/agenda
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/agenda",
    params(("id" = String, Path, description = "Session id")),
    request_body = AddSessionCaseRequest,
    responses(
        (status = 201, description = "Case placed on agenda", body = SessionCaseResponse),
        (status = 409, description = "Case already on agenda or session closed", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn add_session_case(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddSessionCaseRequest>,
) -> Result<(StatusCode, Json<SessionCaseResponse>), AppError> {
    let case_id = Uuid::parse_str(&body.case_id)
        .map_err(|_| AppError::bad_request("Invalid case_id UUID"))?;
    let session_case = crate::repo::session::add_case(&db, id, case_id)?;
    Ok((StatusCode::CREATED, Json(session_case.into())))
}

/// GET /api/sessions/{id}/agenda
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/agenda",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Ordered agenda", body = Vec<SessionCaseResponse>)
    ),
    tag = "sessions"
)]
pub async fn list_agenda(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SessionCaseResponse>>, AppError> {
    let agenda = crate::repo::session::list_agenda(&db, id)?;
    Ok(Json(agenda.into_iter().map(Into::into).collect()))
}

/// GET /api/sessions/{id}/progress
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/progress",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Derived progress", body = SessionProgressResponse)
    ),
    tag = "sessions"
)]
pub async fn get_progress(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionProgressResponse>, AppError> {
    Ok(Json(crate::repo::session::progress(&db, id)?))
}

/// GET /api/session-cases/{id}
#[utoipa::path(
    get,
    path = "/api/session-cases/{id}",
    params(("id" = String, Path, description = "Session case id")),
    responses(
        (status = 200, description = "Session case found", body = SessionCaseResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn get_session_case(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionCaseResponse>, AppError> {
    let session_case = crate::repo::session::get_session_case(&db, id)?;
    Ok(Json(session_case.into()))
}

/// DELETE /api/session-cases/{id}
#[utoipa::path(
    delete,
    path = "/api/session-cases/{id}",
    params(("id" = String, Path, description = "Session case id")),
    responses(
        (status = 204, description = "Removed from agenda"),
        (status = 409, description = "Votes already recorded", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn remove_session_case(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    crate::repo::session::remove_case(&db, id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/session-cases/{id}/status
#[utoipa::path(
    patch,
    path = "/api/session-cases/{id}/status",
    params(("id" = String, Path, description = "Session case id")),
    request_body = UpdateSessionCaseStatusRequest,
    responses(
        (status = 200, description = "Status overridden", body = SessionCaseResponse),
        (status = 422, description = "Missing override cause", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn update_session_case_status(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSessionCaseStatusRequest>,
) -> Result<Json<SessionCaseResponse>, AppError> {
    let session_case = crate::repo::session::update_session_case_status(&db, id, &body)?;
    Ok(Json(session_case.into()))
}

/// POST /api/session-cases/{id}/conclusion
#[utoipa::path(
    post,
    path = "/api/session-cases/{id}/conclusion",
    params(("id" = String, Path, description = "Session case id")),
    request_body = ConcludeSessionCaseRequest,
    responses(
        (status = 200, description = "Case judged", body = SessionCaseResponse),
        (status = 409, description = "Vote set unresolved", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn conclude_session_case(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<ConcludeSessionCaseRequest>,
) -> Result<Json<SessionCaseResponse>, AppError> {
    let session_case = crate::repo::session::conclude_session_case(&db, id, &body)?;
    Ok(Json(session_case.into()))
}
