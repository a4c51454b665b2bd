use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_types::{AppError, DecisionResponse, EmitDecisionRequest, PublishDecisionRequest};

use crate::db::Db;

/// POST /api/cases/{id}/decision
#[utoipa::path(
    post,
    path = "/api/cases/{id}/decision",
    params(("id" = String, Path, description = "Case id")),
    request_body = EmitDecisionRequest,
    responses(
        (status = 201, description = "Decision emitted", body = DecisionResponse),
        (status = 409, description = "Case not judged or decision exists", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn emit_decision(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<EmitDecisionRequest>,
) -> Result<(StatusCode, Json<DecisionResponse>), AppError> {
    let decision = crate::repo::decision::emit(&db, id, &body)?;
    Ok((StatusCode::CREATED, Json(decision.into())))
}

/// GET /api/cases/{id}/decision
#[utoipa::path(
    get,
    path = "/api/cases/{id}/decision",
    params(("id" = String, Path, description = "Case id")),
    responses(
        (status = 200, description = "Decision found", body = DecisionResponse),
        (status = 404, description = "No decision for this case", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn get_case_decision(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<DecisionResponse>, AppError> {
    let decision = crate::repo::decision::get_by_case(&db, id)?;
    Ok(Json(decision.into()))
}

/// GET /api/decisions/{id}
#[utoipa::path(
    get,
    path = "/api/decisions/{id}",
    params(("id" = String, Path, description = "Decision id")),
    responses(
        (status = 200, description = "Decision found", body = DecisionResponse),
        (status = 404, description = "Decision not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn get_decision(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<DecisionResponse>, AppError> {
    let decision = crate::repo::decision::get(&db, id)?;
    Ok(Json(decision.into()))
}

/// POST /api/decisions/{id}/publications
#[utoipa::path(
    post,
    path = "/api/decisions/{id}/publications",
    params(("id" = String, Path, description = "Decision id")),
    request_body = PublishDecisionRequest,
    responses(
        (status = 201, description = "Publication appended", body = DecisionResponse),
        (status = 404, description = "Decision not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn publish_decision(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<PublishDecisionRequest>,
) -> Result<(StatusCode, Json<DecisionResponse>), AppError> {
    let decision = crate::repo::decision::publish(&db, id, &body)?;
    Ok((StatusCode::CREATED, Json(decision.into())))
}
