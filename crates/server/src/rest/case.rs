use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_types::{AppError, CaseListParams, CaseResponse, CreateCaseRequest};

use crate::db::Db;

/// POST /api/cases
#[utoipa::path(
    post,
    path = "/api/cases",
    request_body = CreateCaseRequest,
    responses(
        (status = 201, description = "Case intaken", body = CaseResponse),
        (status = 400, description = "Invalid request", body = AppError)
    ),
    tag = "cases"
)]
pub async fn create_case(
    State(db): State<Db>,
    Json(body): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<CaseResponse>), AppError> {
    let case = crate::repo::case::create(&db, body)?;
    Ok((StatusCode::CREATED, Json(case.into())))
}

/// GET /api/cases
#[utoipa::path(
    get,
    path = "/api/cases",
    params(CaseListParams),
    responses(
        (status = 200, description = "List of cases", body = Vec<CaseResponse>)
    ),
    tag = "cases"
)]
pub async fn list_cases(
    State(db): State<Db>,
    Query(params): Query<CaseListParams>,
) -> Result<Json<Vec<CaseResponse>>, AppError> {
    let cases = crate::repo::case::list(&db, &params)?;
    Ok(Json(cases.into_iter().map(Into::into).collect()))
}

/// GET /api/cases/{id}
#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(("id" = String, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case found", body = CaseResponse),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn get_case(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<CaseResponse>, AppError> {
    let case = crate::repo::case::get(&db, id)?;
    Ok(Json(case.into()))
}
