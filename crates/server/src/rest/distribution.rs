use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared_types::{AppError, AssignDistributionRequest, DistributionResponse};

use crate::db::Db;

/// PUT /api/session-cases/{id}/distribution
#[utoipa::path(
    put,
    path = "/api/session-cases/{id}/distribution",
    params(("id" = String, Path, description = "Session case id")),
    request_body = AssignDistributionRequest,
    responses(
        (status = 200, description = "Distribution assigned", body = DistributionResponse),
        (status = 409, description = "Authority conflict or locked distribution", body = AppError)
    ),
    tag = "distributions"
)]
pub async fn assign_distribution(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignDistributionRequest>,
) -> Result<Json<DistributionResponse>, AppError> {
    let distribution = crate::repo::distribution::assign(&db, id, &body)?;
    Ok(Json(distribution.into()))
}

/// GET /api/session-cases/{id}/distribution
#[utoipa::path(
    get,
    path = "/api/session-cases/{id}/distribution",
    params(("id" = String, Path, description = "Session case id")),
    responses(
        (status = 200, description = "Distribution found", body = DistributionResponse),
        (status = 404, description = "No distribution", body = AppError)
    ),
    tag = "distributions"
)]
pub async fn get_distribution(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<DistributionResponse>, AppError> {
    let distribution = crate::repo::distribution::get(&db, id)?;
    Ok(Json(distribution.into()))
}
