use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use shared_types::{AppError, CreateMemberRequest, MemberListParams, MemberResponse};

use crate::db::Db;

/// POST /api/members
#[utoipa::path(
    post,
    path = "/api/members",
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member registered", body = MemberResponse),
        (status = 422, description = "Invalid request", body = AppError)
    ),
    tag = "members"
)]
pub async fn create_member(
    State(db): State<Db>,
    Json(body): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), AppError> {
    body.validate()?;
    let member = crate::repo::member::create(&db, body)?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

/// GET /api/members
#[utoipa::path(
    get,
    path = "/api/members",
    params(MemberListParams),
    responses(
        (status = 200, description = "List of members", body = Vec<MemberResponse>)
    ),
    tag = "members"
)]
pub async fn list_members(
    State(db): State<Db>,
    Query(params): Query<MemberListParams>,
) -> Json<Vec<MemberResponse>> {
    let members = crate::repo::member::list(&db, params.active);
    Json(members.into_iter().map(Into::into).collect())
}
