use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_types::{
    AppError, CreateVoteTemplateRequest, RecordVoteRequest, UpdateVoteTextRequest, VoteResponse,
    VoteTemplateResponse,
};

use crate::db::Db;

// ── Query params ────────────────────────────────────────────────────

#[derive(Debug, Default, serde::Deserialize, utoipa::IntoParams)]
pub struct TemplateListQuery {
    pub kind: Option<String>,
}

// ── Vote templates ─────────────────────────────────────────────────

/// POST /api/vote-templates
#[utoipa::path(
    post,
    path = "/api/vote-templates",
    request_body = CreateVoteTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = VoteTemplateResponse),
        (status = 400, description = "Invalid request", body = AppError)
    ),
    tag = "votes"
)]
pub async fn create_vote_template(
    State(db): State<Db>,
    Json(body): Json<CreateVoteTemplateRequest>,
) -> Result<(StatusCode, Json<VoteTemplateResponse>), AppError> {
    let template = crate::repo::vote::create_template(&db, body)?;
    Ok((StatusCode::CREATED, Json(template.into())))
}

/// GET /api/vote-templates
#[utoipa::path(
    get,
    path = "/api/vote-templates",
    params(TemplateListQuery),
    responses(
        (status = 200, description = "List of templates", body = Vec<VoteTemplateResponse>)
    ),
    tag = "votes"
)]
pub async fn list_vote_templates(
    State(db): State<Db>,
    Query(query): Query<TemplateListQuery>,
) -> Result<Json<Vec<VoteTemplateResponse>>, AppError> {
    let templates = crate::repo::vote::list_templates(&db, query.kind.as_deref())?;
    Ok(Json(templates.into_iter().map(Into::into).collect()))
}

// ── Votes ──────────────────────────────────────────────────────────

/// POST /api/session-cases/{id}/votes
#[utoipa::path(
    post,
    path = "/api/session-cases/{id}/votes",
    params(("id" = String, Path, description = "Session case id")),
    request_body = RecordVoteRequest,
    responses(
        (status = 201, description = "Vote recorded", body = VoteResponse),
        (status = 409, description = "Duplicate vote or session closed", body = AppError),
        (status = 422, description = "Member not distributed or incomplete rationale", body = AppError)
    ),
    tag = "votes"
)]
pub async fn record_vote(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<RecordVoteRequest>,
) -> Result<(StatusCode, Json<VoteResponse>), AppError> {
    let vote = crate::repo::vote::record(&db, id, &body)?;
    Ok((StatusCode::CREATED, Json(vote.into())))
}

/// GET /api/session-cases/{id}/votes
#[utoipa::path(
    get,
    path = "/api/session-cases/{id}/votes",
    params(("id" = String, Path, description = "Session case id")),
    responses(
        (status = 200, description = "Votes on this case", body = Vec<VoteResponse>)
    ),
    tag = "votes"
)]
pub async fn list_votes(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<VoteResponse>>, AppError> {
    let votes = crate::repo::vote::list_by_session_case(&db, id)?;
    Ok(Json(votes.into_iter().map(Into::into).collect()))
}

/// PATCH /api/session-cases/{id}/votes/{member_id}
#[utoipa::path(
    patch,
    path = "/api/session-cases/{id}/votes/{member_id}",
    params(
        ("id" = String, Path, description = "Session case id"),
        ("member_id" = String, Path, description = "Voting member id")
    ),
    request_body = UpdateVoteTextRequest,
    responses(
        (status = 200, description = "Vote text updated", body = VoteResponse),
        (status = 409, description = "Session closed", body = AppError)
    ),
    tag = "votes"
)]
pub async fn update_vote_text(
    State(db): State<Db>,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateVoteTextRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    let vote = crate::repo::vote::update_text(&db, id, member_id, &body)?;
    Ok(Json(vote.into()))
}
