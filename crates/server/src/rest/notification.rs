use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_types::{
    AddNotificationItemRequest, AppError, CreateNotificationListRequest,
    NotificationAttemptResponse, NotificationItemResponse, NotificationListResponse,
    NoticeSeedResponse, RecordAttemptRequest,
};

use crate::db::Db;

/// GET /api/notifications/eligible
#[utoipa::path(
    get,
    path = "/api/notifications/eligible",
    responses(
        (status = 200, description = "Cases eligible for formal notice", body = Vec<NoticeSeedResponse>)
    ),
    tag = "notifications"
)]
pub async fn list_eligible(State(db): State<Db>) -> Json<Vec<NoticeSeedResponse>> {
    let seeds = crate::repo::notification::list_eligible(&db);
    Json(seeds.into_iter().map(Into::into).collect())
}

/// POST /api/notification-lists
#[utoipa::path(
    post,
    path = "/api/notification-lists",
    request_body = CreateNotificationListRequest,
    responses(
        (status = 201, description = "List opened", body = NotificationListResponse),
        (status = 400, description = "Invalid request", body = AppError)
    ),
    tag = "notifications"
)]
pub async fn create_notification_list(
    State(db): State<Db>,
    Json(body): Json<CreateNotificationListRequest>,
) -> Result<(StatusCode, Json<NotificationListResponse>), AppError> {
    let list = crate::repo::notification::create_list(&db, body)?;
    Ok((StatusCode::CREATED, Json(list.into())))
}

/// GET /api/notification-lists
#[utoipa::path(
    get,
    path = "/api/notification-lists",
    responses(
        (status = 200, description = "All lists", body = Vec<NotificationListResponse>)
    ),
    tag = "notifications"
)]
pub async fn list_notification_lists(State(db): State<Db>) -> Json<Vec<NotificationListResponse>> {
    let lists = crate::repo::notification::list_lists(&db);
    Json(lists.into_iter().map(Into::into).collect())
}

/// GET /api/notification-lists/{id}
#[utoipa::path(
    get,
    path = "/api/notification-lists/{id}",
    params(("id" = String, Path, description = "List id")),
    responses(
        (status = 200, description = "List found", body = NotificationListResponse),
        (status = 404, description = "List not found", body = AppError)
    ),
    tag = "notifications"
)]
pub async fn get_notification_list(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationListResponse>, AppError> {
    let list = crate::repo::notification::get_list(&db, id)?;
    Ok(Json(list.into()))
}

/// POST /api/notification-lists/{id}/items
#[utoipa::path(
    post,
    path = "/api/notification-lists/{id}/items",
    params(("id" = String, Path, description = "List id")),
    request_body = AddNotificationItemRequest,
    responses(
        (status = 201, description = "Case added to list", body = NotificationItemResponse),
        (status = 409, description = "Case already on list", body = AppError)
    ),
    tag = "notifications"
)]
pub async fn add_notification_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddNotificationItemRequest>,
) -> Result<(StatusCode, Json<NotificationItemResponse>), AppError> {
    let item = crate::repo::notification::add_item(&db, id, &body)?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// GET /api/notification-lists/{id}/items
#[utoipa::path(
    get,
    path = "/api/notification-lists/{id}/items",
    params(("id" = String, Path, description = "List id")),
    responses(
        (status = 200, description = "Items on the list", body = Vec<NotificationItemResponse>)
    ),
    tag = "notifications"
)]
pub async fn list_notification_items(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<NotificationItemResponse>>, AppError> {
    let items = crate::repo::notification::list_items(&db, id)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// POST /api/notification-items/{id}/attempts
#[utoipa::path(
    post,
    path = "/api/notification-items/{id}/attempts",
    params(("id" = String, Path, description = "Item id")),
    request_body = RecordAttemptRequest,
    responses(
        (status = 201, description = "Attempt registered", body = NotificationAttemptResponse),
        (status = 400, description = "Invalid channel", body = AppError)
    ),
    tag = "notifications"
)]
pub async fn record_attempt(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(body): Json<RecordAttemptRequest>,
) -> Result<(StatusCode, Json<NotificationAttemptResponse>), AppError> {
    let attempt = crate::repo::notification::record_attempt(&db, id, &body)?;
    Ok((StatusCode::CREATED, Json(attempt.into())))
}

/// GET /api/notification-items/{id}/attempts
#[utoipa::path(
    get,
    path = "/api/notification-items/{id}/attempts",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "Attempts for the item", body = Vec<NotificationAttemptResponse>)
    ),
    tag = "notifications"
)]
pub async fn list_notification_attempts(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<NotificationAttemptResponse>>, AppError> {
    let attempts = crate::repo::notification::list_attempts(&db, id)?;
    Ok(Json(attempts.into_iter().map(Into::into).collect()))
}

/// POST /api/notification-attempts/{id}/confirm
#[utoipa::path(
    post,
    path = "/api/notification-attempts/{id}/confirm",
    params(("id" = String, Path, description = "Attempt id")),
    responses(
        (status = 200, description = "Attempt confirmed", body = NotificationAttemptResponse),
        (status = 409, description = "Attempt already resolved", body = AppError)
    ),
    tag = "notifications"
)]
pub async fn confirm_attempt(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationAttemptResponse>, AppError> {
    let attempt = crate::repo::notification::confirm_attempt(&db, id)?;
    Ok(Json(attempt.into()))
}

/// POST /api/notification-attempts/{id}/expire
#[utoipa::path(
    post,
    path = "/api/notification-attempts/{id}/expire",
    params(("id" = String, Path, description = "Attempt id")),
    responses(
        (status = 200, description = "Attempt expired", body = NotificationAttemptResponse),
        (status = 400, description = "No deadline or deadline not passed", body = AppError)
    ),
    tag = "notifications"
)]
pub async fn expire_attempt(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationAttemptResponse>, AppError> {
    let attempt = crate::repo::notification::expire_attempt(&db, id)?;
    Ok(Json(attempt.into()))
}

/// POST /api/notification-attempts/{id}/fail
#[utoipa::path(
    post,
    path = "/api/notification-attempts/{id}/fail",
    params(("id" = String, Path, description = "Attempt id")),
    responses(
        (status = 200, description = "Attempt failed", body = NotificationAttemptResponse),
        (status = 409, description = "Attempt already resolved", body = AppError)
    ),
    tag = "notifications"
)]
pub async fn fail_attempt(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationAttemptResponse>, AppError> {
    let attempt = crate::repo::notification::fail_attempt(&db, id)?;
    Ok(Json(attempt.into()))
}
