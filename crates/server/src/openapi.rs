use axum::Json;
use utoipa::OpenApi;

use shared_types::{
    AddNotificationItemRequest, AddSessionCaseRequest, AppError, AppErrorKind,
    AssignDistributionRequest, CaseAuthorityInput, CaseAuthorityResponse, CaseResponse,
    ConcludeSessionCaseRequest, CreateCaseRequest, CreateMemberRequest,
    CreateNotificationListRequest, CreateSessionRequest, CreateVoteTemplateRequest,
    DecisionResponse, DistributionResponse, EmitDecisionRequest, MemberResponse,
    NotificationAttemptResponse, NotificationItemResponse, NotificationListResponse,
    NoticeSeedResponse, PublicationResponse, PublishDecisionRequest, RecordAttemptRequest,
    RecordVoteRequest, SessionCaseResponse, SessionProgressResponse, SessionResponse,
    SetAttendanceRequest, UpdateSessionCaseStatusRequest, UpdateSessionStatusRequest,
    UpdateVoteTextRequest, VoteResponse, VoteTemplateResponse,
};

/// OpenAPI document for the judgment core API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health::health_check,
        crate::rest::member::create_member,
        crate::rest::member::list_members,
        crate::rest::vote::create_vote_template,
        crate::rest::vote::list_vote_templates,
        crate::rest::case::create_case,
        crate::rest::case::list_cases,
        crate::rest::case::get_case,
        crate::rest::session::create_session,
        crate::rest::session::list_sessions,
        crate::rest::session::get_session,
        crate::rest::session::update_session_status,
        crate::rest::session::set_attendance,
        crate::rest::session::add_session_case,
        crate::rest::session::list_agenda,
        crate::rest::session::get_progress,
        crate::rest::session::get_session_case,
        crate::rest::session::remove_session_case,
        crate::rest::session::update_session_case_status,
        crate::rest::session::conclude_session_case,
        crate::rest::distribution::assign_distribution,
        crate::rest::distribution::get_distribution,
        crate::rest::vote::record_vote,
        crate::rest::vote::list_votes,
        crate::rest::vote::update_vote_text,
        crate::rest::decision::emit_decision,
        crate::rest::decision::get_case_decision,
        crate::rest::decision::get_decision,
        crate::rest::decision::publish_decision,
        crate::rest::notification::list_eligible,
        crate::rest::notification::create_notification_list,
        crate::rest::notification::list_notification_lists,
        crate::rest::notification::get_notification_list,
        crate::rest::notification::add_notification_item,
        crate::rest::notification::list_notification_items,
        crate::rest::notification::record_attempt,
        crate::rest::notification::list_notification_attempts,
        crate::rest::notification::confirm_attempt,
        crate::rest::notification::expire_attempt,
        crate::rest::notification::fail_attempt,
    ),
    components(schemas(
        AppError,
        AppErrorKind,
        CreateMemberRequest,
        MemberResponse,
        CaseAuthorityInput,
        CaseAuthorityResponse,
        CreateCaseRequest,
        CaseResponse,
        CreateSessionRequest,
        SessionResponse,
        UpdateSessionStatusRequest,
        SetAttendanceRequest,
        AddSessionCaseRequest,
        SessionCaseResponse,
        SessionProgressResponse,
        UpdateSessionCaseStatusRequest,
        ConcludeSessionCaseRequest,
        AssignDistributionRequest,
        DistributionResponse,
        CreateVoteTemplateRequest,
        VoteTemplateResponse,
        RecordVoteRequest,
        UpdateVoteTextRequest,
        VoteResponse,
        EmitDecisionRequest,
        PublishDecisionRequest,
        PublicationResponse,
        DecisionResponse,
        CreateNotificationListRequest,
        NotificationListResponse,
        AddNotificationItemRequest,
        NotificationItemResponse,
        RecordAttemptRequest,
        NotificationAttemptResponse,
        NoticeSeedResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "members", description = "Member directory"),
        (name = "cases", description = "Case registry"),
        (name = "sessions", description = "Session scheduling and agenda"),
        (name = "distributions", description = "Rapporteur and reviewer assignment"),
        (name = "votes", description = "Vote recording and templates"),
        (name = "decisions", description = "Decision documents and publications"),
        (name = "notifications", description = "Notification tracking"),
    )
)]
pub struct ApiDoc;

/// GET /api/openapi.json
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
