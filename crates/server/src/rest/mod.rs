pub mod case;
pub mod decision;
pub mod distribution;
pub mod member;
pub mod notification;
pub mod session;
pub mod vote;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::db::AppState;

/// Build the REST API router for the judgment core.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Member directory
        .route("/api/members", get(member::list_members).post(member::create_member))
        // Vote templates
        .route(
            "/api/vote-templates",
            get(vote::list_vote_templates).post(vote::create_vote_template),
        )
        // Cases
        .route("/api/cases", get(case::list_cases).post(case::create_case))
        .route("/api/cases/{id}", get(case::get_case))
        .route(
            "/api/cases/{id}/decision",
            get(decision::get_case_decision).post(decision::emit_decision),
        )
        // Sessions
        .route("/api/sessions", get(session::list_sessions).post(session::create_session))
        .route("/api/sessions/{id}", get(session::get_session))
        .route("/api/sessions/{id}/status", patch(session::update_session_status))
        .route("/api/sessions/{id}/attendance", put(session::set_attendance))
        .route(
            "/api/sessions/{id}/agenda",
            get(session::list_agenda).post(session::add_session_case),
        )
        .route("/api/sessions/{id}/progress", get(session::get_progress))
        // Session cases
        .route(
            "/api/session-cases/{id}",
            get(session::get_session_case).delete(session::remove_session_case),
        )
        .route(
            "/api/session-cases/{id}/status",
            patch(session::update_session_case_status),
        )
        .route(
            "/api/session-cases/{id}/conclusion",
            post(session::conclude_session_case),
        )
        .route(
            "/api/session-cases/{id}/distribution",
            get(distribution::get_distribution).put(distribution::assign_distribution),
        )
        .route(
            "/api/session-cases/{id}/votes",
            get(vote::list_votes).post(vote::record_vote),
        )
        .route(
            "/api/session-cases/{id}/votes/{member_id}",
            patch(vote::update_vote_text),
        )
        // Decisions
        .route("/api/decisions/{id}", get(decision::get_decision))
        .route(
            "/api/decisions/{id}/publications",
            post(decision::publish_decision),
        )
        // Notification tracker
        .route(
            "/api/notifications/eligible",
            get(notification::list_eligible),
        )
        .route(
            "/api/notification-lists",
            get(notification::list_notification_lists).post(notification::create_notification_list),
        )
        .route(
            "/api/notification-lists/{id}",
            get(notification::get_notification_list),
        )
        .route(
            "/api/notification-lists/{id}/items",
            get(notification::list_notification_items).post(notification::add_notification_item),
        )
        .route(
            "/api/notification-items/{id}/attempts",
            get(notification::list_notification_attempts).post(notification::record_attempt),
        )
        .route(
            "/api/notification-attempts/{id}/confirm",
            post(notification::confirm_attempt),
        )
        .route(
            "/api/notification-attempts/{id}/expire",
            post(notification::expire_attempt),
        )
        .route(
            "/api/notification-attempts/{id}/fail",
            post(notification::fail_attempt),
        )
}

/// Full application router: API, health and OpenAPI document.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api_router())
        .route("/health", get(crate::health::health_check))
        .route("/api/openapi.json", get(crate::openapi::serve_openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
