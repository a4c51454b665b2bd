use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use server::db::AppState;
use tower::ServiceExt;

/// Build a router over a fresh, empty store. Every test gets its own
/// state, so tests never interfere with each other.
pub fn test_app() -> Router {
    server::rest::app(AppState::new())
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    request(app, "GET", uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    request(app, "POST", uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    request(app, "PUT", uri, Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    request(app, "PATCH", uri, Some(body)).await
}

pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, String) {
    request(app, "POST", uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, String) {
    request(app, "DELETE", uri, None).await
}

// ── Scenario helpers ───────────────────────────────────────────────

/// Register a member and return its id.
pub async fn create_member(app: &Router, name: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/members",
        &serde_json::json!({ "name": name }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create member failed: {body}");
    let member: shared_types::MemberResponse = serde_json::from_str(&body).unwrap();
    member.id
}

/// Intake a case with the given authority names (unlinked) and return its id.
pub async fn create_case_with_authorities(app: &Router, authorities: &[&str]) -> String {
    let authority_inputs: Vec<serde_json::Value> = authorities
        .iter()
        .map(|name| serde_json::json!({ "name": name }))
        .collect();
    let (status, body) = post_json(
        app,
        "/api/cases",
        &serde_json::json!({ "classification": "iptu", "authorities": authority_inputs })
            .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create case failed: {body}");
    let case: shared_types::CaseResponse = serde_json::from_str(&body).unwrap();
    case.id
}

/// Schedule a session, record attendance and drive it to `in_progress`.
pub async fn create_running_session(app: &Router, attending: &[&str]) -> String {
    let (status, body) = post_json(
        app,
        "/api/sessions",
        &serde_json::json!({ "ordinal_type": "ordinary", "date": "2026-08-07" }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create session failed: {body}");
    let session: shared_types::SessionResponse = serde_json::from_str(&body).unwrap();

    let (status, body) = put_json(
        app,
        &format!("/api/sessions/{}/attendance", session.id),
        &serde_json::json!({ "member_ids": attending }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "set attendance failed: {body}");

    for next in ["agenda_published", "in_progress"] {
        let (status, body) = patch_json(
            app,
            &format!("/api/sessions/{}/status", session.id),
            &serde_json::json!({ "status": next }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "transition to {next} failed: {body}");
    }

    session.id
}

/// Place a case on a session's agenda and return the session-case id.
pub async fn add_to_agenda(app: &Router, session_id: &str, case_id: &str) -> String {
    let (status, body) = post_json(
        app,
        &format!("/api/sessions/{session_id}/agenda"),
        &serde_json::json!({ "case_id": case_id }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "add to agenda failed: {body}");
    let session_case: shared_types::SessionCaseResponse = serde_json::from_str(&body).unwrap();
    session_case.id
}

/// Assign rapporteur/reviewers to a session case.
pub async fn assign(
    app: &Router,
    session_case_id: &str,
    rapporteur: &str,
    reviewers: &[&str],
) -> (StatusCode, String) {
    put_json(
        app,
        &format!("/api/session-cases/{session_case_id}/distribution"),
        &serde_json::json!({ "rapporteur_id": rapporteur, "reviewer_ids": reviewers }).to_string(),
    )
    .await
}

/// Create a merit template and return its id.
pub async fn create_merit_template(app: &Router, text: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/vote-templates",
        &serde_json::json!({ "kind": "merit", "description": "merit outcome", "text": text })
            .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create template failed: {body}");
    let template: shared_types::VoteTemplateResponse = serde_json::from_str(&body).unwrap();
    template.id
}

/// Record a knowledge vote backed by a merit template.
pub async fn record_knowledge_vote(
    app: &Router,
    session_case_id: &str,
    member_id: &str,
    merit_template_id: &str,
) -> (StatusCode, String) {
    post_json(
        app,
        &format!("/api/session-cases/{session_case_id}/votes"),
        &serde_json::json!({
            "member_id": member_id,
            "knowledge_type": "knowledge",
            "merit_template_id": merit_template_id,
        })
        .to_string(),
    )
    .await
}
