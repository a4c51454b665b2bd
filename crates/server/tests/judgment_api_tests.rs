use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use shared_types::{
    AppError, AppErrorKind, CaseResponse, DecisionResponse, DistributionResponse,
    SessionCaseResponse, SessionProgressResponse, VoteResponse,
};

mod common;
use common::*;

#[tokio::test]
async fn full_adjudication_flow() {
    let app = test_app();

    let alice = create_member(&app, "Alice").await;
    let bob = create_member(&app, "Bob").await;
    let carol = create_member(&app, "Carol").await;

    let case_id = create_case_with_authorities(&app, &["Alice"]).await;
    let session_id = create_running_session(&app, &[&alice, &bob, &carol]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;

    // Bob as rapporteur, Carol as reviewer: no authority conflict.
    let (status, _) = assign(&app, &sc_id, &bob, &[&carol]).await;
    assert_eq!(status, StatusCode::OK);

    // Redistributing to Alice hits the authority list by name identity.
    let (status, body) = assign(&app, &sc_id, &alice, &[&carol]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::AuthorityConflict);

    // The failed redistribution left the previous assignment untouched.
    let (_, body) = get(&app, &format!("/api/session-cases/{sc_id}/distribution")).await;
    let distribution: DistributionResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(distribution.rapporteur_id, bob);

    // Knowledge vote for Bob: the composed text is the merit fragment.
    let template_id = create_merit_template(&app, "Dar provimento ao recurso.").await;
    let (status, body) = record_knowledge_vote(&app, &sc_id, &bob, &template_id).await;
    assert_eq!(status, StatusCode::CREATED);
    let vote: VoteResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(vote.vote_text, "Dar provimento ao recurso.");
    assert_eq!(vote.role, "rapporteur");

    // A second vote by Bob on the same case is rejected.
    let (status, body) = record_knowledge_vote(&app, &sc_id, &bob, &template_id).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::DuplicateVote);

    // Carol (reviewer) completes the vote set.
    let (status, body) = record_knowledge_vote(&app, &sc_id, &carol, &template_id).await;
    assert_eq!(status, StatusCode::CREATED);
    let vote: VoteResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(vote.role, "reviewer");

    // Explicit conclusion judges the appearance and the case.
    let (status, body) = post_json(
        &app,
        &format!("/api/session-cases/{sc_id}/conclusion"),
        r#"{"result_text":"Provido por unanimidade."}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "conclusion failed: {body}");
    let sc: SessionCaseResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(sc.status, "judged");

    let (_, body) = get(&app, &format!("/api/cases/{case_id}")).await;
    let case: CaseResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(case.status, "judged");

    // Emit the decision and publish it twice: orders 1 then 2.
    let (status, body) = post_json(
        &app,
        &format!("/api/cases/{case_id}/decision"),
        r#"{"ementa_title":"IPTU. Provimento.","ementa_body":"Recurso provido."}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "emit failed: {body}");
    let decision: DecisionResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(decision.sequence_number, 1);
    assert!(decision.publications.is_empty());

    let (status, body) = post_json(
        &app,
        &format!("/api/decisions/{}/publications", decision.id),
        r#"{"publication_number":"DOM 1234","publication_date":"2026-08-10"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let decision: DecisionResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(decision.publications.len(), 1);
    assert_eq!(decision.publications[0].publication_order, 1);

    let (status, body) = post_json(
        &app,
        &format!("/api/decisions/{}/publications", decision.id),
        r#"{"publication_number":"DOM 1250","publication_date":"2026-08-20"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let decision: DecisionResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(decision.publications.len(), 2);
    assert_eq!(decision.publications[1].publication_order, 2);
}

#[tokio::test]
async fn distribution_requires_attendance() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let dave = create_member(&app, "Dave").await;

    let case_id = create_case_with_authorities(&app, &[]).await;
    // Dave is registered but not attending.
    let session_id = create_running_session(&app, &[&bob]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;

    let (status, body) = assign(&app, &sc_id, &dave, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::BadRequest);
}

#[tokio::test]
async fn authority_conflict_by_member_link() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;

    // The authority record links Bob by id; the display name differs.
    let (status, body) = post_json(
        &app,
        "/api/cases",
        &serde_json::json!({
            "classification": "iss",
            "authorities": [{ "name": "Roberto", "member_id": bob }],
        })
        .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create case failed: {body}");
    let case: CaseResponse = serde_json::from_str(&body).unwrap();

    let session_id = create_running_session(&app, &[&bob]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case.id).await;

    let (status, body) = assign(&app, &sc_id, &bob, &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::AuthorityConflict);
}

#[tokio::test]
async fn vote_without_distribution_fails() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let case_id = create_case_with_authorities(&app, &[]).await;
    let session_id = create_running_session(&app, &[&bob]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;
    let template_id = create_merit_template(&app, "Negar provimento ao recurso.").await;

    let (status, body) = record_knowledge_vote(&app, &sc_id, &bob, &template_id).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::NotDistributed);
}

#[tokio::test]
async fn vote_by_undistributed_member_fails() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let carol = create_member(&app, "Carol").await;
    let case_id = create_case_with_authorities(&app, &[]).await;
    let session_id = create_running_session(&app, &[&bob, &carol]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;
    let (status, _) = assign(&app, &sc_id, &bob, &[]).await;
    assert_eq!(status, StatusCode::OK);

    let template_id = create_merit_template(&app, "Negar provimento ao recurso.").await;
    let (status, body) = record_knowledge_vote(&app, &sc_id, &carol, &template_id).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::NotDistributed);
}

#[tokio::test]
async fn non_knowledge_vote_shapes() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let case_id = create_case_with_authorities(&app, &[]).await;
    let session_id = create_running_session(&app, &[&bob]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;
    let (status, _) = assign(&app, &sc_id, &bob, &[]).await;
    assert_eq!(status, StatusCode::OK);

    // Accepting the preliminary with no rationale at all is rejected
    // before anything is written.
    let (status, body) = post_json(
        &app,
        &format!("/api/session-cases/{sc_id}/votes"),
        &serde_json::json!({
            "member_id": bob,
            "knowledge_type": "non_knowledge",
            "preliminary_outcome": "accept",
        })
        .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::IncompleteVoteRationale);

    // An ex-officio directive with a rejected preliminary is illegal.
    let (status, body) = post_json(
        &app,
        "/api/vote-templates",
        &serde_json::json!({
            "kind": "official",
            "description": "recalculo",
            "text": "Determinar o recálculo do lançamento.",
        })
        .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let official: shared_types::VoteTemplateResponse = serde_json::from_str(&body).unwrap();

    let (status, _) = post_json(
        &app,
        &format!("/api/session-cases/{sc_id}/votes"),
        &serde_json::json!({
            "member_id": bob,
            "knowledge_type": "non_knowledge",
            "preliminary_outcome": "reject",
            "official_template_id": official.id,
        })
        .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Accept with only the ex-officio directive composes the fixed opening.
    let (status, body) = post_json(
        &app,
        &format!("/api/session-cases/{sc_id}/votes"),
        &serde_json::json!({
            "member_id": bob,
            "knowledge_type": "non_knowledge",
            "preliminary_outcome": "accept",
            "official_template_id": official.id,
        })
        .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let vote: VoteResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(
        vote.vote_text,
        "Não conhecer do recurso, mas, de ofício, determinar o recálculo do lançamento."
    );
}

#[tokio::test]
async fn rejected_preliminary_without_template_composes_fixed_literal() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let case_id = create_case_with_authorities(&app, &[]).await;
    let session_id = create_running_session(&app, &[&bob]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;
    let (status, _) = assign(&app, &sc_id, &bob, &[]).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        &format!("/api/session-cases/{sc_id}/votes"),
        &serde_json::json!({
            "member_id": bob,
            "knowledge_type": "non_knowledge",
            "preliminary_outcome": "reject",
        })
        .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let vote: VoteResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(vote.vote_text, "Conhecer do recurso.");
}

#[tokio::test]
async fn conclusion_requires_full_vote_set() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let carol = create_member(&app, "Carol").await;
    let case_id = create_case_with_authorities(&app, &[]).await;
    let session_id = create_running_session(&app, &[&bob, &carol]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;
    let (status, _) = assign(&app, &sc_id, &bob, &[&carol]).await;
    assert_eq!(status, StatusCode::OK);

    // Zero votes: the terminal status is flat-out rejected.
    let (status, body) = post_json(
        &app,
        &format!("/api/session-cases/{sc_id}/conclusion"),
        "{}",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::ValidationError);

    // One of two votes: still unresolved.
    let template_id = create_merit_template(&app, "Negar provimento ao recurso.").await;
    let (status, _) = record_knowledge_vote(&app, &sc_id, &bob, &template_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        &app,
        &format!("/api/session-cases/{sc_id}/conclusion"),
        "{}",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::Conflict);
}

#[tokio::test]
async fn concluded_session_freezes_children() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let case_id = create_case_with_authorities(&app, &[]).await;
    let session_id = create_running_session(&app, &[&bob]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;
    let (status, _) = assign(&app, &sc_id, &bob, &[]).await;
    assert_eq!(status, StatusCode::OK);

    let template_id = create_merit_template(&app, "Negar provimento ao recurso.").await;
    let (status, _) = record_knowledge_vote(&app, &sc_id, &bob, &template_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = patch_json(
        &app,
        &format!("/api/sessions/{session_id}/status"),
        r#"{"status":"concluded"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Re-assignment, new votes and vote edits all fail with SessionClosed.
    let (status, body) = assign(&app, &sc_id, &bob, &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::SessionClosed);

    let (status, body) = patch_json(
        &app,
        &format!("/api/session-cases/{sc_id}/votes/{bob}"),
        r#"{"vote_text":"Texto revisado."}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::SessionClosed);
}

#[tokio::test]
async fn distribution_locked_after_vote() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let carol = create_member(&app, "Carol").await;
    let case_id = create_case_with_authorities(&app, &[]).await;
    let session_id = create_running_session(&app, &[&bob, &carol]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;
    let (status, _) = assign(&app, &sc_id, &bob, &[]).await;
    assert_eq!(status, StatusCode::OK);

    let template_id = create_merit_template(&app, "Negar provimento ao recurso.").await;
    let (status, _) = record_knowledge_vote(&app, &sc_id, &bob, &template_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = assign(&app, &sc_id, &carol, &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::DistributionLocked);

    // Removal from the agenda is equally blocked.
    let (status, _) = delete(&app, &format!("/api/session-cases/{sc_id}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn status_override_requires_cause_and_mirrors_case() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let case_id = create_case_with_authorities(&app, &[]).await;
    let session_id = create_running_session(&app, &[&bob]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;

    let (status, body) = patch_json(
        &app,
        &format!("/api/session-cases/{sc_id}/status"),
        r#"{"status":"suspended"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::ValidationError);

    let (status, body) = patch_json(
        &app,
        &format!("/api/session-cases/{sc_id}/status"),
        r#"{"status":"suspended","reason":"Aguardando perícia contábil"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let sc: SessionCaseResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(sc.status, "suspended");

    let (_, body) = get(&app, &format!("/api/cases/{case_id}")).await;
    let case: CaseResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(case.status, "suspended");

    // Judged is never reachable through an override.
    let (status, _) = patch_json(
        &app,
        &format!("/api/session-cases/{sc_id}/status"),
        r#"{"status":"judged","reason":"forçando"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn session_progress_is_derived() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let session_id = create_running_session(&app, &[&bob]).await;

    let case_a = create_case_with_authorities(&app, &[]).await;
    let case_b = create_case_with_authorities(&app, &[]).await;
    let sc_a = add_to_agenda(&app, &session_id, &case_a).await;
    let _sc_b = add_to_agenda(&app, &session_id, &case_b).await;

    let (_, body) = get(&app, &format!("/api/sessions/{session_id}/progress")).await;
    let progress: SessionProgressResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(progress.total, 2);
    assert_eq!(progress.resolved, 0);

    let (status, _) = patch_json(
        &app,
        &format!("/api/session-cases/{sc_a}/status"),
        r#"{"status":"view_requested","reason":"Pedido de vista do revisor"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, &format!("/api/sessions/{session_id}/progress")).await;
    let progress: SessionProgressResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(progress.resolved, 1);
    assert_eq!(progress.percent, 50.0);
}

#[tokio::test]
async fn decision_numbers_are_sequential_and_gapless() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let session_id = create_running_session(&app, &[&bob]).await;
    let template_id = create_merit_template(&app, "Negar provimento ao recurso.").await;

    let mut sequence_numbers = Vec::new();
    for _ in 0..3 {
        let case_id = create_case_with_authorities(&app, &[]).await;
        let sc_id = add_to_agenda(&app, &session_id, &case_id).await;
        let (status, _) = assign(&app, &sc_id, &bob, &[]).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = record_knowledge_vote(&app, &sc_id, &bob, &template_id).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = post_json(
            &app,
            &format!("/api/session-cases/{sc_id}/conclusion"),
            "{}",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_json(
            &app,
            &format!("/api/cases/{case_id}/decision"),
            r#"{"ementa_title":"Ementa","ementa_body":"Corpo."}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let decision: DecisionResponse = serde_json::from_str(&body).unwrap();
        sequence_numbers.push(decision.sequence_number);
    }
    assert_eq!(sequence_numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn decision_requires_judged_case_and_is_unique() {
    let app = test_app();
    let case_id = create_case_with_authorities(&app, &[]).await;

    let (status, body) = post_json(
        &app,
        &format!("/api/cases/{case_id}/decision"),
        r#"{"ementa_title":"Ementa","ementa_body":"Corpo."}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::Conflict);
}

#[tokio::test]
async fn judged_case_can_reenter_a_later_agenda() {
    let app = test_app();
    let bob = create_member(&app, "Bob").await;
    let case_id = create_case_with_authorities(&app, &[]).await;
    let session_id = create_running_session(&app, &[&bob]).await;
    let sc_id = add_to_agenda(&app, &session_id, &case_id).await;
    let (status, _) = assign(&app, &sc_id, &bob, &[]).await;
    assert_eq!(status, StatusCode::OK);
    let template_id = create_merit_template(&app, "Converter o julgamento em diligência.").await;
    let (status, _) = record_knowledge_vote(&app, &sc_id, &bob, &template_id).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = post_json(
        &app,
        &format!("/api/session-cases/{sc_id}/conclusion"),
        "{}",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Continuance: a fresh appearance in a new session.
    let later_session = create_running_session(&app, &[&bob]).await;
    let later_sc = add_to_agenda(&app, &later_session, &case_id).await;
    assert_ne!(later_sc, sc_id);

    let (_, body) = get(&app, &format!("/api/cases/{case_id}")).await;
    let case: CaseResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(case.status, "in_agenda");
}

#[tokio::test]
async fn get_nonexistent_case_returns_404() {
    let app = test_app();
    let (status, body) = get(
        &app,
        "/api/cases/00000000-0000-0000-0000-000000000000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::NotFound);
}
