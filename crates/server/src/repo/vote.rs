use chrono::Utc;
use shared_types::{
    AppError, CreateVoteTemplateRequest, KnowledgeType, PreliminaryOutcome, RecordVoteRequest,
    TemplateKind, UpdateVoteTextRequest, Vote, VoteRole, VoteTemplate,
};
use uuid::Uuid;

use crate::db::{Db, DbState};
use crate::judgment::transitions;
use crate::judgment::vote_text::{self, PreliminaryFragments};

// ── Vote templates ─────────────────────────────────────────────────

/// Create a reusable decision template.
pub fn create_template(db: &Db, req: CreateVoteTemplateRequest) -> Result<VoteTemplate, AppError> {
    let kind = TemplateKind::parse(&req.kind).ok_or_else(|| {
        AppError::bad_request(format!(
            "Invalid template kind: {}. Valid values: {}",
            req.kind,
            TemplateKind::ALL
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let non_empty = |field: Option<&String>, name: &str| -> Result<Option<String>, AppError> {
        match field {
            Some(s) if !s.trim().is_empty() => Ok(Some(s.clone())),
            Some(_) => Err(AppError::bad_request(format!(
                "Template {} must not be blank",
                name
            ))),
            None => Ok(None),
        }
    };

    let text = non_empty(req.text.as_ref(), "text")?;
    let accept_text = non_empty(req.accept_text.as_ref(), "accept_text")?;
    let reject_text = non_empty(req.reject_text.as_ref(), "reject_text")?;

    match kind {
        TemplateKind::Preliminary => {
            if accept_text.is_none() || reject_text.is_none() {
                return Err(AppError::bad_request(
                    "Preliminary templates require both accept_text and reject_text",
                ));
            }
        }
        TemplateKind::Merit | TemplateKind::Official => {
            if text.is_none() {
                return Err(AppError::bad_request(format!(
                    "{} templates require text",
                    kind.as_str()
                )));
            }
        }
    }

    let template = VoteTemplate {
        id: Uuid::new_v4(),
        kind,
        description: req.description,
        text,
        accept_text,
        reject_text,
        created_at: Utc::now(),
    };
    db.write()
        .vote_templates
        .insert(template.id, template.clone());
    Ok(template)
}

/// List templates, optionally filtered by kind.
pub fn list_templates(db: &Db, kind: Option<&str>) -> Result<Vec<VoteTemplate>, AppError> {
    let kind = kind
        .map(|k| {
            TemplateKind::parse(k)
                .ok_or_else(|| AppError::bad_request(format!("Invalid template kind: {}", k)))
        })
        .transpose()?;

    let state = db.read();
    let mut templates: Vec<VoteTemplate> = state
        .vote_templates
        .values()
        .filter(|t| kind.map_or(true, |k| t.kind == k))
        .cloned()
        .collect();
    templates.sort_by(|a, b| a.description.cmp(&b.description));
    Ok(templates)
}

fn resolve_template(
    state: &DbState,
    id: Uuid,
    expected: TemplateKind,
) -> Result<VoteTemplate, AppError> {
    let template = state
        .vote_templates
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("Template {} not found", id)))?;
    if template.kind != expected {
        return Err(AppError::bad_request(format!(
            "Template {} is a {} template, expected {}",
            id,
            template.kind.as_str(),
            expected.as_str()
        )));
    }
    Ok(template.clone())
}

// ── Vote recording ─────────────────────────────────────────────────

/// Structured inputs parsed out of a [`RecordVoteRequest`].
struct VoteChoices {
    knowledge_type: KnowledgeType,
    preliminary_outcome: Option<PreliminaryOutcome>,
    preliminary_template_id: Option<Uuid>,
    merit_template_id: Option<Uuid>,
    official_template_id: Option<Uuid>,
}

fn parse_uuid_field(value: Option<&str>, field: &str) -> Result<Option<Uuid>, AppError> {
    value
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|_| AppError::bad_request(format!("Invalid {} UUID", field)))
}

/// Pre-validation of the structured voting choices, raised before any
/// persistence write. The composer itself never rejects.
fn validate_choices(req: &RecordVoteRequest) -> Result<VoteChoices, AppError> {
    let knowledge_type = KnowledgeType::parse(&req.knowledge_type).ok_or_else(|| {
        AppError::bad_request(format!(
            "Invalid knowledge_type: {}. Valid values: {}",
            req.knowledge_type,
            KnowledgeType::ALL
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let preliminary_outcome = req
        .preliminary_outcome
        .as_deref()
        .map(|s| {
            PreliminaryOutcome::parse(s).ok_or_else(|| {
                AppError::bad_request(format!("Invalid preliminary_outcome: {}", s))
            })
        })
        .transpose()?;

    let preliminary_template_id =
        parse_uuid_field(req.preliminary_template_id.as_deref(), "preliminary_template_id")?;
    let merit_template_id = parse_uuid_field(req.merit_template_id.as_deref(), "merit_template_id")?;
    let official_template_id =
        parse_uuid_field(req.official_template_id.as_deref(), "official_template_id")?;

    match knowledge_type {
        KnowledgeType::NonKnowledge => {
            let outcome = preliminary_outcome.ok_or_else(|| {
                AppError::bad_request(
                    "Non-knowledge votes require a preliminary_outcome (accept or reject)",
                )
            })?;
            if merit_template_id.is_some() {
                return Err(AppError::bad_request(
                    "Merit templates apply only to knowledge votes",
                ));
            }
            match outcome {
                PreliminaryOutcome::Accept => {
                    if preliminary_template_id.is_none() && official_template_id.is_none() {
                        return Err(AppError::incomplete_vote_rationale(
                            "Accepting the preliminary requires a preliminary template, \
                             an ex-officio template, or both",
                        ));
                    }
                }
                PreliminaryOutcome::Reject => {
                    if official_template_id.is_some() {
                        return Err(AppError::bad_request(
                            "An ex-officio directive is only selectable when the \
                             preliminary is accepted",
                        ));
                    }
                }
            }
        }
        KnowledgeType::Knowledge => {
            if merit_template_id.is_none() {
                return Err(AppError::incomplete_vote_rationale(
                    "Knowledge votes require a merit template",
                ));
            }
            if preliminary_outcome.is_some() || preliminary_template_id.is_some() {
                return Err(AppError::bad_request(
                    "Preliminary choices apply only to non-knowledge votes",
                ));
            }
        }
    }

    Ok(VoteChoices {
        knowledge_type,
        preliminary_outcome,
        preliminary_template_id,
        merit_template_id,
        official_template_id,
    })
}

/// Record one member's vote on a session case.
///
/// The role is derived from the distribution, the vote text is composed by
/// the engine and stored verbatim, and the (session case, member) pair is
/// unique. Recording never concludes the case; that is a separate action.
pub fn record(db: &Db, session_case_id: Uuid, req: &RecordVoteRequest) -> Result<Vote, AppError> {
    let member_id = Uuid::parse_str(&req.member_id)
        .map_err(|_| AppError::bad_request("Invalid member_id UUID"))?;
    let choices = validate_choices(req)?;

    let now = Utc::now();
    let mut state = db.write();

    let session_case = state
        .session_cases
        .get(&session_case_id)
        .cloned()
        .ok_or_else(|| {
            AppError::not_found(format!("Session case {} not found", session_case_id))
        })?;
    let session = state
        .sessions
        .get(&session_case.session_id)
        .ok_or_else(|| AppError::not_found("Owning session not found"))?;
    transitions::ensure_session_open(session)?;

    let distribution = state
        .distributions
        .get(&session_case_id)
        .ok_or_else(|| AppError::not_distributed("No distribution exists for this case"))?;
    let role = if distribution.rapporteur_id == member_id {
        VoteRole::Rapporteur
    } else if distribution.reviewer_ids.contains(&member_id) {
        VoteRole::Reviewer
    } else {
        return Err(AppError::not_distributed(
            "Member is neither rapporteur nor reviewer on this case",
        ));
    };

    if state
        .votes_for(session_case_id)
        .iter()
        .any(|v| v.member_id == member_id)
    {
        return Err(AppError::duplicate_vote(
            "A vote already exists for this member on this case; edit it instead",
        ));
    }

    let preliminary = choices
        .preliminary_template_id
        .map(|id| resolve_template(&state, id, TemplateKind::Preliminary))
        .transpose()?;
    let merit = choices
        .merit_template_id
        .map(|id| resolve_template(&state, id, TemplateKind::Merit))
        .transpose()?;
    let official = choices
        .official_template_id
        .map(|id| resolve_template(&state, id, TemplateKind::Official))
        .transpose()?;

    let preliminary_fragments = preliminary.as_ref().map(|t| PreliminaryFragments {
        accept_text: t.accept_text.as_deref().unwrap_or_default(),
        reject_text: t.reject_text.as_deref().unwrap_or_default(),
    });
    let vote_text = vote_text::compose(
        choices.knowledge_type,
        choices.preliminary_outcome,
        preliminary_fragments,
        merit.as_ref().and_then(|t| t.text.as_deref()),
        official.as_ref().and_then(|t| t.text.as_deref()),
    );
    if vote_text.is_empty() {
        return Err(AppError::incomplete_vote_rationale(
            "The selected choices compose to an empty vote text",
        ));
    }

    let vote = Vote {
        id: Uuid::new_v4(),
        session_case_id,
        member_id,
        role,
        knowledge_type: choices.knowledge_type,
        preliminary_outcome: choices.preliminary_outcome,
        preliminary_template_id: choices.preliminary_template_id,
        merit_template_id: choices.merit_template_id,
        official_template_id: choices.official_template_id,
        vote_text,
        created_at: now,
        updated_at: now,
    };
    state
        .votes
        .entry(session_case_id)
        .or_default()
        .push(vote.clone());
    Ok(vote)
}

/// Edit the text of a recorded vote. The composed text is a starting
/// point, not a straitjacket; editing ends when the session concludes.
pub fn update_text(
    db: &Db,
    session_case_id: Uuid,
    member_id: Uuid,
    req: &UpdateVoteTextRequest,
) -> Result<Vote, AppError> {
    if req.vote_text.trim().is_empty() {
        return Err(AppError::bad_request("vote_text must not be empty"));
    }

    let now = Utc::now();
    let mut state = db.write();

    let session_case = state
        .session_cases
        .get(&session_case_id)
        .cloned()
        .ok_or_else(|| {
            AppError::not_found(format!("Session case {} not found", session_case_id))
        })?;
    let session = state
        .sessions
        .get(&session_case.session_id)
        .ok_or_else(|| AppError::not_found("Owning session not found"))?;
    transitions::ensure_session_open(session)?;

    let votes = state
        .votes
        .get_mut(&session_case_id)
        .ok_or_else(|| AppError::not_found("No votes recorded for this case"))?;
    let vote = votes
        .iter_mut()
        .find(|v| v.member_id == member_id)
        .ok_or_else(|| AppError::not_found("No vote by this member on this case"))?;
    vote.vote_text = req.vote_text.clone();
    vote.updated_at = now;
    Ok(vote.clone())
}

/// All votes on a session case, rapporteur first then reviewers in
/// distribution order.
pub fn list_by_session_case(db: &Db, session_case_id: Uuid) -> Result<Vec<Vote>, AppError> {
    let state = db.read();
    if !state.session_cases.contains_key(&session_case_id) {
        return Err(AppError::not_found(format!(
            "Session case {} not found",
            session_case_id
        )));
    }
    let mut votes = state.votes_for(session_case_id).to_vec();
    if let Some(distribution) = state.distributions.get(&session_case_id) {
        let order = distribution.voting_member_ids();
        votes.sort_by_key(|v| {
            order
                .iter()
                .position(|id| *id == v.member_id)
                .unwrap_or(usize::MAX)
        });
    }
    Ok(votes)
}
