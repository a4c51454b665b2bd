use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Vote vocabulary ─────────────────────────────────────────────────

/// Role a member holds in a vote, derived from the distribution.
/// Never stored independently of the distribution itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum VoteRole {
    Rapporteur,
    Reviewer,
}

impl VoteRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteRole::Rapporteur => "rapporteur",
            VoteRole::Reviewer => "reviewer",
        }
    }
}

impl std::fmt::Display for VoteRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the vote knows the appeal on the merits or stops at a
/// preliminary objection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeType {
    NonKnowledge,
    Knowledge,
}

impl KnowledgeType {
    pub const ALL: &'static [KnowledgeType] =
        &[KnowledgeType::NonKnowledge, KnowledgeType::Knowledge];

    pub fn as_str(&self) -> &'static str {
        match self {
            KnowledgeType::NonKnowledge => "non_knowledge",
            KnowledgeType::Knowledge => "knowledge",
        }
    }

    pub fn parse(s: &str) -> Option<KnowledgeType> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Outcome of the preliminary objection in a non-knowledge vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum PreliminaryOutcome {
    Accept,
    Reject,
}

impl PreliminaryOutcome {
    pub const ALL: &'static [PreliminaryOutcome] =
        &[PreliminaryOutcome::Accept, PreliminaryOutcome::Reject];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreliminaryOutcome::Accept => "accept",
            PreliminaryOutcome::Reject => "reject",
        }
    }

    pub fn parse(s: &str) -> Option<PreliminaryOutcome> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

// ── Vote templates ─────────────────────────────────────────────────

/// Kind of decision template a vote can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Carries distinct accept/reject text variants.
    Preliminary,
    /// Single text fragment.
    Merit,
    /// Ex-officio directive fragment.
    Official,
}

impl TemplateKind {
    pub const ALL: &'static [TemplateKind] = &[
        TemplateKind::Preliminary,
        TemplateKind::Merit,
        TemplateKind::Official,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Preliminary => "preliminary",
            TemplateKind::Merit => "merit",
            TemplateKind::Official => "official",
        }
    }

    pub fn parse(s: &str) -> Option<TemplateKind> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// A reusable prose fragment votes select from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteTemplate {
    pub id: Uuid,
    pub kind: TemplateKind,
    pub description: String,
    /// Merit/official fragment; unused for preliminary templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Preliminary variant used when the objection is accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_text: Option<String>,
    /// Preliminary variant used when the objection is rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ── Vote record ────────────────────────────────────────────────────

/// One member's vote on one case appearance. At most one per
/// (session case, member); immutable once the session concludes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Vote {
    pub id: Uuid,
    pub session_case_id: Uuid,
    pub member_id: Uuid,
    pub role: VoteRole,
    pub knowledge_type: KnowledgeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preliminary_outcome: Option<PreliminaryOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preliminary_template_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merit_template_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_template_id: Option<Uuid>,
    /// Composed by the vote-text engine, then freely editable.
    pub vote_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── API request/response types ─────────────────────────────────────

/// Request DTO for creating a vote template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateVoteTemplateRequest {
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub accept_text: Option<String>,
    #[serde(default)]
    pub reject_text: Option<String>,
}

/// API response shape for a vote template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteTemplateResponse {
    pub id: String,
    pub kind: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_text: Option<String>,
    pub created_at: String,
}

impl From<VoteTemplate> for VoteTemplateResponse {
    fn from(t: VoteTemplate) -> Self {
        Self {
            id: t.id.to_string(),
            kind: t.kind.as_str().to_string(),
            description: t.description,
            text: t.text,
            accept_text: t.accept_text,
            reject_text: t.reject_text,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

/// Request DTO for recording a vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecordVoteRequest {
    pub member_id: String,
    pub knowledge_type: String,
    #[serde(default)]
    pub preliminary_outcome: Option<String>,
    #[serde(default)]
    pub preliminary_template_id: Option<String>,
    #[serde(default)]
    pub merit_template_id: Option<String>,
    #[serde(default)]
    pub official_template_id: Option<String>,
}

/// Request DTO for editing a recorded vote's text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateVoteTextRequest {
    pub vote_text: String,
}

/// API response shape for a vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteResponse {
    pub id: String,
    pub session_case_id: String,
    pub member_id: String,
    pub role: String,
    pub knowledge_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preliminary_outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preliminary_template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merit_template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_template_id: Option<String>,
    pub vote_text: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Vote> for VoteResponse {
    fn from(v: Vote) -> Self {
        Self {
            id: v.id.to_string(),
            session_case_id: v.session_case_id.to_string(),
            member_id: v.member_id.to_string(),
            role: v.role.as_str().to_string(),
            knowledge_type: v.knowledge_type.as_str().to_string(),
            preliminary_outcome: v.preliminary_outcome.map(|o| o.as_str().to_string()),
            preliminary_template_id: v.preliminary_template_id.map(|u| u.to_string()),
            merit_template_id: v.merit_template_id.map(|u| u.to_string()),
            official_template_id: v.official_template_id.map(|u| u.to_string()),
            vote_text: v.vote_text,
            created_at: v.created_at.to_rfc3339(),
            updated_at: v.updated_at.to_rfc3339(),
        }
    }
}
