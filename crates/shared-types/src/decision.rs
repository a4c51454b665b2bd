use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One gazette release entry for a decision. Append-only: entries are
/// never edited or deleted, and order 1 marks the first publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Publication {
    pub publication_order: i32,
    pub publication_number: String,
    pub publication_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// The formal collective ruling (acórdão) for a judged case.
/// One per case; the number sequence is per-year, monotonic and gapless.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DecisionDocument {
    pub id: Uuid,
    pub case_id: Uuid,
    pub sequence_number: i64,
    pub year: i32,
    pub ementa_title: String,
    pub ementa_body: String,
    /// Opaque file-store handles; the core never interprets them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_file: Option<String>,
    pub publications: Vec<Publication>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DecisionDocument {
    /// Human-readable decision number, e.g. `131/2026`.
    pub fn decision_number(&self) -> String {
        format!("{}/{}", self.sequence_number, self.year)
    }
}

// ── API request/response types ─────────────────────────────────────

/// Request DTO for emitting the decision document of a judged case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmitDecisionRequest {
    pub ementa_title: String,
    pub ementa_body: String,
    #[serde(default)]
    pub vote_file: Option<String>,
    #[serde(default)]
    pub decision_file: Option<String>,
}

/// Request DTO for appending a publication entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PublishDecisionRequest {
    pub publication_number: String,
    pub publication_date: NaiveDate,
}

/// API response shape for a publication entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PublicationResponse {
    pub publication_order: i32,
    pub publication_number: String,
    pub publication_date: String,
    pub created_at: String,
}

impl From<Publication> for PublicationResponse {
    fn from(p: Publication) -> Self {
        Self {
            publication_order: p.publication_order,
            publication_number: p.publication_number,
            publication_date: p.publication_date.to_string(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// API response shape for a decision document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DecisionResponse {
    pub id: String,
    pub case_id: String,
    pub decision_number: String,
    pub sequence_number: i64,
    pub year: i32,
    pub ementa_title: String,
    pub ementa_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_file: Option<String>,
    pub publications: Vec<PublicationResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<DecisionDocument> for DecisionResponse {
    fn from(d: DecisionDocument) -> Self {
        let decision_number = d.decision_number();
        Self {
            id: d.id.to_string(),
            case_id: d.case_id.to_string(),
            decision_number,
            sequence_number: d.sequence_number,
            year: d.year,
            ementa_title: d.ementa_title,
            ementa_body: d.ementa_body,
            vote_file: d.vote_file,
            decision_file: d.decision_file,
            publications: d.publications.into_iter().map(Into::into).collect(),
            created_at: d.created_at.to_rfc3339(),
            updated_at: d.updated_at.to_rfc3339(),
        }
    }
}
