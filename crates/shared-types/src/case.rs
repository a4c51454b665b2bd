use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::member::{CaseAuthority, CaseAuthorityInput, CaseAuthorityResponse};

// ── Validation constants ────────────────────────────────────────────

/// Valid case classification values (municipal tax matters under appeal).
pub const CASE_CLASSIFICATIONS: &[&str] = &[
    "iptu", "iss", "itbi", "taxa_de_licenca", "taxa_de_servicos",
    "auto_de_infracao", "outros",
];

/// Check whether a classification string is valid.
pub fn is_valid_case_classification(s: &str) -> bool {
    CASE_CLASSIFICATIONS.contains(&s)
}

// ── Case status ─────────────────────────────────────────────────────

/// Adjudication status of a case.
///
/// `AwaitingAgenda` is the intake resting state; everything else follows
/// the appearance lifecycle. `Judged` is terminal for an appearance, but a
/// continued case re-enters `InAgenda` when scheduled into a later session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    AwaitingAgenda,
    InAgenda,
    Suspended,
    UnderInquiry,
    ViewRequested,
    Judged,
}

impl CaseStatus {
    pub const ALL: &'static [CaseStatus] = &[
        CaseStatus::AwaitingAgenda,
        CaseStatus::InAgenda,
        CaseStatus::Suspended,
        CaseStatus::UnderInquiry,
        CaseStatus::ViewRequested,
        CaseStatus::Judged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::AwaitingAgenda => "awaiting_agenda",
            CaseStatus::InAgenda => "in_agenda",
            CaseStatus::Suspended => "suspended",
            CaseStatus::UnderInquiry => "under_inquiry",
            CaseStatus::ViewRequested => "view_requested",
            CaseStatus::Judged => "judged",
        }
    }

    pub fn parse(s: &str) -> Option<CaseStatus> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn is_judged(&self) -> bool {
        matches!(self, CaseStatus::Judged)
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Case record ─────────────────────────────────────────────────────

/// A municipal tax-appeal case under committee review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Case {
    pub id: Uuid,
    /// Per-year intake sequence; `case_number()` renders it human-readable.
    pub sequence_number: i64,
    pub year: i32,
    pub classification: String,
    pub status: CaseStatus,
    pub authorities: Vec<CaseAuthority>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Human-readable case number, e.g. `0042/2026`.
    pub fn case_number(&self) -> String {
        format!("{:04}/{}", self.sequence_number, self.year)
    }
}

// ── API request/response types ─────────────────────────────────────

/// Request DTO for case intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateCaseRequest {
    pub classification: String,
    /// Registered authorities from the administrative phase.
    #[serde(default)]
    pub authorities: Vec<CaseAuthorityInput>,
}

/// API response shape for a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseResponse {
    pub id: String,
    pub case_number: String,
    pub sequence_number: i64,
    pub year: i32,
    pub classification: String,
    pub status: String,
    pub authorities: Vec<CaseAuthorityResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Case> for CaseResponse {
    fn from(c: Case) -> Self {
        let case_number = c.case_number();
        Self {
            id: c.id.to_string(),
            case_number,
            sequence_number: c.sequence_number,
            year: c.year,
            classification: c.classification,
            status: c.status.as_str().to_string(),
            authorities: c.authorities.into_iter().map(Into::into).collect(),
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Query parameters for listing cases.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CaseListParams {
    pub status: Option<String>,
    pub year: Option<i32>,
}
