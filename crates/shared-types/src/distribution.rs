use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Assignment of a rapporteur and reviewers to a case within a session.
///
/// Eligibility invariant: neither the rapporteur nor any reviewer may be a
/// registered authority on the case. Mutable only while no vote exists for
/// the session case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Distribution {
    pub session_case_id: Uuid,
    pub rapporteur_id: Uuid,
    /// Ordered; may be empty.
    pub reviewer_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Distribution {
    /// Whether the member belongs to this distribution in any role.
    pub fn includes(&self, member_id: Uuid) -> bool {
        self.rapporteur_id == member_id || self.reviewer_ids.contains(&member_id)
    }

    /// Every member expected to vote, rapporteur first.
    pub fn voting_member_ids(&self) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(1 + self.reviewer_ids.len());
        ids.push(self.rapporteur_id);
        ids.extend(self.reviewer_ids.iter().copied());
        ids
    }
}

// ── API request/response types ─────────────────────────────────────

/// Request DTO for assigning (or replacing) a distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignDistributionRequest {
    pub rapporteur_id: String,
    #[serde(default)]
    pub reviewer_ids: Vec<String>,
}

/// API response shape for a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DistributionResponse {
    pub session_case_id: String,
    pub rapporteur_id: String,
    pub reviewer_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Distribution> for DistributionResponse {
    fn from(d: Distribution) -> Self {
        Self {
            session_case_id: d.session_case_id.to_string(),
            rapporteur_id: d.rapporteur_id.to_string(),
            reviewer_ids: d.reviewer_ids.iter().map(|u| u.to_string()).collect(),
            created_at: d.created_at.to_rfc3339(),
            updated_at: d.updated_at.to_rfc3339(),
        }
    }
}
