use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// A council member eligible to sit on judgment sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// A registered authority on a case: someone who acted in the
/// administrative phase (assessment, first-instance ruling) and is
/// therefore barred from judging the case.
///
/// `member_id` links the authority to the member directory when the
/// authority also sits on the council; the conflict check matches on that
/// id and only falls back to name comparison for unlinked records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseAuthority {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<Uuid>,
    pub active: bool,
}

// ── API request/response types ─────────────────────────────────────

/// Request DTO for registering a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateMemberRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Member name is required"))
    )]
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// API response shape for a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub created_at: String,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name,
            active: m.active,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

/// Query parameters for listing members.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct MemberListParams {
    pub active: Option<bool>,
}

/// Authority entry nested in case intake requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseAuthorityInput {
    pub name: String,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// API response shape for a registered authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseAuthorityResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    pub active: bool,
}

impl From<CaseAuthority> for CaseAuthorityResponse {
    fn from(a: CaseAuthority) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name,
            member_id: a.member_id.map(|u| u.to_string()),
            active: a.active,
        }
    }
}
