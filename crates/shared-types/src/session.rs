use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Session status ──────────────────────────────────────────────────

/// Lifecycle of a judgment session.
///
/// Linear: `AwaitingPublication → AgendaPublished → InProgress → Concluded`,
/// with `Cancelled` reachable from any non-terminal state. `Concluded`
/// freezes all child distributions and votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    AwaitingPublication,
    AgendaPublished,
    InProgress,
    Concluded,
    Cancelled,
}

impl SessionStatus {
    pub const ALL: &'static [SessionStatus] = &[
        SessionStatus::AwaitingPublication,
        SessionStatus::AgendaPublished,
        SessionStatus::InProgress,
        SessionStatus::Concluded,
        SessionStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::AwaitingPublication => "awaiting_publication",
            SessionStatus::AgendaPublished => "agenda_published",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Concluded => "concluded",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<SessionStatus> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Concluded | SessionStatus::Cancelled)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal type of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum OrdinalType {
    Ordinary,
    Extraordinary,
}

impl OrdinalType {
    pub const ALL: &'static [OrdinalType] = &[OrdinalType::Ordinary, OrdinalType::Extraordinary];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrdinalType::Ordinary => "ordinary",
            OrdinalType::Extraordinary => "extraordinary",
        }
    }

    pub fn parse(s: &str) -> Option<OrdinalType> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl std::fmt::Display for OrdinalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Per-appearance case status ─────────────────────────────────────

/// Status of one case appearance on one session's agenda.
///
/// `Judged` is terminal and reachable only through the explicit conclusion
/// action once the vote set resolves; the other movements are
/// administrative overrides that require a recorded cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CaseSessionStatus {
    InAgenda,
    Suspended,
    UnderInquiry,
    ViewRequested,
    Judged,
}

impl CaseSessionStatus {
    pub const ALL: &'static [CaseSessionStatus] = &[
        CaseSessionStatus::InAgenda,
        CaseSessionStatus::Suspended,
        CaseSessionStatus::UnderInquiry,
        CaseSessionStatus::ViewRequested,
        CaseSessionStatus::Judged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseSessionStatus::InAgenda => "in_agenda",
            CaseSessionStatus::Suspended => "suspended",
            CaseSessionStatus::UnderInquiry => "under_inquiry",
            CaseSessionStatus::ViewRequested => "view_requested",
            CaseSessionStatus::Judged => "judged",
        }
    }

    pub fn parse(s: &str) -> Option<CaseSessionStatus> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn is_judged(&self) -> bool {
        matches!(self, CaseSessionStatus::Judged)
    }

    /// Resolved appearances count toward session progress.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, CaseSessionStatus::InAgenda)
    }
}

impl std::fmt::Display for CaseSessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Session records ────────────────────────────────────────────────

/// A scheduled sitting of the committee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Session {
    pub id: Uuid,
    pub sequence_number: i64,
    pub year: i32,
    /// Per-year counter within the ordinal type (3rd ordinary, 1st extraordinary, ...).
    pub ordinal_number: i64,
    pub ordinal_type: OrdinalType,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub president_id: Option<Uuid>,
    pub status: SessionStatus,
    /// Ordered agenda: session-case ids, weak references to Case records.
    pub agenda: Vec<Uuid>,
    pub attending_member_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Human-readable session number, e.g. `15/2026`.
    pub fn session_number(&self) -> String {
        format!("{}/{}", self.sequence_number, self.year)
    }
}

/// One appearance of a case on a session's agenda.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionCase {
    pub id: Uuid,
    pub session_id: Uuid,
    pub case_id: Uuid,
    pub agenda_order: i32,
    pub status: CaseSessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_text: Option<String>,
    /// Cause recorded for administrative overrides (suspension, inquiry, view).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── API request/response types ─────────────────────────────────────

/// Request DTO for scheduling a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateSessionRequest {
    pub ordinal_type: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub president_id: Option<String>,
}

/// Request DTO for a session status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateSessionStatusRequest {
    pub status: String,
}

/// Request DTO for recording session attendance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SetAttendanceRequest {
    pub member_ids: Vec<String>,
}

/// Request DTO for placing a case on the agenda.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddSessionCaseRequest {
    pub case_id: String,
}

/// Request DTO for an administrative status override on a session case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateSessionCaseStatusRequest {
    pub status: String,
    /// Required cause for the override.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request DTO for the explicit conclusion action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConcludeSessionCaseRequest {
    #[serde(default)]
    pub result_text: Option<String>,
}

/// API response shape for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionResponse {
    pub id: String,
    pub session_number: String,
    pub sequence_number: i64,
    pub year: i32,
    pub ordinal_number: i64,
    pub ordinal_type: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub president_id: Option<String>,
    pub status: String,
    pub agenda: Vec<String>,
    pub attending_member_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Session> for SessionResponse {
    fn from(s: Session) -> Self {
        let session_number = s.session_number();
        Self {
            id: s.id.to_string(),
            session_number,
            sequence_number: s.sequence_number,
            year: s.year,
            ordinal_number: s.ordinal_number,
            ordinal_type: s.ordinal_type.as_str().to_string(),
            date: s.date.to_string(),
            start_time: s.start_time.map(|t| t.to_string()),
            end_time: s.end_time.map(|t| t.to_string()),
            president_id: s.president_id.map(|u| u.to_string()),
            status: s.status.as_str().to_string(),
            agenda: s.agenda.iter().map(|u| u.to_string()).collect(),
            attending_member_ids: s
                .attending_member_ids
                .iter()
                .map(|u| u.to_string())
                .collect(),
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

/// API response shape for a session-case entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionCaseResponse {
    pub id: String,
    pub session_id: String,
    pub case_id: String,
    pub agenda_order: i32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SessionCase> for SessionCaseResponse {
    fn from(sc: SessionCase) -> Self {
        Self {
            id: sc.id.to_string(),
            session_id: sc.session_id.to_string(),
            case_id: sc.case_id.to_string(),
            agenda_order: sc.agenda_order,
            status: sc.status.as_str().to_string(),
            result_text: sc.result_text,
            override_reason: sc.override_reason,
            created_at: sc.created_at.to_rfc3339(),
            updated_at: sc.updated_at.to_rfc3339(),
        }
    }
}

/// Derived session progress; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionProgressResponse {
    pub total: usize,
    pub resolved: usize,
    pub percent: f64,
}
