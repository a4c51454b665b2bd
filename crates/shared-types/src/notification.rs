use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Notification vocabulary ─────────────────────────────────────────

/// Delivery channel for a notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    Email,
    Whatsapp,
    Correios,
    InPerson,
    PublicNotice,
}

impl NotificationChannel {
    pub const ALL: &'static [NotificationChannel] = &[
        NotificationChannel::Email,
        NotificationChannel::Whatsapp,
        NotificationChannel::Correios,
        NotificationChannel::InPerson,
        NotificationChannel::PublicNotice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Whatsapp => "whatsapp",
            NotificationChannel::Correios => "correios",
            NotificationChannel::InPerson => "in_person",
            NotificationChannel::PublicNotice => "public_notice",
        }
    }

    pub fn parse(s: &str) -> Option<NotificationChannel> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a delivery attempt: `Pending` until confirmed, expired
/// (deadline passed) or failed. All three outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Pending,
    Confirmed,
    Expired,
    Failed,
}

impl AttemptStatus {
    pub const ALL: &'static [AttemptStatus] = &[
        AttemptStatus::Pending,
        AttemptStatus::Confirmed,
        AttemptStatus::Expired,
        AttemptStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::Pending => "pending",
            AttemptStatus::Confirmed => "confirmed",
            AttemptStatus::Expired => "expired",
            AttemptStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<AttemptStatus> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AttemptStatus::Pending)
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Notification records ───────────────────────────────────────────

/// A batch of cases needing formal notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotificationList {
    pub id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// One case inside a notification list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotificationItem {
    pub id: Uuid,
    pub list_id: Uuid,
    pub case_id: Uuid,
    /// Carried from the decisionPublished event that seeded eligibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One delivery attempt for a notification item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotificationAttempt {
    pub id: Uuid,
    pub item_id: Uuid,
    pub channel: NotificationChannel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub status: AttemptStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry in the eligible-for-notification pool, seeded by
/// `decisionPublished` events from the judgment core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NoticeSeed {
    pub case_id: Uuid,
    pub decision_number: String,
    pub published_at: NaiveDate,
}

// ── API request/response types ─────────────────────────────────────

/// Request DTO for opening a notification list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateNotificationListRequest {
    pub description: String,
}

/// Request DTO for adding a case to a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddNotificationItemRequest {
    pub case_id: String,
}

/// Request DTO for registering a delivery attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecordAttemptRequest {
    pub channel: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// API response shape for a notification list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotificationListResponse {
    pub id: String,
    pub description: String,
    pub created_at: String,
}

impl From<NotificationList> for NotificationListResponse {
    fn from(l: NotificationList) -> Self {
        Self {
            id: l.id.to_string(),
            description: l.description,
            created_at: l.created_at.to_rfc3339(),
        }
    }
}

/// API response shape for a notification item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotificationItemResponse {
    pub id: String,
    pub list_id: String,
    pub case_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_number: Option<String>,
    pub created_at: String,
}

impl From<NotificationItem> for NotificationItemResponse {
    fn from(i: NotificationItem) -> Self {
        Self {
            id: i.id.to_string(),
            list_id: i.list_id.to_string(),
            case_id: i.case_id.to_string(),
            decision_number: i.decision_number,
            created_at: i.created_at.to_rfc3339(),
        }
    }
}

/// API response shape for a notification attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotificationAttemptResponse {
    pub id: String,
    pub item_id: String,
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<NotificationAttempt> for NotificationAttemptResponse {
    fn from(a: NotificationAttempt) -> Self {
        Self {
            id: a.id.to_string(),
            item_id: a.item_id.to_string(),
            channel: a.channel.as_str().to_string(),
            deadline: a.deadline.map(|d| d.to_string()),
            status: a.status.as_str().to_string(),
            confirmed_at: a.confirmed_at.map(|t| t.to_rfc3339()),
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

/// API response shape for an eligible-for-notification pool entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NoticeSeedResponse {
    pub case_id: String,
    pub decision_number: String,
    pub published_at: String,
}

impl From<NoticeSeed> for NoticeSeedResponse {
    fn from(s: NoticeSeed) -> Self {
        Self {
            case_id: s.case_id.to_string(),
            decision_number: s.decision_number,
            published_at: s.published_at.to_string(),
        }
    }
}
