use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    /// The assignee is a registered authority on the case being distributed.
    AuthorityConflict,
    /// The distribution already has votes and can no longer be replaced.
    DistributionLocked,
    /// The voting member is neither rapporteur nor reviewer on the case.
    NotDistributed,
    /// A vote already exists for this (session case, member) pair.
    DuplicateVote,
    /// The parent session is concluded; children are frozen.
    SessionClosed,
    /// The structured vote inputs cannot produce a vote text.
    IncompleteVoteRationale,
    /// Concurrent sequence-number collision (retried once before surfacing).
    SequenceConflict,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::AuthorityConflict => write!(f, "AuthorityConflict"),
            AppErrorKind::DistributionLocked => write!(f, "DistributionLocked"),
            AppErrorKind::NotDistributed => write!(f, "NotDistributed"),
            AppErrorKind::DuplicateVote => write!(f, "DuplicateVote"),
            AppErrorKind::SessionClosed => write!(f, "SessionClosed"),
            AppErrorKind::IncompleteVoteRationale => write!(f, "IncompleteVoteRationale"),
            AppErrorKind::SequenceConflict => write!(f, "SequenceConflict"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured application error used across the judgment core and its REST surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn new(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::BadRequest, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Conflict, message)
    }

    pub fn authority_conflict(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::AuthorityConflict, message)
    }

    pub fn distribution_locked(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::DistributionLocked, message)
    }

    pub fn not_distributed(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotDistributed, message)
    }

    pub fn duplicate_vote(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::DuplicateVote, message)
    }

    pub fn session_closed(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::SessionClosed, message)
    }

    pub fn incomplete_vote_rationale(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::IncompleteVoteRationale, message)
    }

    pub fn sequence_conflict(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::SequenceConflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::InternalError, message)
    }

    #[cfg_attr(not(feature = "server"), allow(dead_code))]
    fn status_code_u16(&self) -> u16 {
        match self.kind {
            AppErrorKind::NotFound => 404,
            AppErrorKind::BadRequest => 400,
            AppErrorKind::ValidationError => 422,
            AppErrorKind::NotDistributed => 422,
            AppErrorKind::IncompleteVoteRationale => 422,
            AppErrorKind::Conflict => 409,
            AppErrorKind::AuthorityConflict => 409,
            AppErrorKind::DistributionLocked => 409,
            AppErrorKind::DuplicateVote => 409,
            AppErrorKind::SessionClosed => 409,
            AppErrorKind::SequenceConflict => 409,
            AppErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Validation failed", field_errors)
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trip_preserves_kind_and_message() {
        let err = AppError::authority_conflict("Member is an authority on this case");
        let json = serde_json::to_string(&err).unwrap();
        let back: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn field_errors_are_omitted_when_empty() {
        let err = AppError::duplicate_vote("Vote already recorded");
        let json = serde_json::to_string(&err).unwrap();
        assert!(!json.contains("field_errors"));
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = AppError::session_closed("Session 12/2026 is concluded");
        assert_eq!(
            err.to_string(),
            "SessionClosed: Session 12/2026 is concluded"
        );
    }

    #[test]
    fn domain_kinds_map_to_conflict_or_unprocessable() {
        assert_eq!(AppError::duplicate_vote("x").status_code_u16(), 409);
        assert_eq!(AppError::distribution_locked("x").status_code_u16(), 409);
        assert_eq!(AppError::sequence_conflict("x").status_code_u16(), 409);
        assert_eq!(AppError::not_distributed("x").status_code_u16(), 422);
        assert_eq!(AppError::incomplete_vote_rationale("x").status_code_u16(), 422);
        assert_eq!(AppError::not_found("x").status_code_u16(), 404);
    }
}
