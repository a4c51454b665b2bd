use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::extract::FromRef;
use uuid::Uuid;

use shared_types::{
    Case, DecisionDocument, Distribution, Member, NotificationAttempt, NotificationItem,
    NotificationList, NoticeSeed, OrdinalType, Session, SessionCase, Vote, VoteTemplate,
};

/// All aggregates of the judgment core.
///
/// Every workflow operation runs inside a single write guard over this
/// struct, so each operation is one logical transaction: either its full
/// set of changes commits or none does, and sequence allocation and
/// per-session-case mutation are serialized without cross-aggregate
/// locking.
#[derive(Debug, Default)]
pub struct DbState {
    pub members: HashMap<Uuid, Member>,
    pub cases: HashMap<Uuid, Case>,
    pub sessions: HashMap<Uuid, Session>,
    pub session_cases: HashMap<Uuid, SessionCase>,
    /// Keyed by session-case id; a session case has at most one distribution.
    pub distributions: HashMap<Uuid, Distribution>,
    /// Keyed by session-case id.
    pub votes: HashMap<Uuid, Vec<Vote>>,
    pub vote_templates: HashMap<Uuid, VoteTemplate>,
    pub decisions: HashMap<Uuid, DecisionDocument>,
    pub notification_lists: HashMap<Uuid, NotificationList>,
    pub notification_items: HashMap<Uuid, NotificationItem>,
    pub notification_attempts: HashMap<Uuid, NotificationAttempt>,
    /// Eligible-for-notification pool seeded by decisionPublished events.
    pub notice_seeds: Vec<NoticeSeed>,
}

impl DbState {
    /// Next per-year case intake sequence (read-max-then-increment).
    pub fn next_case_sequence(&self, year: i32) -> i64 {
        self.cases
            .values()
            .filter(|c| c.year == year)
            .map(|c| c.sequence_number)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Next per-year session sequence.
    pub fn next_session_sequence(&self, year: i32) -> i64 {
        self.sessions
            .values()
            .filter(|s| s.year == year)
            .map(|s| s.sequence_number)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Next per-year ordinal within an ordinal type (3rd ordinary, ...).
    pub fn next_session_ordinal(&self, year: i32, ordinal_type: OrdinalType) -> i64 {
        self.sessions
            .values()
            .filter(|s| s.year == year && s.ordinal_type == ordinal_type)
            .map(|s| s.ordinal_number)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Next per-year decision sequence, computed from the maximum existing
    /// sequence for the year. Deleting an earlier document never frees its
    /// number because the maximum is unaffected.
    pub fn next_decision_sequence(&self, year: i32) -> i64 {
        self.decisions
            .values()
            .filter(|d| d.year == year)
            .map(|d| d.sequence_number)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Whether a decision number pair is already committed.
    pub fn decision_sequence_taken(&self, sequence_number: i64, year: i32) -> bool {
        self.decisions
            .values()
            .any(|d| d.year == year && d.sequence_number == sequence_number)
    }

    pub fn find_decision_by_case(&self, case_id: Uuid) -> Option<&DecisionDocument> {
        self.decisions.values().find(|d| d.case_id == case_id)
    }

    pub fn find_session_case(&self, session_id: Uuid, case_id: Uuid) -> Option<&SessionCase> {
        self.session_cases
            .values()
            .find(|sc| sc.session_id == session_id && sc.case_id == case_id)
    }

    /// Votes recorded for a session case (empty slice when none).
    pub fn votes_for(&self, session_case_id: Uuid) -> &[Vote] {
        self.votes
            .get(&session_case_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Handle to the in-process store shared across handlers.
///
/// Entity CRUD plus the atomic sequence primitive, with per-operation
/// serialization supplied by the write guard.
#[derive(Clone, Default)]
pub struct Db(Arc<RwLock<DbState>>);

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, DbState> {
        self.0.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, DbState> {
        self.0
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Shared application state passed to Axum handlers via `State`.
#[derive(Clone, Default)]
pub struct AppState {
    pub db: Db,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Db {
        state.db.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared_types::CaseStatus;

    fn case(seq: i64, year: i32) -> Case {
        Case {
            id: Uuid::new_v4(),
            sequence_number: seq,
            year,
            classification: "iptu".to_string(),
            status: CaseStatus::AwaitingAgenda,
            authorities: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sequences_are_scoped_by_year() {
        let mut state = DbState::default();
        let a = case(1, 2025);
        let b = case(2, 2025);
        state.cases.insert(a.id, a);
        state.cases.insert(b.id, b);

        assert_eq!(state.next_case_sequence(2025), 3);
        assert_eq!(state.next_case_sequence(2026), 1);
    }

    #[test]
    fn decision_sequence_never_reuses_after_removal() {
        let mut state = DbState::default();
        let d1 = DecisionDocument {
            id: Uuid::new_v4(),
            case_id: Uuid::new_v4(),
            sequence_number: 1,
            year: 2026,
            ementa_title: "t".to_string(),
            ementa_body: "b".to_string(),
            vote_file: None,
            decision_file: None,
            publications: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let d2 = DecisionDocument {
            id: Uuid::new_v4(),
            sequence_number: 2,
            ..d1.clone()
        };
        state.decisions.insert(d1.id, d1.clone());
        state.decisions.insert(d2.id, d2);

        // Removing an earlier decision must not free its number.
        state.decisions.remove(&d1.id);
        assert_eq!(state.next_decision_sequence(2026), 3);
    }
}
