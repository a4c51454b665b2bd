//! Status transition guards, one function per aggregate.
//!
//! The repo layer never assigns a status field directly; every movement
//! passes through here so the legal edges live in one place.

use shared_types::{
    AppError, AttemptStatus, CaseSessionStatus, CaseStatus, Session, SessionStatus,
};

/// Reject any mutation beneath a session that is no longer open.
/// `Concluded` freezes all child distributions and votes; a cancelled
/// session has no children worth mutating either.
pub fn ensure_session_open(session: &Session) -> Result<(), AppError> {
    match session.status {
        SessionStatus::Concluded => Err(AppError::session_closed(format!(
            "Session {} is concluded; its distributions and votes are frozen",
            session.session_number()
        ))),
        SessionStatus::Cancelled => Err(AppError::conflict(format!(
            "Session {} is cancelled",
            session.session_number()
        ))),
        _ => Ok(()),
    }
}

/// Validate a session status movement.
///
/// Linear lifecycle with cancellation from any non-terminal state:
/// `AwaitingPublication → AgendaPublished → InProgress → Concluded`.
pub fn session_transition(
    current: SessionStatus,
    next: SessionStatus,
) -> Result<SessionStatus, AppError> {
    let allowed = matches!(
        (current, next),
        (SessionStatus::AwaitingPublication, SessionStatus::AgendaPublished)
            | (SessionStatus::AgendaPublished, SessionStatus::InProgress)
            | (SessionStatus::InProgress, SessionStatus::Concluded)
    ) || (!current.is_terminal() && next == SessionStatus::Cancelled);

    if allowed {
        Ok(next)
    } else if current.is_terminal() {
        Err(AppError::session_closed(format!(
            "Session status {} is terminal",
            current
        )))
    } else {
        Err(AppError::conflict(format!(
            "Illegal session transition {} → {}",
            current, next
        )))
    }
}

/// Validate an administrative override on a session-case status.
///
/// Overrides move between the non-judged states and always carry a recorded
/// cause; `Judged` is reachable only through `session_case_judge`.
pub fn session_case_override(
    current: CaseSessionStatus,
    next: CaseSessionStatus,
    reason: Option<&str>,
) -> Result<CaseSessionStatus, AppError> {
    if next.is_judged() {
        return Err(AppError::bad_request(
            "A case is judged through the conclusion action, not a status override",
        ));
    }
    if current.is_judged() {
        return Err(AppError::conflict(
            "Session case is already judged; its status is terminal for this appearance",
        ));
    }
    if current == next {
        return Err(AppError::bad_request(format!(
            "Session case already has status {}",
            current
        )));
    }
    match reason {
        Some(r) if !r.trim().is_empty() => Ok(next),
        _ => Err(AppError::validation(
            "Administrative status overrides require a recorded cause",
            [("reason".to_string(), "Reason is required".to_string())]
                .into_iter()
                .collect(),
        )),
    }
}

/// Validate the explicit conclusion of a session case.
///
/// The vote set must have reached resolution: at least one vote exists and
/// every distributed member has voted.
pub fn session_case_judge(
    current: CaseSessionStatus,
    recorded_votes: usize,
    expected_votes: usize,
) -> Result<CaseSessionStatus, AppError> {
    if current.is_judged() {
        return Err(AppError::conflict("Session case is already judged"));
    }
    if recorded_votes == 0 {
        return Err(AppError::validation(
            "Cannot judge a case with no votes recorded",
            Default::default(),
        ));
    }
    if recorded_votes < expected_votes {
        return Err(AppError::conflict(format!(
            "Vote set has not reached resolution: {} of {} votes recorded",
            recorded_votes, expected_votes
        )));
    }
    Ok(CaseSessionStatus::Judged)
}

/// A case mirrors the status of its live appearance on an agenda.
pub fn case_status_from_session(status: CaseSessionStatus) -> CaseStatus {
    match status {
        CaseSessionStatus::InAgenda => CaseStatus::InAgenda,
        CaseSessionStatus::Suspended => CaseStatus::Suspended,
        CaseSessionStatus::UnderInquiry => CaseStatus::UnderInquiry,
        CaseSessionStatus::ViewRequested => CaseStatus::ViewRequested,
        CaseSessionStatus::Judged => CaseStatus::Judged,
    }
}

/// Validate a notification-attempt status movement. `Pending` is the only
/// state with outgoing edges; the three outcomes are terminal.
pub fn attempt_transition(
    current: AttemptStatus,
    next: AttemptStatus,
) -> Result<AttemptStatus, AppError> {
    if current.is_terminal() {
        return Err(AppError::conflict(format!(
            "Notification attempt is already {}",
            current
        )));
    }
    if next == AttemptStatus::Pending {
        return Err(AppError::bad_request(
            "A notification attempt cannot return to pending",
        ));
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;

    #[test]
    fn session_lifecycle_is_linear() {
        assert!(session_transition(
            SessionStatus::AwaitingPublication,
            SessionStatus::AgendaPublished
        )
        .is_ok());
        assert!(
            session_transition(SessionStatus::AgendaPublished, SessionStatus::InProgress).is_ok()
        );
        assert!(session_transition(SessionStatus::InProgress, SessionStatus::Concluded).is_ok());

        // No skipping straight to conclusion.
        let err = session_transition(SessionStatus::AgendaPublished, SessionStatus::Concluded)
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[test]
    fn cancellation_reachable_from_any_non_terminal_state() {
        for status in [
            SessionStatus::AwaitingPublication,
            SessionStatus::AgendaPublished,
            SessionStatus::InProgress,
        ] {
            assert!(session_transition(status, SessionStatus::Cancelled).is_ok());
        }
        let err =
            session_transition(SessionStatus::Concluded, SessionStatus::Cancelled).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::SessionClosed);
    }

    #[test]
    fn override_requires_cause() {
        let err = session_case_override(
            CaseSessionStatus::InAgenda,
            CaseSessionStatus::Suspended,
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);

        let ok = session_case_override(
            CaseSessionStatus::InAgenda,
            CaseSessionStatus::Suspended,
            Some("Awaiting expert report"),
        );
        assert_eq!(ok.unwrap(), CaseSessionStatus::Suspended);
    }

    #[test]
    fn override_cannot_reach_judged() {
        let err = session_case_override(
            CaseSessionStatus::InAgenda,
            CaseSessionStatus::Judged,
            Some("cause"),
        )
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
    }

    #[test]
    fn judging_with_zero_votes_is_rejected() {
        let err = session_case_judge(CaseSessionStatus::InAgenda, 0, 0).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
    }

    #[test]
    fn judging_requires_full_vote_set() {
        let err = session_case_judge(CaseSessionStatus::InAgenda, 1, 3).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);

        let ok = session_case_judge(CaseSessionStatus::InAgenda, 3, 3);
        assert_eq!(ok.unwrap(), CaseSessionStatus::Judged);
    }

    #[test]
    fn attempt_outcomes_are_terminal() {
        assert!(attempt_transition(AttemptStatus::Pending, AttemptStatus::Confirmed).is_ok());
        let err =
            attempt_transition(AttemptStatus::Confirmed, AttemptStatus::Expired).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }
}
