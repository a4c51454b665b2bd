use chrono::{Datelike, Utc};
use shared_types::{
    AppError, CaseSessionStatus, CaseStatus, ConcludeSessionCaseRequest, CreateSessionRequest,
    OrdinalType, Session, SessionCase, SessionProgressResponse, SessionStatus,
    UpdateSessionCaseStatusRequest, UpdateSessionStatusRequest,
};
use uuid::Uuid;

use crate::db::Db;
use crate::judgment::transitions;

/// Schedule a new session with auto-allocated sequence and ordinal numbers.
pub fn create(db: &Db, req: CreateSessionRequest) -> Result<Session, AppError> {
    let ordinal_type = OrdinalType::parse(&req.ordinal_type).ok_or_else(|| {
        AppError::bad_request(format!(
            "Invalid ordinal_type: {}. Valid values: {}",
            req.ordinal_type,
            OrdinalType::ALL
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let president_id = req
        .president_id
        .as_deref()
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|_| AppError::bad_request("Invalid president_id UUID"))?;

    let now = Utc::now();
    let year = req.date.year();

    let mut state = db.write();

    if let Some(president_id) = president_id {
        if !state.members.contains_key(&president_id) {
            return Err(AppError::not_found(format!(
                "President member {} not found",
                president_id
            )));
        }
    }

    let session = Session {
        id: Uuid::new_v4(),
        sequence_number: state.next_session_sequence(year),
        year,
        ordinal_number: state.next_session_ordinal(year, ordinal_type),
        ordinal_type,
        date: req.date,
        start_time: req.start_time,
        end_time: req.end_time,
        president_id,
        status: SessionStatus::AwaitingPublication,
        agenda: vec![],
        attending_member_ids: vec![],
        created_at: now,
        updated_at: now,
    };
    state.sessions.insert(session.id, session.clone());
    Ok(session)
}

/// Fetch a session by id.
pub fn get(db: &Db, id: Uuid) -> Result<Session, AppError> {
    db.read()
        .sessions
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Session {} not found", id)))
}

/// List sessions, most recent date first.
pub fn list(db: &Db) -> Vec<Session> {
    let state = db.read();
    let mut sessions: Vec<Session> = state.sessions.values().cloned().collect();
    sessions.sort_by(|a, b| b.date.cmp(&a.date));
    sessions
}

/// Record the attending members of a session. Rejected once the session is
/// terminal; every id must reference an active member.
pub fn set_attendance(db: &Db, session_id: Uuid, member_ids: &[String]) -> Result<Session, AppError> {
    let mut ids = Vec::with_capacity(member_ids.len());
    for raw in member_ids {
        let id = Uuid::parse_str(raw)
            .map_err(|_| AppError::bad_request(format!("Invalid member UUID: {}", raw)))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    let mut state = db.write();

    for id in &ids {
        match state.members.get(id) {
            None => return Err(AppError::not_found(format!("Member {} not found", id))),
            Some(m) if !m.active => {
                return Err(AppError::bad_request(format!(
                    "Member {} is inactive and cannot attend",
                    m.name
                )))
            }
            Some(_) => {}
        }
    }

    let session = state
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::not_found(format!("Session {} not found", session_id)))?;
    transitions::ensure_session_open(session)?;
    session.attending_member_ids = ids;
    session.updated_at = Utc::now();
    Ok(session.clone())
}

/// Move a session through its lifecycle.
pub fn transition_status(
    db: &Db,
    session_id: Uuid,
    req: &UpdateSessionStatusRequest,
) -> Result<Session, AppError> {
    let next = SessionStatus::parse(&req.status).ok_or_else(|| {
        AppError::bad_request(format!(
            "Invalid session status: {}. Valid values: {}",
            req.status,
            SessionStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let mut state = db.write();
    let session = state
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::not_found(format!("Session {} not found", session_id)))?;

    session.status = transitions::session_transition(session.status, next)?;
    session.updated_at = Utc::now();
    Ok(session.clone())
}

/// Place a case on a session's agenda at the next order slot.
/// The case enters `InAgenda`; a judged case re-enters here on continuance.
pub fn add_case(db: &Db, session_id: Uuid, case_id: Uuid) -> Result<SessionCase, AppError> {
    let now = Utc::now();
    let mut state = db.write();

    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::not_found(format!("Session {} not found", session_id)))?;
    transitions::ensure_session_open(session)?;
    let agenda_order = session.agenda.len() as i32 + 1;

    if !state.cases.contains_key(&case_id) {
        return Err(AppError::not_found(format!("Case {} not found", case_id)));
    }
    if state.find_session_case(session_id, case_id).is_some() {
        return Err(AppError::conflict(
            "Case is already on this session's agenda",
        ));
    }

    let session_case = SessionCase {
        id: Uuid::new_v4(),
        session_id,
        case_id,
        agenda_order,
        status: CaseSessionStatus::InAgenda,
        result_text: None,
        override_reason: None,
        created_at: now,
        updated_at: now,
    };
    state
        .session_cases
        .insert(session_case.id, session_case.clone());

    if let Some(session) = state.sessions.get_mut(&session_id) {
        session.agenda.push(session_case.id);
        session.updated_at = now;
    }
    if let Some(case) = state.cases.get_mut(&case_id) {
        case.status = CaseStatus::InAgenda;
        case.updated_at = now;
    }
    Ok(session_case)
}

/// Take a case off the agenda. Only possible while no vote exists for the
/// appearance; the case returns to the intake queue.
pub fn remove_case(db: &Db, session_case_id: Uuid) -> Result<(), AppError> {
    let now = Utc::now();
    let mut state = db.write();

    let session_case = state
        .session_cases
        .get(&session_case_id)
        .cloned()
        .ok_or_else(|| {
            AppError::not_found(format!("Session case {} not found", session_case_id))
        })?;

    let session = state
        .sessions
        .get(&session_case.session_id)
        .ok_or_else(|| AppError::not_found("Owning session not found"))?;
    transitions::ensure_session_open(session)?;

    if !state.votes_for(session_case_id).is_empty() {
        return Err(AppError::conflict(
            "Votes are recorded for this agenda entry; it can no longer be removed",
        ));
    }

    state.session_cases.remove(&session_case_id);
    state.distributions.remove(&session_case_id);
    if let Some(session) = state.sessions.get_mut(&session_case.session_id) {
        session.agenda.retain(|id| *id != session_case_id);
        session.updated_at = now;
    }
    if let Some(case) = state.cases.get_mut(&session_case.case_id) {
        case.status = CaseStatus::AwaitingAgenda;
        case.updated_at = now;
    }
    Ok(())
}

/// Fetch a session-case entry by id.
pub fn get_session_case(db: &Db, id: Uuid) -> Result<SessionCase, AppError> {
    db.read()
        .session_cases
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Session case {} not found", id)))
}

/// The session's agenda in order.
pub fn list_agenda(db: &Db, session_id: Uuid) -> Result<Vec<SessionCase>, AppError> {
    let state = db.read();
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::not_found(format!("Session {} not found", session_id)))?;
    Ok(session
        .agenda
        .iter()
        .filter_map(|id| state.session_cases.get(id))
        .cloned()
        .collect())
}

/// Administrative status override on an agenda entry, with recorded cause.
/// The owning case mirrors the new status.
pub fn update_session_case_status(
    db: &Db,
    session_case_id: Uuid,
    req: &UpdateSessionCaseStatusRequest,
) -> Result<SessionCase, AppError> {
    let next = CaseSessionStatus::parse(&req.status).ok_or_else(|| {
        AppError::bad_request(format!(
            "Invalid session case status: {}. Valid values: {}",
            req.status,
            CaseSessionStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let now = Utc::now();
    let mut state = db.write();

    let session_case = state
        .session_cases
        .get(&session_case_id)
        .cloned()
        .ok_or_else(|| {
            AppError::not_found(format!("Session case {} not found", session_case_id))
        })?;
    let session = state
        .sessions
        .get(&session_case.session_id)
        .ok_or_else(|| AppError::not_found("Owning session not found"))?;
    transitions::ensure_session_open(session)?;

    let next = transitions::session_case_override(session_case.status, next, req.reason.as_deref())?;

    let updated = {
        let entry = state
            .session_cases
            .get_mut(&session_case_id)
            .ok_or_else(|| AppError::internal("Session case disappeared during update"))?;
        entry.status = next;
        entry.override_reason = req.reason.clone();
        entry.updated_at = now;
        entry.clone()
    };
    if let Some(case) = state.cases.get_mut(&session_case.case_id) {
        case.status = transitions::case_status_from_session(next);
        case.updated_at = now;
    }
    Ok(updated)
}

/// Explicit conclusion of a judged case: requires the full vote set of the
/// distribution. Recording a vote never triggers this implicitly.
pub fn conclude_session_case(
    db: &Db,
    session_case_id: Uuid,
    req: &ConcludeSessionCaseRequest,
) -> Result<SessionCase, AppError> {
    let now = Utc::now();
    let mut state = db.write();

    let session_case = state
        .session_cases
        .get(&session_case_id)
        .cloned()
        .ok_or_else(|| {
            AppError::not_found(format!("Session case {} not found", session_case_id))
        })?;
    let session = state
        .sessions
        .get(&session_case.session_id)
        .ok_or_else(|| AppError::not_found("Owning session not found"))?;
    transitions::ensure_session_open(session)?;

    let distribution = state
        .distributions
        .get(&session_case_id)
        .ok_or_else(|| AppError::not_distributed("No distribution exists for this case"))?;
    let expected = distribution.voting_member_ids().len();
    let recorded = state.votes_for(session_case_id).len();

    let next = transitions::session_case_judge(session_case.status, recorded, expected)?;

    let updated = {
        let entry = state
            .session_cases
            .get_mut(&session_case_id)
            .ok_or_else(|| AppError::internal("Session case disappeared during update"))?;
        entry.status = next;
        if let Some(result_text) = &req.result_text {
            entry.result_text = Some(result_text.clone());
        }
        entry.updated_at = now;
        entry.clone()
    };
    if let Some(case) = state.cases.get_mut(&session_case.case_id) {
        case.status = CaseStatus::Judged;
        case.updated_at = now;
    }
    Ok(updated)
}

/// Derived progress of a session's agenda; never persisted.
pub fn progress(db: &Db, session_id: Uuid) -> Result<SessionProgressResponse, AppError> {
    let state = db.read();
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::not_found(format!("Session {} not found", session_id)))?;

    let total = session.agenda.len();
    let resolved = session
        .agenda
        .iter()
        .filter_map(|id| state.session_cases.get(id))
        .filter(|sc| sc.status.is_resolved())
        .count();
    let percent = if total == 0 {
        0.0
    } else {
        resolved as f64 * 100.0 / total as f64
    };
    Ok(SessionProgressResponse {
        total,
        resolved,
        percent,
    })
}
