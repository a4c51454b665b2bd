use chrono::Utc;
use shared_types::{AppError, AssignDistributionRequest, Case, Distribution, Member};
use uuid::Uuid;

use crate::db::Db;
use crate::judgment::transitions;

/// Check one candidate against the case's registered authorities.
///
/// Identity is matched by authority→member link when the record carries
/// one; unlinked records fall back to case-insensitive name comparison,
/// preserving the behavior of legacy authority data.
fn check_authority_conflict(case: &Case, member: &Member) -> Result<(), AppError> {
    for authority in &case.authorities {
        let conflicted = match authority.member_id {
            Some(linked) => linked == member.id,
            None => authority.name.to_lowercase() == member.name.to_lowercase(),
        };
        if conflicted {
            return Err(AppError::authority_conflict(format!(
                "{} is a registered authority on case {} and cannot judge it",
                member.name,
                case.case_number()
            )));
        }
    }
    Ok(())
}

/// Create or replace the distribution of a session case.
///
/// All validation happens before any write: attendance, duplicate roles
/// and the authority-conflict rule either pass completely or nothing is
/// persisted. Replacement is rejected once any vote exists.
pub fn assign(
    db: &Db,
    session_case_id: Uuid,
    req: &AssignDistributionRequest,
) -> Result<Distribution, AppError> {
    let rapporteur_id = Uuid::parse_str(&req.rapporteur_id)
        .map_err(|_| AppError::bad_request("Invalid rapporteur_id UUID"))?;
    let mut reviewer_ids = Vec::with_capacity(req.reviewer_ids.len());
    for raw in &req.reviewer_ids {
        let id = Uuid::parse_str(raw)
            .map_err(|_| AppError::bad_request(format!("Invalid reviewer UUID: {}", raw)))?;
        if id == rapporteur_id || reviewer_ids.contains(&id) {
            return Err(AppError::bad_request(
                "A member may hold only one role in a distribution",
            ));
        }
        reviewer_ids.push(id);
    }

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
        return Err(AppError::distribution_locked(
            "Votes exist for this case; the distribution can no longer be changed",
        ));
    }

    let case = state
        .cases
        .get(&session_case.case_id)
        .ok_or_else(|| AppError::not_found("Owning case not found"))?;

    for member_id in std::iter::once(rapporteur_id).chain(reviewer_ids.iter().copied()) {
        let member = state
            .members
            .get(&member_id)
            .ok_or_else(|| AppError::not_found(format!("Member {} not found", member_id)))?;
        if !session.attending_member_ids.contains(&member_id) {
            return Err(AppError::bad_request(format!(
                "{} is not attending session {}",
                member.name,
                session.session_number()
            )));
        }
        check_authority_conflict(case, member)?;
    }

    let distribution = Distribution {
        session_case_id,
        rapporteur_id,
        reviewer_ids,
        created_at: state
            .distributions
            .get(&session_case_id)
            .map(|d| d.created_at)
            .unwrap_or(now),
        updated_at: now,
    };
    state
        .distributions
        .insert(session_case_id, distribution.clone());
    Ok(distribution)
}

/// Fetch the distribution of a session case.
pub fn get(db: &Db, session_case_id: Uuid) -> Result<Distribution, AppError> {
    db.read()
        .distributions
        .get(&session_case_id)
        .cloned()
        .ok_or_else(|| {
            AppError::not_found(format!(
                "No distribution for session case {}",
                session_case_id
            ))
        })
}
