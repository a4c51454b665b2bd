use chrono::{Datelike, Utc};
use shared_types::{
    is_valid_case_classification, AppError, Case, CaseAuthority, CaseListParams, CaseStatus,
    CreateCaseRequest, CASE_CLASSIFICATIONS,
};
use uuid::Uuid;

use crate::db::Db;

/// Intake a new case with an auto-allocated per-year sequence number.
///
/// Registered authorities come in with the case (the administrative-phase
/// record); each may carry a member-directory link used by the
/// distribution conflict check.
pub fn create(db: &Db, req: CreateCaseRequest) -> Result<Case, AppError> {
    if !is_valid_case_classification(&req.classification) {
        return Err(AppError::bad_request(format!(
            "Invalid classification: {}. Valid values: {}",
            req.classification,
            CASE_CLASSIFICATIONS.join(", ")
        )));
    }

    let mut authorities = Vec::with_capacity(req.authorities.len());
    for input in &req.authorities {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("Authority name must not be empty"));
        }
        let member_id = input
            .member_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|_| AppError::bad_request("Invalid authority member_id UUID"))?;
        authorities.push(CaseAuthority {
            id: Uuid::new_v4(),
            name,
            member_id,
            active: input.active,
        });
    }

    let now = Utc::now();
    let year = now.year();

    let mut state = db.write();

    // Linked authorities must exist in the member directory.
    for authority in &authorities {
        if let Some(member_id) = authority.member_id {
            if !state.members.contains_key(&member_id) {
                return Err(AppError::not_found(format!(
                    "Authority {} links to unknown member {}",
                    authority.name, member_id
                )));
            }
        }
    }

    let case = Case {
        id: Uuid::new_v4(),
        sequence_number: state.next_case_sequence(year),
        year,
        classification: req.classification,
        status: CaseStatus::AwaitingAgenda,
        authorities,
        created_at: now,
        updated_at: now,
    };
    state.cases.insert(case.id, case.clone());
    Ok(case)
}

/// Fetch a case by id.
pub fn get(db: &Db, id: Uuid) -> Result<Case, AppError> {
    db.read()
        .cases
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", id)))
}

/// List cases with optional status/year filters, newest intake first.
pub fn list(db: &Db, params: &CaseListParams) -> Result<Vec<Case>, AppError> {
    let status = params
        .status
        .as_deref()
        .map(|s| {
            CaseStatus::parse(s)
                .ok_or_else(|| AppError::bad_request(format!("Invalid case status: {}", s)))
        })
        .transpose()?;

    let state = db.read();
    let mut cases: Vec<Case> = state
        .cases
        .values()
        .filter(|c| status.map_or(true, |s| c.status == s))
        .filter(|c| params.year.map_or(true, |y| c.year == y))
        .cloned()
        .collect();
    cases.sort_by(|a, b| (b.year, b.sequence_number).cmp(&(a.year, a.sequence_number)));
    Ok(cases)
}
