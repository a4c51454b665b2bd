use chrono::Utc;
use shared_types::{
    AppError, AppErrorKind, DecisionDocument, EmitDecisionRequest, Publication,
    PublishDecisionRequest,
};
use uuid::Uuid;

use crate::db::{Db, DbState};
use crate::repo::notification;

/// Bound on automatic retries after a sequence-number collision.
const SEQUENCE_RETRIES: usize = 1;

fn try_allocate(
    state: &mut DbState,
    case_id: Uuid,
    req: &EmitDecisionRequest,
) -> Result<DecisionDocument, AppError> {
    let case = state
        .cases
        .get(&case_id)
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", case_id)))?;
    let year = case.year;

    let sequence_number = state.next_decision_sequence(year);
    if state.decision_sequence_taken(sequence_number, year) {
        return Err(AppError::sequence_conflict(format!(
            "Decision number {}/{} was allocated concurrently",
            sequence_number, year
        )));
    }

    let now = Utc::now();
    let decision = DecisionDocument {
        id: Uuid::new_v4(),
        case_id,
        sequence_number,
        year,
        ementa_title: req.ementa_title.clone(),
        ementa_body: req.ementa_body.clone(),
        vote_file: req.vote_file.clone(),
        decision_file: req.decision_file.clone(),
        publications: vec![],
        created_at: now,
        updated_at: now,
    };
    state.decisions.insert(decision.id, decision.clone());
    Ok(decision)
}

/// Emit the decision document (acórdão) for a judged case.
///
/// One per case; the number is the next per-year sequence, allocated with
/// read-max-then-increment under the transaction guard. A sequence
/// collision is retried once before surfacing. Emission does not publish:
/// drafting and release are decoupled.
pub fn emit(db: &Db, case_id: Uuid, req: &EmitDecisionRequest) -> Result<DecisionDocument, AppError> {
    if req.ementa_title.trim().is_empty() || req.ementa_body.trim().is_empty() {
        return Err(AppError::bad_request(
            "ementa_title and ementa_body are required",
        ));
    }

    let mut state = db.write();

    let case = state
        .cases
        .get(&case_id)
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", case_id)))?;
    if !case.status.is_judged() {
        return Err(AppError::conflict(format!(
            "Case {} is not judged; no decision can be emitted",
            case.case_number()
        )));
    }
    if state.find_decision_by_case(case_id).is_some() {
        return Err(AppError::conflict(
            "A decision document already exists for this case",
        ));
    }

    let mut attempts = 0;
    loop {
        match try_allocate(&mut state, case_id, req) {
            Err(err) if err.kind == AppErrorKind::SequenceConflict && attempts < SEQUENCE_RETRIES => {
                attempts += 1;
                tracing::warn!(case_id = %case_id, "decision number collision, retrying");
            }
            result => return result,
        }
    }
}

/// Fetch a decision by id.
pub fn get(db: &Db, id: Uuid) -> Result<DecisionDocument, AppError> {
    db.read()
        .decisions
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Decision {} not found", id)))
}

/// Fetch the decision of a case.
pub fn get_by_case(db: &Db, case_id: Uuid) -> Result<DecisionDocument, AppError> {
    db.read()
        .find_decision_by_case(case_id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("No decision for case {}", case_id)))
}

/// Append a publication entry to a decision.
///
/// Order 1 is the first release; later calls append republications with
/// order = previous max + 1. Entries are never edited or removed. Each
/// release also seeds the notification tracker's eligibility pool.
pub fn publish(
    db: &Db,
    decision_id: Uuid,
    req: &PublishDecisionRequest,
) -> Result<DecisionDocument, AppError> {
    if req.publication_number.trim().is_empty() {
        return Err(AppError::bad_request("publication_number is required"));
    }

    let now = Utc::now();
    let mut state = db.write();

    let (case_id, decision_number) = {
        let decision = state
            .decisions
            .get_mut(&decision_id)
            .ok_or_else(|| AppError::not_found(format!("Decision {} not found", decision_id)))?;

        let publication_order = decision
            .publications
            .iter()
            .map(|p| p.publication_order)
            .max()
            .unwrap_or(0)
            + 1;
        decision.publications.push(Publication {
            publication_order,
            publication_number: req.publication_number.clone(),
            publication_date: req.publication_date,
            created_at: now,
        });
        decision.updated_at = now;
        (decision.case_id, decision.decision_number())
    };

    // decisionPublished event: the notification tracker marks the case
    // eligible for formal notice. One-way coupling.
    notification::seed_from_publication(&mut state, case_id, decision_number, req.publication_date);

    state
        .decisions
        .get(&decision_id)
        .cloned()
        .ok_or_else(|| AppError::internal("Decision disappeared during publication"))
}
