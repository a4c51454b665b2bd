use chrono::Utc;
use shared_types::{AppError, CreateMemberRequest, Member};
use uuid::Uuid;

use crate::db::Db;

/// Register a new member in the directory.
pub fn create(db: &Db, req: CreateMemberRequest) -> Result<Member, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("Member name must not be empty"));
    }

    let member = Member {
        id: Uuid::new_v4(),
        name,
        active: req.active,
        created_at: Utc::now(),
    };

    let mut state = db.write();
    state.members.insert(member.id, member.clone());
    Ok(member)
}

/// Fetch a member by id.
pub fn get(db: &Db, id: Uuid) -> Result<Member, AppError> {
    db.read()
        .members
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Member {} not found", id)))
}

/// List members, optionally filtered by active flag, ordered by name.
pub fn list(db: &Db, active: Option<bool>) -> Vec<Member> {
    let state = db.read();
    let mut members: Vec<Member> = state
        .members
        .values()
        .filter(|m| active.map_or(true, |a| m.active == a))
        .cloned()
        .collect();
    members.sort_by(|a, b| a.name.cmp(&b.name));
    members
}
