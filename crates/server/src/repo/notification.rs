use chrono::{NaiveDate, Utc};
use shared_types::{
    AddNotificationItemRequest, AppError, AttemptStatus, CreateNotificationListRequest,
    NotificationAttempt, NotificationChannel, NotificationItem, NotificationList, NoticeSeed,
    RecordAttemptRequest,
};
use uuid::Uuid;

use crate::db::{Db, DbState};
use crate::judgment::transitions;

/// Consume a `decisionPublished` event: mark the case eligible for formal
/// notice. A republication refreshes the existing pool entry.
pub(crate) fn seed_from_publication(
    state: &mut DbState,
    case_id: Uuid,
    decision_number: String,
    published_at: NaiveDate,
) {
    state.notice_seeds.retain(|s| s.case_id != case_id);
    state.notice_seeds.push(NoticeSeed {
        case_id,
        decision_number,
        published_at,
    });
}

/// The eligible-for-notification pool, oldest publication first.
pub fn list_eligible(db: &Db) -> Vec<NoticeSeed> {
    let mut seeds = db.read().notice_seeds.clone();
    seeds.sort_by(|a, b| a.published_at.cmp(&b.published_at));
    seeds
}

/// Open a new notification list.
pub fn create_list(db: &Db, req: CreateNotificationListRequest) -> Result<NotificationList, AppError> {
    if req.description.trim().is_empty() {
        return Err(AppError::bad_request("List description is required"));
    }
    let list = NotificationList {
        id: Uuid::new_v4(),
        description: req.description,
        created_at: Utc::now(),
    };
    db.write()
        .notification_lists
        .insert(list.id, list.clone());
    Ok(list)
}

/// Fetch a list by id.
pub fn get_list(db: &Db, id: Uuid) -> Result<NotificationList, AppError> {
    db.read()
        .notification_lists
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Notification list {} not found", id)))
}

/// All lists, newest first.
pub fn list_lists(db: &Db) -> Vec<NotificationList> {
    let mut lists: Vec<NotificationList> =
        db.read().notification_lists.values().cloned().collect();
    lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    lists
}

/// Add a case to a notification list (one item per case per list).
/// If the case sits in the eligibility pool, the pool entry is drained
/// into the item, carrying the decision number along.
pub fn add_item(
    db: &Db,
    list_id: Uuid,
    req: &AddNotificationItemRequest,
) -> Result<NotificationItem, AppError> {
    let case_id = Uuid::parse_str(&req.case_id)
        .map_err(|_| AppError::bad_request("Invalid case_id UUID"))?;

    let mut state = db.write();

    if !state.notification_lists.contains_key(&list_id) {
        return Err(AppError::not_found(format!(
            "Notification list {} not found",
            list_id
        )));
    }
    if !state.cases.contains_key(&case_id) {
        return Err(AppError::not_found(format!("Case {} not found", case_id)));
    }
    if state
        .notification_items
        .values()
        .any(|i| i.list_id == list_id && i.case_id == case_id)
    {
        return Err(AppError::conflict("Case is already on this list"));
    }

    let seed = state
        .notice_seeds
        .iter()
        .position(|s| s.case_id == case_id)
        .map(|idx| state.notice_seeds.remove(idx));

    let item = NotificationItem {
        id: Uuid::new_v4(),
        list_id,
        case_id,
        decision_number: seed.map(|s| s.decision_number),
        created_at: Utc::now(),
    };
    state.notification_items.insert(item.id, item.clone());
    Ok(item)
}

/// Items of a list, insertion order by creation time.
pub fn list_items(db: &Db, list_id: Uuid) -> Result<Vec<NotificationItem>, AppError> {
    let state = db.read();
    if !state.notification_lists.contains_key(&list_id) {
        return Err(AppError::not_found(format!(
            "Notification list {} not found",
            list_id
        )));
    }
    let mut items: Vec<NotificationItem> = state
        .notification_items
        .values()
        .filter(|i| i.list_id == list_id)
        .cloned()
        .collect();
    items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(items)
}

/// Register a delivery attempt on an item. Starts pending; the deadline,
/// when present, gates later expiry.
pub fn record_attempt(
    db: &Db,
    item_id: Uuid,
    req: &RecordAttemptRequest,
) -> Result<NotificationAttempt, AppError> {
    let channel = NotificationChannel::parse(&req.channel).ok_or_else(|| {
        AppError::bad_request(format!(
            "Invalid channel: {}. Valid values: {}",
            req.channel,
            NotificationChannel::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let now = Utc::now();
    let mut state = db.write();

    if !state.notification_items.contains_key(&item_id) {
        return Err(AppError::not_found(format!(
            "Notification item {} not found",
            item_id
        )));
    }

    let attempt = NotificationAttempt {
        id: Uuid::new_v4(),
        item_id,
        channel,
        deadline: req.deadline,
        status: AttemptStatus::Pending,
        confirmed_at: None,
        created_at: now,
        updated_at: now,
    };
    state
        .notification_attempts
        .insert(attempt.id, attempt.clone());
    Ok(attempt)
}

/// Attempts of an item, oldest first.
pub fn list_attempts(db: &Db, item_id: Uuid) -> Result<Vec<NotificationAttempt>, AppError> {
    let state = db.read();
    if !state.notification_items.contains_key(&item_id) {
        return Err(AppError::not_found(format!(
            "Notification item {} not found",
            item_id
        )));
    }
    let mut attempts: Vec<NotificationAttempt> = state
        .notification_attempts
        .values()
        .filter(|a| a.item_id == item_id)
        .cloned()
        .collect();
    attempts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(attempts)
}

fn resolve_attempt(
    db: &Db,
    attempt_id: Uuid,
    next: AttemptStatus,
    confirmed_at: Option<chrono::DateTime<Utc>>,
) -> Result<NotificationAttempt, AppError> {
    let mut state = db.write();
    let attempt = state
        .notification_attempts
        .get_mut(&attempt_id)
        .ok_or_else(|| {
            AppError::not_found(format!("Notification attempt {} not found", attempt_id))
        })?;
    attempt.status = transitions::attempt_transition(attempt.status, next)?;
    attempt.confirmed_at = confirmed_at;
    attempt.updated_at = Utc::now();
    Ok(attempt.clone())
}

/// Confirm a pending attempt was delivered.
pub fn confirm_attempt(db: &Db, attempt_id: Uuid) -> Result<NotificationAttempt, AppError> {
    resolve_attempt(db, attempt_id, AttemptStatus::Confirmed, Some(Utc::now()))
}

/// Expire a pending attempt whose deadline has passed.
pub fn expire_attempt(db: &Db, attempt_id: Uuid) -> Result<NotificationAttempt, AppError> {
    {
        let state = db.read();
        let attempt = state.notification_attempts.get(&attempt_id).ok_or_else(|| {
            AppError::not_found(format!("Notification attempt {} not found", attempt_id))
        })?;
        match attempt.deadline {
            None => {
                return Err(AppError::bad_request(
                    "Attempt has no deadline and cannot expire",
                ))
            }
            Some(deadline) if Utc::now().date_naive() <= deadline => {
                return Err(AppError::bad_request(format!(
                    "Deadline {} has not passed yet",
                    deadline
                )))
            }
            Some(_) => {}
        }
    }
    resolve_attempt(db, attempt_id, AttemptStatus::Expired, None)
}

/// Mark a pending attempt as failed (bounced mail, refused delivery).
pub fn fail_attempt(db: &Db, attempt_id: Uuid) -> Result<NotificationAttempt, AppError> {
    resolve_attempt(db, attempt_id, AttemptStatus::Failed, None)
}
