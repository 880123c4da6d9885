use chrono::{DateTime, Utc};

use crate::io::collection;
use crate::io::store::{KeyValueStore, StoreError};
use crate::model::activity::{ACTIVITY_KEY, ActivityEntry};
use crate::ops::confirm::Confirm;

/// Prompt shown before the log is wiped
pub const CLEAR_PROMPT: &str = "Clear all activity logs?";

/// Record an action at the current time, newest first.
pub fn append<S>(store: &mut S, action: impl Into<String>) -> Result<ActivityEntry, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    append_at(store, action, Utc::now())
}

/// Record an action with an explicit timestamp. The entry goes to the front
/// regardless of how its timestamp compares to the others.
pub fn append_at<S>(
    store: &mut S,
    action: impl Into<String>,
    timestamp: DateTime<Utc>,
) -> Result<ActivityEntry, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let entry = ActivityEntry {
        action: action.into(),
        timestamp,
    };
    let mut log = entries(store);
    log.insert(0, entry.clone());
    collection::save(store, ACTIVITY_KEY, &log)?;
    tracing::info!(action = %entry.action, "activity recorded");
    Ok(entry)
}

/// The whole log, newest first. Unreadable data reads as an empty log.
pub fn entries<S>(store: &S) -> Vec<ActivityEntry>
where
    S: KeyValueStore + ?Sized,
{
    collection::load(store, ACTIVITY_KEY, Vec::new())
}

/// The first `limit` entries.
pub fn recent<S>(store: &S, limit: usize) -> Vec<ActivityEntry>
where
    S: KeyValueStore + ?Sized,
{
    let mut log = entries(store);
    log.truncate(limit);
    log
}

/// Remove the log entirely once the user agrees. Returns whether it was
/// cleared.
pub async fn clear<S, C>(store: &mut S, confirm: &C) -> Result<bool, StoreError>
where
    S: KeyValueStore + ?Sized,
    C: Confirm,
{
    if !confirm.confirm(CLEAR_PROMPT).await {
        return Ok(false);
    }
    collection::remove(store, ACTIVITY_KEY)?;
    tracing::info!("activity log cleared");
    Ok(true)
}
