use crate::io::collection;
use crate::io::store::{KeyValueStore, StoreError};
use crate::model::feedback::{FEEDBACK_KEY, Feedback, FeedbackKind, seed_feedback};
use crate::model::record::next_free_id;

pub const BLANK_FEEDBACK_MESSAGE: &str = "Please enter your feedback before submitting.";
pub const SUBMITTED_MESSAGE: &str = "Feedback submitted successfully!";

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("{BLANK_FEEDBACK_MESSAGE}")]
    Blank,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Submitted feedback, newest first
pub fn list<S>(store: &S) -> Vec<Feedback>
where
    S: KeyValueStore + ?Sized,
{
    collection::load(store, FEEDBACK_KEY, seed_feedback())
}

/// Prepend a feedback entry dated `submitted` (`YYYY-MM-DD`).
pub fn submit<S>(
    store: &mut S,
    message: &str,
    kind: FeedbackKind,
    submitted: &str,
) -> Result<Feedback, FeedbackError>
where
    S: KeyValueStore + ?Sized,
{
    if message.trim().is_empty() {
        return Err(FeedbackError::Blank);
    }
    let mut entries = list(store);
    let id = next_free_id(entries.iter().map(|f| f.id).collect());
    let entry = Feedback {
        id,
        message: message.to_string(),
        kind,
        submitted: submitted.to_string(),
    };
    entries.insert(0, entry.clone());
    collection::save(store, FEEDBACK_KEY, &entries)?;
    tracing::info!(kind = %kind, "feedback submitted");
    Ok(entry)
}
