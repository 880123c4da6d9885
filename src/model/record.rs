use serde::Serialize;
use serde::de::DeserializeOwned;

/// Integer id shared by every stored record kind
pub type RecordId = i64;

/// A record kind that lives in its own persisted collection.
///
/// Each kind names its storage key, its seed set, and how a draft becomes a
/// record. The generic collection view does the rest.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Transient form state edited before commit
    type Draft: Clone + Default;

    /// Key under which the collection is stored
    const STORAGE_KEY: &'static str;
    /// Noun used in activity entries ("task", "note", ...)
    const NOUN: &'static str;
    /// Whether newly created records go to the front of the collection
    const INSERT_AT_FRONT: bool = false;

    fn id(&self) -> RecordId;

    fn title(&self) -> &str;

    /// Records shown when nothing (or nothing readable) is stored
    fn seed() -> Vec<Self>;

    /// Copy of this record as an editable draft
    fn to_draft(&self) -> Self::Draft;

    /// Build a record from a draft, or None when a required field is blank.
    /// `existing` is the record being edited, if any.
    fn from_draft(draft: &Self::Draft, id: RecordId, existing: Option<&Self>) -> Option<Self>;
}

/// Generate an id that is unique within `records`: the current time in
/// milliseconds, bumped past the largest id already present.
pub fn next_id<R: Record>(records: &[R]) -> RecordId {
    next_free_id(records.iter().map(|r| r.id()).collect())
}

/// Same rule over raw ids. Once the largest id is `i64::MAX` there is nothing
/// to bump past, so the lowest unused positive id is taken instead.
pub fn next_free_id(mut ids: Vec<RecordId>) -> RecordId {
    let now = chrono::Utc::now().timestamp_millis();
    match ids.iter().max() {
        None => now,
        Some(max) => match max.checked_add(1) {
            Some(bumped) => now.max(bumped),
            None => {
                ids.sort_unstable();
                let mut candidate = 1;
                for id in ids {
                    if id == candidate {
                        candidate += 1;
                    } else if id > candidate {
                        break;
                    }
                }
                candidate
            }
        },
    }
}
