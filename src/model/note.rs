use serde::{Deserialize, Deserializer, Serialize};

use super::record::{Record, RecordId};

/// Storage key for meeting notes
pub const NOTES_KEY: &str = "pmLiteNotes";

/// A tagged meeting note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Tags in entry order. Not deduplicated.
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: Vec<String>,
    /// `YYYY-MM-DD`, or empty when unset
    #[serde(default)]
    pub date: String,
}

/// Stored notes may carry `tags` as something other than a string array;
/// those load as no tags.
fn tags_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Editable form state for a note. `tags` is the raw comma-separated input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: String,
    pub date: String,
}

/// Split a comma-separated tag input: trim each entry, drop empties.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

impl Record for Note {
    type Draft = NoteDraft;

    const STORAGE_KEY: &'static str = NOTES_KEY;
    const NOUN: &'static str = "note";
    const INSERT_AT_FRONT: bool = true;

    fn id(&self) -> RecordId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn seed() -> Vec<Self> {
        Vec::new()
    }

    fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.join(", "),
            date: self.date.clone(),
        }
    }

    fn from_draft(draft: &NoteDraft, id: RecordId, _existing: Option<&Self>) -> Option<Self> {
        if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
            return None;
        }
        Some(Note {
            id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            tags: parse_tag_input(&draft.tags),
            date: draft.date.clone(),
        })
    }
}
