use serde::{Deserialize, Serialize};

use super::record::{Record, RecordId};

/// Storage key for the objectives collection
pub const OKRS_KEY: &str = "pmLite_okrs";
/// Storage key for the objectives page heading
pub const OKR_TITLE_KEY: &str = "pmLite_okr_title";
/// Heading shown when no override is stored
pub const DEFAULT_OKR_TITLE: &str = "Q2 OKRs";

/// A measurable sub-goal of an objective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyResult {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl KeyResult {
    pub fn new(text: impl Into<String>) -> Self {
        KeyResult {
            text: text.into(),
            done: false,
        }
    }
}

/// A goal with ordered key results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub owner: String,
    /// Free-form due label such as "June 30"
    #[serde(default)]
    pub due: String,
    /// Display order
    #[serde(default)]
    pub key_results: Vec<KeyResult>,
}

/// Editable form state for an objective
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveDraft {
    pub title: String,
    pub owner: String,
    pub due: String,
    pub key_results: Vec<KeyResult>,
}

impl Default for ObjectiveDraft {
    fn default() -> Self {
        ObjectiveDraft {
            title: String::new(),
            owner: "You".into(),
            due: "July 30".into(),
            key_results: Vec::new(),
        }
    }
}

impl Record for Objective {
    type Draft = ObjectiveDraft;

    const STORAGE_KEY: &'static str = OKRS_KEY;
    const NOUN: &'static str = "objective";

    fn id(&self) -> RecordId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn seed() -> Vec<Self> {
        vec![
            Objective {
                id: 1,
                title: "Improve Product Adoption".into(),
                owner: "Lena".into(),
                due: "June 30".into(),
                key_results: vec![
                    KeyResult::new("Increase MAUs by 20%"),
                    KeyResult {
                        text: "Launch onboarding flow v2".into(),
                        done: true,
                    },
                    KeyResult::new("Reduce churn by 15%"),
                ],
            },
            Objective {
                id: 2,
                title: "Strengthen Engineering Velocity".into(),
                owner: "Alex".into(),
                due: "June 30".into(),
                key_results: vec![
                    KeyResult::new("Ship 80% of sprint goals"),
                    KeyResult {
                        text: "Reduce PR cycle time to under 24h".into(),
                        done: true,
                    },
                    KeyResult::new("Improve test coverage by 30%"),
                ],
            },
        ]
    }

    fn to_draft(&self) -> ObjectiveDraft {
        ObjectiveDraft {
            title: self.title.clone(),
            owner: self.owner.clone(),
            due: self.due.clone(),
            key_results: self.key_results.clone(),
        }
    }

    fn from_draft(draft: &ObjectiveDraft, id: RecordId, existing: Option<&Self>) -> Option<Self> {
        if draft.title.trim().is_empty() {
            return None;
        }
        let key_results = draft
            .key_results
            .iter()
            .filter(|kr| !kr.text.trim().is_empty())
            .cloned()
            .collect();
        // Owner and due are not editable once the objective exists
        let (owner, due) = match existing {
            Some(obj) => (obj.owner.clone(), obj.due.clone()),
            None => (draft.owner.clone(), draft.due.clone()),
        };
        Some(Objective {
            id,
            title: draft.title.clone(),
            owner,
            due,
            key_results,
        })
    }
}
