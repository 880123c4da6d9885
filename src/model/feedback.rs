use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::RecordId;

/// Storage key for submitted feedback
pub const FEEDBACK_KEY: &str = "pmLite_feedback";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    #[default]
    Suggestion,
    Positive,
    Bug,
}

impl FeedbackKind {
    pub fn parse_kind(s: &str) -> Option<FeedbackKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suggestion" => Some(FeedbackKind::Suggestion),
            "positive" => Some(FeedbackKind::Positive),
            "bug" | "bug report" => Some(FeedbackKind::Bug),
            _ => None,
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackKind::Suggestion => write!(f, "suggestion"),
            FeedbackKind::Positive => write!(f, "positive"),
            FeedbackKind::Bug => write!(f, "bug"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: RecordId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    /// `YYYY-MM-DD`
    pub submitted: String,
}

/// Entries shown before anything has been submitted
pub fn seed_feedback() -> Vec<Feedback> {
    vec![
        Feedback {
            id: 1,
            message: "Love the OKR layout, clean and simple!".into(),
            kind: FeedbackKind::Positive,
            submitted: "2024-04-10".into(),
        },
        Feedback {
            id: 2,
            message: "Would like dark mode support.".into(),
            kind: FeedbackKind::Suggestion,
            submitted: "2024-04-12".into(),
        },
    ]
}
