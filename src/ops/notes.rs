use indexmap::IndexMap;

use crate::model::note::{Note, parse_tag_input};

/// Tag and date filters of the notes view. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub tag: String,
    pub date: String,
}

impl NoteFilter {
    pub fn new(tag: Option<&str>, date: Option<&str>) -> Self {
        NoteFilter {
            tag: tag.map(str::trim).unwrap_or_default().to_string(),
            date: date.unwrap_or_default().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_empty() && self.date.is_empty()
    }

    pub fn matches(&self, note: &Note) -> bool {
        let tag_ok = self.tag.is_empty() || note.tags.iter().any(|t| *t == self.tag);
        let date_ok = self.date.is_empty() || note.date == self.date;
        tag_ok && date_ok
    }
}

pub fn filter_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    notes.iter().filter(|n| filter.matches(n)).collect()
}

/// The `limit` most used tags across all notes. Ties keep the order in which
/// tags were first seen.
pub fn tag_suggestions(notes: &[Note], limit: usize) -> Vec<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for tag in notes.iter().flat_map(|n| n.tags.iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // stable: equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(limit)
        .map(|(tag, _)| tag.to_string())
        .collect()
}

/// Add `tag` to a comma-separated tag input unless it is already there.
/// The input is normalized on the way.
pub fn apply_suggestion(input: &str, tag: &str) -> String {
    let mut tags = parse_tag_input(input);
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
    tags.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::collection;
    use crate::io::store::MemoryStore;
    use crate::model::{NOTES_KEY, NoteDraft};
    use crate::ops::view::CollectionView;

    fn note(id: i64, tags: &[&str], date: &str) -> Note {
        Note {
            id,
            title: format!("note {id}"),
            content: "content".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: date.into(),
        }
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let notes = vec![note(1, &[], ""), note(2, &["a"], "2024-04-10")];
        assert_eq!(filter_notes(&notes, &NoteFilter::default()).len(), 2);
    }

    #[test]
    fn test_tag_and_date_filters_combine() {
        let notes = vec![
            note(1, &["sync"], "2024-04-10"),
            note(2, &["sync"], "2024-04-11"),
            note(3, &["retro"], "2024-04-10"),
        ];
        let by_tag = NoteFilter::new(Some(" sync "), None);
        let ids: Vec<_> = filter_notes(&notes, &by_tag).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let both = NoteFilter::new(Some("sync"), Some("2024-04-10"));
        let ids: Vec<_> = filter_notes(&notes, &both).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_tag_filter_is_exact_match() {
        let notes = vec![note(1, &["roadmap"], "")];
        assert!(filter_notes(&notes, &NoteFilter::new(Some("road"), None)).is_empty());
    }

    #[test]
    fn test_suggestions_rank_by_frequency_then_first_seen() {
        let notes = vec![
            note(1, &["b", "a"], ""),
            note(2, &["c", "a"], ""),
            note(3, &["d", "c"], ""),
        ];
        assert_eq!(tag_suggestions(&notes, 6), vec!["a", "c", "b", "d"]);
        assert_eq!(tag_suggestions(&notes, 2), vec!["a", "c"]);
    }

    #[test]
    fn test_suggestions_cap_at_limit() {
        let tags = ["t1", "t2", "t3", "t4", "t5", "t6", "t7"];
        let notes = vec![note(1, &tags, "")];
        assert_eq!(tag_suggestions(&notes, 6).len(), 6);
    }

    #[test]
    fn test_apply_suggestion_skips_present_tag() {
        assert_eq!(apply_suggestion("a, b", "c"), "a, b, c");
        assert_eq!(apply_suggestion("a, b", "a"), "a, b");
        assert_eq!(apply_suggestion("", "a"), "a");
    }

    #[test]
    fn test_duplicate_tags_survive_commit() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Note>::mount(&mut store).unwrap();
        view.begin_create_with(NoteDraft {
            title: "Planning".into(),
            content: "Discussed Q3".into(),
            tags: "a, b, a".into(),
            date: "2024-04-10".into(),
        });
        view.commit(&mut store).unwrap();
        let stored: Vec<Note> = collection::load(&store, NOTES_KEY, Vec::new());
        assert_eq!(stored[0].tags, vec!["a", "b", "a"]);
    }
}
