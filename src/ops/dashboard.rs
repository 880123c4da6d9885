use serde::Serialize;

use crate::io::collection;
use crate::io::store::KeyValueStore;
use crate::model::activity::ActivityEntry;
use crate::model::{NOTES_KEY, OKRS_KEY, TASKS_KEY};
use crate::ops::activity;

/// Counts and recent activity shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub objectives: usize,
    pub tasks: usize,
    pub notes: usize,
    pub recent_activity: Vec<ActivityEntry>,
}

/// Summarize what is stored. A collection that was never saved, or cannot
/// be read, counts as zero.
pub fn summarize<S>(store: &S, recent_limit: usize) -> DashboardSummary
where
    S: KeyValueStore + ?Sized,
{
    DashboardSummary {
        objectives: stored_len(store, OKRS_KEY),
        tasks: stored_len(store, TASKS_KEY),
        notes: stored_len(store, NOTES_KEY),
        recent_activity: activity::recent(store, recent_limit),
    }
}

fn stored_len<S>(store: &S, key: &str) -> usize
where
    S: KeyValueStore + ?Sized,
{
    collection::decode::<serde_json::Value, _>(store, key).map_or(0, |items| items.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::model::Task;
    use crate::ops::view::CollectionView;

    #[test]
    fn test_empty_store_is_all_zero() {
        let store = MemoryStore::new();
        let summary = summarize(&store, 10);
        assert_eq!(summary.objectives, 0);
        assert_eq!(summary.tasks, 0);
        assert_eq!(summary.notes, 0);
        assert!(summary.recent_activity.is_empty());
    }

    #[test]
    fn test_counts_mounted_collections() {
        let mut store = MemoryStore::new();
        CollectionView::<Task>::mount(&mut store).unwrap();
        store.set(NOTES_KEY, "not json").unwrap();
        let summary = summarize(&store, 10);
        assert_eq!(summary.tasks, 4);
        assert_eq!(summary.notes, 0);
    }

    #[test]
    fn test_recent_activity_is_capped() {
        let mut store = MemoryStore::new();
        for i in 0..12 {
            activity::append(&mut store, format!("Created task: {i}")).unwrap();
        }
        let summary = summarize(&store, 10);
        assert_eq!(summary.recent_activity.len(), 10);
        assert_eq!(summary.recent_activity[0].action, "Created task: 11");
    }
}
