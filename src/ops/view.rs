use crate::io::collection;
use crate::io::store::{KeyValueStore, StoreError};
use crate::model::record::{Record, RecordId, next_id};
use crate::ops::activity;
use crate::ops::confirm::Confirm;
use crate::ops::editor::EditorSession;

/// Error type for view operations
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("{noun} {id} not found")]
    NotFound { noun: &'static str, id: RecordId },
    #[error("objective {id} has no key result #{index}")]
    KeyResultOutOfRange { id: RecordId, index: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a commit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(RecordId),
    Updated(RecordId),
    /// The draft failed validation; the form stays open
    Rejected,
    /// No form was open
    NothingToCommit,
}

/// One mounted view: the in-memory collection plus its editor session.
///
/// Every mutation persists the whole collection under `R::STORAGE_KEY`
/// before returning.
#[derive(Debug, Clone)]
pub struct CollectionView<R: Record> {
    records: Vec<R>,
    editor: EditorSession<R::Draft>,
}

impl<R: Record> CollectionView<R> {
    /// Load the collection (seed set when absent or unreadable) and write it
    /// back.
    pub fn mount<S>(store: &mut S) -> Result<Self, StoreError>
    where
        S: KeyValueStore + ?Sized,
    {
        let records = collection::mount(store, R::STORAGE_KEY, R::seed())?;
        Ok(Self::from_records(records))
    }

    /// Load without writing anything back.
    pub fn load<S>(store: &S) -> Self
    where
        S: KeyValueStore + ?Sized,
    {
        Self::from_records(collection::load(store, R::STORAGE_KEY, R::seed()))
    }

    pub fn from_records(records: Vec<R>) -> Self {
        CollectionView {
            records,
            editor: EditorSession::Idle,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn editor(&self) -> &EditorSession<R::Draft> {
        &self.editor
    }

    /// Open an empty form.
    pub fn begin_create(&mut self) {
        self.begin_create_with(R::Draft::default());
    }

    /// Open a form pre-filled with `draft`.
    pub fn begin_create_with(&mut self, draft: R::Draft) {
        self.editor = EditorSession::create(draft);
    }

    /// Open a form holding a copy of record `id`.
    pub fn begin_edit(&mut self, id: RecordId) -> Result<(), ViewError> {
        let record = self.get(id).ok_or(ViewError::NotFound { noun: R::NOUN, id })?;
        self.editor = EditorSession::edit(record.to_draft(), id);
        Ok(())
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        self.editor.draft_mut()
    }

    pub fn cancel(&mut self) {
        self.editor.cancel();
    }

    /// Validate the open draft and fold it into the collection.
    ///
    /// A valid draft replaces the edited record or is inserted with a new id,
    /// the collection is persisted, one activity entry is appended and the
    /// form closes. An invalid draft changes nothing.
    pub fn commit<S>(&mut self, store: &mut S) -> Result<CommitOutcome, ViewError>
    where
        S: KeyValueStore + ?Sized,
    {
        let EditorSession::Editing { draft, edit_id } = &self.editor else {
            return Ok(CommitOutcome::NothingToCommit);
        };

        let outcome = match *edit_id {
            Some(id) => {
                let pos = self
                    .records
                    .iter()
                    .position(|r| r.id() == id)
                    .ok_or(ViewError::NotFound { noun: R::NOUN, id })?;
                let Some(record) = R::from_draft(draft, id, Some(&self.records[pos])) else {
                    return Ok(CommitOutcome::Rejected);
                };
                let action = format!("Edited {}: {}", R::NOUN, record.title());
                self.records[pos] = record;
                self.persist(store)?;
                activity::append(store, action)?;
                CommitOutcome::Updated(id)
            }
            None => {
                let id = next_id(&self.records);
                let Some(record) = R::from_draft(draft, id, None) else {
                    return Ok(CommitOutcome::Rejected);
                };
                let action = format!("Created {}: {}", R::NOUN, record.title());
                if R::INSERT_AT_FRONT {
                    self.records.insert(0, record);
                } else {
                    self.records.push(record);
                }
                self.persist(store)?;
                activity::append(store, action)?;
                CommitOutcome::Created(id)
            }
        };

        self.editor.cancel();
        Ok(outcome)
    }

    /// Remove record `id` once the user agrees. Returns whether it was
    /// removed.
    pub async fn delete<S, C>(&mut self, id: RecordId, store: &mut S, confirm: &C) -> Result<bool, ViewError>
    where
        S: KeyValueStore + ?Sized,
        C: Confirm,
    {
        let pos = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(ViewError::NotFound { noun: R::NOUN, id })?;
        let prompt = format!("Are you sure you want to delete this {}?", R::NOUN);
        if !confirm.confirm(&prompt).await {
            return Ok(false);
        }
        let removed = self.records.remove(pos);
        self.persist(store)?;
        activity::append(store, format!("Deleted {}: {}", R::NOUN, removed.title()))?;
        Ok(true)
    }

    /// Apply a direct change to record `id` and persist. No activity entry is
    /// written; callers log what they need.
    pub fn update<S, T>(&mut self, id: RecordId, store: &mut S, f: impl FnOnce(&mut R) -> T) -> Result<T, ViewError>
    where
        S: KeyValueStore + ?Sized,
    {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(ViewError::NotFound { noun: R::NOUN, id })?;
        let result = f(record);
        self.persist(store)?;
        Ok(result)
    }

    fn persist<S>(&self, store: &mut S) -> Result<(), StoreError>
    where
        S: KeyValueStore + ?Sized,
    {
        collection::save(store, R::STORAGE_KEY, &self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::model::{NOTES_KEY, Note, NoteDraft, TASKS_KEY, Task, TaskDraft};
    use crate::ops::confirm::Preset;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    fn task_draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mount_falls_back_to_seed_and_persists_it() {
        let mut store = MemoryStore::new();
        let view = CollectionView::<Task>::mount(&mut store).unwrap();
        assert_eq!(view.records(), Task::seed().as_slice());
        let stored: Vec<Task> = collection::load(&store, TASKS_KEY, Vec::new());
        assert_eq!(stored, Task::seed());
    }

    #[test]
    fn test_mount_with_malformed_data_uses_seed() {
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, "[{broken").unwrap();
        let view = CollectionView::<Task>::mount(&mut store).unwrap();
        assert_eq!(view.records().len(), 4);
    }

    #[test]
    fn test_create_appends_record_and_one_log_entry() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Task>::mount(&mut store).unwrap();
        view.begin_create_with(task_draft("Write docs"));
        let outcome = view.commit(&mut store).unwrap();

        let CommitOutcome::Created(id) = outcome else {
            panic!("expected create, got {outcome:?}");
        };
        assert_eq!(view.records().len(), 5);
        assert_eq!(view.records()[4].id, id);
        assert_eq!(Task::seed().iter().filter(|t| t.id == id).count(), 0);
        assert!(!view.editor().is_editing());

        let log = activity::entries(&store);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, "Created task: Write docs");

        let stored: Vec<Task> = collection::load(&store, TASKS_KEY, Vec::new());
        assert_eq!(stored.len(), 5);
    }

    #[test]
    fn test_created_ids_are_unique() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Task>::mount(&mut store).unwrap();
        for title in ["a", "b", "c"] {
            view.begin_create_with(task_draft(title));
            view.commit(&mut store).unwrap();
        }
        let mut ids: Vec<_> = view.records().iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_notes_are_created_at_the_front() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Note>::mount(&mut store).unwrap();
        for title in ["first", "second"] {
            view.begin_create_with(NoteDraft {
                title: title.into(),
                content: "body".into(),
                ..Default::default()
            });
            view.commit(&mut store).unwrap();
        }
        assert_eq!(view.records()[0].title, "second");
        let stored: Vec<Note> = collection::load(&store, NOTES_KEY, Vec::new());
        assert_eq!(stored[0].title, "second");
    }

    #[test]
    fn test_edit_keeps_id_and_size() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Task>::mount(&mut store).unwrap();
        view.begin_edit(2).unwrap();
        view.draft_mut().unwrap().title = "Fix logout bug".into();
        assert_eq!(view.commit(&mut store).unwrap(), CommitOutcome::Updated(2));
        assert_eq!(view.records().len(), 4);
        assert_eq!(view.get(2).unwrap().title, "Fix logout bug");
        assert_eq!(activity::entries(&store)[0].action, "Edited task: Fix logout bug");
    }

    #[test]
    fn test_blank_title_is_silently_rejected() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Task>::mount(&mut store).unwrap();
        view.begin_create_with(task_draft("   "));
        assert_eq!(view.commit(&mut store).unwrap(), CommitOutcome::Rejected);
        assert!(view.editor().is_editing());
        assert_eq!(view.records().len(), 4);
        assert!(activity::entries(&store).is_empty());
    }

    #[test]
    fn test_cancel_persists_nothing() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Task>::mount(&mut store).unwrap();
        view.begin_create_with(task_draft("Never saved"));
        view.cancel();
        assert_eq!(view.commit(&mut store).unwrap(), CommitOutcome::NothingToCommit);
        assert_eq!(view.records().len(), 4);
        assert!(activity::entries(&store).is_empty());
    }

    #[test]
    fn test_begin_edit_unknown_id() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Task>::mount(&mut store).unwrap();
        assert!(matches!(
            view.begin_edit(99),
            Err(ViewError::NotFound { noun: "task", id: 99 })
        ));
    }

    #[test]
    fn test_declined_delete_changes_nothing() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Task>::mount(&mut store).unwrap();
        let removed = block_on(view.delete(1, &mut store, &Preset(false))).unwrap();
        assert!(!removed);
        assert_eq!(view.records().len(), 4);
        assert!(activity::entries(&store).is_empty());
    }

    #[test]
    fn test_accepted_delete_removes_exactly_target() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Task>::mount(&mut store).unwrap();
        let removed = block_on(view.delete(1, &mut store, &Preset(true))).unwrap();
        assert!(removed);
        let ids: Vec<_> = view.records().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        let log = activity::entries(&store);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, "Deleted task: Set up CI pipeline");
        let stored: Vec<Task> = collection::load(&store, TASKS_KEY, Vec::new());
        assert_eq!(stored.len(), 3);
    }
}
