use pmlite::io::collection;
use pmlite::io::store::{FileStore, KeyValueStore};
use pmlite::io::workspace::{init_workspace, open_workspace};
use pmlite::model::{NOTES_KEY, Note, NoteDraft, Objective, TASKS_KEY, Task, TaskStatus};
use pmlite::ops::backlog;
use pmlite::ops::confirm::Preset;
use pmlite::ops::view::{CollectionView, CommitOutcome};
use pmlite::ops::{activity, dashboard};
use pretty_assertions::assert_eq;
use std::fs;

/// The stored collection matches the view after every mutation, across a
/// reopen of the file store.
#[test]
fn test_file_store_mirrors_view_after_each_mutation() {
    let tmp = tempfile::TempDir::new().unwrap();
    let dir = init_workspace(tmp.path(), false).unwrap();
    let mut store = FileStore::open(&dir).unwrap();

    let mut view = CollectionView::<Task>::mount(&mut store).unwrap();
    view.begin_create();
    view.draft_mut().unwrap().title = "Fix bug".into();
    let CommitOutcome::Created(id) = view.commit(&mut store).unwrap() else {
        panic!("task not created");
    };
    backlog::move_task(&mut view, id, TaskStatus::Done, &mut store).unwrap();

    let reopened = FileStore::open(&dir).unwrap();
    let stored: Vec<Task> = collection::load(&reopened, TASKS_KEY, Vec::new());
    assert_eq!(stored, view.records());

    futures::executor::block_on(view.delete(1, &mut store, &Preset(true))).unwrap();
    let reopened = FileStore::open(&dir).unwrap();
    let stored: Vec<Task> = collection::load(&reopened, TASKS_KEY, Vec::new());
    assert_eq!(stored, view.records());
    assert_eq!(activity::entries(&reopened).len(), 3);
}

#[test]
fn test_store_file_keeps_key_order() {
    let tmp = tempfile::TempDir::new().unwrap();
    let dir = init_workspace(tmp.path(), false).unwrap();
    let mut store = FileStore::open(&dir).unwrap();
    store.set("isAuthenticated", "true").unwrap();
    CollectionView::<Objective>::mount(&mut store).unwrap();
    CollectionView::<Note>::mount(&mut store).unwrap();

    let content = fs::read_to_string(store.path()).unwrap();
    let auth = content.find("isAuthenticated").unwrap();
    let okrs = content.find("pmLite_okrs").unwrap();
    let notes = content.find("pmLiteNotes").unwrap();
    assert!(auth < okrs && okrs < notes);
}

#[test]
fn test_workspace_reopen_sees_notes_and_dashboard() {
    let tmp = tempfile::TempDir::new().unwrap();
    init_workspace(tmp.path(), false).unwrap();
    {
        let mut ws = open_workspace(tmp.path()).unwrap();
        let mut view = CollectionView::<Note>::mount(&mut ws.store).unwrap();
        view.begin_create_with(NoteDraft {
            title: "Planning".into(),
            content: "Discussed Q3".into(),
            tags: "sync".into(),
            date: "2024-04-10".into(),
        });
        view.commit(&mut ws.store).unwrap();
    }

    let ws = open_workspace(tmp.path()).unwrap();
    let notes: Vec<Note> = collection::load(&ws.store, NOTES_KEY, Vec::new());
    assert_eq!(notes.len(), 1);
    let summary = dashboard::summarize(&ws.store, ws.config.dashboard.recent_activity);
    assert_eq!(summary.notes, 1);
    assert_eq!(summary.objectives, 0);
    assert_eq!(summary.recent_activity[0].action, "Created note: Planning");
}
