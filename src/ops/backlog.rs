use crate::io::store::KeyValueStore;
use crate::model::record::RecordId;
use crate::model::task::{Task, TaskStatus};
use crate::ops::activity;
use crate::ops::view::{CollectionView, ViewError};

/// Direction of a one-column move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Left,
    Right,
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: TaskStatus, to: TaskStatus },
    /// Already in the target column, or at the board edge
    Unchanged,
}

/// Tasks grouped into the three board columns, in column order. Every task
/// lands in exactly one column; order within a column is collection order.
pub fn columns(tasks: &[Task]) -> [(TaskStatus, Vec<&Task>); 3] {
    TaskStatus::COLUMNS.map(|status| {
        let in_column = tasks.iter().filter(|t| t.status == status).collect();
        (status, in_column)
    })
}

/// Move task `id` to column `to`, persist, and log the move.
pub fn move_task<S>(
    view: &mut CollectionView<Task>,
    id: RecordId,
    to: TaskStatus,
    store: &mut S,
) -> Result<MoveOutcome, ViewError>
where
    S: KeyValueStore + ?Sized,
{
    let task = view
        .get(id)
        .ok_or(ViewError::NotFound { noun: "task", id })?;
    let from = task.status;
    if from == to {
        return Ok(MoveOutcome::Unchanged);
    }
    let title = task.title.clone();
    view.update(id, store, |t| t.status = to)?;
    activity::append(store, format!("Moved task '{title}' from {from} to {to}"))?;
    Ok(MoveOutcome::Moved { from, to })
}

/// Move task `id` one column left or right.
pub fn shift_task<S>(
    view: &mut CollectionView<Task>,
    id: RecordId,
    shift: Shift,
    store: &mut S,
) -> Result<MoveOutcome, ViewError>
where
    S: KeyValueStore + ?Sized,
{
    let status = view
        .get(id)
        .ok_or(ViewError::NotFound { noun: "task", id })?
        .status;
    let target = match shift {
        Shift::Left => status.prev(),
        Shift::Right => status.next(),
    };
    match target {
        Some(to) => move_task(view, id, to, store),
        None => Ok(MoveOutcome::Unchanged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::collection;
    use crate::io::store::MemoryStore;
    use crate::model::{Priority, Record, TASKS_KEY};

    fn board_with(tasks: Vec<Task>) -> (MemoryStore, CollectionView<Task>) {
        let mut store = MemoryStore::new();
        collection::save(&mut store, TASKS_KEY, &tasks).unwrap();
        let view = CollectionView::<Task>::mount(&mut store).unwrap();
        (store, view)
    }

    fn fix_bug() -> Task {
        Task {
            id: 10,
            title: "Fix bug".into(),
            status: TaskStatus::Todo,
            priority: Priority::High,
            due: String::new(),
        }
    }

    #[test]
    fn test_columns_partition_seed_tasks() {
        let tasks = Task::seed();
        let [todo, doing, done] = columns(&tasks);
        assert_eq!(todo.0, TaskStatus::Todo);
        assert_eq!(todo.1.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(doing.1.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(done.1.iter().map(|t| t.id).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_move_updates_status_and_logs() {
        let (mut store, mut view) = board_with(vec![fix_bug()]);
        let outcome = move_task(&mut view, 10, TaskStatus::Done, &mut store).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: TaskStatus::Todo,
                to: TaskStatus::Done
            }
        );
        assert_eq!(view.get(10).unwrap().status, TaskStatus::Done);
        assert_eq!(view.get(10).unwrap().id, 10);

        let log = activity::entries(&store);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, "Moved task 'Fix bug' from To Do to Done");

        let stored: Vec<Task> = collection::load(&store, TASKS_KEY, Vec::new());
        assert_eq!(stored[0].status, TaskStatus::Done);
    }

    #[test]
    fn test_move_to_same_column_does_not_log() {
        let (mut store, mut view) = board_with(vec![fix_bug()]);
        let outcome = move_task(&mut view, 10, TaskStatus::Todo, &mut store).unwrap();
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert!(activity::entries(&store).is_empty());
    }

    #[test]
    fn test_shift_walks_columns_and_stops_at_edges() {
        let (mut store, mut view) = board_with(vec![fix_bug()]);
        assert_eq!(
            shift_task(&mut view, 10, Shift::Left, &mut store).unwrap(),
            MoveOutcome::Unchanged
        );
        shift_task(&mut view, 10, Shift::Right, &mut store).unwrap();
        assert_eq!(view.get(10).unwrap().status, TaskStatus::InProgress);
        shift_task(&mut view, 10, Shift::Right, &mut store).unwrap();
        assert_eq!(
            shift_task(&mut view, 10, Shift::Right, &mut store).unwrap(),
            MoveOutcome::Unchanged
        );
        let log = activity::entries(&store);
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].action, "Moved task 'Fix bug' from In Progress to Done");
    }

    #[test]
    fn test_move_unknown_task() {
        let (mut store, mut view) = board_with(vec![fix_bug()]);
        assert!(move_task(&mut view, 99, TaskStatus::Done, &mut store).is_err());
    }
}
