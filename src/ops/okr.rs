use crate::io::store::{KeyValueStore, StoreError};
use crate::model::objective::{DEFAULT_OKR_TITLE, OKR_TITLE_KEY, Objective};
use crate::model::record::RecordId;
use crate::ops::view::{CollectionView, ViewError};

/// `(done, total)` key results
pub fn progress(objective: &Objective) -> (usize, usize) {
    let done = objective.key_results.iter().filter(|kr| kr.done).count();
    (done, objective.key_results.len())
}

/// Share of completed key results, rounded to a whole percent. 0 when there
/// are no key results.
pub fn progress_percent(objective: &Objective) -> u8 {
    let (done, total) = progress(objective);
    if total == 0 {
        return 0;
    }
    (100.0 * done as f64 / total as f64).round() as u8
}

/// Flip key result `index` of objective `id` and persist. Returns the new
/// `done` state.
pub fn toggle_key_result<S>(
    view: &mut CollectionView<Objective>,
    id: RecordId,
    index: usize,
    store: &mut S,
) -> Result<bool, ViewError>
where
    S: KeyValueStore + ?Sized,
{
    let in_range = view
        .get(id)
        .ok_or(ViewError::NotFound {
            noun: "objective",
            id,
        })?
        .key_results
        .len()
        > index;
    if !in_range {
        return Err(ViewError::KeyResultOutOfRange { id, index });
    }
    view.update(id, store, |obj| {
        let kr = &mut obj.key_results[index];
        kr.done = !kr.done;
        kr.done
    })
}

/// Objectives ordered by their due label, compared as plain text ("July 30"
/// sorts before "June 30"). Ties keep collection order.
pub fn sorted_by_due(objectives: &[Objective]) -> Vec<&Objective> {
    let mut sorted: Vec<&Objective> = objectives.iter().collect();
    sorted.sort_by(|a, b| a.due.cmp(&b.due));
    sorted
}

/// Page heading, or the default when none is stored.
pub fn heading<S>(store: &S) -> String
where
    S: KeyValueStore + ?Sized,
{
    store
        .get(OKR_TITLE_KEY)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OKR_TITLE.to_string())
}

pub fn set_heading<S>(store: &mut S, title: &str) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    store.set(OKR_TITLE_KEY, title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::model::{KeyResult, OKRS_KEY, ObjectiveDraft};
    use crate::ops::activity;
    use crate::ops::view::CommitOutcome;

    fn objective(results: &[(&str, bool)]) -> Objective {
        Objective {
            id: 1,
            title: "Grow MAU".into(),
            owner: "You".into(),
            due: "July 30".into(),
            key_results: results
                .iter()
                .map(|(text, done)| KeyResult {
                    text: text.to_string(),
                    done: *done,
                })
                .collect(),
        }
    }

    #[test]
    fn test_progress_with_no_key_results_is_zero() {
        assert_eq!(progress_percent(&objective(&[])), 0);
    }

    #[test]
    fn test_progress_rounds_to_whole_percent() {
        let obj = objective(&[("a", true), ("b", false), ("c", false)]);
        assert_eq!(progress_percent(&obj), 33);
        let obj = objective(&[("a", true), ("b", true), ("c", false)]);
        assert_eq!(progress_percent(&obj), 67);
        let obj = objective(&[("a", true), ("b", false)]);
        assert_eq!(progress_percent(&obj), 50);
    }

    #[test]
    fn test_progress_ignores_key_result_order() {
        let forward = objective(&[("a", true), ("b", false), ("c", false), ("d", true)]);
        let mut reversed = forward.clone();
        reversed.key_results.reverse();
        assert_eq!(progress_percent(&forward), progress_percent(&reversed));
        assert!(progress_percent(&forward) <= 100);
    }

    #[test]
    fn test_create_then_toggle_reaches_full_progress() {
        let mut store = MemoryStore::new();
        store.set(OKRS_KEY, "[]").unwrap();
        let mut view = CollectionView::<Objective>::mount(&mut store).unwrap();
        assert!(view.records().is_empty());

        view.begin_create_with(ObjectiveDraft {
            title: "Grow MAU".into(),
            key_results: vec![KeyResult::new("Ship v2")],
            ..Default::default()
        });
        let CommitOutcome::Created(id) = view.commit(&mut store).unwrap() else {
            panic!("objective was not created");
        };
        assert_eq!(view.records().len(), 1);
        assert_eq!(progress_percent(view.get(id).unwrap()), 0);

        assert!(toggle_key_result(&mut view, id, 0, &mut store).unwrap());
        assert_eq!(progress_percent(view.get(id).unwrap()), 100);

        let reloaded = CollectionView::<Objective>::load(&store);
        assert!(reloaded.get(id).unwrap().key_results[0].done);
        assert_eq!(activity::entries(&store).len(), 1);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut store = MemoryStore::new();
        let mut view = CollectionView::<Objective>::mount(&mut store).unwrap();
        assert!(matches!(
            toggle_key_result(&mut view, 1, 3, &mut store),
            Err(ViewError::KeyResultOutOfRange { id: 1, index: 3 })
        ));
        assert!(matches!(
            toggle_key_result(&mut view, 9, 0, &mut store),
            Err(ViewError::NotFound { .. })
        ));
    }

    #[test]
    fn test_due_order_is_lexical() {
        let mut a = objective(&[]);
        a.due = "June 30".into();
        let mut b = objective(&[]);
        b.id = 2;
        b.due = "July 30".into();
        let mut c = objective(&[]);
        c.id = 3;
        c.due = "August 1".into();
        let all = vec![a, b, c];
        let ids: Vec<_> = sorted_by_due(&all).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_heading_defaults_and_overrides() {
        let mut store = MemoryStore::new();
        assert_eq!(heading(&store), "Q2 OKRs");
        set_heading(&mut store, "Q3 OKRs").unwrap();
        assert_eq!(heading(&store), "Q3 OKRs");
        assert_eq!(store.get(OKR_TITLE_KEY).as_deref(), Some("Q3 OKRs"));
    }
}
