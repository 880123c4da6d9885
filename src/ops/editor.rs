use crate::model::record::RecordId;

/// Create/edit form state of one view.
///
/// `Idle` means no form is open. `Editing` holds the draft and, when an
/// existing record is being edited, its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSession<D> {
    Idle,
    Editing { draft: D, edit_id: Option<RecordId> },
}

impl<D> Default for EditorSession<D> {
    fn default() -> Self {
        EditorSession::Idle
    }
}

impl<D> EditorSession<D> {
    pub fn create(draft: D) -> Self {
        EditorSession::Editing {
            draft,
            edit_id: None,
        }
    }

    pub fn edit(draft: D, id: RecordId) -> Self {
        EditorSession::Editing {
            draft,
            edit_id: Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditorSession::Editing { .. })
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            EditorSession::Editing { draft, .. } => Some(draft),
            EditorSession::Idle => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            EditorSession::Editing { draft, .. } => Some(draft),
            EditorSession::Idle => None,
        }
    }

    /// Id of the record being edited; None while idle or creating
    pub fn edit_id(&self) -> Option<RecordId> {
        match self {
            EditorSession::Editing { edit_id, .. } => *edit_id,
            EditorSession::Idle => None,
        }
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        *self = EditorSession::Idle;
    }
}
