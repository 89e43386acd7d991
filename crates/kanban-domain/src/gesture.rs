use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};

use crate::id::{ColumnId, Id, TaskId};
use crate::state::BoardState;

/// Discrete intents delivered by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum GestureIntent {
    StartDrag(Id),
    Drop {
        entity: Id,
        target_container: Option<ColumnId>,
        target_index: usize,
    },
    Edit {
        entity: Id,
        value: String,
    },
    /// `None` adds a column, `Some(column)` adds a task to that column
    Add(Option<ColumnId>),
    Remove(Id),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSubject {
    Column(ColumnId),
    Task(TaskId),
}

impl DragSubject {
    /// Work out whether `entity` names a column or a task
    pub fn classify(state: &BoardState, entity: &Id) -> KanbanResult<Self> {
        if let Some(column) = state.column(entity) {
            return Ok(Self::Column(column.id.clone()));
        }
        if let Some(task) = state.task(entity) {
            return Ok(Self::Task(task.id.clone()));
        }
        Err(KanbanError::not_found("entity", entity))
    }
}

/// Remembers what is being dragged between `StartDrag` and `Drop`
#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<DragSubject>,
}

impl DragTracker {
    pub fn active(&self) -> Option<&DragSubject> {
        self.active.as_ref()
    }

    pub fn start(&mut self, state: &BoardState, entity: &Id) -> KanbanResult<()> {
        self.active = Some(DragSubject::classify(state, entity)?);
        Ok(())
    }

    /// End the drag. The tracker is cleared even when the drop is rejected.
    pub fn finish(&mut self, state: &BoardState, entity: &Id) -> KanbanResult<DragSubject> {
        let active = self.active.take().ok_or_else(|| {
            KanbanError::Validation(format!("drop of {} without an active drag", entity))
        })?;
        let dropped = state.resolve(entity);
        // the dragged entity may have received its durable id mid-drag
        let active = match active {
            DragSubject::Column(id) => DragSubject::Column(state.resolve(&id)),
            DragSubject::Task(id) => DragSubject::Task(state.resolve(&id)),
        };
        let matches = match &active {
            DragSubject::Column(id) | DragSubject::Task(id) => *id == dropped,
        };
        if !matches {
            return Err(KanbanError::Validation(format!(
                "drop of {} does not match the active drag",
                entity
            )));
        }
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Command, CreateColumn, CreateTask};

    fn state() -> BoardState {
        let state = CreateColumn {
            id: "A".into(),
            title: "A".to_string(),
        }
        .apply(&BoardState::new("u1".into()))
        .unwrap()
        .state;
        CreateTask {
            id: "t1".into(),
            column_id: "A".into(),
            content: "x".to_string(),
        }
        .apply(&state)
        .unwrap()
        .state
    }

    #[test]
    fn test_classify() {
        let state = state();
        assert_eq!(
            DragSubject::classify(&state, &"A".into()).unwrap(),
            DragSubject::Column("A".into())
        );
        assert_eq!(
            DragSubject::classify(&state, &"t1".into()).unwrap(),
            DragSubject::Task("t1".into())
        );
        assert!(DragSubject::classify(&state, &"zz".into()).is_err());
    }

    #[test]
    fn test_mismatched_drop_clears_drag() {
        let state = state();
        let mut drag = DragTracker::default();
        drag.start(&state, &"t1".into()).unwrap();
        assert!(drag.finish(&state, &"A".into()).is_err());
        assert!(drag.active().is_none());
    }

    #[test]
    fn test_drop_through_alias() {
        let mut state = state();
        let mut drag = DragTracker::default();
        drag.start(&state, &"t1".into()).unwrap();
        state.rewrite_id(&"t1".into(), &"task-5".into());
        assert_eq!(
            drag.finish(&state, &"t1".into()).unwrap(),
            DragSubject::Task("task-5".into())
        );
    }
}
