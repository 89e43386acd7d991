use super::{Command, Mutation};
use crate::intent::PersistIntent;
use crate::order;
use crate::state::BoardState;
use crate::{ColumnId, Task, TaskId};
use kanban_core::KanbanResult;

/// Append a new task to a column
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub id: TaskId,
    pub column_id: ColumnId,
    pub content: String,
}

impl Command for CreateTask {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation> {
        let column = state.require_column(&self.column_id)?;
        let column_id = column.id.clone();
        let mut next = state.clone();
        next.columns
            .insert(column_id.clone(), column.with_task_appended(self.id.clone()));
        next.tasks.insert(
            self.id.clone(),
            Task::new(self.id.clone(), column_id.clone(), self.content.clone()),
        );
        Ok(Mutation::new(
            next,
            PersistIntent::CreateTask {
                placeholder: self.id.clone(),
                column_id,
                content: self.content.clone(),
            },
        ))
    }

    fn description(&self) -> String {
        format!("Create task in column {}", self.column_id)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTaskContent {
    pub task_id: TaskId,
    pub content: String,
}

impl Command for UpdateTaskContent {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation> {
        let task = state.require_task(&self.task_id)?;
        let mut next = state.clone();
        next.tasks
            .insert(task.id.clone(), task.with_content(self.content.clone()));
        Ok(Mutation::new(
            next,
            PersistIntent::UpdateTaskContent {
                id: task.id.clone(),
                content: self.content.clone(),
            },
        ))
    }

    fn description(&self) -> String {
        format!("Update task {}", self.task_id)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteTask {
    pub task_id: TaskId,
}

impl Command for DeleteTask {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation> {
        let task = state.require_task(&self.task_id)?;
        let (id, column_id) = (task.id.clone(), task.column_id.clone());
        let mut next = state.clone();
        if let Some(column) = state.columns.get(&column_id) {
            next.columns
                .insert(column_id.clone(), column.without_task(&id));
        }
        next.tasks.remove(&id);
        Ok(Mutation::new(next, PersistIntent::DeleteTask { id, column_id }))
    }

    fn description(&self) -> String {
        format!("Delete task {}", self.task_id)
    }
}

/// Move a task to `target_index` of a column, possibly its own.
///
/// The index is clamped to the destination order as it looks once the task
/// has been taken out of its source column.
#[derive(Debug, Clone)]
pub struct MoveTask {
    pub task_id: TaskId,
    pub target_column_id: ColumnId,
    pub target_index: usize,
}

impl Command for MoveTask {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation> {
        let task = state.require_task(&self.task_id)?;
        let target = state.require_column(&self.target_column_id)?;
        let id = task.id.clone();
        let from = task.column_id.clone();
        let mut next = state.clone();

        if from == target.id {
            let reordered = order::repositioned(&target.task_order, &id, self.target_index);
            next.columns
                .insert(from.clone(), target.with_task_order(reordered.clone()));
            return Ok(Mutation::new(
                next,
                PersistIntent::ReorderTasks {
                    column_id: from,
                    order: reordered,
                },
            ));
        }

        let to = target.id.clone();
        if let Some(source) = state.columns.get(&from) {
            next.columns.insert(from.clone(), source.without_task(&id));
        }
        next.columns.insert(
            to.clone(),
            target.with_task_order(order::inserted(
                &target.task_order,
                id.clone(),
                self.target_index,
            )),
        );
        next.tasks.insert(id.clone(), task.moved_to(to.clone()));
        Ok(Mutation::new(next, PersistIntent::MoveTask { id, from, to }))
    }

    fn description(&self) -> String {
        format!(
            "Move task {} to column {} at {}",
            self.task_id, self.target_column_id, self.target_index
        )
    }
}

/// Replace a column's task order with a permutation of itself
#[derive(Debug, Clone)]
pub struct ReorderTasks {
    pub column_id: ColumnId,
    pub order: Vec<TaskId>,
}

impl Command for ReorderTasks {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation> {
        let column = state.require_column(&self.column_id)?;
        let proposed: Vec<TaskId> = self.order.iter().map(|id| state.resolve(id)).collect();
        order::validate_permutation(&column.task_order, &proposed)?;
        let column_id = column.id.clone();
        let mut next = state.clone();
        next.columns
            .insert(column_id.clone(), column.with_task_order(proposed.clone()));
        Ok(Mutation::new(
            next,
            PersistIntent::ReorderTasks {
                column_id,
                order: proposed,
            },
        ))
    }

    fn description(&self) -> String {
        format!("Reorder tasks in column {}", self.column_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CreateColumn;
    use crate::Id;
    use kanban_core::KanbanError;

    fn ids(values: &[&str]) -> Vec<Id> {
        values.iter().map(|v| Id::from(*v)).collect()
    }

    /// Columns A = [t1, t2], B = []
    fn two_columns() -> BoardState {
        let mut state = BoardState::new("u1".into());
        for column in ["A", "B"] {
            state = CreateColumn {
                id: column.into(),
                title: column.to_string(),
            }
            .apply(&state)
            .unwrap()
            .state;
        }
        for task in ["t1", "t2"] {
            state = CreateTask {
                id: task.into(),
                column_id: "A".into(),
                content: task.to_string(),
            }
            .apply(&state)
            .unwrap()
            .state;
        }
        state
    }

    fn order_of(state: &BoardState, column: &str) -> Vec<Id> {
        state.column(&column.into()).unwrap().task_order.clone()
    }

    #[test]
    fn test_create_task_unknown_column() {
        let state = two_columns();
        let err = CreateTask {
            id: "t3".into(),
            column_id: "Z".into(),
            content: "x".to_string(),
        }
        .apply(&state)
        .unwrap_err();
        assert!(matches!(err, KanbanError::NotFound(_)));
    }

    #[test]
    fn test_move_across_columns() {
        let state = two_columns();
        let mutation = MoveTask {
            task_id: "t1".into(),
            target_column_id: "B".into(),
            target_index: 0,
        }
        .apply(&state)
        .unwrap();

        assert_eq!(order_of(&mutation.state, "A"), ids(&["t2"]));
        assert_eq!(order_of(&mutation.state, "B"), ids(&["t1"]));
        assert_eq!(mutation.state.task(&"t1".into()).unwrap().column_id, Id::from("B"));
        assert_eq!(
            mutation.intents,
            vec![PersistIntent::MoveTask {
                id: "t1".into(),
                from: "A".into(),
                to: "B".into(),
            }]
        );
        mutation.state.check_invariants().unwrap();
        // input untouched
        assert_eq!(order_of(&state, "A"), ids(&["t1", "t2"]));
    }

    #[test]
    fn test_move_index_is_clamped() {
        let state = two_columns();
        let next = MoveTask {
            task_id: "t2".into(),
            target_column_id: "B".into(),
            target_index: 40,
        }
        .apply(&state)
        .unwrap()
        .state;
        let next = MoveTask {
            task_id: "t1".into(),
            target_column_id: "B".into(),
            target_index: 40,
        }
        .apply(&next)
        .unwrap()
        .state;
        assert_eq!(order_of(&next, "B"), ids(&["t2", "t1"]));
        assert!(order_of(&next, "A").is_empty());
    }

    #[test]
    fn test_move_within_column_is_reposition() {
        let state = two_columns();
        let mutation = MoveTask {
            task_id: "t1".into(),
            target_column_id: "A".into(),
            target_index: 5,
        }
        .apply(&state)
        .unwrap();
        assert_eq!(order_of(&mutation.state, "A"), ids(&["t2", "t1"]));
        assert_eq!(
            mutation.intents,
            vec![PersistIntent::ReorderTasks {
                column_id: "A".into(),
                order: ids(&["t2", "t1"]),
            }]
        );
        mutation.state.check_invariants().unwrap();
    }

    #[test]
    fn test_move_unknown_ids() {
        let state = two_columns();
        for (task, column) in [("nope", "B"), ("t1", "nope")] {
            let err = MoveTask {
                task_id: task.into(),
                target_column_id: column.into(),
                target_index: 0,
            }
            .apply(&state)
            .unwrap_err();
            assert!(matches!(err, KanbanError::NotFound(_)));
        }
    }

    #[test]
    fn test_delete_task_twice() {
        let state = two_columns();
        let once = DeleteTask {
            task_id: "t1".into(),
        }
        .apply(&state)
        .unwrap()
        .state;
        assert_eq!(order_of(&once, "A"), ids(&["t2"]));

        let err = DeleteTask {
            task_id: "t1".into(),
        }
        .apply(&once)
        .unwrap_err();
        assert!(matches!(err, KanbanError::NotFound(_)));
        once.check_invariants().unwrap();
    }

    #[test]
    fn test_update_task_content() {
        let state = two_columns();
        let next = UpdateTaskContent {
            task_id: "t2".into(),
            content: "rewritten".to_string(),
        }
        .apply(&state)
        .unwrap()
        .state;
        assert_eq!(next.task(&"t2".into()).unwrap().content, "rewritten");
        assert_eq!(next.columns, state.columns);
    }

    #[test]
    fn test_reorder_tasks() {
        let state = two_columns();
        let next = ReorderTasks {
            column_id: "A".into(),
            order: ids(&["t2", "t1"]),
        }
        .apply(&state)
        .unwrap()
        .state;
        assert_eq!(order_of(&next, "A"), ids(&["t2", "t1"]));

        let err = ReorderTasks {
            column_id: "A".into(),
            order: ids(&["t2"]),
        }
        .apply(&state)
        .unwrap_err();
        assert!(matches!(err, KanbanError::InvalidPermutation(_)));
    }
}
