use serde::{Deserialize, Serialize};

use crate::id::{ColumnId, Id, TaskId};

/// A persistence call computed by a command, not yet sent to the store.
///
/// Ids may still be placeholders; the dispatcher swaps them for durable ids
/// right before the call is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersistIntent {
    CreateColumn {
        placeholder: ColumnId,
        title: String,
    },
    RenameColumn {
        id: ColumnId,
        title: String,
    },
    DeleteColumn {
        id: ColumnId,
    },
    ReorderColumns {
        order: Vec<ColumnId>,
    },
    CreateTask {
        placeholder: TaskId,
        column_id: ColumnId,
        content: String,
    },
    UpdateTaskContent {
        id: TaskId,
        content: String,
    },
    DeleteTask {
        id: TaskId,
        column_id: ColumnId,
    },
    MoveTask {
        id: TaskId,
        from: ColumnId,
        to: ColumnId,
    },
    ReorderTasks {
        column_id: ColumnId,
        order: Vec<TaskId>,
    },
}

impl PersistIntent {
    /// The placeholder this call will obtain a durable id for, if any
    pub fn placeholder(&self) -> Option<&Id> {
        match self {
            Self::CreateColumn { placeholder, .. } | Self::CreateTask { placeholder, .. } => {
                Some(placeholder)
            }
            _ => None,
        }
    }

    /// Every id the call refers to, excluding the placeholder it creates
    pub fn references_mut(&mut self) -> Vec<&mut Id> {
        match self {
            Self::CreateColumn { .. } => Vec::new(),
            Self::RenameColumn { id, .. }
            | Self::DeleteColumn { id }
            | Self::UpdateTaskContent { id, .. } => vec![id],
            Self::ReorderColumns { order } => order.iter_mut().collect(),
            Self::CreateTask { column_id, .. } => vec![column_id],
            Self::DeleteTask { id, column_id } => vec![id, column_id],
            Self::MoveTask { id, from, to } => vec![id, from, to],
            Self::ReorderTasks { column_id, order } => {
                let mut refs = vec![column_id];
                refs.extend(order.iter_mut());
                refs
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateColumn { .. } => "create column",
            Self::RenameColumn { .. } => "rename column",
            Self::DeleteColumn { .. } => "delete column",
            Self::ReorderColumns { .. } => "reorder columns",
            Self::CreateTask { .. } => "create task",
            Self::UpdateTaskContent { .. } => "update task",
            Self::DeleteTask { .. } => "delete task",
            Self::MoveTask { .. } => "move task",
            Self::ReorderTasks { .. } => "reorder tasks",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_exclude_placeholder() {
        let mut intent = PersistIntent::CreateTask {
            placeholder: "tmp-2".into(),
            column_id: "tmp-1".into(),
            content: "x".to_string(),
        };
        assert_eq!(intent.placeholder(), Some(&Id::from("tmp-2")));
        let refs = intent.references_mut();
        assert_eq!(refs.len(), 1);
        assert_eq!(*refs[0], Id::from("tmp-1"));
    }

    #[test]
    fn test_references_can_be_rewritten() {
        let mut intent = PersistIntent::MoveTask {
            id: "t1".into(),
            from: "tmp-1".into(),
            to: "B".into(),
        };
        for id in intent.references_mut() {
            if id.as_str() == "tmp-1" {
                *id = "col-9".into();
            }
        }
        assert_eq!(
            intent,
            PersistIntent::MoveTask {
                id: "t1".into(),
                from: "col-9".into(),
                to: "B".into(),
            }
        );
    }
}
