//! Request and response shapes for every call on [`crate::BoardStore`].

use kanban_domain::{BoardView, ColumnId, ColumnView, Id, OwnerId, Task, TaskId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateColumnRequest {
    pub owner_id: OwnerId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateColumnTitleRequest {
    pub id: ColumnId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteColumnRequest {
    pub id: ColumnId,
    pub owner_id: OwnerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderColumnsRequest {
    pub owner_id: OwnerId,
    pub column_ids: Vec<ColumnId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnResponse {
    pub id: ColumnId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub column_id: ColumnId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskContentRequest {
    pub id: TaskId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskRequest {
    pub id: TaskId,
    pub column_id: ColumnId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTaskRequest {
    pub id: TaskId,
    pub from_column_id: ColumnId,
    pub to_column_id: ColumnId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderTasksRequest {
    pub column_id: ColumnId,
    pub task_ids: Vec<TaskId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: TaskId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedResponse {
    pub id: TaskId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: Id,
    /// Tasks removed along with a column
    #[serde(default)]
    pub cascaded: Vec<TaskId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

/// A fetched board: ordered columns with their ordered tasks nested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub owner_id: OwnerId,
    pub columns: Vec<ColumnRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub id: ColumnId,
    pub title: String,
    pub tasks: Vec<TaskResponse>,
}

impl From<BoardRecord> for BoardView {
    fn from(record: BoardRecord) -> Self {
        let columns = record
            .columns
            .into_iter()
            .map(|column| ColumnView {
                tasks: column
                    .tasks
                    .into_iter()
                    .map(|task| Task::new(task.id, column.id.clone(), task.content))
                    .collect(),
                id: column.id,
                title: column.title,
            })
            .collect();
        BoardView {
            owner_id: record.owner_id,
            columns,
        }
    }
}
