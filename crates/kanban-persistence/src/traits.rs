use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanban_core::KanbanResult;
use kanban_domain::OwnerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::messages::*;

/// Metadata written alongside persisted documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(format_version: u32, instance_id: Uuid) -> Self {
        Self {
            format_version,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// The remote keyed document store the board is synchronized with.
///
/// Ids in requests are always durable; resolving placeholders is the
/// caller's job. Unknown ids yield `KanbanError::NotFound`.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Create the owner's (empty) board if it does not exist yet
    async fn ensure_owner(&self, owner_id: &OwnerId) -> KanbanResult<()>;

    async fn create_column(&self, request: CreateColumnRequest) -> KanbanResult<ColumnResponse>;

    async fn update_column_title(
        &self,
        request: UpdateColumnTitleRequest,
    ) -> KanbanResult<ColumnResponse>;

    /// Delete a column and, server-side, every task it holds
    async fn delete_column(&self, request: DeleteColumnRequest) -> KanbanResult<DeletedResponse>;

    /// Acknowledged but not stored: column order is client-session only
    async fn reorder_columns(&self, request: ReorderColumnsRequest) -> KanbanResult<Ack>;

    async fn create_task(&self, request: CreateTaskRequest) -> KanbanResult<TaskResponse>;

    async fn update_task_content(
        &self,
        request: UpdateTaskContentRequest,
    ) -> KanbanResult<TaskResponse>;

    async fn delete_task(&self, request: DeleteTaskRequest) -> KanbanResult<DeletedResponse>;

    /// Move to the end of the destination column; no position is carried
    async fn move_task(&self, request: MoveTaskRequest) -> KanbanResult<MovedResponse>;

    /// Acknowledged but not stored: task order is client-session only
    async fn reorder_tasks(&self, request: ReorderTasksRequest) -> KanbanResult<Ack>;

    async fn fetch_board(&self, owner_id: &OwnerId) -> KanbanResult<BoardRecord>;
}
