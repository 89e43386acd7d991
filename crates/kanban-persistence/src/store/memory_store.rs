use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::OwnerId;
use parking_lot::Mutex;

use crate::documents::DocumentSet;
use crate::messages::*;
use crate::traits::BoardStore;

/// In-process document store.
///
/// Behaves like the remote service: ids are generated here, deletes
/// cascade, and reorders are acknowledged without being stored.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<DocumentSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: DocumentSet) -> Self {
        Self {
            documents: Mutex::new(documents),
        }
    }

    /// Copy of the stored documents, for inspection
    pub fn documents(&self) -> DocumentSet {
        self.documents.lock().clone()
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    async fn ensure_owner(&self, owner_id: &OwnerId) -> KanbanResult<()> {
        self.documents.lock().ensure_owner(owner_id);
        Ok(())
    }

    async fn create_column(&self, request: CreateColumnRequest) -> KanbanResult<ColumnResponse> {
        self.documents.lock().create_column(request)
    }

    async fn update_column_title(
        &self,
        request: UpdateColumnTitleRequest,
    ) -> KanbanResult<ColumnResponse> {
        self.documents.lock().update_column_title(request)
    }

    async fn delete_column(&self, request: DeleteColumnRequest) -> KanbanResult<DeletedResponse> {
        self.documents.lock().delete_column(request)
    }

    async fn reorder_columns(&self, request: ReorderColumnsRequest) -> KanbanResult<Ack> {
        self.documents.lock().reorder_columns(request)
    }

    async fn create_task(&self, request: CreateTaskRequest) -> KanbanResult<TaskResponse> {
        self.documents.lock().create_task(request)
    }

    async fn update_task_content(
        &self,
        request: UpdateTaskContentRequest,
    ) -> KanbanResult<TaskResponse> {
        self.documents.lock().update_task_content(request)
    }

    async fn delete_task(&self, request: DeleteTaskRequest) -> KanbanResult<DeletedResponse> {
        self.documents.lock().delete_task(request)
    }

    async fn move_task(&self, request: MoveTaskRequest) -> KanbanResult<MovedResponse> {
        self.documents.lock().move_task(request)
    }

    async fn reorder_tasks(&self, request: ReorderTasksRequest) -> KanbanResult<Ack> {
        self.documents.lock().reorder_tasks(request)
    }

    async fn fetch_board(&self, owner_id: &OwnerId) -> KanbanResult<BoardRecord> {
        self.documents.lock().fetch_board(owner_id)
    }
}
