#![allow(dead_code)]

use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::OwnerId;
use kanban_persistence::*;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::time::Duration;

/// A MemoryStore that records every call and can be told to fail or stall
/// specific ones.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    failing: Mutex<HashSet<&'static str>>,
    stalled: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, call: &'static str) {
        self.failing.lock().insert(call);
    }

    pub fn recover(&self, call: &'static str) {
        self.failing.lock().remove(call);
    }

    pub fn stall(&self, call: &'static str) {
        self.stalled.lock().insert(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == call).count()
    }

    async fn enter(&self, call: &'static str) -> KanbanResult<()> {
        self.calls.lock().push(call.to_string());
        let stalled = self.stalled.lock().contains(call);
        if stalled {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing.lock().contains(call) {
            return Err(KanbanError::RemoteFailure(format!("{} rejected", call)));
        }
        Ok(())
    }
}

#[async_trait]
impl BoardStore for FlakyStore {
    async fn ensure_owner(&self, owner_id: &OwnerId) -> KanbanResult<()> {
        self.inner.ensure_owner(owner_id).await
    }

    async fn create_column(&self, request: CreateColumnRequest) -> KanbanResult<ColumnResponse> {
        self.enter("create_column").await?;
        self.inner.create_column(request).await
    }

    async fn update_column_title(
        &self,
        request: UpdateColumnTitleRequest,
    ) -> KanbanResult<ColumnResponse> {
        self.enter("update_column_title").await?;
        self.inner.update_column_title(request).await
    }

    async fn delete_column(&self, request: DeleteColumnRequest) -> KanbanResult<DeletedResponse> {
        self.enter("delete_column").await?;
        self.inner.delete_column(request).await
    }

    async fn reorder_columns(&self, request: ReorderColumnsRequest) -> KanbanResult<Ack> {
        self.enter("reorder_columns").await?;
        self.inner.reorder_columns(request).await
    }

    async fn create_task(&self, request: CreateTaskRequest) -> KanbanResult<TaskResponse> {
        self.enter("create_task").await?;
        self.inner.create_task(request).await
    }

    async fn update_task_content(
        &self,
        request: UpdateTaskContentRequest,
    ) -> KanbanResult<TaskResponse> {
        self.enter("update_task_content").await?;
        self.inner.update_task_content(request).await
    }

    async fn delete_task(&self, request: DeleteTaskRequest) -> KanbanResult<DeletedResponse> {
        self.enter("delete_task").await?;
        self.inner.delete_task(request).await
    }

    async fn move_task(&self, request: MoveTaskRequest) -> KanbanResult<MovedResponse> {
        self.enter("move_task").await?;
        self.inner.move_task(request).await
    }

    async fn reorder_tasks(&self, request: ReorderTasksRequest) -> KanbanResult<Ack> {
        self.enter("reorder_tasks").await?;
        self.inner.reorder_tasks(request).await
    }

    async fn fetch_board(&self, owner_id: &OwnerId) -> KanbanResult<BoardRecord> {
        self.inner.fetch_board(owner_id).await
    }
}
