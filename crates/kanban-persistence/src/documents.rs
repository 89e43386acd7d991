//! Document layout shared by the store implementations.
//!
//! Three keyed collections, mirroring a document database: owners list their
//! column ids, columns list their task ids, tasks hold content. All checks and
//! cascades happen here so every store behaves the same.

use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{ColumnId, Id, OwnerId, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::messages::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerDocument {
    #[serde(default)]
    pub column_ids: Vec<ColumnId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDocument {
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDocument {
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSet {
    #[serde(default)]
    pub owners: BTreeMap<OwnerId, OwnerDocument>,
    #[serde(default)]
    pub columns: BTreeMap<ColumnId, ColumnDocument>,
    #[serde(default)]
    pub tasks: BTreeMap<TaskId, TaskDocument>,
}

fn new_id() -> Id {
    Id::new(Uuid::new_v4().simple().to_string())
}

fn acknowledged(message: &str) -> Ack {
    Ack {
        message: message.to_string(),
    }
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty() && self.columns.is_empty() && self.tasks.is_empty()
    }

    pub fn ensure_owner(&mut self, owner_id: &OwnerId) {
        self.owners.entry(owner_id.clone()).or_default();
    }

    fn owner_mut(&mut self, owner_id: &OwnerId) -> KanbanResult<&mut OwnerDocument> {
        self.owners
            .get_mut(owner_id)
            .ok_or_else(|| KanbanError::not_found("owner", owner_id))
    }

    fn column_mut(&mut self, id: &ColumnId) -> KanbanResult<&mut ColumnDocument> {
        self.columns
            .get_mut(id)
            .ok_or_else(|| KanbanError::not_found("column", id))
    }

    pub fn create_column(&mut self, request: CreateColumnRequest) -> KanbanResult<ColumnResponse> {
        let id = new_id();
        self.owner_mut(&request.owner_id)?.column_ids.push(id.clone());
        self.columns.insert(
            id.clone(),
            ColumnDocument {
                title: request.title.clone(),
                task_ids: Vec::new(),
                created_at: Utc::now(),
            },
        );
        Ok(ColumnResponse {
            id,
            title: request.title,
        })
    }

    pub fn update_column_title(
        &mut self,
        request: UpdateColumnTitleRequest,
    ) -> KanbanResult<ColumnResponse> {
        let column = self.column_mut(&request.id)?;
        column.title = request.title.clone();
        Ok(ColumnResponse {
            id: request.id,
            title: request.title,
        })
    }

    pub fn delete_column(&mut self, request: DeleteColumnRequest) -> KanbanResult<DeletedResponse> {
        let column = self
            .columns
            .remove(&request.id)
            .ok_or_else(|| KanbanError::not_found("column", &request.id))?;
        for task_id in &column.task_ids {
            self.tasks.remove(task_id);
        }
        if let Some(owner) = self.owners.get_mut(&request.owner_id) {
            owner.column_ids.retain(|id| id != &request.id);
        }
        Ok(DeletedResponse {
            id: request.id,
            cascaded: column.task_ids,
        })
    }

    pub fn reorder_columns(&mut self, request: ReorderColumnsRequest) -> KanbanResult<Ack> {
        self.owner_mut(&request.owner_id)?;
        Ok(acknowledged("Columns reordered successfully"))
    }

    pub fn create_task(&mut self, request: CreateTaskRequest) -> KanbanResult<TaskResponse> {
        let id = new_id();
        self.column_mut(&request.column_id)?.task_ids.push(id.clone());
        self.tasks.insert(
            id.clone(),
            TaskDocument {
                content: request.content.clone(),
                created_at: Utc::now(),
            },
        );
        Ok(TaskResponse {
            id,
            content: request.content,
        })
    }

    pub fn update_task_content(
        &mut self,
        request: UpdateTaskContentRequest,
    ) -> KanbanResult<TaskResponse> {
        let task = self
            .tasks
            .get_mut(&request.id)
            .ok_or_else(|| KanbanError::not_found("task", &request.id))?;
        task.content = request.content.clone();
        Ok(TaskResponse {
            id: request.id,
            content: request.content,
        })
    }

    pub fn delete_task(&mut self, request: DeleteTaskRequest) -> KanbanResult<DeletedResponse> {
        self.tasks
            .remove(&request.id)
            .ok_or_else(|| KanbanError::not_found("task", &request.id))?;
        if let Some(column) = self.columns.get_mut(&request.column_id) {
            column.task_ids.retain(|id| id != &request.id);
        }
        Ok(DeletedResponse {
            id: request.id,
            cascaded: Vec::new(),
        })
    }

    pub fn move_task(&mut self, request: MoveTaskRequest) -> KanbanResult<MovedResponse> {
        if !self.tasks.contains_key(&request.id) {
            return Err(KanbanError::not_found("task", &request.id));
        }
        if !self.columns.contains_key(&request.to_column_id) {
            return Err(KanbanError::not_found("column", &request.to_column_id));
        }
        let source = self.column_mut(&request.from_column_id)?;
        if !source.task_ids.contains(&request.id) {
            return Err(KanbanError::not_found(
                "task in column",
                format!("{}/{}", request.from_column_id, request.id),
            ));
        }
        source.task_ids.retain(|id| id != &request.id);
        self.column_mut(&request.to_column_id)?
            .task_ids
            .push(request.id.clone());
        Ok(MovedResponse { id: request.id })
    }

    pub fn reorder_tasks(&mut self, request: ReorderTasksRequest) -> KanbanResult<Ack> {
        self.column_mut(&request.column_id)?;
        Ok(acknowledged("Tasks reordered successfully"))
    }

    pub fn fetch_board(&self, owner_id: &OwnerId) -> KanbanResult<BoardRecord> {
        let owner = self
            .owners
            .get(owner_id)
            .ok_or_else(|| KanbanError::not_found("owner", owner_id))?;
        let columns = owner
            .column_ids
            .iter()
            .filter_map(|column_id| {
                let column = self.columns.get(column_id)?;
                let tasks = column
                    .task_ids
                    .iter()
                    .filter_map(|task_id| {
                        self.tasks.get(task_id).map(|task| TaskResponse {
                            id: task_id.clone(),
                            content: task.content.clone(),
                        })
                    })
                    .collect();
                Some(ColumnRecord {
                    id: column_id.clone(),
                    title: column.title.clone(),
                    tasks,
                })
            })
            .collect();
        Ok(BoardRecord {
            owner_id: owner_id.clone(),
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_owner() -> (DocumentSet, OwnerId) {
        let mut docs = DocumentSet::new();
        let owner: OwnerId = "u1".into();
        docs.ensure_owner(&owner);
        (docs, owner)
    }

    fn add_column(docs: &mut DocumentSet, owner: &OwnerId, title: &str) -> ColumnId {
        docs.create_column(CreateColumnRequest {
            owner_id: owner.clone(),
            title: title.to_string(),
        })
        .unwrap()
        .id
    }

    fn add_task(docs: &mut DocumentSet, column_id: &ColumnId, content: &str) -> TaskId {
        docs.create_task(CreateTaskRequest {
            column_id: column_id.clone(),
            content: content.to_string(),
        })
        .unwrap()
        .id
    }

    #[test]
    fn test_fetch_preserves_order() {
        let (mut docs, owner) = with_owner();
        let todo = add_column(&mut docs, &owner, "Todo");
        let done = add_column(&mut docs, &owner, "Done");
        add_task(&mut docs, &todo, "a");
        add_task(&mut docs, &todo, "b");

        let board = docs.fetch_board(&owner).unwrap();
        assert_eq!(board.columns.len(), 2);
        assert_eq!(board.columns[0].id, todo);
        assert_eq!(board.columns[1].id, done);
        let contents: Vec<_> = board.columns[0].tasks.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b"]);
    }

    #[test]
    fn test_delete_column_cascades() {
        let (mut docs, owner) = with_owner();
        let todo = add_column(&mut docs, &owner, "Todo");
        let task = add_task(&mut docs, &todo, "a");

        let deleted = docs
            .delete_column(DeleteColumnRequest {
                id: todo.clone(),
                owner_id: owner.clone(),
            })
            .unwrap();
        assert_eq!(deleted.cascaded, vec![task.clone()]);
        assert!(!docs.tasks.contains_key(&task));
        assert!(docs.fetch_board(&owner).unwrap().columns.is_empty());
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let (mut docs, owner) = with_owner();
        let missing: Id = "missing".into();
        let err = docs
            .create_task(CreateTaskRequest {
                column_id: missing.clone(),
                content: "x".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, KanbanError::NotFound(_)));
        assert!(docs.tasks.is_empty());

        assert!(docs
            .delete_task(DeleteTaskRequest {
                id: missing.clone(),
                column_id: missing.clone(),
            })
            .is_err());
        assert!(docs.fetch_board(&"nobody".into()).is_err());
        assert!(docs
            .create_column(CreateColumnRequest {
                owner_id: "nobody".into(),
                title: "x".to_string(),
            })
            .is_err());
        assert!(docs.fetch_board(&owner).unwrap().columns.is_empty());
    }

    #[test]
    fn test_move_appends_to_destination() {
        let (mut docs, owner) = with_owner();
        let todo = add_column(&mut docs, &owner, "Todo");
        let done = add_column(&mut docs, &owner, "Done");
        let a = add_task(&mut docs, &todo, "a");
        let b = add_task(&mut docs, &done, "b");

        docs.move_task(MoveTaskRequest {
            id: a.clone(),
            from_column_id: todo.clone(),
            to_column_id: done.clone(),
        })
        .unwrap();

        assert!(docs.columns[&todo].task_ids.is_empty());
        assert_eq!(docs.columns[&done].task_ids, vec![b, a]);
    }

    #[test]
    fn test_reorder_is_acknowledged_without_storing() {
        let (mut docs, owner) = with_owner();
        let first = add_column(&mut docs, &owner, "First");
        let second = add_column(&mut docs, &owner, "Second");

        docs.reorder_columns(ReorderColumnsRequest {
            owner_id: owner.clone(),
            column_ids: vec![second.clone(), first.clone()],
        })
        .unwrap();

        assert_eq!(docs.owners[&owner].column_ids, vec![first, second]);
    }
}
