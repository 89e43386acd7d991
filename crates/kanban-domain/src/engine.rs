//! Entry point for structural edits.
//!
//! The engine builds commands (allocating placeholder ids for creates) and
//! applies them. It holds no board state of its own: the caller passes the
//! current [`BoardState`] in and receives the next one back.

use kanban_core::KanbanResult;
use std::sync::Arc;

use crate::commands::*;
use crate::gesture::{DragSubject, DragTracker, GestureIntent};
use crate::id::{ColumnId, IdAllocator, PlaceholderAllocator, TaskId};
use crate::order;
use crate::state::BoardState;

pub struct MutationEngine {
    allocator: Box<dyn IdAllocator>,
}

impl MutationEngine {
    pub fn new(allocator: Box<dyn IdAllocator>) -> Self {
        Self { allocator }
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self::new(Box::new(PlaceholderAllocator::new(prefix)))
    }

    pub fn execute(&self, state: &BoardState, command: &dyn Command) -> KanbanResult<Mutation> {
        tracing::debug!("Executing: {}", command.description());
        let mutation = command.apply(state)?;
        debug_assert!(mutation.state.check_invariants().is_ok());
        Ok(mutation)
    }

    pub fn create_column_command(&mut self, title: String) -> CreateColumn {
        CreateColumn {
            id: self.allocator.next_placeholder(),
            title,
        }
    }

    pub fn create_task_command(&mut self, column_id: ColumnId, content: String) -> CreateTask {
        CreateTask {
            id: self.allocator.next_placeholder(),
            column_id,
            content,
        }
    }

    pub fn create_column(&mut self, state: &BoardState, title: String) -> KanbanResult<Mutation> {
        let command = self.create_column_command(title);
        self.execute(state, &command)
    }

    pub fn rename_column(
        &self,
        state: &BoardState,
        column_id: ColumnId,
        title: String,
    ) -> KanbanResult<Mutation> {
        self.execute(state, &RenameColumn { column_id, title })
    }

    pub fn delete_column(&self, state: &BoardState, column_id: ColumnId) -> KanbanResult<Mutation> {
        self.execute(state, &DeleteColumn { column_id })
    }

    pub fn reorder_columns(
        &self,
        state: &BoardState,
        order: Vec<ColumnId>,
    ) -> KanbanResult<Mutation> {
        self.execute(state, &ReorderColumns { order })
    }

    pub fn create_task(
        &mut self,
        state: &BoardState,
        column_id: ColumnId,
        content: String,
    ) -> KanbanResult<Mutation> {
        let command = self.create_task_command(column_id, content);
        self.execute(state, &command)
    }

    pub fn update_task_content(
        &self,
        state: &BoardState,
        task_id: TaskId,
        content: String,
    ) -> KanbanResult<Mutation> {
        self.execute(state, &UpdateTaskContent { task_id, content })
    }

    pub fn delete_task(&self, state: &BoardState, task_id: TaskId) -> KanbanResult<Mutation> {
        self.execute(state, &DeleteTask { task_id })
    }

    pub fn move_task(
        &self,
        state: &BoardState,
        task_id: TaskId,
        target_column_id: ColumnId,
        target_index: usize,
    ) -> KanbanResult<Mutation> {
        self.execute(
            state,
            &MoveTask {
                task_id,
                target_column_id,
                target_index,
            },
        )
    }

    pub fn reorder_tasks(
        &self,
        state: &BoardState,
        column_id: ColumnId,
        order: Vec<TaskId>,
    ) -> KanbanResult<Mutation> {
        self.execute(state, &ReorderTasks { column_id, order })
    }

    /// Translate a presentation intent into the command it stands for.
    ///
    /// `StartDrag` only updates the tracker and yields no command.
    pub fn command_for_gesture(
        &mut self,
        state: &BoardState,
        drag: &mut DragTracker,
        intent: GestureIntent,
    ) -> KanbanResult<Option<Arc<dyn Command>>> {
        let command: Arc<dyn Command> = match intent {
            GestureIntent::StartDrag(entity) => {
                drag.start(state, &entity)?;
                return Ok(None);
            }
            GestureIntent::Drop {
                entity,
                target_container,
                target_index,
            } => match drag.finish(state, &entity)? {
                DragSubject::Column(column_id) => {
                    let order = order::repositioned(
                        &state.board.column_order,
                        &column_id,
                        target_index,
                    );
                    Arc::new(ReorderColumns { order })
                }
                DragSubject::Task(task_id) => {
                    let target_column_id = target_container.ok_or_else(|| {
                        kanban_core::KanbanError::Validation(format!(
                            "task {} dropped outside a column",
                            task_id
                        ))
                    })?;
                    Arc::new(MoveTask {
                        task_id,
                        target_column_id,
                        target_index,
                    })
                }
            },
            GestureIntent::Edit { entity, value } => match DragSubject::classify(state, &entity)? {
                DragSubject::Column(column_id) => Arc::new(RenameColumn {
                    column_id,
                    title: value,
                }),
                DragSubject::Task(task_id) => Arc::new(UpdateTaskContent {
                    task_id,
                    content: value,
                }),
            },
            GestureIntent::Add(None) => {
                let title = format!("Column {}", state.column_count() + 1);
                Arc::new(self.create_column_command(title))
            }
            GestureIntent::Add(Some(container)) => {
                let column_id = state.require_column(&container)?.id.clone();
                let content = format!("Task {}", state.task_count() + 1);
                Arc::new(self.create_task_command(column_id, content))
            }
            GestureIntent::Remove(entity) => match DragSubject::classify(state, &entity)? {
                DragSubject::Column(column_id) => Arc::new(DeleteColumn { column_id }),
                DragSubject::Task(task_id) => Arc::new(DeleteTask { task_id }),
            },
        };
        Ok(Some(command))
    }
}

impl Default for MutationEngine {
    fn default() -> Self {
        Self::new(Box::new(PlaceholderAllocator::default()))
    }
}
