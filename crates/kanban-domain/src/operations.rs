use crate::{BoardView, Column, ColumnId, GestureIntent, Task, TaskId};
use kanban_core::KanbanResult;

/// The operations every board front end offers.
/// Adding a method here forces each implementation to add it.
pub trait BoardOperations {
    // Column operations
    fn create_column(&mut self, title: String) -> KanbanResult<Column>;
    fn rename_column(&mut self, id: ColumnId, title: String) -> KanbanResult<Column>;
    fn delete_column(&mut self, id: ColumnId) -> KanbanResult<()>;
    fn reorder_columns(&mut self, order: Vec<ColumnId>) -> KanbanResult<()>;

    // Task operations
    fn create_task(&mut self, column_id: ColumnId, content: String) -> KanbanResult<Task>;
    fn update_task_content(&mut self, id: TaskId, content: String) -> KanbanResult<Task>;
    fn delete_task(&mut self, id: TaskId) -> KanbanResult<()>;
    fn move_task(
        &mut self,
        id: TaskId,
        target_column_id: ColumnId,
        target_index: usize,
    ) -> KanbanResult<Task>;
    fn reorder_tasks(&mut self, column_id: ColumnId, order: Vec<TaskId>) -> KanbanResult<()>;

    // Presentation
    fn handle_gesture(&mut self, intent: GestureIntent) -> KanbanResult<BoardView>;
    fn view(&self) -> BoardView;
}
