//! The single owned client-side state value.
//!
//! `BoardState` is only ever replaced wholesale by the result of a command;
//! the fields are public for reading but nothing outside this crate's commands
//! and the reconciler's id rewriting should construct a modified copy.

use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::board::Board;
use crate::column::Column;
use crate::id::{ColumnId, Id, OwnerId, TaskId};
use crate::task::Task;
use crate::view::{BoardView, ColumnView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub board: Board,
    #[serde(default)]
    pub columns: BTreeMap<ColumnId, Column>,
    #[serde(default)]
    pub tasks: BTreeMap<TaskId, Task>,
    /// Placeholder -> durable id, kept so callers may keep using placeholders
    #[serde(default)]
    pub aliases: BTreeMap<Id, Id>,
}

impl BoardState {
    pub fn new(owner_id: OwnerId) -> Self {
        Self {
            board: Board::new(owner_id),
            columns: BTreeMap::new(),
            tasks: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }

    pub fn from_view(view: BoardView) -> KanbanResult<Self> {
        let mut state = Self::new(view.owner_id);
        for column_view in view.columns {
            if state.columns.contains_key(&column_view.id) {
                return Err(KanbanError::Validation(format!(
                    "column {} listed twice",
                    column_view.id
                )));
            }
            let mut column = Column::new(column_view.id.clone(), column_view.title);
            for task in column_view.tasks {
                if state.tasks.contains_key(&task.id) {
                    return Err(KanbanError::Validation(format!(
                        "task {} listed twice",
                        task.id
                    )));
                }
                column.task_order.push(task.id.clone());
                state
                    .tasks
                    .insert(task.id.clone(), task.moved_to(column_view.id.clone()));
            }
            state.board.column_order.push(column_view.id.clone());
            state.columns.insert(column_view.id, column);
        }
        Ok(state)
    }

    pub fn view(&self) -> BoardView {
        let columns = self
            .ordered_columns()
            .map(|column| ColumnView {
                id: column.id.clone(),
                title: column.title.clone(),
                tasks: self.tasks_in(column).cloned().collect(),
            })
            .collect();
        BoardView {
            owner_id: self.board.owner_id.clone(),
            columns,
        }
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.board.owner_id
    }

    /// Map a placeholder to its durable id once one has been assigned
    pub fn resolve(&self, id: &Id) -> Id {
        self.aliases.get(id).cloned().unwrap_or_else(|| id.clone())
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(&self.resolve(id))
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(&self.resolve(id))
    }

    pub fn require_column(&self, id: &ColumnId) -> KanbanResult<&Column> {
        self.column(id)
            .ok_or_else(|| KanbanError::not_found("column", id))
    }

    pub fn require_task(&self, id: &TaskId) -> KanbanResult<&Task> {
        self.task(id).ok_or_else(|| KanbanError::not_found("task", id))
    }

    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.board
            .column_order
            .iter()
            .filter_map(|id| self.columns.get(id))
    }

    pub fn tasks_in<'a>(&'a self, column: &'a Column) -> impl Iterator<Item = &'a Task> {
        column.task_order.iter().filter_map(|id| self.tasks.get(id))
    }

    pub fn column_count(&self) -> usize {
        self.board.column_order.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Replace every reference to `from` with `to` and remember the alias.
    ///
    /// Returns false when `from` no longer names anything, e.g. the entity was
    /// deleted before its durable id arrived.
    pub fn rewrite_id(&mut self, from: &Id, to: &Id) -> bool {
        self.aliases.insert(from.clone(), to.clone());

        if let Some(mut column) = self.columns.remove(from) {
            column.id = to.clone();
            self.columns.insert(to.clone(), column);
            self.board.column_order = self
                .board
                .column_order
                .iter()
                .map(|id| if id == from { to.clone() } else { id.clone() })
                .collect();
            self.tasks = std::mem::take(&mut self.tasks)
                .into_iter()
                .map(|(id, task)| {
                    if &task.column_id == from {
                        let moved = task.moved_to(to.clone());
                        (id, moved)
                    } else {
                        (id, task)
                    }
                })
                .collect();
            return true;
        }

        if let Some(mut task) = self.tasks.remove(from) {
            task.id = to.clone();
            if let Some(column) = self.columns.get(&task.column_id) {
                let order = column
                    .task_order
                    .iter()
                    .map(|id| if id == from { to.clone() } else { id.clone() })
                    .collect();
                let updated = column.with_task_order(order);
                self.columns.insert(updated.id.clone(), updated);
            }
            self.tasks.insert(to.clone(), task);
            return true;
        }

        false
    }

    pub fn apply_aliases(&mut self, aliases: &BTreeMap<Id, Id>) {
        for (from, to) in aliases {
            self.rewrite_id(from, to);
        }
    }

    /// Verify ownership and uniqueness across the board, columns and tasks
    pub fn check_invariants(&self) -> KanbanResult<()> {
        let mut seen_columns = HashSet::new();
        for column_id in &self.board.column_order {
            if !seen_columns.insert(column_id) {
                return Err(KanbanError::Validation(format!(
                    "column {} appears twice in column order",
                    column_id
                )));
            }
            if !self.columns.contains_key(column_id) {
                return Err(KanbanError::Validation(format!(
                    "column order names unknown column {}",
                    column_id
                )));
            }
        }
        if seen_columns.len() != self.columns.len() {
            return Err(KanbanError::Validation(
                "a column is missing from the column order".to_string(),
            ));
        }

        let mut listed_tasks = HashSet::new();
        for column in self.columns.values() {
            for task_id in &column.task_order {
                if !listed_tasks.insert(task_id) {
                    return Err(KanbanError::Validation(format!(
                        "task {} is listed more than once",
                        task_id
                    )));
                }
                match self.tasks.get(task_id) {
                    Some(task) if task.column_id == column.id => {}
                    Some(task) => {
                        return Err(KanbanError::Validation(format!(
                            "task {} is listed in {} but belongs to {}",
                            task_id, column.id, task.column_id
                        )))
                    }
                    None => {
                        return Err(KanbanError::Validation(format!(
                            "column {} lists unknown task {}",
                            column.id, task_id
                        )))
                    }
                }
            }
        }
        if let Some(orphan) = self.tasks.keys().find(|id| !listed_tasks.contains(id)) {
            return Err(KanbanError::Validation(format!(
                "task {} is not listed by any column",
                orphan
            )));
        }
        Ok(())
    }
}
