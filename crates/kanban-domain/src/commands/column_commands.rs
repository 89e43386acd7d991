use super::{Command, Mutation};
use crate::intent::PersistIntent;
use crate::order;
use crate::state::BoardState;
use crate::{Column, ColumnId};
use kanban_core::KanbanResult;

/// Append a new, empty column
#[derive(Debug, Clone)]
pub struct CreateColumn {
    pub id: ColumnId,
    pub title: String,
}

impl Command for CreateColumn {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation> {
        let mut next = state.clone();
        let len = next.board.column_order.len();
        next.board = next.board.with_column_order(order::inserted(
            &state.board.column_order,
            self.id.clone(),
            len,
        ));
        next.columns.insert(
            self.id.clone(),
            Column::new(self.id.clone(), self.title.clone()),
        );
        Ok(Mutation::new(
            next,
            PersistIntent::CreateColumn {
                placeholder: self.id.clone(),
                title: self.title.clone(),
            },
        ))
    }

    fn description(&self) -> String {
        format!("Create column: '{}'", self.title)
    }
}

#[derive(Debug, Clone)]
pub struct RenameColumn {
    pub column_id: ColumnId,
    pub title: String,
}

impl Command for RenameColumn {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation> {
        let column = state.require_column(&self.column_id)?;
        let id = column.id.clone();
        let mut next = state.clone();
        next.columns
            .insert(id.clone(), column.with_title(self.title.clone()));
        Ok(Mutation::new(
            next,
            PersistIntent::RenameColumn {
                id,
                title: self.title.clone(),
            },
        ))
    }

    fn description(&self) -> String {
        format!("Rename column {} to '{}'", self.column_id, self.title)
    }
}

/// Delete a column together with every task it owns
#[derive(Debug, Clone)]
pub struct DeleteColumn {
    pub column_id: ColumnId,
}

impl Command for DeleteColumn {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation> {
        let id = state.require_column(&self.column_id)?.id.clone();
        let mut next = state.clone();
        next.columns.remove(&id);
        next.tasks.retain(|_, task| task.column_id != id);
        next.board = next
            .board
            .with_column_order(order::without(&state.board.column_order, &id));
        Ok(Mutation::new(next, PersistIntent::DeleteColumn { id }))
    }

    fn description(&self) -> String {
        format!("Delete column {}", self.column_id)
    }
}

/// Replace the column order with a permutation of itself
#[derive(Debug, Clone)]
pub struct ReorderColumns {
    pub order: Vec<ColumnId>,
}

impl Command for ReorderColumns {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation> {
        let proposed: Vec<ColumnId> = self.order.iter().map(|id| state.resolve(id)).collect();
        order::validate_permutation(&state.board.column_order, &proposed)?;
        let mut next = state.clone();
        next.board = next.board.with_column_order(proposed.clone());
        Ok(Mutation::new(
            next,
            PersistIntent::ReorderColumns { order: proposed },
        ))
    }

    fn description(&self) -> String {
        format!("Reorder {} columns", self.order.len())
    }
}
