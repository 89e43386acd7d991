use serde::{Deserialize, Serialize};

use crate::id::{ColumnId, OwnerId};
use crate::task::Task;

/// Ordered, nested rendering of a board.
///
/// This is what the presentation layer renders and the shape a board is
/// hydrated from after a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub owner_id: OwnerId,
    #[serde(default)]
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl BoardView {
    pub fn column(&self, id: &ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

impl ColumnView {
    pub fn contents(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.content.as_str()).collect()
    }
}
