use serde::{Deserialize, Serialize};

use crate::id::{ColumnId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub column_id: ColumnId,
    pub content: String,
}

impl Task {
    pub fn new(id: TaskId, column_id: ColumnId, content: String) -> Self {
        Self {
            id,
            column_id,
            content,
        }
    }

    pub fn with_content(&self, content: String) -> Self {
        Self {
            content,
            ..self.clone()
        }
    }

    pub fn moved_to(&self, column_id: ColumnId) -> Self {
        Self {
            column_id,
            ..self.clone()
        }
    }
}
