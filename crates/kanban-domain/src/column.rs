use serde::{Deserialize, Serialize};

use crate::id::{ColumnId, TaskId};
use crate::order;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub task_order: Vec<TaskId>,
}

impl Column {
    pub fn new(id: ColumnId, title: String) -> Self {
        Self {
            id,
            title,
            task_order: Vec::new(),
        }
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_order.contains(task_id)
    }

    pub fn with_title(&self, title: String) -> Self {
        Self {
            title,
            ..self.clone()
        }
    }

    pub fn with_task_order(&self, task_order: Vec<TaskId>) -> Self {
        Self {
            task_order,
            ..self.clone()
        }
    }

    pub fn with_task_appended(&self, task_id: TaskId) -> Self {
        let len = self.task_order.len();
        self.with_task_order(order::inserted(&self.task_order, task_id, len))
    }

    pub fn without_task(&self, task_id: &TaskId) -> Self {
        self.with_task_order(order::without(&self.task_order, task_id))
    }
}
