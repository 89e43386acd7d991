use serde::{Deserialize, Serialize};

use crate::id::{ColumnId, OwnerId};

/// Root aggregate: the ordered columns of one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub owner_id: OwnerId,
    #[serde(default)]
    pub column_order: Vec<ColumnId>,
}

impl Board {
    pub fn new(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            column_order: Vec::new(),
        }
    }

    pub fn with_column_order(&self, column_order: Vec<ColumnId>) -> Self {
        Self {
            owner_id: self.owner_id.clone(),
            column_order,
        }
    }

    pub fn position_of(&self, column_id: &ColumnId) -> Option<usize> {
        self.column_order.iter().position(|id| id == column_id)
    }
}
