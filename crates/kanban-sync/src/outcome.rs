use kanban_domain::Id;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence number of a locally applied mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MutationId(pub u64);

impl fmt::Display for MutationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the store made of one mutation's persistence calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncOutcome {
    Confirmed {
        mutation_id: MutationId,
        /// (placeholder, durable id) pairs issued by creates
        assigned: Vec<(Id, Id)>,
    },
    Failed {
        mutation_id: MutationId,
        error: String,
    },
}

impl SyncOutcome {
    pub fn mutation_id(&self) -> MutationId {
        match self {
            Self::Confirmed { mutation_id, .. } | Self::Failed { mutation_id, .. } => *mutation_id,
        }
    }
}
