use kanban_core::KanbanResult;

use crate::intent::PersistIntent;
use crate::state::BoardState;

pub mod column_commands;
pub mod task_commands;

pub use column_commands::*;
pub use task_commands::*;

/// Trait for board commands.
///
/// A command reads the current state and produces the next one; it never
/// modifies its input. Commands carry every id they need (including the
/// placeholder for creates) so applying the same command twice to the same
/// state yields the same result. The reconciler relies on that to replay
/// pending commands after a rollback.
pub trait Command: Send + Sync + std::fmt::Debug {
    fn apply(&self, state: &BoardState) -> KanbanResult<Mutation>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Result of applying a command: the next state plus the calls that persist it
#[derive(Debug, Clone)]
pub struct Mutation {
    pub state: BoardState,
    pub intents: Vec<PersistIntent>,
}

impl Mutation {
    pub fn new(state: BoardState, intent: PersistIntent) -> Self {
        Self {
            state,
            intents: vec![intent],
        }
    }
}
