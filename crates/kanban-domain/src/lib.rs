pub mod board;
pub mod column;
pub mod commands;
pub mod engine;
pub mod gesture;
pub mod id;
pub mod intent;
pub mod operations;
pub mod order;
pub mod state;
pub mod task;
pub mod view;

pub use board::Board;
pub use column::Column;
pub use commands::{Command, Mutation};
pub use engine::MutationEngine;
pub use gesture::{DragSubject, DragTracker, GestureIntent};
pub use id::{ColumnId, Id, IdAllocator, OwnerId, PlaceholderAllocator, TaskId};
pub use intent::PersistIntent;
pub use operations::BoardOperations;
pub use state::BoardState;
pub use task::Task;
pub use view::{BoardView, ColumnView};
