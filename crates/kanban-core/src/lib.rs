pub mod config;
pub mod error;
pub mod notice;

pub use config::AppConfig;
pub use error::{KanbanError, KanbanResult};
pub use notice::{Notice, NoticeLevel, Notices};
