use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-visible message produced while synchronizing with the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub timestamp: DateTime<Utc>,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
        }
    }

    pub fn error(message: String) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn info(message: String) -> Self {
        Self::new(NoticeLevel::Info, message)
    }
}

pub trait Notices {
    fn push_notice(&mut self, notice: Notice);
    fn notices(&self) -> &[Notice];
    fn take_notices(&mut self) -> Vec<Notice>;
}
