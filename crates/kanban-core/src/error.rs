use thiserror::Error;

pub type KanbanResult<T> = Result<T, KanbanError>;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("Remote failure: {0}")]
    RemoteFailure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KanbanError {
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} {}", kind, id))
    }

    /// Expected conditions are reported to the caller and never trigger rollback.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidPermutation(_))
    }
}

impl From<serde_json::Error> for KanbanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for KanbanError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
