use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a column, task or board owner.
///
/// Durable ids are issued by the store. Until then the client works with a
/// placeholder from an [`IdAllocator`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

pub type ColumnId = Id;
pub type TaskId = Id;
pub type OwnerId = Id;

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

pub trait IdAllocator: Send {
    fn next_placeholder(&mut self) -> Id;
}

/// Issues `<prefix>-1`, `<prefix>-2`, ... for the lifetime of the allocator
#[derive(Debug, Clone)]
pub struct PlaceholderAllocator {
    prefix: String,
    next: u64,
}

impl PlaceholderAllocator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for PlaceholderAllocator {
    fn default() -> Self {
        Self::new("tmp")
    }
}

impl IdAllocator for PlaceholderAllocator {
    fn next_placeholder(&mut self) -> Id {
        let id = Id(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_sequential() {
        let mut alloc = PlaceholderAllocator::default();
        assert_eq!(alloc.next_placeholder(), Id::from("tmp-1"));
        assert_eq!(alloc.next_placeholder(), Id::from("tmp-2"));
    }

    #[test]
    fn test_custom_prefix() {
        let mut alloc = PlaceholderAllocator::new("draft");
        assert_eq!(alloc.next_placeholder().as_str(), "draft-1");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Id::from("col-9")).unwrap();
        assert_eq!(json, "\"col-9\"");
    }
}
