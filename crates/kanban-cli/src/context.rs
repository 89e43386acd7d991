use anyhow::bail;
use kanban_core::{AppConfig, KanbanResult, NoticeLevel, Notices};
use kanban_domain::{Column, Id, OwnerId, Task};
use kanban_persistence::JsonFileStore;
use kanban_sync::BoardSession;
use std::sync::Arc;

/// One CLI invocation: a session over the data file, committed once
pub struct CliContext {
    pub session: BoardSession,
}

impl CliContext {
    pub async fn load(file_path: &str, owner: Option<&str>) -> KanbanResult<Self> {
        let config = AppConfig::load();
        let owner_id = OwnerId::from(config.effective_owner(owner));
        let store = Arc::new(JsonFileStore::new(file_path));
        tracing::debug!("Loading board for {} from {}", owner_id, file_path);
        let session = BoardSession::open(store, owner_id, &config).await?;
        Ok(Self { session })
    }

    /// Wait for the store and fail if it rejected anything
    pub async fn commit(&mut self) -> anyhow::Result<()> {
        self.session.flush().await?;
        let errors: Vec<String> = self
            .session
            .take_notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .map(|n| n.message)
            .collect();
        if !errors.is_empty() {
            bail!(errors.join("; "));
        }
        Ok(())
    }

    /// Current (durable once committed) form of a column
    pub fn column(&self, id: &Id) -> KanbanResult<Column> {
        self.session.state().require_column(id).cloned()
    }

    pub fn task(&self, id: &Id) -> KanbanResult<Task> {
        self.session.state().require_task(id).cloned()
    }
}
