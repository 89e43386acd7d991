use crate::documents::DocumentSet;
use crate::messages::*;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{BoardStore, PersistenceMetadata};
use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::OwnerId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const FORMAT_VERSION: u32 = 1;

/// On-disk wrapper around the document collections
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: DocumentSet,
}

impl JsonEnvelope {
    pub fn empty() -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(FORMAT_VERSION, Uuid::new_v4()),
            data: DocumentSet::new(),
        }
    }

    pub fn to_json_string(&self) -> KanbanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Document store persisted to a single JSON file.
///
/// Every call is a read-modify-write of the whole file under an async lock,
/// so calls from one process are applied one at a time.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_instance_id(path, Uuid::new_v4())
    }

    /// Create a store with a specific instance ID (useful for testing)
    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
            lock: Mutex::new(()),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Load the documents and the metadata of the last save.
    /// A missing file reads as an empty document set.
    pub async fn load(&self) -> KanbanResult<(DocumentSet, Option<PersistenceMetadata>)> {
        let Some(bytes) = AtomicWriter::read_optional(&self.path).await? else {
            return Ok((DocumentSet::new(), None));
        };
        let envelope: JsonEnvelope = serde_json::from_slice(&bytes)?;
        if envelope.version != FORMAT_VERSION {
            return Err(KanbanError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }
        Ok((envelope.data, Some(envelope.metadata)))
    }

    pub async fn save(&self, documents: DocumentSet) -> KanbanResult<PersistenceMetadata> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(FORMAT_VERSION, self.instance_id),
            data: documents,
        };
        let json_bytes = serde_json::to_vec_pretty(&envelope)?;
        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!(
            "Saved {} bytes to {}",
            json_bytes.len(),
            self.path.display()
        );
        Ok(envelope.metadata)
    }

    async fn update<T, F>(&self, apply: F) -> KanbanResult<T>
    where
        F: FnOnce(&mut DocumentSet) -> KanbanResult<T> + Send,
        T: Send,
    {
        let _guard = self.lock.lock().await;
        let (mut documents, _) = self.load().await?;
        let result = apply(&mut documents)?;
        self.save(documents).await?;
        Ok(result)
    }
}

#[async_trait]
impl BoardStore for JsonFileStore {
    async fn ensure_owner(&self, owner_id: &OwnerId) -> KanbanResult<()> {
        let _guard = self.lock.lock().await;
        let (mut documents, _) = self.load().await?;
        if documents.owners.contains_key(owner_id) {
            return Ok(());
        }
        documents.ensure_owner(owner_id);
        self.save(documents).await?;
        tracing::info!("Created board for owner {}", owner_id);
        Ok(())
    }

    async fn create_column(&self, request: CreateColumnRequest) -> KanbanResult<ColumnResponse> {
        self.update(|docs| docs.create_column(request)).await
    }

    async fn update_column_title(
        &self,
        request: UpdateColumnTitleRequest,
    ) -> KanbanResult<ColumnResponse> {
        self.update(|docs| docs.update_column_title(request)).await
    }

    async fn delete_column(&self, request: DeleteColumnRequest) -> KanbanResult<DeletedResponse> {
        self.update(|docs| docs.delete_column(request)).await
    }

    async fn reorder_columns(&self, request: ReorderColumnsRequest) -> KanbanResult<Ack> {
        let _guard = self.lock.lock().await;
        let (mut documents, _) = self.load().await?;
        documents.reorder_columns(request)
    }

    async fn create_task(&self, request: CreateTaskRequest) -> KanbanResult<TaskResponse> {
        self.update(|docs| docs.create_task(request)).await
    }

    async fn update_task_content(
        &self,
        request: UpdateTaskContentRequest,
    ) -> KanbanResult<TaskResponse> {
        self.update(|docs| docs.update_task_content(request)).await
    }

    async fn delete_task(&self, request: DeleteTaskRequest) -> KanbanResult<DeletedResponse> {
        self.update(|docs| docs.delete_task(request)).await
    }

    async fn move_task(&self, request: MoveTaskRequest) -> KanbanResult<MovedResponse> {
        self.update(|docs| docs.move_task(request)).await
    }

    async fn reorder_tasks(&self, request: ReorderTasksRequest) -> KanbanResult<Ack> {
        let _guard = self.lock.lock().await;
        let (mut documents, _) = self.load().await?;
        documents.reorder_tasks(request)
    }

    async fn fetch_board(&self, owner_id: &OwnerId) -> KanbanResult<BoardRecord> {
        let _guard = self.lock.lock().await;
        let (documents, _) = self.load().await?;
        documents.fetch_board(owner_id)
    }
}
