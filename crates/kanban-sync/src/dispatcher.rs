//! Sends persistence intents to the store, one at a time, in issue order.
//!
//! Running every call on a single task is what keeps dependent calls in
//! sequence: a create-task aimed at a placeholder column is only sent after
//! the create-column ahead of it has returned the durable id, and it is
//! failed without being sent if that create failed.

use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{Id, OwnerId, PersistIntent};
use kanban_persistence::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::outcome::{MutationId, SyncOutcome};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The persistence calls of one mutation
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub mutation_id: MutationId,
    pub intents: Vec<PersistIntent>,
}

pub struct Dispatcher {
    store: Arc<dyn BoardStore>,
    owner_id: OwnerId,
    timeout: Duration,
    aliases: HashMap<Id, Id>,
    failed: HashSet<Id>,
}

/// Session-side ends of the dispatcher's channels
pub struct DispatcherHandle {
    intents: mpsc::UnboundedSender<Dispatch>,
    outcomes: mpsc::UnboundedReceiver<SyncOutcome>,
    task: JoinHandle<()>,
}

impl DispatcherHandle {
    /// Queue a dispatch. Fails only when the dispatcher task has stopped.
    pub fn send(&self, dispatch: Dispatch) -> KanbanResult<()> {
        self.intents
            .send(dispatch)
            .map_err(|_| KanbanError::RemoteFailure("dispatcher stopped".to_string()))
    }

    pub fn try_recv(&mut self) -> Option<SyncOutcome> {
        self.outcomes.try_recv().ok()
    }

    pub async fn recv(&mut self) -> Option<SyncOutcome> {
        self.outcomes.recv().await
    }

    /// Stop accepting intents and wait for the queued ones to be sent
    pub async fn shutdown(self) {
        drop(self.intents);
        if let Err(e) = self.task.await {
            tracing::error!("Dispatcher task ended abnormally: {}", e);
        }
    }
}

impl Dispatcher {
    pub fn new(store: Arc<dyn BoardStore>, owner_id: OwnerId) -> Self {
        Self {
            store,
            owner_id,
            timeout: DEFAULT_TIMEOUT,
            aliases: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Move the dispatcher onto its own tokio task
    pub fn spawn(self) -> DispatcherHandle {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(intent_rx, outcome_tx));
        DispatcherHandle {
            intents: intent_tx,
            outcomes: outcome_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<Dispatch>,
        outcomes: mpsc::UnboundedSender<SyncOutcome>,
    ) {
        while let Some(dispatch) = intents.recv().await {
            let outcome = self.dispatch(dispatch).await;
            if outcomes.send(outcome).is_err() {
                tracing::debug!("Session gone, discarding outcome");
            }
        }
        tracing::debug!("Dispatcher stopped");
    }

    pub async fn dispatch(&mut self, dispatch: Dispatch) -> SyncOutcome {
        let mut assigned = Vec::new();
        for intent in dispatch.intents {
            let label = intent.label();
            match self.send(intent).await {
                Ok(Some(pair)) => assigned.push(pair),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("{} for {} failed: {}", label, dispatch.mutation_id, e);
                    return SyncOutcome::Failed {
                        mutation_id: dispatch.mutation_id,
                        error: e.to_string(),
                    };
                }
            }
        }
        SyncOutcome::Confirmed {
            mutation_id: dispatch.mutation_id,
            assigned,
        }
    }

    async fn send(&mut self, mut intent: PersistIntent) -> KanbanResult<Option<(Id, Id)>> {
        let placeholder = intent.placeholder().cloned();
        let result = match self.resolve_references(&mut intent) {
            Ok(()) => self.call_with_timeout(intent).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(Some((placeholder, durable))) => {
                self.aliases.insert(placeholder.clone(), durable.clone());
            }
            Err(_) => {
                if let Some(placeholder) = placeholder {
                    self.failed.insert(placeholder);
                }
            }
            Ok(None) => {}
        }
        result
    }

    fn resolve_references(&self, intent: &mut PersistIntent) -> KanbanResult<()> {
        for id in intent.references_mut() {
            if self.failed.contains(id) {
                return Err(KanbanError::RemoteFailure(format!(
                    "depends on {} which was never created",
                    id
                )));
            }
            if let Some(durable) = self.aliases.get(id) {
                *id = durable.clone();
            }
        }
        Ok(())
    }

    async fn call_with_timeout(&self, intent: PersistIntent) -> KanbanResult<Option<(Id, Id)>> {
        let label = intent.label();
        match tokio::time::timeout(self.timeout, self.call(intent)).await {
            Ok(Err(KanbanError::RemoteFailure(message))) => {
                Err(KanbanError::RemoteFailure(message))
            }
            Ok(Err(other)) => Err(KanbanError::RemoteFailure(other.to_string())),
            Ok(Ok(assigned)) => Ok(assigned),
            Err(_) => Err(KanbanError::RemoteFailure(format!(
                "{} timed out after {:?}",
                label, self.timeout
            ))),
        }
    }

    async fn call(&self, intent: PersistIntent) -> KanbanResult<Option<(Id, Id)>> {
        let store = &self.store;
        match intent {
            PersistIntent::CreateColumn { placeholder, title } => {
                let created = store
                    .create_column(CreateColumnRequest {
                        owner_id: self.owner_id.clone(),
                        title,
                    })
                    .await?;
                Ok(Some((placeholder, created.id)))
            }
            PersistIntent::RenameColumn { id, title } => {
                store
                    .update_column_title(UpdateColumnTitleRequest { id, title })
                    .await?;
                Ok(None)
            }
            PersistIntent::DeleteColumn { id } => {
                store
                    .delete_column(DeleteColumnRequest {
                        id,
                        owner_id: self.owner_id.clone(),
                    })
                    .await?;
                Ok(None)
            }
            PersistIntent::ReorderColumns { order } => {
                store
                    .reorder_columns(ReorderColumnsRequest {
                        owner_id: self.owner_id.clone(),
                        column_ids: order,
                    })
                    .await?;
                Ok(None)
            }
            PersistIntent::CreateTask {
                placeholder,
                column_id,
                content,
            } => {
                let created = store
                    .create_task(CreateTaskRequest { column_id, content })
                    .await?;
                Ok(Some((placeholder, created.id)))
            }
            PersistIntent::UpdateTaskContent { id, content } => {
                store
                    .update_task_content(UpdateTaskContentRequest { id, content })
                    .await?;
                Ok(None)
            }
            PersistIntent::DeleteTask { id, column_id } => {
                store
                    .delete_task(DeleteTaskRequest { id, column_id })
                    .await?;
                Ok(None)
            }
            PersistIntent::MoveTask { id, from, to } => {
                store
                    .move_task(MoveTaskRequest {
                        id,
                        from_column_id: from,
                        to_column_id: to,
                    })
                    .await?;
                Ok(None)
            }
            PersistIntent::ReorderTasks { column_id, order } => {
                store
                    .reorder_tasks(ReorderTasksRequest {
                        column_id,
                        task_ids: order,
                    })
                    .await?;
                Ok(None)
            }
        }
    }
}
