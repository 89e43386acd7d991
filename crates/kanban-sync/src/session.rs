use kanban_core::{AppConfig, KanbanError, KanbanResult, Notice, Notices};
use kanban_domain::commands::*;
use kanban_domain::{
    BoardOperations, BoardState, BoardView, Column, ColumnId, DragTracker, GestureIntent,
    MutationEngine, OwnerId, Task, TaskId,
};
use kanban_persistence::BoardStore;
use std::sync::Arc;

use crate::dispatcher::{Dispatch, Dispatcher, DispatcherHandle};
use crate::outcome::{MutationId, SyncOutcome};
use crate::reconciler::SyncReconciler;

/// One user's board, edited optimistically and synchronized in the background.
///
/// Every operation is applied to the local state immediately and returns
/// without waiting for the store. Outcomes are folded back in by
/// [`poll`](Self::poll) or [`flush`](Self::flush).
///
/// # Example
/// ```ignore
/// let mut session = BoardSession::open(store, "u1".into(), &config).await?;
/// let column = session.create_column("Todo".into())?;
/// session.create_task(column.id, "write tests".into())?;
/// session.flush().await?;
/// ```
pub struct BoardSession {
    state: BoardState,
    engine: MutationEngine,
    reconciler: SyncReconciler,
    drag: DragTracker,
    dispatcher: Option<DispatcherHandle>,
    notices: Vec<Notice>,
}

impl BoardSession {
    /// Load the owner's board from the store and start the dispatcher
    pub async fn open(
        store: Arc<dyn BoardStore>,
        owner_id: OwnerId,
        config: &AppConfig,
    ) -> KanbanResult<Self> {
        store.ensure_owner(&owner_id).await?;
        let record = store.fetch_board(&owner_id).await?;
        let state = BoardState::from_view(record.into())?;
        tracing::info!(
            "Opened board for {} ({} columns, {} tasks)",
            owner_id,
            state.column_count(),
            state.task_count()
        );

        let dispatcher = Dispatcher::new(store, owner_id)
            .with_timeout(config.request_timeout())
            .spawn();

        Ok(Self {
            state,
            engine: MutationEngine::with_prefix(config.effective_placeholder_prefix()),
            reconciler: SyncReconciler::new(),
            drag: DragTracker::default(),
            dispatcher: Some(dispatcher),
            notices: Vec::new(),
        })
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn owner_id(&self) -> &OwnerId {
        self.state.owner_id()
    }

    pub fn pending_count(&self) -> usize {
        self.reconciler.pending_count()
    }

    pub fn is_pending(&self, id: MutationId) -> bool {
        self.reconciler.is_pending(id)
    }

    /// Apply a command locally and queue its persistence calls.
    ///
    /// If the calls cannot be queued the mutation is reverted at once and the
    /// queueing error is returned.
    pub fn submit(&mut self, command: Arc<dyn Command>) -> KanbanResult<MutationId> {
        let mutation = self.engine.execute(&self.state, command.as_ref())?;
        let before = std::mem::replace(&mut self.state, mutation.state);
        let intents = mutation.intents;
        let mutation_id = self.reconciler.begin(command, before, intents.clone());

        if intents.is_empty() {
            self.absorb(SyncOutcome::Confirmed {
                mutation_id,
                assigned: Vec::new(),
            });
            return Ok(mutation_id);
        }

        let sent = match &self.dispatcher {
            Some(handle) => handle.send(Dispatch {
                mutation_id,
                intents,
            }),
            None => Err(KanbanError::RemoteFailure("session closed".to_string())),
        };
        if let Err(e) = sent {
            tracing::error!("Failed to queue {}: {}", mutation_id, e);
            self.absorb(SyncOutcome::Failed {
                mutation_id,
                error: e.to_string(),
            });
            return Err(e);
        }
        Ok(mutation_id)
    }

    /// Fold in every outcome that has already arrived. Returns how many.
    pub fn poll(&mut self) -> usize {
        let mut outcomes = Vec::new();
        if let Some(handle) = self.dispatcher.as_mut() {
            while let Some(outcome) = handle.try_recv() {
                outcomes.push(outcome);
            }
        }
        let count = outcomes.len();
        for outcome in outcomes {
            self.absorb(outcome);
        }
        count
    }

    /// Wait until no mutation is pending
    pub async fn flush(&mut self) -> KanbanResult<()> {
        while self.reconciler.has_pending() {
            let outcome = match self.dispatcher.as_mut() {
                Some(handle) => handle.recv().await,
                None => None,
            };
            match outcome {
                Some(outcome) => self.absorb(outcome),
                None => {
                    let notices = self
                        .reconciler
                        .abandon_all(&mut self.state, "dispatcher stopped");
                    for notice in notices {
                        self.push_notice(notice);
                    }
                    return Err(KanbanError::RemoteFailure(
                        "dispatcher stopped before all changes were saved".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Flush, then stop the dispatcher
    pub async fn close(mut self) -> KanbanResult<BoardState> {
        let flushed = self.flush().await;
        if let Some(handle) = self.dispatcher.take() {
            handle.shutdown().await;
        }
        flushed.map(|_| self.state)
    }

    fn absorb(&mut self, outcome: SyncOutcome) {
        tracing::debug!("Outcome for {}", outcome.mutation_id());
        let notices = self.reconciler.apply(&mut self.state, outcome);
        for notice in notices {
            self.push_notice(notice);
        }
    }
}

impl Notices for BoardSession {
    fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn notices(&self) -> &[Notice] {
        &self.notices
    }

    fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl BoardOperations for BoardSession {
    fn create_column(&mut self, title: String) -> KanbanResult<Column> {
        let command = self.engine.create_column_command(title);
        let id = command.id.clone();
        self.submit(Arc::new(command))?;
        self.state.require_column(&id).cloned()
    }

    fn rename_column(&mut self, id: ColumnId, title: String) -> KanbanResult<Column> {
        self.submit(Arc::new(RenameColumn {
            column_id: id.clone(),
            title,
        }))?;
        self.state.require_column(&id).cloned()
    }

    fn delete_column(&mut self, id: ColumnId) -> KanbanResult<()> {
        self.submit(Arc::new(DeleteColumn { column_id: id }))?;
        Ok(())
    }

    fn reorder_columns(&mut self, order: Vec<ColumnId>) -> KanbanResult<()> {
        self.submit(Arc::new(ReorderColumns { order }))?;
        Ok(())
    }

    fn create_task(&mut self, column_id: ColumnId, content: String) -> KanbanResult<Task> {
        let command = self.engine.create_task_command(column_id, content);
        let id = command.id.clone();
        self.submit(Arc::new(command))?;
        self.state.require_task(&id).cloned()
    }

    fn update_task_content(&mut self, id: TaskId, content: String) -> KanbanResult<Task> {
        self.submit(Arc::new(UpdateTaskContent {
            task_id: id.clone(),
            content,
        }))?;
        self.state.require_task(&id).cloned()
    }

    fn delete_task(&mut self, id: TaskId) -> KanbanResult<()> {
        self.submit(Arc::new(DeleteTask { task_id: id }))?;
        Ok(())
    }

    fn move_task(
        &mut self,
        id: TaskId,
        target_column_id: ColumnId,
        target_index: usize,
    ) -> KanbanResult<Task> {
        self.submit(Arc::new(MoveTask {
            task_id: id.clone(),
            target_column_id,
            target_index,
        }))?;
        self.state.require_task(&id).cloned()
    }

    fn reorder_tasks(&mut self, column_id: ColumnId, order: Vec<TaskId>) -> KanbanResult<()> {
        self.submit(Arc::new(ReorderTasks { column_id, order }))?;
        Ok(())
    }

    fn handle_gesture(&mut self, intent: GestureIntent) -> KanbanResult<BoardView> {
        let command =
            self.engine
                .command_for_gesture(&self.state, &mut self.drag, intent)?;
        if let Some(command) = command {
            self.submit(command)?;
        }
        Ok(self.state.view())
    }

    fn view(&self) -> BoardView {
        self.state.view()
    }
}
