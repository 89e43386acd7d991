//! Aligns the optimistic local state with what the store accepted.
//!
//! Every locally applied mutation is kept, together with the state it was
//! applied to, until its outcome arrives:
//!
//! - a confirmation drops the entry and rewrites placeholders to durable ids;
//! - a failure restores the state the failed mutation started from, then
//!   replays the mutations issued after it that are still pending. A replay
//!   is only kept when it yields the same store calls that were already
//!   sent; otherwise the local result would never reach the store.
//!
//! Outcomes for mutations that are no longer pending are ignored.

use kanban_core::Notice;
use kanban_domain::{BoardState, Command, Id, PersistIntent};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use crate::outcome::{MutationId, SyncOutcome};

#[derive(Debug)]
struct PendingMutation {
    id: MutationId,
    command: Arc<dyn Command>,
    before: BoardState,
    /// Store calls already handed to the dispatcher
    intents: Vec<PersistIntent>,
}

#[derive(Debug, Default)]
pub struct SyncReconciler {
    pending: VecDeque<PendingMutation>,
    aliases: BTreeMap<Id, Id>,
    next_id: u64,
}

impl SyncReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mutation that has just been applied on top of `before` and
    /// whose `intents` are being sent
    pub fn begin(
        &mut self,
        command: Arc<dyn Command>,
        before: BoardState,
        intents: Vec<PersistIntent>,
    ) -> MutationId {
        self.next_id += 1;
        let id = MutationId(self.next_id);
        self.pending.push_back(PendingMutation {
            id,
            command,
            before,
            intents,
        });
        id
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: MutationId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Placeholder -> durable ids learned so far
    pub fn aliases(&self) -> &BTreeMap<Id, Id> {
        &self.aliases
    }

    pub fn apply(&mut self, state: &mut BoardState, outcome: SyncOutcome) -> Vec<Notice> {
        match outcome {
            SyncOutcome::Confirmed {
                mutation_id,
                assigned,
            } => {
                self.confirm(state, mutation_id, assigned);
                Vec::new()
            }
            SyncOutcome::Failed { mutation_id, error } => {
                self.roll_back(state, mutation_id, &error)
            }
        }
    }

    fn confirm(&mut self, state: &mut BoardState, id: MutationId, assigned: Vec<(Id, Id)>) {
        let Some(index) = self.pending.iter().position(|p| p.id == id) else {
            tracing::debug!("Ignoring confirmation for settled mutation {}", id);
            return;
        };
        self.pending.remove(index);

        for (placeholder, durable) in assigned {
            if state.rewrite_id(&placeholder, &durable) {
                tracing::info!("Reconciled {} -> {}", placeholder, durable);
            } else {
                tracing::debug!(
                    "{} was removed before its durable id {} arrived",
                    placeholder,
                    durable
                );
            }
            self.aliases.insert(placeholder, durable);
        }
    }

    fn roll_back(&mut self, state: &mut BoardState, id: MutationId, error: &str) -> Vec<Notice> {
        let Some(index) = self.pending.iter().position(|p| p.id == id) else {
            tracing::debug!("Ignoring failure for settled mutation {}", id);
            return Vec::new();
        };
        let mut notices = Vec::new();
        let later = self.pending.split_off(index + 1);
        let Some(failed) = self.pending.pop_back() else {
            return notices;
        };

        tracing::warn!(
            "{} failed remotely, reverting: {}",
            failed.command.description(),
            error
        );
        notices.push(Notice::error(format!(
            "{} failed and was reverted: {}",
            failed.command.description(),
            error
        )));

        let mut restored = failed.before;
        restored.apply_aliases(&self.aliases);

        let mut replayed = 0;
        for mut entry in later {
            let mutation = match entry.command.apply(&restored) {
                Ok(mutation) => mutation,
                Err(e) => {
                    tracing::warn!(
                        "Dropping {} after rollback: {}",
                        entry.command.description(),
                        e
                    );
                    notices.push(Notice::error(format!(
                        "{} no longer applies and was discarded: {}",
                        entry.command.description(),
                        e
                    )));
                    continue;
                }
            };
            if self.resolved(&mutation.intents) != self.resolved(&entry.intents) {
                tracing::warn!(
                    "Dropping {} after rollback: store calls differ from the ones sent",
                    entry.command.description()
                );
                notices.push(Notice::error(format!(
                    "{} was discarded: it depended on the reverted change",
                    entry.command.description()
                )));
                continue;
            }
            entry.before = restored;
            restored = mutation.state;
            restored.apply_aliases(&self.aliases);
            self.pending.push_back(entry);
            replayed += 1;
        }

        if replayed > 0 {
            notices.push(Notice::info(format!(
                "{} later change(s) re-applied after the revert",
                replayed
            )));
        }

        *state = restored;
        notices
    }

    /// Intents with every known placeholder replaced by its durable id
    fn resolved(&self, intents: &[PersistIntent]) -> Vec<PersistIntent> {
        intents
            .iter()
            .cloned()
            .map(|mut intent| {
                for id in intent.references_mut() {
                    if let Some(durable) = self.aliases.get(id) {
                        *id = durable.clone();
                    }
                }
                intent
            })
            .collect()
    }

    /// Revert every pending mutation, e.g. when the dispatcher has gone away
    pub fn abandon_all(&mut self, state: &mut BoardState, reason: &str) -> Vec<Notice> {
        let Some(first) = self.pending.front() else {
            return Vec::new();
        };
        let mut restored = first.before.clone();
        restored.apply_aliases(&self.aliases);
        *state = restored;

        self.pending
            .drain(..)
            .map(|entry| {
                Notice::error(format!(
                    "{} was reverted: {}",
                    entry.command.description(),
                    reason
                ))
            })
            .collect()
    }
}
