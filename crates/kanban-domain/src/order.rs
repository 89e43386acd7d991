//! Helpers over ordered id sequences.
//!
//! Every function returns a fresh `Vec`; the input slice is never modified, so
//! a reader holding the previous order keeps a consistent view.

use kanban_core::{KanbanError, KanbanResult};
use std::collections::HashSet;

use crate::id::Id;

pub fn without(order: &[Id], id: &Id) -> Vec<Id> {
    order.iter().filter(|existing| *existing != id).cloned().collect()
}

/// Insert `id` at `index`, clamped to `[0, len]`.
pub fn inserted(order: &[Id], id: Id, index: usize) -> Vec<Id> {
    let index = index.min(order.len());
    let mut next = Vec::with_capacity(order.len() + 1);
    next.extend_from_slice(&order[..index]);
    next.push(id);
    next.extend_from_slice(&order[index..]);
    next
}

/// Remove `id` and reinsert it at `index` (clamped against the order without it).
pub fn repositioned(order: &[Id], id: &Id, index: usize) -> Vec<Id> {
    inserted(&without(order, id), id.clone(), index)
}

/// Check that `proposed` holds exactly the ids of `current`, each once.
pub fn validate_permutation(current: &[Id], proposed: &[Id]) -> KanbanResult<()> {
    let mut seen = HashSet::with_capacity(proposed.len());
    for id in proposed {
        if !seen.insert(id) {
            return Err(KanbanError::InvalidPermutation(format!(
                "duplicate id {}",
                id
            )));
        }
    }

    let expected: HashSet<&Id> = current.iter().collect();
    if let Some(extra) = proposed.iter().find(|id| !expected.contains(id)) {
        return Err(KanbanError::InvalidPermutation(format!(
            "unexpected id {}",
            extra
        )));
    }
    if let Some(missing) = current.iter().find(|id| !seen.contains(id)) {
        return Err(KanbanError::InvalidPermutation(format!(
            "missing id {}",
            missing
        )));
    }
    Ok(())
}
