//! Change notification for the notes store.
//!
//! # Invariants
//! - Fan-out is synchronous and in subscription order.
//! - Listeners may receive an unchanged collection or selection repeatedly.

use crate::model::note::Note;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// State published after a mutation and its persistence attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent<'a> {
    /// Full ordered collection after the mutation.
    NotesChanged(&'a [Note]),
    /// Current selection after the mutation.
    SelectionChanged(Option<&'a Note>),
}

pub type Listener = Box<dyn FnMut(&StoreEvent<'_>) + Send>;

/// Ordered observer list.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn publish(&mut self, event: &StoreEvent<'_>) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}
