//! Observable notes store.
//!
//! # Responsibility
//! - Own the ordered note collection and the current selection.
//! - Persist the full collection to key-value storage on every mutation.
//! - Publish the updated state to subscribers.
//!
//! # Invariants
//! - Collection order is newest-first; only `create` (prepend) and `delete`
//!   (remove, preserving relative order) change it.
//! - Ids are unique within the collection.
//! - Selection is `None` or the id of a member of the collection.
//! - Storage failures are logged and absorbed; they never reach callers.

use crate::model::note::{Note, NoteId, NotePatch};
use crate::storage::{KeyValueStore, NOTES_KEY};
use crate::store::events::{Listener, Listeners, StoreEvent, SubscriptionId};
use log::{debug, error, info, warn};
use std::collections::HashSet;

/// Notes store over an injected key-value backend.
pub struct NotesStore<S: KeyValueStore> {
    storage: S,
    notes: Vec<Note>,
    selected: Option<NoteId>,
    listeners: Listeners,
}

impl<S: KeyValueStore> NotesStore<S> {
    /// Loads the persisted collection, falling back to empty on any problem.
    ///
    /// The first note is selected when the loaded collection is non-empty.
    pub fn load(storage: S) -> Self {
        let notes = read_notes(&storage);
        let selected = notes.first().map(|note| note.id.clone());
        info!(
            "event=store_load module=store status=ok count={}",
            notes.len()
        );
        Self {
            storage,
            notes,
            selected,
            listeners: Listeners::default(),
        }
    }

    /// Ordered collection, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn selected_id(&self) -> Option<&NoteId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Note> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Registers a listener for subsequent mutations.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StoreEvent<'_>) + Send + 'static,
    ) -> SubscriptionId {
        let listener: Listener = Box::new(listener);
        self.listeners.add(listener)
    }

    /// Removes a listener; returns `false` when the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    /// Creates an empty "Untitled" note, prepends and selects it.
    pub fn create(&mut self) -> NoteId {
        let note = Note::new();
        let id = note.id.clone();
        self.notes.insert(0, note);
        self.selected = Some(id.clone());
        self.persist();
        info!(
            "event=note_create module=store status=ok note_id={id} count={}",
            self.notes.len()
        );
        self.publish_notes();
        self.publish_selection();
        id
    }

    /// Applies `patch` to the note with `id`; silently ignores unknown ids.
    ///
    /// Returns whether a note was updated.
    pub fn update(&mut self, id: &NoteId, patch: NotePatch) -> bool {
        let Some(note) = self.notes.iter_mut().find(|note| &note.id == id) else {
            debug!("event=note_update module=store status=skipped reason=not_found note_id={id}");
            return false;
        };
        let fields = describe_patch(&patch);
        note.apply(patch);
        self.persist();
        debug!("event=note_update module=store status=ok note_id={id} fields={fields}");
        self.publish_notes();
        if self.selected.as_ref() == Some(id) {
            self.publish_selection();
        }
        true
    }

    /// Removes the note with `id`; selection moves to the new first note
    /// when the removed note was selected.
    ///
    /// Returns whether a note was removed.
    pub fn delete(&mut self, id: &NoteId) -> bool {
        let Some(index) = self.notes.iter().position(|note| &note.id == id) else {
            debug!("event=note_delete module=store status=skipped reason=not_found note_id={id}");
            return false;
        };
        self.notes.remove(index);
        let selection_moved = self.selected.as_ref() == Some(id);
        if selection_moved {
            self.selected = self.notes.first().map(|note| note.id.clone());
        }
        self.persist();
        info!(
            "event=note_delete module=store status=ok note_id={id} count={}",
            self.notes.len()
        );
        self.publish_notes();
        if selection_moved {
            self.publish_selection();
        }
        true
    }

    /// Selects the note with `id`, or clears the selection when absent.
    ///
    /// Returns whether a note is now selected.
    pub fn select(&mut self, id: &NoteId) -> bool {
        self.selected = self.get(id).map(|note| note.id.clone());
        self.publish_selection();
        self.selected.is_some()
    }

    fn persist(&self) {
        let payload = match encode_notes(&self.notes) {
            Ok(payload) => payload,
            Err(err) => {
                error!("event=notes_persist module=store status=error error_code=encode_failed error={err}");
                return;
            }
        };
        if let Err(err) = self.storage.set(NOTES_KEY, &payload) {
            error!("event=notes_persist module=store status=error error_code=write_failed error={err}");
        }
    }

    fn publish_notes(&mut self) {
        self.listeners
            .publish(&StoreEvent::NotesChanged(self.notes.as_slice()));
    }

    fn publish_selection(&mut self) {
        let selected = self
            .selected
            .as_ref()
            .and_then(|id| self.notes.iter().find(|note| &note.id == id));
        self.listeners
            .publish(&StoreEvent::SelectionChanged(selected));
    }
}

/// Serializes the collection into the storage wire format.
pub fn encode_notes(notes: &[Note]) -> serde_json::Result<String> {
    serde_json::to_string(notes)
}

/// Parses the storage wire format.
pub fn decode_notes(payload: &str) -> serde_json::Result<Vec<Note>> {
    serde_json::from_str(payload)
}

fn read_notes(storage: &impl KeyValueStore) -> Vec<Note> {
    let payload = match storage.get(NOTES_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(err) => {
            error!("event=store_load module=store status=error error_code=read_failed error={err}");
            return Vec::new();
        }
    };

    match decode_notes(&payload) {
        Ok(notes) => dedupe_by_id(notes),
        Err(err) => {
            warn!(
                "event=store_load module=store status=recovered error_code=malformed_payload bytes={} error={err}",
                payload.len()
            );
            Vec::new()
        }
    }
}

fn dedupe_by_id(notes: Vec<Note>) -> Vec<Note> {
    let total = notes.len();
    let mut seen = HashSet::with_capacity(total);
    let unique = notes
        .into_iter()
        .filter(|note| seen.insert(note.id.clone()))
        .collect::<Vec<_>>();
    if unique.len() != total {
        warn!(
            "event=store_load module=store status=recovered error_code=duplicate_ids dropped={}",
            total - unique.len()
        );
    }
    unique
}

fn describe_patch(patch: &NotePatch) -> &'static str {
    match (patch.title.is_some(), patch.content.is_some()) {
        (true, true) => "title,content",
        (true, false) => "title",
        (false, true) => "content",
        (false, false) => "none",
    }
}
