//! Note list view model.
//!
//! # Responsibility
//! - Project the collection into display rows (title, preview, date label).
//! - Gate deletion behind an explicit, cancelable confirmation step.
//!
//! # Invariants
//! - Rows follow collection order.
//! - Cancelling a `DeleteRequest` has no side effects.

use crate::display::{format_list_date, preview_text};
use crate::model::note::{Note, NoteId};
use crate::storage::KeyValueStore;
use crate::store::NotesStore;
use chrono::{DateTime, TimeZone};
use log::info;
use std::fmt::Display;

/// Prompt shown before a note is deleted.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this note?";
pub const EMPTY_STATE_TITLE: &str = "No notes yet";
pub const EMPTY_STATE_HINT: &str = "Create your first note to get started";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: NoteId,
    pub title: String,
    pub preview: String,
    pub date_label: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListView {
    items: Vec<NoteListItem>,
}

impl NoteListView {
    /// Builds rows for `notes`, labelling dates relative to `now`.
    pub fn build<Tz>(notes: &[Note], selected: Option<&NoteId>, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let timezone = now.timezone();
        let items = notes
            .iter()
            .map(|note| NoteListItem {
                id: note.id.clone(),
                title: note.display_title().to_string(),
                preview: preview_text(&note.content),
                date_label: format_list_date(&note.updated_at.with_timezone(&timezone), now),
                is_selected: selected == Some(&note.id),
            })
            .collect();
        Self { items }
    }

    /// Builds rows from the store's current collection and selection.
    pub fn from_store<S, Tz>(store: &NotesStore<S>, now: &DateTime<Tz>) -> Self
    where
        S: KeyValueStore,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self::build(store.notes(), store.selected_id(), now)
    }

    pub fn items(&self) -> &[NoteListItem] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether the empty-state indicator should be shown.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Header text, e.g. `3 notes`.
    pub fn count_label(&self) -> String {
        match self.items.len() {
            1 => "1 note".to_string(),
            count => format!("{count} notes"),
        }
    }

    /// Starts the delete flow for a listed note.
    pub fn request_delete(&self, id: &NoteId) -> Option<DeleteRequest> {
        self.items
            .iter()
            .find(|item| &item.id == id)
            .map(|item| DeleteRequest {
                note_id: item.id.clone(),
                title: item.title.clone(),
            })
    }
}

/// Pending deletion awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a delete request does nothing until confirmed"]
pub struct DeleteRequest {
    note_id: NoteId,
    title: String,
}

impl DeleteRequest {
    pub fn message(&self) -> &'static str {
        DELETE_CONFIRMATION
    }

    pub fn note_id(&self) -> &NoteId {
        &self.note_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Issues the delete; returns whether a note was removed.
    pub fn confirm<S: KeyValueStore>(self, store: &mut NotesStore<S>) -> bool {
        store.delete(&self.note_id)
    }

    /// Abandons the delete.
    pub fn cancel(self) {
        info!(
            "event=note_delete module=view status=cancelled note_id={}",
            self.note_id
        );
    }
}
