//! Note editor view model with debounced auto-save.
//!
//! # Responsibility
//! - Mirror the selected note's title/content into editable buffers.
//! - Debounce keystrokes per field and push the latest value to the store.
//!
//! # Invariants
//! - Each pending edit carries the id of the note it was typed into, so a
//!   selection change can never redirect it to another note.
//! - Rebinding flushes pending edits of the previous note first.
//! - Title commits apply the "Untitled" fallback to the trimmed value.

use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::model::note::{normalize_title, NoteId, NotePatch};
use crate::storage::KeyValueStore;
use crate::store::NotesStore;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Title,
    Content,
}

/// Keys the editor reacts to; everything else is plain input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Enter,
    Tab,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldEdit {
    note_id: NoteId,
    value: String,
}

#[derive(Debug, Clone)]
pub struct NoteEditor {
    note_id: Option<NoteId>,
    title: String,
    content: String,
    focus: EditorFocus,
    title_changes: Debouncer<FieldEdit>,
    content_changes: Debouncer<FieldEdit>,
}

impl NoteEditor {
    pub fn new(window: Duration) -> Self {
        Self {
            note_id: None,
            title: String::new(),
            content: String::new(),
            focus: EditorFocus::Title,
            title_changes: Debouncer::new(window),
            content_changes: Debouncer::new(window),
        }
    }

    pub fn note_id(&self) -> Option<&NoteId> {
        self.note_id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn focus(&self) -> EditorFocus {
        self.focus
    }

    /// Follows the store's selection.
    ///
    /// Returns `true` when the editor switched to a different note (or to
    /// none); the current buffers are kept when the selection is unchanged.
    pub fn bind_selection<S: KeyValueStore>(&mut self, store: &mut NotesStore<S>) -> bool {
        if store.selected_id() == self.note_id.as_ref() {
            return false;
        }
        self.flush(store);

        match store.selected() {
            Some(note) => {
                self.note_id = Some(note.id.clone());
                self.title = note.title.clone();
                self.content = note.content.clone();
            }
            None => {
                self.note_id = None;
                self.title.clear();
                self.content.clear();
            }
        }
        self.focus = EditorFocus::Title;
        true
    }

    pub fn input_title(&mut self, text: impl Into<String>, now: Instant) {
        let Some(note_id) = self.note_id.clone() else {
            return;
        };
        self.title = text.into();
        self.title_changes.push(
            FieldEdit {
                note_id,
                value: self.title.clone(),
            },
            now,
        );
    }

    pub fn input_content(&mut self, text: impl Into<String>, now: Instant) {
        let Some(note_id) = self.note_id.clone() else {
            return;
        };
        self.content = text.into();
        self.schedule_content(note_id, now);
    }

    /// Handles a key in the title field.
    ///
    /// `Enter` commits the title immediately and moves focus to the content.
    pub fn key_down_title<S: KeyValueStore>(
        &mut self,
        key: EditorKey,
        store: &mut NotesStore<S>,
    ) -> bool {
        if key != EditorKey::Enter || self.note_id.is_none() {
            return false;
        }
        if let Some(edit) = self.title_changes.flush() {
            commit_title(store, edit);
        }
        self.focus = EditorFocus::Content;
        true
    }

    /// Handles a key in the content field with the selection given as
    /// character offsets.
    ///
    /// `Tab` replaces the selection with a tab character and returns the new
    /// caret offset.
    pub fn key_down_content(
        &mut self,
        key: EditorKey,
        selection_start: usize,
        selection_end: usize,
        now: Instant,
    ) -> Option<usize> {
        if key != EditorKey::Tab {
            return None;
        }
        let note_id = self.note_id.clone()?;

        let len = self.content.chars().count();
        let start = selection_start.min(len);
        let end = selection_end.clamp(start, len);
        let start_byte = byte_offset(&self.content, start);
        let end_byte = byte_offset(&self.content, end);
        self.content.replace_range(start_byte..end_byte, "\t");
        self.schedule_content(note_id, now);
        Some(start + 1)
    }

    /// Applies edits whose quiet period has elapsed; returns how many.
    pub fn tick<S: KeyValueStore>(&mut self, now: Instant, store: &mut NotesStore<S>) -> usize {
        let mut applied = 0;
        if let Some(edit) = self.title_changes.poll(now) {
            commit_title(store, edit);
            applied += 1;
        }
        if let Some(edit) = self.content_changes.poll(now) {
            commit_content(store, edit);
            applied += 1;
        }
        applied
    }

    /// Applies all pending edits immediately; returns how many.
    pub fn flush<S: KeyValueStore>(&mut self, store: &mut NotesStore<S>) -> usize {
        let mut applied = 0;
        if let Some(edit) = self.title_changes.flush() {
            commit_title(store, edit);
            applied += 1;
        }
        if let Some(edit) = self.content_changes.flush() {
            commit_content(store, edit);
            applied += 1;
        }
        applied
    }

    pub fn has_pending(&self) -> bool {
        self.title_changes.is_pending() || self.content_changes.is_pending()
    }

    /// Earliest instant at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.title_changes.deadline(), self.content_changes.deadline()) {
            (Some(title), Some(content)) => Some(title.min(content)),
            (title, content) => title.or(content),
        }
    }

    fn schedule_content(&mut self, note_id: NoteId, now: Instant) {
        self.content_changes.push(
            FieldEdit {
                note_id,
                value: self.content.clone(),
            },
            now,
        );
    }
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

fn commit_title<S: KeyValueStore>(store: &mut NotesStore<S>, edit: FieldEdit) {
    let title = normalize_title(edit.value.trim());
    store.update(&edit.note_id, NotePatch::title(title));
}

fn commit_content<S: KeyValueStore>(store: &mut NotesStore<S>, edit: FieldEdit) {
    store.update(&edit.note_id, NotePatch::content(edit.value));
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(offset, _)| offset)
}
