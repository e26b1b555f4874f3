//! Reflection pane view model.
//!
//! # Responsibility
//! - Track the reflection display state for the note being viewed.
//! - Hand out tickets for in-flight requests and apply results only when
//!   they still belong to what is on screen.
//!
//! # Invariants
//! - A result is applied only for the latest ticket, and only while its note
//!   is still the viewed note; anything else is discarded.
//! - Empty notes are rejected before a ticket is issued.
//! - Reflection results never touch stored note fields.

use crate::model::note::{Note, NoteId};
use crate::reflection::{ReflectionError, ReflectionRequest};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneState {
    Idle,
    Loading,
    Showing(String),
    Failed(String),
}

/// Identifies one reflection request issued by the pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionTicket {
    note_id: NoteId,
    sequence: u64,
}

impl ReflectionTicket {
    pub fn note_id(&self) -> &NoteId {
        &self.note_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The viewed note changed, the pane was cleared, or a newer request
    /// superseded this one.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct ReflectionPane {
    viewed: Option<NoteId>,
    state: PaneState,
    in_flight: Option<ReflectionTicket>,
    next_sequence: u64,
}

impl ReflectionPane {
    pub fn new() -> Self {
        Self {
            viewed: None,
            state: PaneState::Idle,
            in_flight: None,
            next_sequence: 0,
        }
    }

    pub fn state(&self) -> &PaneState {
        &self.state
    }

    pub fn viewed_note(&self) -> Option<&NoteId> {
        self.viewed.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == PaneState::Loading
    }

    pub fn reflection(&self) -> Option<&str> {
        match &self.state {
            PaneState::Showing(text) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            PaneState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the "get reflection" affordance should be enabled.
    pub fn can_request(note: Option<&Note>) -> bool {
        note.is_some_and(|note| ReflectionRequest::new(&note.title, &note.content).is_ok())
    }

    /// Points the pane at another note, resetting display on change.
    pub fn view_note(&mut self, note_id: Option<&NoteId>) {
        if self.viewed.as_ref() == note_id {
            return;
        }
        self.viewed = note_id.cloned();
        self.state = PaneState::Idle;
        self.in_flight = None;
    }

    /// Starts a reflection for `note`.
    ///
    /// Returns `None` (and shows guidance) when the note is empty.
    pub fn begin(&mut self, note: &Note) -> Option<(ReflectionTicket, ReflectionRequest)> {
        self.view_note(Some(&note.id));
        match ReflectionRequest::new(&note.title, &note.content) {
            Ok(request) => {
                let ticket = ReflectionTicket {
                    note_id: note.id.clone(),
                    sequence: self.next_sequence,
                };
                self.next_sequence += 1;
                self.in_flight = Some(ticket.clone());
                self.state = PaneState::Loading;
                Some((ticket, request))
            }
            Err(err) => {
                self.in_flight = None;
                self.state = PaneState::Failed(err.to_string());
                None
            }
        }
    }

    /// Applies the outcome of the request identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: &ReflectionTicket,
        result: Result<String, ReflectionError>,
    ) -> Completion {
        let current = self.in_flight.as_ref() == Some(ticket)
            && self.viewed.as_ref() == Some(&ticket.note_id);
        if !current {
            debug!(
                "event=reflection_apply module=view status=discarded note_id={}",
                ticket.note_id
            );
            return Completion::Discarded;
        }

        self.in_flight = None;
        self.state = match result {
            Ok(text) => PaneState::Showing(text),
            Err(err) => PaneState::Failed(err.to_string()),
        };
        Completion::Applied
    }

    /// Clears any reflection or error; an in-flight result will be discarded.
    pub fn clear(&mut self) {
        self.state = PaneState::Idle;
        self.in_flight = None;
    }
}

impl Default for ReflectionPane {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Completion, PaneState, ReflectionPane};
    use crate::model::note::{Note, NotePatch};
    use crate::reflection::ReflectionError;

    fn note_with(title: &str, content: &str) -> Note {
        let mut note = Note::new();
        note.apply(NotePatch::title(title).with_content(content));
        note
    }

    #[test]
    fn empty_note_shows_guidance_without_ticket() {
        let mut pane = ReflectionPane::new();
        let note = Note::new();
        assert!(pane.begin(&note).is_none());
        assert_eq!(
            pane.error(),
            Some("Please write some content in your note first.")
        );
        assert!(!ReflectionPane::can_request(Some(&note)));
    }

    #[test]
    fn result_applies_to_current_note() {
        let mut pane = ReflectionPane::new();
        let note = note_with("Trip", "Pack light");
        let (ticket, _) = pane.begin(&note).unwrap();
        assert!(pane.is_loading());

        assert_eq!(
            pane.complete(&ticket, Ok("insight".to_string())),
            Completion::Applied
        );
        assert_eq!(pane.reflection(), Some("insight"));
    }

    #[test]
    fn result_for_previous_note_is_discarded() {
        let mut pane = ReflectionPane::new();
        let first = note_with("Trip", "Pack light");
        let second = note_with("Work", "Ship it");
        let (ticket, _) = pane.begin(&first).unwrap();

        pane.view_note(Some(&second.id));
        assert_eq!(
            pane.complete(&ticket, Ok("late".to_string())),
            Completion::Discarded
        );
        assert_eq!(pane.state(), &PaneState::Idle);
    }

    #[test]
    fn superseded_and_cleared_requests_are_discarded() {
        let mut pane = ReflectionPane::new();
        let note = note_with("Trip", "Pack light");
        let (old, _) = pane.begin(&note).unwrap();
        let (new, _) = pane.begin(&note).unwrap();

        assert_eq!(
            pane.complete(&old, Ok("stale".to_string())),
            Completion::Discarded
        );
        assert_eq!(
            pane.complete(&new, Err(ReflectionError::RateLimited)),
            Completion::Applied
        );
        assert_eq!(
            pane.error(),
            Some("Rate limit exceeded. Please try again in a moment.")
        );

        let (again, _) = pane.begin(&note).unwrap();
        pane.clear();
        assert_eq!(
            pane.complete(&again, Ok("ignored".to_string())),
            Completion::Discarded
        );
        assert_eq!(pane.state(), &PaneState::Idle);
    }
}
