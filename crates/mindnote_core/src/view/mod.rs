//! Headless view models.
//!
//! # Responsibility
//! - Hold the UI-facing state and interaction rules of each screen element
//!   without depending on any rendering toolkit.
//! - Talk to the notes store and reflection client only through their
//!   public contracts.

pub mod note_editor;
pub mod note_list;
pub mod quote_modal;
pub mod reflection_pane;
pub mod settings_panel;

pub use note_editor::{EditorFocus, EditorKey, NoteEditor};
pub use note_list::{DeleteRequest, NoteListItem, NoteListView, DELETE_CONFIRMATION};
pub use quote_modal::{random_quote, QuoteModal};
pub use reflection_pane::{Completion, PaneState, ReflectionPane, ReflectionTicket};
pub use settings_panel::{ApiKeyPanel, SaveOutcome};
