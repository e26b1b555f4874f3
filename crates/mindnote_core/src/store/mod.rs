//! Observable state container for notes.
//!
//! # Responsibility
//! - Mediate every read/write of the note collection and the selection.
//! - Notify subscribers synchronously after each mutation.

pub mod events;
pub mod notes_store;

pub use events::{StoreEvent, SubscriptionId};
pub use notes_store::{decode_notes, encode_notes, NotesStore};
