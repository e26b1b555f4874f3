//! Domain model for notes.
//!
//! # Responsibility
//! - Define the canonical note record shared by store, views and surfaces.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod note;
