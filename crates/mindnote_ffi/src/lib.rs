//! Flutter bridge surface for MindNote.

pub mod api;
