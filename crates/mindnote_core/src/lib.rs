//! Core domain logic for MindNote.
//! This crate is the single source of truth for note and reflection invariants.

pub mod config;
pub mod db;
pub mod debounce;
pub mod display;
pub mod logging;
pub mod model;
pub mod reflection;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use debounce::{DebounceState, Debouncer, DEFAULT_DEBOUNCE};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LoggingStatus,
};
pub use model::note::{Note, NoteId, NotePatch, UNTITLED};
pub use reflection::{
    CredentialVault, ReflectionClient, ReflectionConfig, ReflectionError, ReflectionMode,
    ReflectionRequest,
};
pub use storage::{
    KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult, CREDENTIAL_KEY,
    NOTES_KEY,
};
pub use store::{NotesStore, StoreEvent, SubscriptionId};
pub use view::{
    ApiKeyPanel, Completion, DeleteRequest, EditorFocus, EditorKey, NoteEditor, NoteListItem,
    NoteListView, PaneState, QuoteModal, ReflectionPane, ReflectionTicket, SaveOutcome,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
