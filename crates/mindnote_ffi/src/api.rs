//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note list, editor, reflection pane, API-key panel and quote
//!   modal to Dart via FRB, backed by one process-wide session.
//! - Translate core results into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call except `reflection_request` holds the session lock for its
//!   whole duration; `reflection_request` releases it around the network call.
//! - Reflection results are applied only if they still match the viewed note.

use chrono::Local;
use log::{debug, info, warn};
use mindnote_core::display::format_editor_date;
use mindnote_core::reflection::CompletionTransport;
use mindnote_core::view::{random_quote as random_quote_inner, DELETE_CONFIRMATION};
use mindnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ApiKeyPanel, AppConfig, Completion, CredentialVault, EditorFocus, EditorKey, NoteEditor,
    NoteId, NoteListView, NotesStore, QuoteModal, ReflectionClient, ReflectionConfig,
    ReflectionError, ReflectionMode, ReflectionPane, ReflectionRequest, ReflectionTicket,
    SaveOutcome, SqliteKvStore,
};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Everything one UI needs: store, credential and the view models.
struct Session {
    store: NotesStore<SqliteKvStore>,
    vault: CredentialVault<SqliteKvStore>,
    editor: NoteEditor,
    pane: ReflectionPane,
    quotes: QuoteModal,
    reflection: ReflectionConfig,
}

impl Session {
    fn open(config: &AppConfig) -> Result<Self, String> {
        let notes_storage = SqliteKvStore::open(&config.db_path)
            .map_err(|err| format!("notes storage open failed: {err}"))?;
        let credential_storage = SqliteKvStore::open(&config.db_path)
            .map_err(|err| format!("credential storage open failed: {err}"))?;

        let mut session = Self {
            store: NotesStore::load(notes_storage),
            vault: CredentialVault::load(credential_storage),
            editor: NoteEditor::new(config.debounce),
            pane: ReflectionPane::new(),
            quotes: QuoteModal::default(),
            reflection: config.reflection.clone(),
        };
        session.follow_selection();
        Ok(session)
    }

    /// Points editor and reflection pane at the store's selection.
    fn follow_selection(&mut self) {
        self.editor.bind_selection(&mut self.store);
        self.pane.view_note(self.store.selected_id());
    }

    fn editor_state(&self, message: impl Into<String>) -> EditorState {
        let updated_label = self
            .store
            .selected()
            .map(|note| format_editor_date(&note.updated_at.with_timezone(&Local)))
            .unwrap_or_default();
        EditorState {
            ok: true,
            note_id: self.editor.note_id().map(ToString::to_string),
            title: self.editor.title().to_string(),
            content: self.editor.content().to_string(),
            updated_label,
            focus_content: self.editor.focus() == EditorFocus::Content,
            message: message.into(),
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Note affected by the operation, when there is one.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// One row of the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListEntry {
    pub id: String,
    pub title: String,
    /// Markup-stripped, length-capped content summary.
    pub preview: String,
    /// Relative date label (`14:05`, `Mon`, `Jan 3`).
    pub date_label: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub items: Vec<NoteListEntry>,
    /// Header text such as `3 notes`.
    pub count_label: String,
    /// Whether the empty-state indicator should be shown.
    pub is_empty: bool,
    pub message: String,
}

/// Editor buffers for the selected note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub ok: bool,
    /// `None` when no note is selected.
    pub note_id: Option<String>,
    pub title: String,
    pub content: String,
    /// Long-form last-edited timestamp.
    pub updated_label: String,
    /// Whether the content field should hold focus.
    pub focus_content: bool,
    pub message: String,
}

impl EditorState {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            title: String::new(),
            content: String::new(),
            updated_label: String::new(),
            focus_content: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionResponse {
    /// Whether reflection text was produced.
    pub ok: bool,
    /// Whether the outcome was shown; `false` when the viewed note changed
    /// or the pane was cleared while the request was running.
    pub applied: bool,
    pub text: Option<String>,
    /// Stable error code (`empty_note`, `rate_limited`, ...).
    pub error_code: Option<String>,
    pub message: String,
}

impl ReflectionResponse {
    fn rejected(error: &ReflectionError) -> Self {
        Self {
            ok: false,
            applied: true,
            text: None,
            error_code: Some(error.code().to_string()),
            message: error.to_string(),
        }
    }

    fn unavailable(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            applied: false,
            text: None,
            error_code: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyStatus {
    pub configured: bool,
    /// `configured` or `unconfigured`.
    pub mode: String,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens (or reopens) the session on `db_path`.
///
/// An empty `db_path` uses `MINDNOTE_DB_PATH` or the temp-dir default.
/// Pending edits of a previous session are flushed first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the selected note ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn app_open(db_path: String) -> ActionResponse {
    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => return ActionResponse::failure(format!("app_open failed: {err}")),
    };
    let trimmed = db_path.trim();
    if !trimmed.is_empty() {
        config.db_path = PathBuf::from(trimmed);
    }
    match open_session(&config) {
        Ok(response) => response,
        Err(err) => ActionResponse::failure(format!("app_open failed: {err}")),
    }
}

/// Lists notes newest-first with relative date labels.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    let result = with_session(|session| {
        let view = NoteListView::from_store(&session.store, &Local::now());
        Ok(NotesListResponse {
            items: view
                .items()
                .iter()
                .map(|item| NoteListEntry {
                    id: item.id.to_string(),
                    title: item.title.clone(),
                    preview: item.preview.clone(),
                    date_label: item.date_label.clone(),
                    is_selected: item.is_selected,
                })
                .collect(),
            count_label: view.count_label(),
            is_empty: view.is_empty(),
            message: String::new(),
        })
    });
    result.unwrap_or_else(|err| NotesListResponse {
        items: Vec::new(),
        count_label: String::new(),
        is_empty: true,
        message: format!("notes_list failed: {err}"),
    })
}

/// Creates an "Untitled" note at the top of the list and selects it.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_create() -> ActionResponse {
    let result = with_session(|session| {
        let id = session.store.create();
        session.follow_selection();
        Ok(id)
    });
    match result {
        Ok(id) => ActionResponse::success("Note created.", Some(id.to_string())),
        Err(err) => ActionResponse::failure(format!("notes_create failed: {err}")),
    }
}

/// Selects a note and returns its editor buffers.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_select(note_id: String) -> EditorState {
    let result = with_session(|session| {
        let found = session.store.select(&NoteId::from(note_id.trim()));
        session.follow_selection();
        if found {
            Ok(session.editor_state("Note selected."))
        } else {
            Err(format!("note `{}` not found", note_id.trim()))
        }
    });
    result.unwrap_or_else(|err| EditorState::failure(format!("notes_select failed: {err}")))
}

/// Deletes a note once the user has confirmed.
///
/// Without confirmation nothing changes and the response carries the
/// confirmation prompt to show.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(note_id: String, confirmed: bool) -> ActionResponse {
    if !confirmed {
        return ActionResponse::failure(DELETE_CONFIRMATION);
    }
    let result = with_session(|session| {
        let view = NoteListView::from_store(&session.store, &Local::now());
        let request = view
            .request_delete(&NoteId::from(note_id.trim()))
            .ok_or_else(|| format!("note `{}` not found", note_id.trim()))?;
        let removed_id = request.note_id().to_string();
        request.confirm(&mut session.store);
        session.follow_selection();
        Ok(removed_id)
    });
    match result {
        Ok(id) => ActionResponse::success("Note deleted.", Some(id)),
        Err(err) => ActionResponse::failure(format!("notes_delete failed: {err}")),
    }
}

/// Current editor buffers.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_state() -> EditorState {
    with_session(|session| Ok(session.editor_state(String::new())))
        .unwrap_or_else(|err| EditorState::failure(format!("editor_state failed: {err}")))
}

/// Records a title keystroke; it is saved after the quiet period.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_input_title(text: String) -> ActionResponse {
    editor_input(|editor| editor.input_title(text, Instant::now()))
}

/// Records a content keystroke; it is saved after the quiet period.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_input_content(text: String) -> ActionResponse {
    editor_input(|editor| editor.input_content(text, Instant::now()))
}

/// Enter in the title field: saves the title now and moves focus to content.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_commit_title() -> EditorState {
    with_session(|session| {
        session.editor.key_down_title(EditorKey::Enter, &mut session.store);
        Ok(session.editor_state("Title saved."))
    })
    .unwrap_or_else(|err| EditorState::failure(format!("editor_commit_title failed: {err}")))
}

/// Tab in the content field: replaces the selection (character offsets)
/// with a tab and returns the new caret offset.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_insert_tab(selection_start: u32, selection_end: u32) -> Option<u32> {
    with_session(|session| {
        Ok(session.editor.key_down_content(
            EditorKey::Tab,
            selection_start as usize,
            selection_end as usize,
            Instant::now(),
        ))
    })
    .ok()
    .flatten()
    .and_then(|caret| u32::try_from(caret).ok())
}

/// Saves edits whose quiet period has elapsed; returns how many were saved.
///
/// # FFI contract
/// - Meant to be polled from a UI timer.
/// - Returns 0 when no session is open.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_tick() -> u32 {
    with_session(|session| Ok(session.editor.tick(Instant::now(), &mut session.store)))
        .map_or(0, saturating_u32)
}

/// Saves all pending edits immediately (app pause, window close).
#[flutter_rust_bridge::frb(sync)]
pub fn editor_flush() -> u32 {
    with_session(|session| Ok(session.editor.flush(&mut session.store)))
        .map_or(0, saturating_u32)
}

/// Requests a reflection for the selected note.
///
/// # FFI contract
/// - Async on the Dart side; may block on the network.
/// - The session lock is released while the request runs, so other calls
///   proceed normally.
/// - Never panics.
pub fn reflection_request() -> ReflectionResponse {
    reflect_selected(ReflectionClient::new)
}

/// Clears the reflection pane; an in-flight result will be discarded.
#[flutter_rust_bridge::frb(sync)]
pub fn reflection_clear() -> ActionResponse {
    match with_session(|session| {
        session.pane.clear();
        Ok(())
    }) {
        Ok(()) => ActionResponse::success("Reflection cleared.", None),
        Err(err) => ActionResponse::failure(format!("reflection_clear failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn api_key_status() -> ApiKeyStatus {
    let mode = with_session(|session| Ok(session.vault.mode()))
        .unwrap_or(ReflectionMode::Unconfigured);
    ApiKeyStatus {
        configured: mode.is_configured(),
        mode: mode.label().to_string(),
    }
}

/// Stores the trimmed key; blank input is ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn api_key_save(value: String) -> ActionResponse {
    let result = with_session(|session| {
        let mut panel = ApiKeyPanel::open(&session.vault);
        panel.set_draft(value);
        panel.save(&mut session.vault).map_err(|err| err.to_string())
    });
    match result {
        Ok(SaveOutcome::Stored) => ActionResponse::success("API key saved.", None),
        Ok(SaveOutcome::Ignored) => ActionResponse::failure("API key is empty; nothing saved."),
        Err(err) => ActionResponse::failure(format!("api_key_save failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn api_key_remove() -> ActionResponse {
    let result = with_session(|session| {
        let mut panel = ApiKeyPanel::open(&session.vault);
        panel.remove(&mut session.vault).map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => ActionResponse::success("API key removed.", None),
        Err(err) => ActionResponse::failure(format!("api_key_remove failed: {err}")),
    }
}

/// Returns a quote different from the one shown last in this session.
#[flutter_rust_bridge::frb(sync)]
pub fn random_quote() -> String {
    let mut rng = rand::thread_rng();
    with_session(|session| Ok(session.quotes.next(&mut rng)))
        .unwrap_or_else(|_| random_quote_inner(&mut rng))
        .to_owned()
}

fn open_session(config: &AppConfig) -> Result<ActionResponse, String> {
    let mut guard = SESSION
        .lock()
        .map_err(|_| "session lock poisoned".to_string())?;
    // The new session must load what the previous one still had buffered.
    if let Some(previous) = guard.as_mut() {
        let flushed = previous.editor.flush(&mut previous.store);
        debug!("event=session_flush module=ffi status=ok fields={flushed}");
    }

    let session = Session::open(config)?;
    let count = session.store.len();
    let selected = session.store.selected_id().map(ToString::to_string);
    *guard = Some(session);
    info!("event=session_open module=ffi status=ok count={count}");

    Ok(ActionResponse::success(
        format!("Loaded {count} note(s)."),
        selected,
    ))
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> Result<T, String>) -> Result<T, String> {
    let mut guard = SESSION
        .lock()
        .map_err(|_| "session lock poisoned".to_string())?;
    let session = guard
        .as_mut()
        .ok_or_else(|| "app is not open; call app_open first".to_string())?;
    f(session)
}

fn editor_input(apply: impl FnOnce(&mut NoteEditor)) -> ActionResponse {
    let result = with_session(|session| {
        let note_id = session
            .editor
            .note_id()
            .map(ToString::to_string)
            .ok_or_else(|| "no note selected".to_string())?;
        apply(&mut session.editor);
        Ok(note_id)
    });
    match result {
        Ok(id) => ActionResponse::success("Edit scheduled.", Some(id)),
        Err(err) => ActionResponse::failure(format!("editor input failed: {err}")),
    }
}

struct PreparedReflection {
    ticket: ReflectionTicket,
    request: ReflectionRequest,
    mode: ReflectionMode,
    config: ReflectionConfig,
}

fn reflect_selected<T, F>(make_client: F) -> ReflectionResponse
where
    T: CompletionTransport,
    F: FnOnce(ReflectionConfig) -> ReflectionClient<T>,
{
    let prepared = with_session(|session| {
        session.editor.flush(&mut session.store);
        let note = session
            .store
            .selected()
            .ok_or_else(|| "no note selected".to_string())?;
        match session.pane.begin(note) {
            Some((ticket, request)) => Ok(Ok(PreparedReflection {
                ticket,
                request,
                mode: session.vault.mode(),
                config: session.reflection.clone(),
            })),
            None => Ok(Err(ReflectionError::EmptyNote)),
        }
    });
    let prepared = match prepared {
        Ok(Ok(prepared)) => prepared,
        Ok(Err(rejection)) => return ReflectionResponse::rejected(&rejection),
        Err(err) => {
            return ReflectionResponse::unavailable(format!("reflection_request failed: {err}"))
        }
    };

    let client = make_client(prepared.config);
    let result = client.reflect(&prepared.mode, &prepared.request);

    let completion =
        with_session(|session| Ok(session.pane.complete(&prepared.ticket, result.clone())));
    match (completion, result) {
        (Ok(Completion::Applied), Ok(text)) => ReflectionResponse {
            ok: true,
            applied: true,
            message: String::new(),
            text: Some(text),
            error_code: None,
        },
        (Ok(Completion::Applied), Err(err)) => ReflectionResponse::rejected(&err),
        (Ok(Completion::Discarded), _) => {
            ReflectionResponse::unavailable("Reflection discarded; the note is no longer shown.")
        }
        (Err(err), _) => {
            warn!("event=reflection_apply module=ffi status=error error={err}");
            ReflectionResponse::unavailable(format!("reflection_request failed: {err}"))
        }
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        api_key_remove, api_key_save, api_key_status, core_version, editor_commit_title,
        editor_flush, editor_input_content, editor_input_title, editor_insert_tab, editor_state,
        init_logging, notes_create, notes_delete, notes_list, notes_select, open_session, ping,
        random_quote, reflect_selected, reflection_clear,
    };
    use mindnote_core::reflection::transport::{
        ChoiceMessage, CompletionChoice, CompletionRequest, CompletionResponse,
    };
    use mindnote_core::reflection::{CompletionTransport, MOCK_REFLECTION};
    use mindnote_core::view::quote_modal::QUOTES;
    use mindnote_core::view::DELETE_CONFIRMATION;
    use mindnote_core::{AppConfig, ReflectionClient, ReflectionConfig, ReflectionError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::TempDir;

    static TEST_LOCK: Mutex<()> = Mutex::new(());

    struct FixedTransport {
        calls: AtomicUsize,
    }

    impl CompletionTransport for FixedTransport {
        fn send(
            &self,
            _endpoint: &str,
            _credential: &str,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, ReflectionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CompletionResponse {
                choices: vec![CompletionChoice {
                    message: Some(ChoiceMessage {
                        content: Some("remote insight".to_string()),
                    }),
                }],
            })
        }
    }

    fn fresh_session() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("mindnote.db"),
            reflection: ReflectionConfig {
                mock_delay: Duration::ZERO,
                ..ReflectionConfig::default()
            },
            ..AppConfig::default()
        };
        let response = open_session(&config).unwrap();
        assert!(response.ok, "{}", response.message);
        dir
    }

    fn fixed_client(config: ReflectionConfig) -> ReflectionClient<FixedTransport> {
        ReflectionClient::with_transport(
            config,
            FixedTransport {
                calls: AtomicUsize::new(0),
            },
        )
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn create_edit_and_list_notes() {
        let _guard = TEST_LOCK.lock().unwrap();
        let _dir = fresh_session();

        assert!(notes_list().is_empty);
        let created = notes_create();
        assert!(created.ok, "{}", created.message);

        assert!(editor_input_title("Groceries".to_string()).ok);
        assert!(editor_input_content("<p>milk and eggs</p>".to_string()).ok);
        assert_eq!(editor_flush(), 2);

        let list = notes_list();
        assert_eq!(list.count_label, "1 note");
        assert_eq!(list.items[0].title, "Groceries");
        assert_eq!(list.items[0].preview, "milk and eggs");
        assert!(list.items[0].is_selected);
        assert_eq!(Some(list.items[0].id.clone()), created.note_id);
    }

    #[test]
    fn commit_title_moves_focus_and_applies_fallback() {
        let _guard = TEST_LOCK.lock().unwrap();
        let _dir = fresh_session();
        notes_create();

        editor_input_title("   ".to_string());
        let state = editor_commit_title();
        assert!(state.focus_content);
        assert_eq!(notes_list().items[0].title, "Untitled");

        editor_input_content("ab".to_string());
        assert_eq!(editor_insert_tab(1, 2), Some(2));
        assert_eq!(editor_state().content, "a\t");
    }

    #[test]
    fn reopening_keeps_edits_still_waiting_for_debounce() {
        let _guard = TEST_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("mindnote.db"),
            ..AppConfig::default()
        };
        assert!(open_session(&config).unwrap().ok);
        let typed_into = notes_create().note_id.unwrap();
        assert!(editor_input_content("typed before reopen".to_string()).ok);

        let reopened = open_session(&config).unwrap();
        assert_eq!(reopened.note_id.as_deref(), Some(typed_into.as_str()));
        assert_eq!(editor_state().content, "typed before reopen");

        assert!(notes_create().ok);
        assert!(open_session(&config).unwrap().ok);
        let previews = notes_list()
            .items
            .into_iter()
            .map(|item| item.preview)
            .collect::<Vec<_>>();
        assert_eq!(previews.len(), 2);
        assert!(previews.contains(&"typed before reopen".to_string()));
    }

    #[test]
    fn select_and_delete_follow_confirmation() {
        let _guard = TEST_LOCK.lock().unwrap();
        let _dir = fresh_session();
        let older = notes_create().note_id.unwrap();
        let newer = notes_create().note_id.unwrap();

        let state = notes_select(older.clone());
        assert!(state.ok, "{}", state.message);
        assert_eq!(state.note_id.as_deref(), Some(older.as_str()));
        assert!(!notes_select("missing".to_string()).ok);

        let unconfirmed = notes_delete(newer.clone(), false);
        assert!(!unconfirmed.ok);
        assert_eq!(unconfirmed.message, DELETE_CONFIRMATION);
        assert_eq!(notes_list().items.len(), 2);

        assert!(notes_delete(newer, true).ok);
        assert!(notes_delete(older, true).ok);
        let list = notes_list();
        assert!(list.is_empty);
        assert_eq!(editor_state().note_id, None);
    }

    #[test]
    fn reflection_uses_placeholder_until_key_saved() {
        let _guard = TEST_LOCK.lock().unwrap();
        let _dir = fresh_session();
        notes_create();

        let empty = reflect_selected(fixed_client);
        assert!(!empty.ok);
        assert_eq!(empty.error_code.as_deref(), Some("empty_note"));

        editor_input_content("Slept badly.".to_string());
        let placeholder = reflect_selected(fixed_client);
        assert!(placeholder.ok);
        assert_eq!(placeholder.text.as_deref(), Some(MOCK_REFLECTION));
        assert!(!api_key_status().configured);

        assert!(!api_key_save("   ".to_string()).ok);
        assert!(api_key_save(" sk-test ".to_string()).ok);
        assert_eq!(api_key_status().mode, "configured");

        let remote = reflect_selected(fixed_client);
        assert_eq!(remote.text.as_deref(), Some("remote insight"));
        assert!(reflection_clear().ok);

        assert!(api_key_remove().ok);
        assert!(!api_key_status().configured);
    }

    #[test]
    fn random_quote_comes_from_list() {
        let _guard = TEST_LOCK.lock().unwrap();
        let _dir = fresh_session();
        let first = random_quote();
        let second = random_quote();
        assert!(QUOTES.contains(&first.as_str()));
        assert_ne!(first, second);
    }
}
