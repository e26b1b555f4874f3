use chrono::Utc;
use mindnote_core::reflection::transport::{CompletionRequest, CompletionResponse};
use mindnote_core::reflection::CompletionTransport;
use mindnote_core::view::note_list::EMPTY_STATE_TITLE;
use mindnote_core::{
    KeyValueStore, MemoryKvStore, NoteEditor, NoteListView, NotesStore, PaneState,
    ReflectionClient, ReflectionConfig, ReflectionError, ReflectionPane, NOTES_KEY,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_millis(500);

#[derive(Default)]
struct CountingTransport {
    calls: AtomicUsize,
}

impl CompletionTransport for CountingTransport {
    fn send(
        &self,
        _endpoint: &str,
        _credential: &str,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, ReflectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ReflectionError::NoResponse)
    }
}

#[test]
fn typed_note_is_persisted_after_quiet_period() {
    let storage = MemoryKvStore::new();
    storage.clear().unwrap();
    let mut store = NotesStore::load(storage.clone());
    let mut editor = NoteEditor::new(WINDOW);

    store.create();
    assert!(editor.bind_selection(&mut store));

    let start = Instant::now();
    editor.input_title("Storage Test", start);
    editor.input_title("Storage Test Note", start + Duration::from_millis(100));
    editor.input_content("hello", start + Duration::from_millis(200));

    assert_eq!(editor.tick(start + Duration::from_millis(550), &mut store), 0);
    assert_eq!(editor.tick(start + Duration::from_millis(700), &mut store), 2);
    assert!(!editor.has_pending());

    let payload = storage.get(NOTES_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Storage Test Note");
    assert_eq!(entries[0]["content"], "hello");
    assert!(entries[0]["createdAt"].is_string());
    assert!(entries[0]["updatedAt"].is_string());
}

#[test]
fn created_notes_are_listed_newest_first() {
    let mut store = NotesStore::load(MemoryKvStore::new());
    let mut editor = NoteEditor::new(WINDOW);

    for title in ["First", "Second", "Third"] {
        store.create();
        editor.bind_selection(&mut store);
        editor.input_title(title, Instant::now());
        editor.flush(&mut store);
    }

    let view = NoteListView::from_store(&store, &Utc::now());
    let titles = view
        .items()
        .iter()
        .map(|item| item.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, ["Third", "Second", "First"]);
    assert_eq!(view.count_label(), "3 notes");
    assert!(view.items()[0].is_selected);
}

#[test]
fn deleting_last_note_shows_empty_state() {
    let mut store = NotesStore::load(MemoryKvStore::new());
    let id = store.create();

    let view = NoteListView::from_store(&store, &Utc::now());
    let request = view.request_delete(&id).unwrap();
    assert!(request.confirm(&mut store));

    let view = NoteListView::from_store(&store, &Utc::now());
    assert!(view.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.selected_id(), None);
    assert_eq!(EMPTY_STATE_TITLE, "No notes yet");
}

#[test]
fn cancelled_delete_keeps_note() {
    let mut store = NotesStore::load(MemoryKvStore::new());
    let id = store.create();

    let view = NoteListView::from_store(&store, &Utc::now());
    view.request_delete(&id).unwrap().cancel();
    assert_eq!(store.len(), 1);
}

#[test]
fn reflection_on_blank_note_makes_no_network_call() {
    let mut store = NotesStore::load(MemoryKvStore::new());
    let mut editor = NoteEditor::new(WINDOW);
    store.create();
    editor.bind_selection(&mut store);
    editor.input_title("   ", Instant::now());
    editor.flush(&mut store);

    let client = ReflectionClient::with_transport(
        ReflectionConfig::default(),
        CountingTransport::default(),
    );
    let mut pane = ReflectionPane::new();
    let note = store.selected().unwrap();

    assert!(!ReflectionPane::can_request(Some(note)));
    assert!(pane.begin(note).is_none());
    assert_eq!(
        pane.state(),
        &PaneState::Failed("Please write some content in your note first.".to_string())
    );
    assert_eq!(client.transport().calls.load(Ordering::SeqCst), 0);
}

#[test]
fn reloaded_session_selects_first_note() {
    let storage = MemoryKvStore::new();
    let first_id = {
        let mut store = NotesStore::load(storage.clone());
        store.create();
        store.create()
    };

    let store = NotesStore::load(storage);
    assert_eq!(store.len(), 2);
    assert_eq!(store.selected_id(), Some(&first_id));
}

#[test]
fn switching_notes_keeps_edits_on_original_note() {
    let mut store = NotesStore::load(MemoryKvStore::new());
    let mut editor = NoteEditor::new(WINDOW);
    let older = store.create();
    let newer = store.create();
    editor.bind_selection(&mut store);
    assert_eq!(editor.note_id(), Some(&newer));

    editor.input_content("draft for newer", Instant::now());
    store.select(&older);
    assert!(editor.bind_selection(&mut store));

    assert_eq!(store.get(&newer).unwrap().content, "draft for newer");
    assert_eq!(store.get(&older).unwrap().content, "");
    assert_eq!(editor.content(), "");
}
