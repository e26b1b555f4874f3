//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted under the notes storage key.
//! - Own id generation and the "Untitled" title fallback.
//!
//! # Invariants
//! - `id` is generated once and never mutated.
//! - `created_at` is set once; `updated_at` is refreshed on every mutation.
//! - Timestamps carry millisecond precision so stored records round-trip
//!   exactly through their RFC 3339 form.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Title applied when a note title is empty after trimming.
pub const UNTITLED: &str = "Untitled";

const ID_SUFFIX_LEN: usize = 9;

/// Opaque, session-unique note identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wraps an existing identifier (e.g. one read back from storage or FFI).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// One titled, timestamped block of free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Free text; may contain markup tags.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates an empty "Untitled" note stamped with the current time.
    pub fn new() -> Self {
        Self::with_id(generate_note_id(), now_millis())
    }

    /// Creates an empty "Untitled" note with caller-provided identity and time.
    pub fn with_id(id: NoteId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: UNTITLED.to_string(),
            content: String::new(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Applies a partial update and refreshes `updated_at`.
    ///
    /// Titles pass through [`normalize_title`]; content is stored verbatim.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = normalize_title(&title);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = now_millis().max(self.created_at);
    }

    /// Title as shown in lists, with the fallback applied.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            self.title.as_str()
        }
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for [`Note::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            content: None,
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(value.into()),
        }
    }

    pub fn with_content(mut self, value: impl Into<String>) -> Self {
        self.content = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Returns `title` unchanged, or `"Untitled"` when it is blank.
pub fn normalize_title(title: &str) -> String {
    if title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

/// Generates a new note id: base-36 epoch millis followed by a random suffix.
///
/// Unique within practical collision probability for one session; not a
/// cryptographic identifier.
pub fn generate_note_id() -> NoteId {
    let millis = u128::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let random = Uuid::new_v4().as_u128();
    let mut suffix = to_base36(random);
    suffix.truncate(ID_SUFFIX_LEN);
    NoteId(format!("{}{suffix}", to_base36(millis)))
}

/// Current UTC time truncated to milliseconds.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{generate_note_id, normalize_title, to_base36, Note, NotePatch, UNTITLED};
    use std::collections::HashSet;

    #[test]
    fn new_note_is_untitled_and_empty() {
        let note = Note::new();
        assert_eq!(note.title, UNTITLED);
        assert!(note.content.is_empty());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn apply_normalizes_blank_title() {
        let mut note = Note::new();
        note.apply(NotePatch::title("   "));
        assert_eq!(note.title, "Untitled");
        note.apply(NotePatch::title("Groceries").with_content("milk"));
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk");
        assert!(note.updated_at >= note.created_at);
    }

    #[test]
    fn normalize_title_keeps_non_blank_input() {
        assert_eq!(normalize_title(" plan "), " plan ");
        assert_eq!(normalize_title(""), "Untitled");
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids = (0..500).map(|_| generate_note_id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
