//! Markup-stripped, length-capped note previews.
//!
//! # Invariants
//! - Previews never contain markup tags.
//! - A truncated preview is exactly `PREVIEW_MAX_CHARS` characters plus `...`.
//! - Empty content (after stripping) yields `EMPTY_PREVIEW`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Character budget for list previews.
pub const PREVIEW_MAX_CHARS: usize = 60;
/// Placeholder shown for notes without body text.
pub const EMPTY_PREVIEW: &str = "No additional text";

const ELLIPSIS: &str = "...";

static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));

/// Removes `<...>` markup tags, keeping the text between them.
pub fn strip_markup(content: &str) -> String {
    MARKUP_TAG_RE.replace_all(content, "").into_owned()
}

/// Derives the list preview for a note body.
pub fn preview_text(content: &str) -> String {
    let stripped = strip_markup(content);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }

    let mut chars = trimmed.chars();
    let head = chars.by_ref().take(PREVIEW_MAX_CHARS).collect::<String>();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::{preview_text, strip_markup, EMPTY_PREVIEW, PREVIEW_MAX_CHARS};

    #[test]
    fn long_content_is_cut_at_sixty_chars() {
        let content = "a".repeat(61);
        let preview = preview_text(&content);
        assert_eq!(preview, format!("{}...", "a".repeat(PREVIEW_MAX_CHARS)));
    }

    #[test]
    fn exactly_sixty_chars_is_not_truncated() {
        let content = format!("  {}  ", "b".repeat(60));
        assert_eq!(preview_text(&content), "b".repeat(60));
    }

    #[test]
    fn markup_is_stripped_before_measuring() {
        assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(preview_text("<div>  short  </div>"), "short");
    }

    #[test]
    fn empty_or_tag_only_content_uses_placeholder() {
        assert_eq!(preview_text(""), EMPTY_PREVIEW);
        assert_eq!(preview_text("<br/>  <p></p>"), EMPTY_PREVIEW);
    }

    #[test]
    fn counts_unicode_scalars_not_bytes() {
        let content = "📝".repeat(61);
        let preview = preview_text(&content);
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 3);
    }
}
