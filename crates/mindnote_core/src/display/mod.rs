//! Presentation helpers shared by list and editor views.

pub mod dates;
pub mod preview;

pub use dates::{format_editor_date, format_list_date};
pub use preview::{preview_text, strip_markup, EMPTY_PREVIEW, PREVIEW_MAX_CHARS};
