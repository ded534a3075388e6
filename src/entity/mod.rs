mod appearance;
mod note;
mod template;

pub use appearance::{
    clamp_size, next_font_size, validate_color, validate_font_size, FontStep, COLOR_PALETTE,
    DEFAULT_FONT_SIZE, DEFAULT_NOTE_COLOR, DEFAULT_POSITION, DEFAULT_SIZE, FONT_SIZES, MAX_SIZE,
    MIN_SIZE,
};
pub use note::{
    derive_title, preview_text, validate_title, Note, DERIVED_TITLE_MAX, TITLE_MAX, UNTITLED,
};
pub use template::{Template, TEMPLATES};

use chrono::{Local, Utc};

use crate::error::{Result, StickiesError};

/// Format used for `created_at` / `updated_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NOTE_ID_PREFIX: &str = "note_";
const INVALID_ID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Current local time formatted for note timestamps.
pub fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Generate a note id from the current time in milliseconds.
pub fn generate_note_id() -> String {
    note_id_from_millis(Utc::now().timestamp_millis())
}

pub fn note_id_from_millis(millis: i64) -> String {
    format!("{}{}", NOTE_ID_PREFIX, millis)
}

/// Millisecond component of a generated id, if it has one.
pub fn note_id_millis(id: &str) -> Option<i64> {
    id.strip_prefix(NOTE_ID_PREFIX)?.parse().ok()
}

/// Reject ids that cannot safely be used as a file stem.
pub fn validate_note_id(id: &str) -> Result<()> {
    let trimmed = id.trim();
    if trimmed.is_empty()
        || trimmed != id
        || id == "."
        || id == ".."
        || id.contains(INVALID_ID_CHARS)
        || id.chars().any(char::is_control)
    {
        return Err(StickiesError::InvalidNoteId(id.to_string()));
    }
    Ok(())
}
