// src/entity/note.rs
use serde::{Deserialize, Deserializer, Serialize};

use super::appearance::{
    clamp_size, next_font_size, validate_color, validate_font_size, FontStep, DEFAULT_FONT_SIZE,
    DEFAULT_NOTE_COLOR, DEFAULT_POSITION, DEFAULT_SIZE,
};
use super::{current_timestamp, generate_note_id};
use crate::error::Result;

pub const UNTITLED: &str = "Untitled Note";
/// Maximum length of any title, in characters.
pub const TITLE_MAX: usize = 150;
/// Maximum length of a title derived from content, in characters.
pub const DERIVED_TITLE_MAX: usize = 30;

const ELLIPSIS: &str = "...";

/// A sticky note as stored in `notes/<id>.json`.
///
/// Every field except `id` falls back to its default when missing from the
/// file, and a loaded title goes through the same validation as a user-set
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default = "untitled", deserialize_with = "deserialize_title")]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_x")]
    pub x: i32,
    #[serde(default = "default_y")]
    pub y: i32,
    #[serde(default = "default_w")]
    pub w: i32,
    #[serde(default = "default_h")]
    pub h: i32,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub updated_at: String,
}

impl Note {
    /// A fresh note. Non-blank content also sets the title.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let now = current_timestamp();
        Self {
            id: generate_note_id(),
            title: derive_title(&content),
            content,
            color: default_color(),
            font_size: DEFAULT_FONT_SIZE,
            x: DEFAULT_POSITION.0,
            y: DEFAULT_POSITION.1,
            w: DEFAULT_SIZE.0,
            h: DEFAULT_SIZE.1,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace the content and re-derive the title from it.
    pub fn update_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.title = derive_title(&self.content);
        self.touch();
    }

    pub fn update_title(&mut self, title: &str) {
        self.title = validate_title(title);
        self.touch();
    }

    pub fn update_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.touch();
    }

    pub fn update_size(&mut self, w: i32, h: i32) {
        let (w, h) = clamp_size(w, h);
        self.w = w;
        self.h = h;
        self.touch();
    }

    /// Set color and/or font size. Nothing is changed if either value is
    /// invalid.
    pub fn update_appearance(&mut self, color: Option<&str>, font_size: Option<u32>) -> Result<()> {
        let color = color.map(validate_color).transpose()?;
        let font_size = font_size.map(validate_font_size).transpose()?;
        if let Some(color) = color {
            self.color = color;
        }
        if let Some(size) = font_size {
            self.font_size = size;
        }
        self.touch();
        Ok(())
    }

    /// Move one step through the allowed font sizes. Returns false at the
    /// end of the range, in which case the note is untouched.
    pub fn step_font_size(&mut self, step: FontStep) -> bool {
        match next_font_size(self.font_size, step) {
            Some(size) => {
                self.font_size = size;
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn preview(&self, max_length: usize) -> String {
        preview_text(&self.content, max_length)
    }

    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.title)
    }
}

/// Empty titles become `UNTITLED`; long ones are cut to `TITLE_MAX`.
pub fn validate_title(title: &str) -> String {
    if title.is_empty() {
        return UNTITLED.to_string();
    }
    truncate_with_ellipsis(title, TITLE_MAX)
}

/// Title for the given content: its first non-blank line, trimmed.
pub fn derive_title(content: &str) -> String {
    let first_line = content.trim().lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return UNTITLED.to_string();
    }
    validate_title(&truncate_with_ellipsis(first_line, DERIVED_TITLE_MAX))
}

pub fn preview_text(text: &str, max_length: usize) -> String {
    truncate_with_ellipsis(text, max_length)
}

fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

fn deserialize_title<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(validate_title(raw.as_deref().unwrap_or_default()))
}

fn untitled() -> String {
    UNTITLED.to_string()
}

fn default_color() -> String {
    DEFAULT_NOTE_COLOR.to_string()
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

fn default_x() -> i32 {
    DEFAULT_POSITION.0
}

fn default_y() -> i32 {
    DEFAULT_POSITION.1
}

fn default_w() -> i32 {
    DEFAULT_SIZE.0
}

fn default_h() -> i32 {
    DEFAULT_SIZE.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{MAX_SIZE, MIN_SIZE};
    use crate::error::StickiesError;

    #[test]
    fn test_derive_title_first_line() {
        assert_eq!(derive_title("Hello\nWorld"), "Hello");
    }

    #[test]
    fn test_derive_title_skips_leading_blank_lines() {
        assert_eq!(derive_title("\n\n   \n  Groceries  \nmilk"), "Groceries");
    }

    #[test]
    fn test_derive_title_truncates_long_line() {
        let content = "x".repeat(40);
        let title = derive_title(&content);
        assert_eq!(title, format!("{}...", "x".repeat(27)));
        assert_eq!(title.chars().count(), DERIVED_TITLE_MAX);
    }

    #[test]
    fn test_derive_title_exactly_thirty_is_kept() {
        let content = "y".repeat(30);
        assert_eq!(derive_title(&content), content);
    }

    #[test]
    fn test_derive_title_counts_characters_not_bytes() {
        let content = "é".repeat(31);
        assert_eq!(derive_title(&content), format!("{}...", "é".repeat(27)));
    }

    #[test]
    fn test_derive_title_empty() {
        assert_eq!(derive_title(""), UNTITLED);
        assert_eq!(derive_title("   \n\t\n"), UNTITLED);
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title(""), UNTITLED);
        assert_eq!(validate_title("Short"), "Short");
        let long = "t".repeat(200);
        let title = validate_title(&long);
        assert_eq!(title.chars().count(), TITLE_MAX);
        assert!(title.ends_with("..."));
        assert_eq!(validate_title(&"t".repeat(150)), "t".repeat(150));
    }

    #[test]
    fn test_new_note_defaults() {
        let note = Note::new("");
        assert!(note.id.starts_with("note_"));
        assert_eq!(note.title, UNTITLED);
        assert_eq!(note.color, DEFAULT_NOTE_COLOR);
        assert_eq!(note.font_size, DEFAULT_FONT_SIZE);
        assert_eq!((note.x, note.y), DEFAULT_POSITION);
        assert_eq!((note.w, note.h), DEFAULT_SIZE);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_new_note_with_content_derives_title() {
        let note = Note::new("Plan trip\nbook hotel");
        assert_eq!(note.title, "Plan trip");
    }

    #[test]
    fn test_update_content_overrides_custom_title() {
        let mut note = Note::new("first");
        note.update_title("My custom title");
        assert_eq!(note.title, "My custom title");

        note.update_content("second line wins\nbody");
        assert_eq!(note.title, "second line wins");
    }

    #[test]
    fn test_mutators_refresh_updated_at() {
        let mut note = Note::new("x");
        note.updated_at = "2000-01-01 00:00:00".to_string();
        note.update_position(10, 20);
        assert_ne!(note.updated_at, "2000-01-01 00:00:00");
        assert_eq!((note.x, note.y), (10, 20));

        note.updated_at = "2000-01-01 00:00:00".to_string();
        note.update_title("t");
        assert_ne!(note.updated_at, "2000-01-01 00:00:00");
    }

    #[test]
    fn test_update_size_is_clamped() {
        let mut note = Note::new("");
        note.update_size(10, 10_000);
        assert_eq!((note.w, note.h), (MIN_SIZE.0, MAX_SIZE.1));
    }

    #[test]
    fn test_update_appearance_rejects_bad_values_atomically() {
        let mut note = Note::new("");
        let result = note.update_appearance(Some("#BBDEFB"), Some(11));
        assert!(matches!(result, Err(StickiesError::InvalidFontSize(11))));
        assert_eq!(note.color, DEFAULT_NOTE_COLOR);

        note.update_appearance(Some("#bbdefb"), Some(16)).unwrap();
        assert_eq!(note.color, "#BBDEFB");
        assert_eq!(note.font_size, 16);
    }

    #[test]
    fn test_step_font_size() {
        let mut note = Note::new("");
        assert!(note.step_font_size(FontStep::Up));
        assert_eq!(note.font_size, 14);

        note.font_size = 8;
        note.updated_at = "2000-01-01 00:00:00".to_string();
        assert!(!note.step_font_size(FontStep::Down));
        assert_eq!(note.font_size, 8);
        assert_eq!(note.updated_at, "2000-01-01 00:00:00");
    }

    #[test]
    fn test_preview_and_counts() {
        let note = Note::new("line one\nline two");
        assert_eq!(note.line_count(), 2);
        assert_eq!(note.char_count(), 17);
        assert_eq!(note.preview(8), "line ...");
        assert_eq!(note.preview(50), "line one\nline two");
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let note: Note = serde_json::from_str(r#"{"id": "note_1", "title": ""}"#).unwrap();
        assert_eq!(note.title, UNTITLED);
        assert_eq!(note.content, "");
        assert_eq!(note.color, DEFAULT_NOTE_COLOR);
        assert_eq!((note.w, note.h), DEFAULT_SIZE);

        let note: Note = serde_json::from_str(r#"{"id": "note_2"}"#).unwrap();
        assert_eq!(note.title, UNTITLED);
    }

    #[test]
    fn test_deserialize_requires_id() {
        let result: std::result::Result<Note, _> =
            serde_json::from_str(r#"{"title": "no id", "content": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_keeps_timestamps() {
        let note: Note = serde_json::from_str(
            r#"{"id": "note_3", "created_at": "2024-01-01 10:00:00", "updated_at": "2024-02-01 10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(note.created_at, "2024-01-01 10:00:00");
        assert_eq!(note.updated_at, "2024-02-01 10:00:00");
    }
}
