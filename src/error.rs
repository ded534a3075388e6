use thiserror::Error;

#[derive(Error, Debug)]
pub enum StickiesError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Invalid note id: {0:?}")]
    InvalidNoteId(String),

    #[error("Invalid color '{0}'. Expected #RGB or #RRGGBB")]
    InvalidColor(String),

    #[error("Invalid font size {0}. Valid sizes: 8, 10, 12, 14, 16, 18, 24")]
    InvalidFontSize(u32),

    #[error("Invalid import file: {0}")]
    InvalidImport(String),

    #[error("No notes could be imported")]
    ImportEmpty,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StickiesError>;
