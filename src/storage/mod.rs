mod json_store;

pub use json_store::{ExportDocument, NoteStore, NoteUpdate, RetitleReport};
