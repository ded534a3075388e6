pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod search;
pub mod storage;

pub use config::Config;
pub use entity::{Note, Template};
pub use error::{Result, StickiesError};
pub use storage::NoteStore;
