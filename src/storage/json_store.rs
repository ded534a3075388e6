use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::entity::{
    current_timestamp, derive_title, generate_note_id, note_id_from_millis, note_id_millis,
    validate_note_id, FontStep, Note, Template, UNTITLED,
};
use crate::error::{Result, StickiesError};
use crate::search::{self, SearchHit};

const NOTE_EXT: &str = "json";

/// Whole-catalog dump written by `export` and read by `import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub notes: Vec<Note>,
    pub export_timestamp: String,
    pub total_notes: usize,
}

/// Update payload for a note. Unset fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub content: Option<String>,
    pub title: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
    pub color: Option<String>,
    pub font_size: Option<u32>,
    pub font_step: Option<FontStep>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.title.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.w.is_none()
            && self.h.is_none()
            && self.color.is_none()
            && self.font_size.is_none()
            && self.font_step.is_none()
    }
}

/// Outcome of `retitle_untitled`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RetitleReport {
    pub updated: usize,
    pub total: usize,
}

/// In-memory notes kept in sync with one JSON file per note.
///
/// Every mutation is written to disk before the in-memory copy changes, so a
/// failed write leaves the store exactly as it was.
pub struct NoteStore {
    notes: BTreeMap<String, Note>,
    notes_dir: PathBuf,
}

impl NoteStore {
    /// Open the store, creating the data directories and loading every note
    /// file. Unreadable files are logged and skipped.
    pub fn open(config: &Config) -> Result<Self> {
        let notes_dir = config.notes_dir();
        fs::create_dir_all(&notes_dir)?;
        fs::create_dir_all(config.templates_dir())?;

        let mut store = Self {
            notes: BTreeMap::new(),
            notes_dir,
        };
        store.load()?;
        Ok(store)
    }

    fn load(&mut self) -> Result<()> {
        let mut skipped = 0usize;
        for entry in fs::read_dir(&self.notes_dir)? {
            let path = entry?.path();
            if !is_note_file(&path) {
                continue;
            }
            match read_note_file(&path) {
                Ok(note) => {
                    self.notes.insert(note.id.clone(), note);
                }
                Err(error) => {
                    skipped += 1;
                    tracing::warn!(path = %path.display(), error = %error, "skipping unreadable note file");
                }
            }
        }
        tracing::info!(
            dir = %self.notes_dir.display(),
            loaded = self.notes.len(),
            skipped,
            "loaded notes"
        );
        Ok(())
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn note_path(&self, id: &str) -> PathBuf {
        self.notes_dir.join(format!("{}.{}", id, NOTE_EXT))
    }

    pub fn count(&self) -> usize {
        self.notes.len()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    /// All notes, most recently updated first.
    pub fn list(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.values().collect();
        search::sort_recent(&mut notes);
        notes
    }

    /// Case-insensitive substring search over titles and content.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        search::rank(self.notes.values(), query)
    }

    /// Write the note to disk, then record it in memory.
    pub fn save(&mut self, note: Note) -> Result<&Note> {
        validate_note_id(&note.id)?;
        let path = self.note_path(&note.id);
        write_json_atomic(&path, &note)?;
        tracing::debug!(id = %note.id, path = %path.display(), "saved note");

        let id = note.id.clone();
        self.notes.insert(id.clone(), note);
        self.notes
            .get(&id)
            .ok_or_else(|| StickiesError::Storage(format!("note {} vanished after save", id)))
    }

    /// Remove a note's file and in-memory entry.
    ///
    /// Returns `Ok(false)` when the id is unknown both in memory and on disk.
    /// A missing file is tolerated for a note that is still in memory.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if validate_note_id(id).is_err() {
            return Ok(false);
        }
        let path = self.note_path(id);
        let removed_file = match fs::remove_file(&path) {
            Ok(()) => true,
            Err(error) if error.kind() == ErrorKind::NotFound => false,
            Err(error) => return Err(error.into()),
        };
        let removed_entry = self.notes.remove(id).is_some();
        if removed_file || removed_entry {
            tracing::debug!(id, removed_file, "deleted note");
        }
        Ok(removed_file || removed_entry)
    }

    /// Create and persist a new note.
    pub fn create_note(
        &mut self,
        content: &str,
        color: Option<&str>,
        font_size: Option<u32>,
    ) -> Result<&Note> {
        let mut note = Note::new(content);
        if color.is_some() || font_size.is_some() {
            note.update_appearance(color, font_size)?;
        }
        note.id = self.unique_id();
        self.save(note)
    }

    /// Create and persist a note from a built-in template. Unknown template
    /// ids produce a blank note. Appearance overrides are validated before
    /// anything is written.
    pub fn create_from_template(
        &mut self,
        template_id: &str,
        color: Option<&str>,
        font_size: Option<u32>,
    ) -> Result<&Note> {
        let mut note = match Template::get(template_id) {
            Some(template) => template.instantiate(),
            None => {
                tracing::warn!(template_id, "unknown template; creating blank note");
                Note::new("")
            }
        };
        if color.is_some() || font_size.is_some() {
            note.update_appearance(color, font_size)?;
        }
        note.id = self.unique_id();
        self.save(note)
    }

    pub fn update_content(&mut self, id: &str, content: &str) -> Result<&Note> {
        self.mutate(id, |note| {
            note.update_content(content);
            Ok(())
        })
    }

    pub fn update_title(&mut self, id: &str, title: &str) -> Result<&Note> {
        self.mutate(id, |note| {
            note.update_title(title);
            Ok(())
        })
    }

    pub fn update_position(&mut self, id: &str, x: i32, y: i32) -> Result<&Note> {
        self.mutate(id, |note| {
            note.update_position(x, y);
            Ok(())
        })
    }

    pub fn update_size(&mut self, id: &str, w: i32, h: i32) -> Result<&Note> {
        self.mutate(id, |note| {
            note.update_size(w, h);
            Ok(())
        })
    }

    pub fn update_appearance(
        &mut self,
        id: &str,
        color: Option<&str>,
        font_size: Option<u32>,
    ) -> Result<&Note> {
        self.mutate(id, |note| note.update_appearance(color, font_size))
    }

    /// Apply several changes with a single write. Content is applied before
    /// the title, so an explicit title wins over the derived one.
    pub fn update(&mut self, id: &str, updates: NoteUpdate) -> Result<&Note> {
        self.mutate(id, |note| {
            if let Some(content) = updates.content.as_deref() {
                note.update_content(content);
            }
            if let Some(title) = updates.title.as_deref() {
                note.update_title(title);
            }
            if updates.x.is_some() || updates.y.is_some() {
                note.update_position(updates.x.unwrap_or(note.x), updates.y.unwrap_or(note.y));
            }
            if updates.w.is_some() || updates.h.is_some() {
                note.update_size(updates.w.unwrap_or(note.w), updates.h.unwrap_or(note.h));
            }
            if updates.color.is_some() || updates.font_size.is_some() {
                note.update_appearance(updates.color.as_deref(), updates.font_size)?;
            }
            if let Some(step) = updates.font_step {
                note.step_font_size(step);
            }
            Ok(())
        })
    }

    /// Step the font size; at the end of the range the note is returned
    /// unchanged and nothing is written.
    pub fn step_font_size(&mut self, id: &str, step: FontStep) -> Result<&Note> {
        let mut note = self.require(id)?.clone();
        if !note.step_font_size(step) {
            return self.require(id);
        }
        self.save(note)
    }

    /// Write every note to a single JSON document.
    pub fn export(&self, path: &Path) -> Result<usize> {
        let notes: Vec<Note> = self.list().into_iter().cloned().collect();
        let document = ExportDocument {
            total_notes: notes.len(),
            notes,
            export_timestamp: current_timestamp(),
        };
        write_json_atomic(path, &document)?;
        tracing::info!(path = %path.display(), total = document.total_notes, "exported notes");
        Ok(document.total_notes)
    }

    /// Import notes from an export document, overwriting notes with the same
    /// id. Malformed entries are skipped; fails with `ImportEmpty` when none
    /// could be imported.
    pub fn import(&mut self, path: &Path) -> Result<usize> {
        let raw = fs::read(path)?;
        let document: Value = serde_json::from_slice(&raw)
            .map_err(|error| StickiesError::InvalidImport(error.to_string()))?;
        let entries = document
            .get("notes")
            .and_then(Value::as_array)
            .ok_or_else(|| StickiesError::InvalidImport("missing \"notes\" array".to_string()))?;

        let mut imported = 0usize;
        for (index, entry) in entries.iter().enumerate() {
            let note = match Note::deserialize(entry) {
                Ok(note) => note,
                Err(error) => {
                    tracing::warn!(index, error = %error, "skipping malformed note entry");
                    continue;
                }
            };
            match self.save(note) {
                Ok(_) => imported += 1,
                Err(error) => {
                    tracing::warn!(index, error = %error, "failed to import note entry");
                }
            }
        }

        tracing::info!(path = %path.display(), imported, total = entries.len(), "imported notes");
        if imported == 0 {
            return Err(StickiesError::ImportEmpty);
        }
        Ok(imported)
    }

    /// Give every untitled note a title derived from its content.
    ///
    /// `updated_at` is left alone; this is maintenance, not an edit.
    pub fn retitle_untitled(&mut self) -> Result<RetitleReport> {
        let mut report = RetitleReport {
            updated: 0,
            total: self.notes.len(),
        };
        let candidates: Vec<Note> = self
            .notes
            .values()
            .filter(|note| note.title.is_empty() || note.title == UNTITLED)
            .cloned()
            .collect();

        for mut note in candidates {
            let title = derive_title(&note.content);
            if title == note.title {
                continue;
            }
            note.title = title;
            self.save(note)?;
            report.updated += 1;
        }
        Ok(report)
    }

    fn require(&self, id: &str) -> Result<&Note> {
        self.notes
            .get(id)
            .ok_or_else(|| StickiesError::NoteNotFound(id.to_string()))
    }

    /// Apply `change` to a copy of the note and save the copy.
    fn mutate<F>(&mut self, id: &str, change: F) -> Result<&Note>
    where
        F: FnOnce(&mut Note) -> Result<()>,
    {
        let mut note = self.require(id)?.clone();
        change(&mut note)?;
        self.save(note)
    }

    /// Fresh time-based id not used by any known note or file.
    fn unique_id(&self) -> String {
        let mut id = generate_note_id();
        while self.is_taken(&id) {
            id = match note_id_millis(&id) {
                Some(millis) => note_id_from_millis(millis + 1),
                None => generate_note_id(),
            };
        }
        id
    }

    fn is_taken(&self, id: &str) -> bool {
        self.notes.contains_key(id) || self.note_path(id).exists()
    }
}

fn is_note_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(NOTE_EXT)
}

fn read_note_file(path: &Path) -> Result<Note> {
    let bytes = fs::read(path)?;
    let note: Note = serde_json::from_slice(&bytes)?;
    validate_note_id(&note.id)?;
    Ok(note)
}

/// Write pretty JSON through a temp file in the target directory, then
/// rename it into place.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let bytes = serde_json::to_vec_pretty(value)?;
    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(&bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|error| StickiesError::Io(error.error))?;
    Ok(())
}
