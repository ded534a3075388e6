use std::io::{self, Read};
use std::path::PathBuf;

use crate::config::Config;
use crate::entity::{FontStep, Note, Template, COLOR_PALETTE};
use crate::error::{Result, StickiesError};
use crate::storage::{NoteStore, NoteUpdate};

use super::commands::{EditCommand, NewCommand};

const PREVIEW_LENGTH: usize = 50;

/// Resolve a full id or a unique id suffix to a stored note id.
fn find_note_id(store: &NoteStore, id: &str) -> Result<String> {
    // Every id ends with the empty string.
    if id.trim().is_empty() {
        return Err(StickiesError::NoteNotFound(id.to_string()));
    }
    if store.get(id).is_some() {
        return Ok(id.to_string());
    }

    let matches: Vec<&Note> = store
        .list()
        .into_iter()
        .filter(|note| note.id.ends_with(id))
        .collect();

    match matches.as_slice() {
        [note] => Ok(note.id.clone()),
        [] => Err(StickiesError::NoteNotFound(id.to_string())),
        many => Err(StickiesError::Storage(format!(
            "'{}' matches {} notes; use a longer id",
            id,
            many.len()
        ))),
    }
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn print_summary(verb: &str, note: &Note) {
    println!("{} note {} - {}", verb, note.id, note.title);
}

pub fn handle_new(config: &Config, cmd: NewCommand) -> Result<()> {
    let mut store = NoteStore::open(config)?;

    let note = if let Some(template_id) = cmd.template.as_deref() {
        store.create_from_template(template_id, cmd.color.as_deref(), cmd.font_size)?
    } else {
        let content = if cmd.stdin {
            read_stdin()?
        } else {
            cmd.content.unwrap_or_default()
        };
        store.create_note(&content, cmd.color.as_deref(), cmd.font_size)?
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        print_summary("Created", note);
    }

    Ok(())
}

pub fn handle_list(config: &Config, json: bool) -> Result<()> {
    let store = NoteStore::open(config)?;
    let notes = store.list();

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        println!("Notes ({}):\n", notes.len());
        for note in notes {
            println!(
                "  {} [{}] {}  ({})",
                note.id, note.color, note.title, note.updated_at
            );
        }
    }

    Ok(())
}

pub fn handle_get(config: &Config, id: String, json: bool) -> Result<()> {
    let store = NoteStore::open(config)?;
    let id = find_note_id(&store, &id)?;
    let note = store
        .get(&id)
        .ok_or_else(|| StickiesError::NoteNotFound(id.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("Note {}", note.id);
        println!("Title: {}", note.title);
        println!("Color: {}  Font: {}pt", note.color, note.font_size);
        println!(
            "Position: {},{}  Size: {}x{}",
            note.x, note.y, note.w, note.h
        );
        println!("Created: {}", note.created_at);
        println!("Updated: {}", note.updated_at);
        println!("Lines: {}  Characters: {}", note.line_count(), note.char_count());
        if !note.content.is_empty() {
            println!("\n{}", note.content);
        }
    }

    Ok(())
}

pub fn handle_search(config: &Config, query: String, limit: usize, json: bool) -> Result<()> {
    let store = NoteStore::open(config)?;
    let hits: Vec<_> = store.search(&query).into_iter().take(limit).collect();

    if json {
        #[derive(serde::Serialize)]
        struct SearchResultJson<'a> {
            id: &'a str,
            title: &'a str,
            occurrences: usize,
            preview: String,
        }

        let json_results: Vec<SearchResultJson> = hits
            .iter()
            .map(|hit| SearchResultJson {
                id: &hit.note.id,
                title: &hit.note.title,
                occurrences: hit.occurrences,
                preview: hit.note.preview(PREVIEW_LENGTH),
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&json_results)?);
    } else if hits.is_empty() {
        println!("No results found for '{}'.", query);
    } else {
        println!("Search results for '{}':\n", query);
        for hit in hits {
            println!("  {} ({}x) {}", hit.note.id, hit.occurrences, hit.note.title);
            let preview = hit.note.preview(PREVIEW_LENGTH).replace('\n', " ");
            if !preview.is_empty() {
                println!("      {}", preview);
            }
        }
    }

    Ok(())
}

pub fn handle_edit(config: &Config, cmd: EditCommand) -> Result<()> {
    let mut store = NoteStore::open(config)?;
    let id = find_note_id(&store, &cmd.id)?;

    let content = if cmd.stdin {
        Some(read_stdin()?)
    } else {
        cmd.content
    };
    let font_step = if cmd.bigger {
        Some(FontStep::Up)
    } else if cmd.smaller {
        Some(FontStep::Down)
    } else {
        None
    };

    let updates = NoteUpdate {
        content,
        title: cmd.title,
        x: cmd.x,
        y: cmd.y,
        w: cmd.width,
        h: cmd.height,
        color: cmd.color,
        font_size: cmd.font_size,
        font_step,
    };
    if updates.is_empty() {
        return Err(StickiesError::Storage(
            "Nothing to change; pass at least one edit flag".to_string(),
        ));
    }

    let note = store.update(&id, updates)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        print_summary("Updated", note);
    }

    Ok(())
}

pub fn handle_delete(config: &Config, id: String, force: bool) -> Result<()> {
    let mut store = NoteStore::open(config)?;
    let id = find_note_id(&store, &id)?;
    let title = store
        .get(&id)
        .map(|note| note.title.clone())
        .unwrap_or_default();

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete note {} - {}? [y/N] ", id, title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(StickiesError::Storage(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    if !store.delete(&id)? {
        return Err(StickiesError::NoteNotFound(id));
    }
    println!("Deleted note {} - {}", id, title);

    Ok(())
}

pub fn handle_templates(json: bool) -> Result<()> {
    let templates = Template::all();

    if json {
        #[derive(serde::Serialize)]
        struct CatalogJson<'a> {
            templates: &'a [Template],
            palette: &'a [&'a str],
        }

        let catalog = CatalogJson {
            templates,
            palette: &COLOR_PALETTE,
        };
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        println!("Templates:\n");
        for template in templates {
            println!("  {:<9} [{}] {}", template.id, template.color, template.name);
        }
        println!("\nColors: {}", COLOR_PALETTE.join(" "));
    }

    Ok(())
}

pub fn handle_export(config: &Config, path: PathBuf) -> Result<()> {
    let store = NoteStore::open(config)?;
    let total = store.export(&path)?;
    println!("Exported {} notes to {}", total, path.display());
    Ok(())
}

pub fn handle_import(config: &Config, path: PathBuf) -> Result<()> {
    let mut store = NoteStore::open(config)?;
    let imported = store.import(&path)?;
    println!("Imported {} notes from {}", imported, path.display());
    Ok(())
}

pub fn handle_retitle(config: &Config, json: bool) -> Result<()> {
    let mut store = NoteStore::open(config)?;
    let report = store.retitle_untitled()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Updated {} out of {} notes.",
            report.updated, report.total
        );
    }
    Ok(())
}
