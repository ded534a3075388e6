use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stickies")]
#[command(version, about = "Sticky notes backed by plain JSON files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to $STICKIES_DATA_DIR, then ./data)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    New(NewCommand),

    /// List all notes, most recently updated first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note ID (full id or a unique suffix such as "0123")
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search titles and content
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a note's content, title, geometry or appearance
    Edit(EditCommand),

    /// Delete a note
    Delete {
        /// Note ID (full id or a unique suffix)
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List the built-in templates
    Templates {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export every note to a single JSON file
    Export {
        /// Destination file
        path: PathBuf,
    },

    /// Import notes from an exported JSON file
    Import {
        /// Source file
        path: PathBuf,
    },

    /// Give untitled notes a title taken from their content
    Retitle {
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct NewCommand {
    /// Note content
    pub content: Option<String>,

    /// Read content from stdin
    #[arg(long, conflicts_with_all = ["content", "template"])]
    pub stdin: bool,

    /// Start from a template (todo, meeting, code, shopping, ideas)
    #[arg(long, short = 't', conflicts_with = "content")]
    pub template: Option<String>,

    /// Note color as #RRGGBB
    #[arg(long)]
    pub color: Option<String>,

    /// Font size (8, 10, 12, 14, 16, 18, 24)
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EditCommand {
    /// Note ID (full id or a unique suffix)
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New content (the title is re-derived from it)
    #[arg(long, conflicts_with = "stdin")]
    pub content: Option<String>,

    /// Read new content from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Horizontal position
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<i32>,

    /// Vertical position
    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<i32>,

    /// Width, clamped to 200..=800
    #[arg(long)]
    pub width: Option<i32>,

    /// Height, clamped to 200..=600
    #[arg(long)]
    pub height: Option<i32>,

    /// Note color as #RRGGBB
    #[arg(long)]
    pub color: Option<String>,

    /// Font size (8, 10, 12, 14, 16, 18, 24)
    #[arg(long, conflicts_with_all = ["bigger", "smaller"])]
    pub font_size: Option<u32>,

    /// Step to the next larger font size
    #[arg(long, conflicts_with = "smaller")]
    pub bigger: bool,

    /// Step to the next smaller font size
    #[arg(long)]
    pub smaller: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
