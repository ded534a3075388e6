mod commands;
mod handlers;

pub use commands::{Cli, Commands, EditCommand, NewCommand};
pub use handlers::{
    handle_delete, handle_edit, handle_export, handle_get, handle_import, handle_list,
    handle_new, handle_retitle, handle_search, handle_templates,
};
