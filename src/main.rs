use clap::Parser;
use stickies::cli::{
    handle_delete, handle_edit, handle_export, handle_get, handle_import, handle_list, handle_new,
    handle_retitle, handle_search, handle_templates, Cli, Commands,
};
use stickies::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::resolve(cli.data_dir);

    let result = match cli.command {
        Commands::New(cmd) => handle_new(&config, cmd),
        Commands::List { json } => handle_list(&config, json),
        Commands::Get { id, json } => handle_get(&config, id, json),
        Commands::Search { query, limit, json } => handle_search(&config, query, limit, json),
        Commands::Edit(cmd) => handle_edit(&config, cmd),
        Commands::Delete { id, force } => handle_delete(&config, id, force),
        Commands::Templates { json } => handle_templates(json),
        Commands::Export { path } => handle_export(&config, path),
        Commands::Import { path } => handle_import(&config, path),
        Commands::Retitle { json } => handle_retitle(&config, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
