//! Command-line front end for MindNote.
//!
//! # Responsibility
//! - Drive the same store, views and reflection client the app uses, one
//!   command per invocation.
//! - Keep output plain text suitable for terminals and scripts.

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use mindnote_core::display::format_editor_date;
use mindnote_core::view::note_list::{EMPTY_STATE_HINT, EMPTY_STATE_TITLE};
use mindnote_core::view::random_quote;
use mindnote_core::{
    init_logging, init_stderr_logging, ApiKeyPanel, AppConfig, CredentialVault, NoteId,
    NoteListView, NotePatch, NotesStore, ReflectionClient, ReflectionPane, SaveOutcome,
    SqliteKvStore,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mindnote",
    version,
    about = "Personal notes with AI-assisted reflection"
)]
struct Cli {
    /// Storage file; overrides MINDNOTE_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level for stderr output when MINDNOTE_LOG_DIR is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "List notes, newest first")]
    List,

    #[command(about = "Create a note and select it")]
    New {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },

    #[command(about = "Print one note")]
    Show { id: String },

    #[command(about = "Change a note's title and/or content")]
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },

    #[command(about = "Delete a note after confirmation")]
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    #[command(about = "Ask for a reflection on a note")]
    Reflect { id: String },

    #[command(subcommand, about = "Manage the reflection API key")]
    Key(KeyCommand),

    #[command(about = "Print a random quote")]
    Quote,
}

#[derive(Subcommand)]
enum KeyCommand {
    #[command(about = "Store the API key")]
    Set { value: String },
    #[command(about = "Remove the stored API key")]
    Remove,
    #[command(about = "Show whether a key is stored")]
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    start_logging(&config, &cli.log_level)?;

    match cli.command {
        Command::List => list(&config),
        Command::New { title, content } => create(&config, title, content),
        Command::Show { id } => show(&config, &id),
        Command::Edit { id, title, content } => edit(&config, &id, title, content),
        Command::Delete { id, yes } => delete(&config, &id, yes),
        Command::Reflect { id } => reflect(&config, &id),
        Command::Key(action) => key(&config, action),
        Command::Quote => {
            println!("{}", random_quote(&mut rand::thread_rng()));
            Ok(())
        }
    }
}

fn start_logging(config: &AppConfig, stderr_level: &str) -> Result<()> {
    let result = match &config.log_dir {
        Some(dir) => init_logging(config.log_level, &dir.to_string_lossy()),
        None => init_stderr_logging(stderr_level),
    };
    result.map_err(|err| anyhow!(err))
}

fn open_storage(config: &AppConfig) -> Result<SqliteKvStore> {
    SqliteKvStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))
}

fn open_store(config: &AppConfig) -> Result<NotesStore<SqliteKvStore>> {
    Ok(NotesStore::load(open_storage(config)?))
}

fn list(config: &AppConfig) -> Result<()> {
    let store = open_store(config)?;
    let view = NoteListView::from_store(&store, &Local::now());
    if view.is_empty() {
        println!("{EMPTY_STATE_TITLE}");
        println!("{EMPTY_STATE_HINT}");
        return Ok(());
    }

    println!("{}", view.count_label());
    for item in view.items() {
        let marker = if item.is_selected { '*' } else { ' ' };
        println!("{marker} {}  {:>6}  {}", item.id, item.date_label, item.title);
        println!("    {}", item.preview);
    }
    Ok(())
}

fn create(config: &AppConfig, title: Option<String>, content: Option<String>) -> Result<()> {
    let mut store = open_store(config)?;
    let id = store.create();
    let patch = NotePatch { title, content };
    if !patch.is_empty() {
        store.update(&id, patch);
    }
    println!("{id}");
    Ok(())
}

fn show(config: &AppConfig, id: &str) -> Result<()> {
    let store = open_store(config)?;
    let note = store
        .get(&NoteId::from(id))
        .ok_or_else(|| anyhow!("note `{id}` not found"))?;
    println!("{}", note.display_title());
    println!("{}", format_editor_date(&note.updated_at.with_timezone(&Local)));
    println!();
    println!("{}", note.content);
    Ok(())
}

fn edit(
    config: &AppConfig,
    id: &str,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let patch = NotePatch { title, content };
    if patch.is_empty() {
        bail!("nothing to change; pass --title and/or --content");
    }
    let mut store = open_store(config)?;
    if !store.update(&NoteId::from(id), patch) {
        bail!("note `{id}` not found");
    }
    Ok(())
}

fn delete(config: &AppConfig, id: &str, yes: bool) -> Result<()> {
    let mut store = open_store(config)?;
    let view = NoteListView::from_store(&store, &Local::now());
    let request = view
        .request_delete(&NoteId::from(id))
        .ok_or_else(|| anyhow!("note `{id}` not found"))?;

    if !yes && !confirm(&format!("{} ({})", request.message(), request.title()))? {
        request.cancel();
        println!("Cancelled.");
        return Ok(());
    }
    request.confirm(&mut store);
    println!("Deleted {id}.");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn reflect(config: &AppConfig, id: &str) -> Result<()> {
    let storage = open_storage(config)?;
    let store = NotesStore::load(&storage);
    let vault = CredentialVault::load(&storage);
    let note = store
        .get(&NoteId::from(id))
        .ok_or_else(|| anyhow!("note `{id}` not found"))?;

    let mut pane = ReflectionPane::new();
    let Some((ticket, request)) = pane.begin(note) else {
        bail!("{}", pane.error().unwrap_or_default());
    };
    let mode = vault.mode();
    if !mode.is_configured() {
        eprintln!("No API key stored; showing a placeholder reflection.");
    }
    let client = ReflectionClient::new(config.reflection.clone());
    pane.complete(&ticket, client.reflect(&mode, &request));

    match (pane.reflection(), pane.error()) {
        (Some(text), _) => {
            println!("{text}");
            Ok(())
        }
        (None, Some(message)) => bail!("{message}"),
        (None, None) => bail!("no reflection produced"),
    }
}

fn key(config: &AppConfig, action: KeyCommand) -> Result<()> {
    let mut vault = CredentialVault::load(open_storage(config)?);
    match action {
        KeyCommand::Set { value } => {
            let mut panel = ApiKeyPanel::open(&vault);
            panel.set_draft(value);
            match panel.save(&mut vault)? {
                SaveOutcome::Stored => println!("API key saved."),
                SaveOutcome::Ignored => bail!("API key is empty; nothing saved"),
            }
        }
        KeyCommand::Remove => {
            ApiKeyPanel::open(&vault).remove(&mut vault)?;
            println!("API key removed.");
        }
        KeyCommand::Status => {
            let mode = vault.mode();
            info!("event=key_status module=cli status=ok mode={}", mode.label());
            println!("{}", mode.label());
        }
    }
    Ok(())
}
