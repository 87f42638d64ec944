//! CLI command implementations.
//!
//! Contains the business logic for each CLI command. Every command that
//! touches the session loads it from storage, applies one change and
//! writes it back.

use crate::cli::output::{
    OutputFormat, StatusReport, format_batch, format_comic, format_export, format_images,
    format_json, format_message, format_segments, format_status, format_strategies,
    format_styles, format_user,
};
use crate::cli::parser::{Cli, Commands, KeyCommands, PanelCommands};
use crate::core::{
    ArtStyle, Comic, SAMPLE_STORY, Session, Story, StoryGenre, StoryLength, story_prompt,
};
use crate::error::{CommandError, Result, StorageError, ValidationError};
use crate::io::{export_comic, read_file, read_story};
use crate::segmenting::{Segmenter, available_strategies, create_segmenter};
use crate::storage::{SqliteStorage, Storage, clear_session, load_session, save_session};
use std::io;
use std::path::{Path, PathBuf};

/// Title given to comics built from inline or piped text.
const DEFAULT_TITLE: &str = "Untitled";

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        Commands::Init { force } => cmd_init(&db_path, *force, format),
        Commands::Status => cmd_status(&db_path, format),
        Commands::Reset { yes } => cmd_reset(&db_path, *yes, format),
        Commands::Login { username, password } => cmd_login(&db_path, username, password, format),
        Commands::Logout => cmd_logout(&db_path, format),
        Commands::Whoami => cmd_whoami(&db_path, format),
        Commands::Key(key_cmd) => match key_cmd {
            KeyCommands::Set { key } => cmd_key_set(&db_path, key, format),
            KeyCommands::Clear => cmd_key_clear(&db_path, format),
            KeyCommands::Show => cmd_key_show(&db_path, format),
        },
        Commands::Segment {
            files,
            text,
            strategy,
            save,
            style,
        } => cmd_segment(
            &db_path,
            files,
            text.as_deref(),
            strategy,
            *save,
            style,
            format,
        ),
        Commands::Strategies => cmd_strategies(format),
        Commands::Sample { save } => cmd_sample(&db_path, *save, format),
        Commands::Prompt { genre, length } => cmd_prompt(genre, length, format),
        Commands::Styles => Ok(format_styles(format)),
        Commands::Panels(panel_cmd) => cmd_panels(&db_path, panel_cmd, format),
        Commands::Images => cmd_images(&db_path, format),
        Commands::Export { out_dir } => cmd_export(&db_path, out_dir, format),
    }
}

/// Opens storage and ensures it's initialized.
fn open_storage(db_path: &Path) -> Result<SqliteStorage> {
    // Opening would create an empty file that `init` then refuses to touch.
    if !db_path.exists() {
        return Err(StorageError::NotInitialized.into());
    }

    let storage = SqliteStorage::open(db_path)?;

    if !storage.is_initialized()? {
        return Err(StorageError::NotInitialized.into());
    }

    Ok(storage)
}

/// Opens storage and loads the session.
fn open_session(db_path: &Path) -> Result<(SqliteStorage, Session)> {
    let storage = open_storage(db_path)?;
    let session = load_session(&storage)?;
    Ok((storage, session))
}

/// Resolves a panel reference (1-based number or identifier) to an identifier.
///
/// A reference that parses as a number is always treated as a position.
/// Otherwise an exact identifier wins, then a unique identifier prefix.
fn resolve_panel(comic: &Comic, reference: &str) -> Result<String> {
    let not_found = || -> crate::error::Error {
        ValidationError::PanelNotFound {
            id: reference.to_string(),
        }
        .into()
    };

    // An empty prefix would match every panel.
    if reference.trim().is_empty() {
        return Err(not_found());
    }

    if let Ok(number) = reference.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|i| comic.panels.get(i))
            .map(|p| p.id.clone())
            .ok_or_else(not_found);
    }

    if let Some(panel) = comic.panel(reference) {
        return Ok(panel.id.clone());
    }

    let mut matches = comic.panels.iter().filter(|p| p.id.starts_with(reference));
    match (matches.next(), matches.next()) {
        (Some(panel), None) => Ok(panel.id.clone()),
        _ => Err(not_found()),
    }
}

/// Converts a 1-based number from the command line into an index.
fn to_index(what: &'static str, number: usize, len: usize) -> Result<usize> {
    number.checked_sub(1).filter(|&i| i < len).ok_or_else(|| {
        ValidationError::OutOfRange {
            what,
            index: number,
            len,
        }
        .into()
    })
}

/// Text: the message. JSON: the message plus the edited comic.
fn format_edit(message: &str, comic: &Comic, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{message}\n"),
        OutputFormat::Json => format_json(&serde_json::json!({
            "message": message,
            "comic": comic,
        })),
    }
}

// ==================== Command Implementations ====================

fn cmd_init(db_path: &Path, force: bool, format: OutputFormat) -> Result<String> {
    if db_path.exists() && !force {
        return Err(CommandError::ExecutionFailed(
            "Database already exists. Use --force to reinitialize.".to_string(),
        )
        .into());
    }

    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to create directory: {e}"))
        })?;
    }

    if force && db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to remove existing database: {e}"))
        })?;
    }

    let mut storage = SqliteStorage::open(db_path)?;
    storage.init()?;
    save_session(&mut storage, &Session::new())?;

    Ok(format_message(
        &format!("Initialized panelize database at: {}", db_path.display()),
        format,
    ))
}

fn cmd_status(db_path: &Path, format: OutputFormat) -> Result<String> {
    let (storage, session) = open_session(db_path)?;
    let report = StatusReport {
        storage: storage.stats()?,
        user: session.user.as_ref().map(|u| u.username.clone()),
        api_key: session.api_key.as_ref().map(crate::core::ApiKey::masked),
        story_chars: session.story.char_count(),
        panel_count: session.comic.panel_count(),
    };
    Ok(format_status(&report, format))
}

fn cmd_reset(db_path: &Path, yes: bool, format: OutputFormat) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm reset. This will delete all data.".to_string(),
        )
        .into());
    }

    let mut storage = open_storage(db_path)?;
    storage.reset()?;
    save_session(&mut storage, &Session::new())?;

    Ok(format_message("panelize state reset successfully.", format))
}

fn cmd_login(db_path: &Path, username: &str, password: &str, format: OutputFormat) -> Result<String> {
    let (mut storage, mut session) = open_session(db_path)?;
    let name = session.login(username, password)?.username.clone();
    save_session(&mut storage, &session)?;
    Ok(format_message(&format!("Logged in as {name}."), format))
}

fn cmd_logout(db_path: &Path, format: OutputFormat) -> Result<String> {
    let (mut storage, mut session) = open_session(db_path)?;
    if !session.is_logged_in() {
        return Ok(format_message("Not logged in.", format));
    }
    session.logout();
    let removed = clear_session(&mut storage)?;
    tracing::debug!(removed, "cleared session keys");
    Ok(format_message("Logged out.", format))
}

fn cmd_whoami(db_path: &Path, format: OutputFormat) -> Result<String> {
    let (_, session) = open_session(db_path)?;
    Ok(format_user(session.user.as_ref(), format))
}

fn cmd_key_set(db_path: &Path, key: &str, format: OutputFormat) -> Result<String> {
    let (mut storage, mut session) = open_session(db_path)?;
    session.require_user()?;
    let masked = session.set_api_key(key)?.masked();
    save_session(&mut storage, &session)?;
    Ok(format_message(&format!("API key saved: {masked}"), format))
}

fn cmd_key_clear(db_path: &Path, format: OutputFormat) -> Result<String> {
    let (mut storage, mut session) = open_session(db_path)?;
    let message = if session.clear_api_key().is_some() {
        save_session(&mut storage, &session)?;
        "API key removed."
    } else {
        "No API key set."
    };
    Ok(format_message(message, format))
}

fn cmd_key_show(db_path: &Path, format: OutputFormat) -> Result<String> {
    let (_, session) = open_session(db_path)?;
    let key = session.require_api_key()?;
    Ok(format_message(&key.masked(), format))
}

fn cmd_segment(
    db_path: &Path,
    files: &[PathBuf],
    text: Option<&str>,
    strategy: &str,
    save: bool,
    style: &str,
    format: OutputFormat,
) -> Result<String> {
    let style: ArtStyle = style.parse()?;
    let segmenter = create_segmenter(strategy)?;

    if files.len() > 1 {
        if save {
            return Err(CommandError::InvalidArgument(
                "--save takes a single story".to_string(),
            )
            .into());
        }
        return segment_files(segmenter.as_ref(), files, format);
    }

    let (content, title) = match (files.first(), text) {
        (Some(path), _) => {
            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(DEFAULT_TITLE)
                .to_string();
            (read_file(path)?, title)
        }
        (None, Some(t)) => (t.to_string(), DEFAULT_TITLE.to_string()),
        (None, None) => (read_story(io::stdin().lock())?, DEFAULT_TITLE.to_string()),
    };

    let story = Story::new(content);
    let captions = segmenter.segment(&story.text);
    tracing::debug!(
        strategy = segmenter.name(),
        panels = captions.len(),
        "segmented story"
    );

    if save {
        if story.is_blank() {
            return Err(ValidationError::EmptyStory.into());
        }
        let (mut storage, mut session) = open_session(db_path)?;
        session.require_user()?;
        session.comic = Comic::from_story(title, story.clone(), segmenter.as_ref(), style);
        session.story = story;
        save_session(&mut storage, &session)?;
    }

    Ok(format_segments(&captions, format))
}

/// Segments several story files as one batch.
fn segment_files(
    segmenter: &dyn Segmenter,
    files: &[PathBuf],
    format: OutputFormat,
) -> Result<String> {
    let stories = files.iter().map(read_file).collect::<Result<Vec<_>>>()?;
    let results = segmenter.segment_all(&stories);
    tracing::debug!(
        strategy = segmenter.name(),
        stories = stories.len(),
        "segmented batch"
    );

    let names: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    Ok(format_batch(&names, &results, format))
}

fn cmd_strategies(format: OutputFormat) -> Result<String> {
    let segmenters = available_strategies()
        .into_iter()
        .map(create_segmenter)
        .collect::<Result<Vec<_>>>()?;
    Ok(format_strategies(&segmenters, format))
}

fn cmd_sample(db_path: &Path, save: bool, format: OutputFormat) -> Result<String> {
    let story = Story::sample();

    // Saving stands in for AI story generation, which needs a key.
    if save {
        let (mut storage, mut session) = open_session(db_path)?;
        session.require_user()?;
        session.require_api_key()?;
        let segmenter = create_segmenter("sentence")?;
        session.comic =
            Comic::from_story("Sample", story.clone(), segmenter.as_ref(), ArtStyle::default());
        session.story = story;
        save_session(&mut storage, &session)?;
    }

    match format {
        OutputFormat::Text => Ok(format!("{SAMPLE_STORY}\n")),
        OutputFormat::Json => Ok(format_json(&serde_json::json!({
            "story": SAMPLE_STORY,
            "saved": save,
        }))),
    }
}

fn cmd_prompt(genre: &str, length: &str, format: OutputFormat) -> Result<String> {
    let genre: StoryGenre = genre.parse()?;
    let length: StoryLength = length.parse()?;
    let prompt = story_prompt(genre, length);

    match format {
        OutputFormat::Text => Ok(format!("{prompt}\n")),
        OutputFormat::Json => Ok(format_json(&serde_json::json!({
            "genre": genre,
            "genre_label": genre.label(),
            "length": length,
            "length_label": length.label(),
            "sentences": length.sentence_range(),
            "prompt": prompt,
        }))),
    }
}

fn cmd_panels(db_path: &Path, cmd: &PanelCommands, format: OutputFormat) -> Result<String> {
    let (mut storage, mut session) = open_session(db_path)?;
    session.require_user()?;
    let comic = &mut session.comic;

    let message = match cmd {
        PanelCommands::List => return Ok(format_comic(comic, format)),
        PanelCommands::Add { style } => {
            let style: ArtStyle = match style {
                Some(s) => s.parse()?,
                None => comic.panels.first().map(|p| p.style).unwrap_or_default(),
            };
            let id = comic.add_panel(style);
            format!("Added panel {} ({id}).", comic.panel_count())
        }
        PanelCommands::Remove { panel } => {
            let id = resolve_panel(comic, panel)?;
            let removed = comic.remove_panel(&id)?;
            format!("Removed panel {}.", removed.position + 1)
        }
        PanelCommands::Text { panel, text } => {
            let id = resolve_panel(comic, panel)?;
            comic.update_text(&id, text.as_str())?;
            format!("Updated caption of panel {panel}.")
        }
        PanelCommands::Style { style, panel, all } => {
            let style: ArtStyle = style.parse()?;
            match (panel, all) {
                (_, true) => {
                    comic.set_all_styles(style);
                    format!("Set style of all panels to {style}.")
                }
                (Some(panel), false) => {
                    let id = resolve_panel(comic, panel)?;
                    comic.set_style(&id, style)?;
                    format!("Set style of panel {panel} to {style}.")
                }
                (None, false) => {
                    return Err(CommandError::MissingArgument("panel".to_string()).into());
                }
            }
        }
        PanelCommands::Dialogue {
            panel,
            line,
            remove,
        } => {
            let id = resolve_panel(comic, panel)?;
            if let Some(number) = remove {
                let len = comic.panel(&id).map_or(0, |p| p.dialogues.len());
                let index = to_index("dialogue", *number, len)?;
                let removed = comic.remove_dialogue(&id, index)?;
                format!("Removed dialogue: {removed}")
            } else {
                let line = line
                    .as_deref()
                    .ok_or_else(|| CommandError::MissingArgument("line".to_string()))?;
                comic.add_dialogue(&id, line)?;
                format!("Added dialogue to panel {panel}.")
            }
        }
        PanelCommands::Move { panel, position } => {
            let id = resolve_panel(comic, panel)?;
            let index = to_index("position", *position, comic.panel_count())?;
            comic.move_panel(&id, index)?;
            format!("Moved panel {panel} to position {position}.")
        }
    };

    save_session(&mut storage, &session)?;
    Ok(format_edit(&message, &session.comic, format))
}

fn cmd_images(db_path: &Path, format: OutputFormat) -> Result<String> {
    let (_, session) = open_session(db_path)?;
    session.require_user()?;
    session.require_api_key()?;
    session.comic.export_ready()?;

    let styles = session.comic.styles();
    tracing::info!(
        panels = session.comic.panel_count(),
        styles = styles.len(),
        "image generation requested"
    );
    Ok(format_images(session.comic.panel_count(), &styles, format))
}

fn cmd_export(db_path: &Path, out_dir: &Path, format: OutputFormat) -> Result<String> {
    let (_, session) = open_session(db_path)?;
    session.require_user()?;
    let paths = export_comic(out_dir, &session.comic)?;
    Ok(format_export(&paths, format))
}
