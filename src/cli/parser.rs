//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// panelize: turn a short story into comic panels.
///
/// Splits story text into sentence pairs, one caption per panel, and keeps
/// the editing session in a local database.
#[derive(Parser, Debug)]
#[command(name = "panelize")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the session database file.
    ///
    /// Defaults to `.panelize/panelize-state.db` in the current directory.
    #[arg(short, long, env = "PANELIZE_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the session database.
    ///
    /// Creates the database file and schema if they don't exist.
    Init {
        /// Force re-initialization (destroys existing data).
        #[arg(short, long)]
        force: bool,
    },

    /// Show session status.
    Status,

    /// Reset the session (delete all stored data).
    Reset {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Log in locally.
    Login {
        /// User name.
        username: String,

        /// Password (checked for presence only, never stored).
        #[arg(short, long)]
        password: String,
    },

    /// Log out and clear the key, story and comic.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Manage the stored API key.
    #[command(subcommand)]
    Key(KeyCommands),

    /// Split a story into panel captions.
    ///
    /// Reads from FILE, from --text, or from stdin when neither is given.
    /// Several files are segmented as one batch.
    Segment {
        /// Story files.
        files: Vec<PathBuf>,

        /// Story text given inline.
        #[arg(short, long, conflicts_with = "files")]
        text: Option<String>,

        /// Segmentation strategy (sentence, parallel).
        #[arg(short, long, default_value = "sentence")]
        strategy: String,

        /// Store the story and the resulting comic in the session.
        #[arg(long)]
        save: bool,

        /// Illustration style for the new panels.
        #[arg(long, default_value = "comic")]
        style: String,
    },

    /// List segmentation strategies.
    Strategies,

    /// Print the built-in sample story.
    Sample {
        /// Store the sample story and its comic in the session (needs an API key).
        #[arg(long)]
        save: bool,
    },

    /// Print the story generation prompt for a genre and length.
    Prompt {
        /// Genre (adventure, comedy, drama, fantasy, mystery, romance, scifi, superhero).
        genre: String,

        /// Length (short, medium, long).
        length: String,
    },

    /// List illustration styles.
    Styles,

    /// Edit the panels of the stored comic.
    #[command(subcommand)]
    Panels(PanelCommands),

    /// Request illustrations for every panel of the stored comic.
    ///
    /// Needs an API key. No request leaves the machine; the command reports
    /// what would be generated.
    Images,

    /// Export the stored comic to a directory.
    Export {
        /// Output directory.
        #[arg(short, long, default_value = ".panelize/export")]
        out_dir: PathBuf,
    },
}

/// API key subcommands.
#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Validate and store an API key.
    Set {
        /// The key.
        key: String,
    },

    /// Remove the stored key.
    Clear,

    /// Show the stored key (masked).
    Show,
}

/// Panel editing subcommands.
///
/// Panels are addressed by 1-based number or by identifier.
#[derive(Subcommand, Debug)]
pub enum PanelCommands {
    /// List panels.
    #[command(alias = "ls")]
    List,

    /// Append a placeholder panel.
    Add {
        /// Illustration style (defaults to the comic's first panel style).
        #[arg(long)]
        style: Option<String>,
    },

    /// Remove a panel.
    #[command(alias = "rm")]
    Remove {
        /// Panel number or identifier.
        panel: String,
    },

    /// Replace a panel's caption.
    Text {
        /// Panel number or identifier.
        panel: String,

        /// New caption.
        text: String,
    },

    /// Set the illustration style of one panel or all panels.
    Style {
        /// Style value.
        style: String,

        /// Panel number or identifier (omit with --all).
        #[arg(required_unless_present = "all")]
        panel: Option<String>,

        /// Apply to every panel.
        #[arg(long, conflicts_with = "panel")]
        all: bool,
    },

    /// Add or remove a dialogue line.
    Dialogue {
        /// Panel number or identifier.
        panel: String,

        /// Line to append.
        #[arg(required_unless_present = "remove")]
        line: Option<String>,

        /// Remove the dialogue line with this 1-based number instead.
        #[arg(long, conflicts_with = "line")]
        remove: Option<usize>,
    },

    /// Move a panel to a new 1-based position.
    #[command(alias = "mv")]
    Move {
        /// Panel number or identifier.
        panel: String,

        /// Target position.
        position: usize,
    },
}

impl Cli {
    /// Returns the database path, using default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }
}
