//! CLI layer for panelize.
//!
//! Provides the command-line interface using clap, with commands for
//! segmenting stories and editing the stored comic.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, KeyCommands, PanelCommands};
