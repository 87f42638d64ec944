//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{ArtStyle, Comic, User};
use crate::error::Error;
use crate::io::preview;
use crate::segmenting::Segmenter;
use crate::storage::traits::StorageStats;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Everything `status` reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    /// Storage statistics.
    pub storage: StorageStats,
    /// Logged-in user name.
    pub user: Option<String>,
    /// Masked API key.
    pub api_key: Option<String>,
    /// Story length in characters.
    pub story_chars: usize,
    /// Number of panels in the stored comic.
    pub panel_count: usize,
}

/// Formats a status response.
#[must_use]
pub fn format_status(report: &StatusReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(report),
        OutputFormat::Json => format_json(report),
    }
}

fn format_status_text(report: &StatusReport) -> String {
    let mut output = String::new();
    output.push_str("panelize Status\n");
    output.push_str("===============\n\n");
    let _ = writeln!(
        output,
        "  User:          {}",
        report.user.as_deref().unwrap_or("(logged out)")
    );
    let _ = writeln!(
        output,
        "  API key:       {}",
        report.api_key.as_deref().unwrap_or("(none)")
    );
    let _ = writeln!(output, "  Story:         {} chars", report.story_chars);
    let _ = writeln!(output, "  Panels:        {}", report.panel_count);
    let _ = writeln!(output, "  Items:         {}", report.storage.item_count);
    let _ = writeln!(
        output,
        "  Stored size:   {}",
        format_size(report.storage.total_value_size)
    );
    let _ = writeln!(output, "  Schema:        v{}", report.storage.schema_version);
    if let Some(size) = report.storage.db_size {
        let _ = writeln!(output, "  DB size:       {size} bytes");
    }
    output
}

/// Formats segmented captions.
#[must_use]
pub fn format_segments(captions: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if captions.is_empty() {
                return "No panels.\n".to_string();
            }
            let mut output = String::new();
            for (i, caption) in captions.iter().enumerate() {
                let _ = writeln!(output, "{:>3}. {caption}", i + 1);
            }
            output
        }
        OutputFormat::Json => format_json(&captions),
    }
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    file: &'a str,
    captions: &'a [String],
}

/// Formats the captions of several stories, one block per story.
#[must_use]
pub fn format_batch(names: &[String], results: &[Vec<String>], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for (i, (name, captions)) in names.iter().zip(results).enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                let _ = writeln!(output, "{name}:");
                output.push_str(&format_segments(captions, OutputFormat::Text));
            }
            output
        }
        OutputFormat::Json => {
            let entries: Vec<BatchEntry<'_>> = names
                .iter()
                .zip(results)
                .map(|(name, captions)| BatchEntry {
                    file: name,
                    captions,
                })
                .collect();
            format_json(&entries)
        }
    }
}

#[derive(Serialize)]
struct StrategyEntry {
    name: &'static str,
    description: &'static str,
    parallel: bool,
}

/// Formats the available segmentation strategies.
#[must_use]
pub fn format_strategies(segmenters: &[Box<dyn Segmenter>], format: OutputFormat) -> String {
    let entries: Vec<StrategyEntry> = segmenters
        .iter()
        .map(|s| StrategyEntry {
            name: s.name(),
            description: s.description(),
            parallel: s.supports_parallel(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for entry in &entries {
                let _ = writeln!(output, "{:<10} {}", entry.name, entry.description);
            }
            output
        }
        OutputFormat::Json => format_json(&entries),
    }
}

/// Formats an image generation request.
#[must_use]
pub fn format_images(panel_count: usize, styles: &[ArtStyle], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let labels: Vec<String> = styles
                .iter()
                .map(|s| format!("{} ({s})", s.label()))
                .collect();
            format!(
                "Requested {panel_count} images in {}.\n",
                labels.join(", ")
            )
        }
        OutputFormat::Json => format_json(&serde_json::json!({
            "panels": panel_count,
            "styles": styles,
        })),
    }
}

/// Formats the panels of a comic.
#[must_use]
pub fn format_comic(comic: &Comic, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_comic_text(comic),
        OutputFormat::Json => format_json(comic),
    }
}

fn format_comic_text(comic: &Comic) -> String {
    if comic.is_empty() {
        return "No panels found.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "Comic: {} ({} panels)", comic.title, comic.panel_count());
    let _ = writeln!(
        output,
        "{:<4} {:<10} {:<11} {:<4} Caption",
        "#", "ID", "Style", "Dlg"
    );
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for panel in &comic.panels {
        let short_id: String = panel.id.chars().take(8).collect();
        let _ = writeln!(
            output,
            "{:<4} {:<10} {:<11} {:<4} {}",
            panel.position + 1,
            short_id,
            panel.style.value(),
            panel.dialogues.len(),
            preview(&panel.text, 40)
        );
    }

    output
}

#[derive(Serialize)]
struct StyleEntry {
    value: &'static str,
    label: &'static str,
    preview: &'static str,
}

/// Formats the list of illustration styles.
#[must_use]
pub fn format_styles(format: OutputFormat) -> String {
    let entries: Vec<StyleEntry> = ArtStyle::ALL
        .into_iter()
        .map(|s| StyleEntry {
            value: s.value(),
            label: s.label(),
            preview: s.preview(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for entry in &entries {
                let _ = writeln!(
                    output,
                    "{} {:<11} {}",
                    entry.preview, entry.value, entry.label
                );
            }
            output
        }
        OutputFormat::Json => format_json(&entries),
    }
}

/// Formats the logged-in user.
#[must_use]
pub fn format_user(user: Option<&User>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => user.map_or_else(
            || "Not logged in.\n".to_string(),
            |u| format!("{}\n", u.username),
        ),
        OutputFormat::Json => format_json(&serde_json::json!({ "user": user })),
    }
}

/// Formats the result of an export.
#[must_use]
pub fn format_export(paths: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Wrote {} files:", paths.len());
            for path in paths {
                let _ = writeln!(output, "  {path}");
            }
            output
        }
        OutputFormat::Json => format_json(&serde_json::json!({
            "count": paths.len(),
            "files": paths,
        })),
    }
}

/// Formats a plain message, wrapping it as `{"message": ...}` for JSON.
#[must_use]
pub fn format_message(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{message}\n"),
        OutputFormat::Json => format_json(&serde_json::json!({ "message": message })),
    }
}

/// Formats an error for display.
///
/// JSON errors carry a `kind` naming the failing layer so scripts can
/// branch without matching on message text.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            let kind = match error {
                Error::Storage(_) => "storage",
                Error::Segmenting(_) => "segmenting",
                Error::Io(_) => "io",
                Error::Command(_) => "command",
                Error::Validation(_) => "validation",
            };
            format_json(&serde_json::json!({
                "error": {
                    "kind": kind,
                    "message": error.to_string(),
                }
            }))
        }
    }
}

/// Serializes a value as pretty-printed JSON.
#[must_use]
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a byte size as human-readable.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
