//! Comic export.
//!
//! Writes a finished comic to a directory: one text file per panel and a
//! `comic.json` with the full panel data.

use crate::core::{Comic, ComicPanel};
use crate::error::{IoError, Result};
use crate::io::reader::write_file;
use std::fmt::Write;
use std::path::Path;

/// Name of the JSON manifest written next to the panel files.
pub const MANIFEST_NAME: &str = "comic.json";

fn panel_file_name(position: usize) -> String {
    format!("panel-{:03}.txt", position + 1)
}

fn is_panel_file(name: &str) -> bool {
    name.strip_prefix("panel-")
        .and_then(|rest| rest.strip_suffix(".txt"))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Deletes panel files left in `dir` by an earlier export.
fn remove_stale_panels(dir: &Path) -> Result<usize> {
    let io_err = |e: std::io::Error| IoError::WriteFailed {
        path: dir.to_string_lossy().to_string(),
        reason: e.to_string(),
    };

    let mut removed = 0;
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let stale = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_panel_file);
        if stale && path.is_file() {
            std::fs::remove_file(&path).map_err(io_err)?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Renders one panel as plain text.
#[must_use]
pub fn render_panel(panel: &ComicPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Panel {}", panel.position + 1);
    let _ = writeln!(out, "Style: {} ({})", panel.style.label(), panel.style);
    out.push('\n');
    out.push_str(&panel.text);
    out.push('\n');
    if !panel.dialogues.is_empty() {
        out.push('\n');
        for line in &panel.dialogues {
            let _ = writeln!(out, "- {line}");
        }
    }
    out
}

/// Exports `comic` into `out_dir`.
///
/// Panel files from an earlier export into the same directory are removed
/// first, so the directory always matches the manifest. Returns the written
/// paths, panel files first (in position order) and the manifest last.
///
/// # Errors
///
/// Returns [`crate::error::ValidationError::NoPanels`] for an empty comic,
/// or an I/O error if a file cannot be written.
pub fn export_comic<P: AsRef<Path>>(out_dir: P, comic: &Comic) -> Result<Vec<String>> {
    comic.export_ready()?;

    let out_path = out_dir.as_ref();
    if out_path.exists() {
        let removed = remove_stale_panels(out_path)?;
        if removed > 0 {
            tracing::debug!(removed, "removed stale panel files");
        }
    } else {
        std::fs::create_dir_all(out_path).map_err(|e| IoError::DirectoryFailed {
            path: out_path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
    }

    let mut paths = Vec::with_capacity(comic.panel_count() + 1);
    for panel in &comic.panels {
        let file_path = out_path.join(panel_file_name(panel.position));
        write_file(&file_path, &render_panel(panel))?;
        paths.push(file_path.to_string_lossy().to_string());
    }

    let manifest_path = out_path.join(MANIFEST_NAME);
    let manifest = serde_json::to_string_pretty(comic)?;
    write_file(&manifest_path, &manifest)?;
    paths.push(manifest_path.to_string_lossy().to_string());

    tracing::info!(dir = %out_path.display(), files = paths.len(), "comic exported");
    Ok(paths)
}
