//! Sync orchestration - loads the table and runs the target plan
//!
//! For every target this:
//! - Skips it silently if the file does not exist
//! - Reads it once and runs its passes in order
//! - Re-parses rewritten Rust sources before anything is written
//! - Writes it back only if the text actually changed

use crate::config::SyncConfig;
use crate::edit::EditError;
use crate::fs::{write_if_changed, FileSystem};
use crate::rewrite::apply_passes;
use crate::table::{parse_table, OffsetTable};
use crate::validate::{validate_rewrite, ValidationError};
use similar::TextDiff;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Offsets file not found: {}", .0.display())]
    TableNotFound(PathBuf),

    #[error("No offsets parsed from {}", .0.display())]
    EmptyTable(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("rewrite of {} failed: {source}", .path.display())]
    Edit { path: PathBuf, source: EditError },

    #[error("rewrite would break {}: {source}", .path.display())]
    Validation {
        path: PathBuf,
        source: ValidationError,
    },
}

/// What a sync did, by workspace-relative path, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "SyncReport should be reported to the user"]
pub struct SyncReport {
    /// Files whose contents were rewritten
    pub updated: Vec<PathBuf>,
    /// Files that were already up to date
    pub unchanged: Vec<PathBuf>,
    /// Targets that do not exist in the workspace
    pub skipped: Vec<PathBuf>,
}

impl SyncReport {
    pub fn has_changes(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// Read and parse the offsets table named by `config`.
///
/// A missing table or one without a single usable entry is an error.
pub fn load_table(config: &SyncConfig, fs: &dyn FileSystem) -> Result<OffsetTable, SyncError> {
    let path = config.table_file();
    if !fs.exists(&path) {
        return Err(SyncError::TableNotFound(path));
    }

    let raw = fs
        .read_to_string(&path)
        .map_err(|source| SyncError::Io {
            path: path.clone(),
            source,
        })?;

    let table = parse_table(&raw);
    if table.is_empty() {
        return Err(SyncError::EmptyTable(path));
    }

    tracing::debug!(entries = table.len(), path = %path.display(), "loaded offsets table");
    Ok(table)
}

/// Bring every target in `config` in line with the offsets table.
pub fn sync_workspace(config: &SyncConfig, fs: &dyn FileSystem) -> Result<SyncReport, SyncError> {
    let table = load_table(config, fs)?;
    sync_with_table(config, &table, fs)
}

/// Run the target plan against an already loaded table.
pub fn sync_with_table(
    config: &SyncConfig,
    table: &OffsetTable,
    fs: &dyn FileSystem,
) -> Result<SyncReport, SyncError> {
    let mut report = SyncReport::default();

    for target in &config.targets {
        let path = config.resolve(&target.path);
        if !fs.exists(&path) {
            tracing::debug!(path = %target.path.display(), "target missing, skipping");
            report.skipped.push(target.path.clone());
            continue;
        }

        let original = fs.read_to_string(&path).map_err(|source| SyncError::Io {
            path: path.clone(),
            source,
        })?;

        let rewritten =
            apply_passes(&original, &target.passes, table).map_err(|source| SyncError::Edit {
                path: path.clone(),
                source,
            })?;

        if rewritten != original {
            validate_rewrite(&path, &original, &rewritten).map_err(|source| {
                SyncError::Validation {
                    path: path.clone(),
                    source,
                }
            })?;
        }

        let written = write_if_changed(fs, &path, &original, &rewritten).map_err(|source| {
            SyncError::Io {
                path: path.clone(),
                source,
            }
        })?;

        if written {
            tracing::info!(path = %target.path.display(), "updated");
            if tracing::enabled!(tracing::Level::DEBUG) {
                let diff = TextDiff::from_lines(&original, &rewritten);
                let before = format!("{} (original)", target.path.display());
                let after = format!("{} (synced)", target.path.display());
                let mut unified = diff.unified_diff();
                unified.context_radius(1).header(&before, &after);
                tracing::debug!("\n{unified}");
            }
            report.updated.push(target.path.clone());
        } else {
            report.unchanged.push(target.path.clone());
        }
    }

    Ok(report)
}
