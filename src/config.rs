//! Where to sync: the workspace root, the table and the target plan.

use crate::plan::{default_targets, Target, TABLE_PATH};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine current directory: {0}")]
    CurrentDir(std::io::Error),
}

/// Everything the orchestrator needs to know about one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub workspace_root: PathBuf,
    /// Offsets table, relative to `workspace_root`
    pub table_path: PathBuf,
    pub targets: Vec<Target>,
}

impl SyncConfig {
    /// Default table location and target plan under `workspace_root`.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            table_path: PathBuf::from(TABLE_PATH),
            targets: default_targets(),
        }
    }

    pub fn with_plan(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    /// Absolute location of `relative` inside the workspace.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.workspace_root.join(relative)
    }

    pub fn table_file(&self) -> PathBuf {
        self.resolve(&self.table_path)
    }
}

/// Resolve the workspace root: the explicit path argument if given, the
/// current directory otherwise.
///
/// The explicit path is taken as is. A root that does not exist shows up
/// as a missing offsets table.
pub fn resolve_workspace(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path),
        None => env::current_dir().map_err(ConfigError::CurrentDir),
    }
}
