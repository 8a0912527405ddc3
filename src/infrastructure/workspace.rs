//! Journal workspace on disk

use crate::error::{BitacoraError, Result};
use crate::infrastructure::config::{Config, WORKSPACE_DIR};
use crate::infrastructure::store::{FileBucket, FileTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "BITACORA_ROOT";

/// Unsaved entry kept between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub title: String,
    pub content: String,
    /// Comma-separated, as typed
    pub tags: String,
}

/// A directory containing `.bitacora/`
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: PathBuf) -> Self {
        Workspace { root }
    }

    /// Discover the workspace root.
    /// First checks BITACORA_ROOT, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_workspace_dir(&path) {
                return Ok(Workspace::new(path));
            }
            return Err(BitacoraError::Config(format!(
                "{} is set to '{}' but no .bitacora directory found. \
                Run 'bitacora init' in that directory or unset {}.",
                ROOT_ENV,
                path.display(),
                ROOT_ENV
            )));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` until a directory containing `.bitacora/` is found
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_workspace_dir(&current) {
                return Ok(Workspace::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(BitacoraError::NotBitacoraDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_workspace_dir(path: &Path) -> bool {
        path.join(WORKSPACE_DIR).is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_workspace_dir(&self.root)
    }

    fn workspace_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    /// Local stand-in for the configured table
    pub fn table(&self, config: &Config) -> FileTable {
        let dir = self
            .data_dir(config)
            .join("tables")
            .join(&config.table);
        FileTable::new(config.table.clone(), dir)
    }

    /// Local stand-in for the configured bucket
    pub fn bucket(&self, config: &Config) -> FileBucket {
        let dir = self
            .data_dir(config)
            .join("buckets")
            .join(&config.bucket);
        FileBucket::new(config.bucket.clone(), dir)
    }

    fn data_dir(&self, config: &Config) -> PathBuf {
        self.workspace_dir().join("data").join(&config.region)
    }

    /// Optional custom document template
    pub fn template_path(&self) -> PathBuf {
        self.workspace_dir().join("templates").join("entry.md")
    }

    fn draft_path(&self) -> PathBuf {
        self.workspace_dir().join("draft.toml")
    }

    pub fn load_draft(&self) -> Result<Option<Draft>> {
        let path = self.draft_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        Ok(Some(toml::from_str(&contents)?))
    }

    pub fn save_draft(&self, draft: &Draft) -> Result<()> {
        let contents = toml::to_string_pretty(draft)?;
        fs::write(self.draft_path(), contents)?;
        Ok(())
    }

    /// Remove the saved draft; returns whether one existed
    pub fn clear_draft(&self) -> Result<bool> {
        let path = self.draft_path();
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}
