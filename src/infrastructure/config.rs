//! Configuration management

use crate::error::{BitacoraError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub const WORKSPACE_DIR: &str = ".bitacora";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_TABLE: &str = "JournalEntries";
pub const DEFAULT_BUCKET: &str = "journal-entries";

pub const REGION_ENV: &str = "BITACORA_REGION";
pub const TABLE_ENV: &str = "BITACORA_TABLE";
pub const BUCKET_ENV: &str = "BITACORA_BUCKET";

/// Region, table and bucket names become directory names under `.bitacora/data`
fn storage_name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap())
}

/// Reject a region, table or bucket name that is not a single plain path segment
pub fn validate_storage_name(key: &str, value: &str) -> Result<()> {
    if storage_name_regex().is_match(value) {
        return Ok(());
    }
    Err(BitacoraError::Config(format!(
        "Invalid {} name: '{}'. Use letters, digits, '.', '_' or '-', starting with a letter or digit",
        key, value
    )))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "detect_default_editor")]
    pub editor: String,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            region: default_region(),
            table: default_table(),
            bucket: default_bucket(),
            editor: detect_default_editor(),
            created: Utc::now(),
        }
    }

    /// Load config from .bitacora/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(WORKSPACE_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BitacoraError::NotBitacoraDirectory(path.to_path_buf())
            } else {
                BitacoraError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| BitacoraError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .bitacora/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let workspace_dir = path.join(WORKSPACE_DIR);
        let config_path = workspace_dir.join("config.toml");

        if !workspace_dir.exists() {
            fs::create_dir_all(&workspace_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| BitacoraError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Apply BITACORA_REGION / BITACORA_TABLE / BITACORA_BUCKET from the environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_of = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(region) = value_of(REGION_ENV) {
            self.region = region;
        }
        if let Some(table) = value_of(TABLE_ENV) {
            self.table = table;
        }
        if let Some(bucket) = value_of(BUCKET_ENV) {
            self.bucket = bucket;
        }
        self
    }

    /// Check that region, table and bucket are usable as store names
    pub fn validate_storage_names(&self) -> Result<()> {
        validate_storage_name("region", &self.region)?;
        validate_storage_name("table", &self.table)?;
        validate_storage_name("bucket", &self.bucket)
    }

    /// Get the editor command, checking environment variables first
    pub fn get_editor(&self) -> String {
        std::env::var("VISUAL")
            .or_else(|_| std::env::var("EDITOR"))
            .unwrap_or_else(|_| self.editor.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

/// Detect default editor from environment or system
fn detect_default_editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}
