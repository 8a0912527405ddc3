//! Filesystem-backed table and bucket
//!
//! A table is a directory holding one `<key>.json` file per record; a bucket
//! is a directory tree whose relative file paths are the blob paths.

use super::{BlobStore, KeyValueStore, Provision, Provisioned, Record};
use crate::error::{BitacoraError, Result};
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

const RECORD_EXTENSION: &str = "json";

/// Keys usable as file names without escaping the table directory
fn key_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]*$").unwrap())
}

/// Table stored as a directory of JSON records
#[derive(Debug, Clone)]
pub struct FileTable {
    name: String,
    dir: PathBuf,
}

impl FileTable {
    pub fn new(name: impl Into<String>, dir: PathBuf) -> Self {
        FileTable {
            name: name.into(),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Option<PathBuf> {
        if key_regex().is_match(key) {
            Some(self.dir.join(format!("{}.{}", key, RECORD_EXTENSION)))
        } else {
            None
        }
    }

    fn ensure_exists(&self, fail: fn(String) -> BitacoraError) -> Result<()> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(fail(format!("table '{}' does not exist", self.name)))
        }
    }

    fn read_record(&self, path: &Path) -> Result<Record> {
        let contents = fs::read_to_string(path).map_err(|e| {
            BitacoraError::StorageRead(format!("{}: {}", path.display(), e))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            BitacoraError::StorageRead(format!("malformed record {}: {}", path.display(), e))
        })
    }
}

impl KeyValueStore for FileTable {
    fn put(&self, key: &str, record: &Record) -> Result<()> {
        self.ensure_exists(BitacoraError::StorageWrite)?;
        let path = self
            .record_path(key)
            .ok_or_else(|| BitacoraError::StorageWrite(format!("invalid key '{}'", key)))?;

        let contents = serde_json::to_string_pretty(record)?;
        write_replacing(&path, &contents).map_err(|e| {
            BitacoraError::StorageWrite(format!("{}: {}", path.display(), e))
        })?;

        tracing::debug!(table = %self.name, key, "put record");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Record>> {
        self.ensure_exists(BitacoraError::StorageRead)?;
        let Some(path) = self.record_path(key) else {
            return Ok(None);
        };

        if !path.is_file() {
            return Ok(None);
        }
        self.read_record(&path).map(Some)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.ensure_exists(BitacoraError::StorageWrite)?;
        let Some(path) = self.record_path(key) else {
            return Ok(());
        };

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(table = %self.name, key, "deleted record");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BitacoraError::StorageWrite(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn scan(&self) -> Result<Vec<Record>> {
        self.ensure_exists(BitacoraError::StorageRead)?;

        let mut records = Vec::new();
        for item in WalkDir::new(&self.dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let item = item.map_err(|e| BitacoraError::StorageRead(e.to_string()))?;
            let path = item.path();
            if item.file_type().is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION)
            {
                records.push(self.read_record(path)?);
            }
        }

        tracing::debug!(table = %self.name, count = records.len(), "scanned table");
        Ok(records)
    }
}

/// Write to a temp file in the same directory, then rename into place.
///
/// On Windows, `rename` does not overwrite existing files, so the destination
/// is removed first.
fn write_replacing(path: &Path, contents: &str) -> std::io::Result<()> {
    let tmp_name = format!(
        "{}.bitacora-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("record.json"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)?;

    if cfg!(windows) && path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)
}

impl Provision for FileTable {
    fn resource_name(&self) -> &str {
        &self.name
    }

    fn provision(&self) -> Result<Provisioned> {
        if self.dir.is_dir() {
            return Ok(Provisioned::AlreadyExists);
        }
        fs::create_dir_all(&self.dir)?;
        Ok(Provisioned::Created)
    }
}

/// Bucket stored as a directory tree
#[derive(Debug, Clone)]
pub struct FileBucket {
    name: String,
    dir: PathBuf,
}

impl FileBucket {
    pub fn new(name: impl Into<String>, dir: PathBuf) -> Self {
        FileBucket {
            name: name.into(),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a blob path, rejecting anything that could leave the bucket
    fn blob_path(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        safe.then(|| self.dir.join(relative))
    }
}

impl BlobStore for FileBucket {
    fn put(&self, path: &str, body: &str) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(BitacoraError::StorageWrite(format!(
                "bucket '{}' does not exist",
                self.name
            )));
        }
        let target = self
            .blob_path(path)
            .ok_or_else(|| BitacoraError::StorageWrite(format!("invalid blob path '{}'", path)))?;

        // Create parent directories if needed
        if let Some(parent) = target.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    BitacoraError::StorageWrite(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        fs::write(&target, body).map_err(|e| {
            BitacoraError::StorageWrite(format!("{}: {}", target.display(), e))
        })?;

        tracing::debug!(bucket = %self.name, path, "put blob");
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(BitacoraError::StorageRead(format!(
                "bucket '{}' does not exist",
                self.name
            )));
        }

        let mut paths = Vec::new();
        for item in WalkDir::new(&self.dir).min_depth(1) {
            let item = item.map_err(|e| BitacoraError::StorageRead(e.to_string()))?;
            if !item.file_type().is_file() {
                continue;
            }
            let Ok(relative) = item.path().strip_prefix(&self.dir) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if key.starts_with(prefix) {
                paths.push(key);
            }
        }

        paths.sort();
        Ok(paths)
    }
}

impl Provision for FileBucket {
    fn resource_name(&self) -> &str {
        &self.name
    }

    fn provision(&self) -> Result<Provisioned> {
        if self.dir.is_dir() {
            return Ok(Provisioned::AlreadyExists);
        }
        fs::create_dir_all(&self.dir)?;
        Ok(Provisioned::Created)
    }
}
