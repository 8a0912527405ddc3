//! Config management use case

use crate::error::{BitacoraError, Result};
use crate::infrastructure::config::validate_storage_name;
use crate::infrastructure::{Config, Workspace};

/// Service for reading and changing the workspace configuration
pub struct ConfigService {
    workspace: Workspace,
}

impl ConfigService {
    pub fn new(workspace: Workspace) -> Self {
        ConfigService { workspace }
    }

    /// Get a single config value as stored on disk
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.workspace.load_config()?;

        match key {
            "region" => Ok(config.region),
            "table" => Ok(config.table),
            "bucket" => Ok(config.bucket),
            "editor" => Ok(config.editor),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(BitacoraError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: region, table, bucket, editor, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.workspace.load_config()?;
        let value = value.trim();

        let field = match key {
            "region" => &mut config.region,
            "table" => &mut config.table,
            "bucket" => &mut config.bucket,
            "editor" => &mut config.editor,
            "created" => {
                return Err(BitacoraError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(BitacoraError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: region, table, bucket, editor",
                    key
                )));
            }
        };

        if value.is_empty() && key != "editor" {
            return Err(BitacoraError::Config(format!("'{}' cannot be empty", key)));
        }
        if key != "editor" {
            validate_storage_name(key, value)?;
        }
        *field = value.to_string();

        self.workspace.save_config(&config)?;
        tracing::info!(key, value, "config updated");
        Ok(())
    }

    /// Stored config plus the environment overrides in effect
    pub fn list(&self) -> Result<Config> {
        Ok(self.workspace.load_config()?.with_env_overrides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (TempDir, ConfigService) {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::new(temp.path().to_path_buf());
        workspace.save_config(&Config::new()).unwrap();
        (temp, ConfigService::new(workspace))
    }

    #[test]
    fn test_get_defaults() {
        let (_temp, service) = service();
        assert_eq!(service.get("region").unwrap(), "us-east-1");
        assert_eq!(service.get("table").unwrap(), "JournalEntries");
        assert_eq!(service.get("bucket").unwrap(), "journal-entries");
    }

    #[test]
    fn test_set_and_get() {
        let (_temp, service) = service();
        service.set("table", " Meals ").unwrap();
        service.set("editor", "vim").unwrap();

        assert_eq!(service.get("table").unwrap(), "Meals");
        assert_eq!(service.get("editor").unwrap(), "vim");
    }

    #[test]
    fn test_created_is_read_only() {
        let (_temp, service) = service();
        let err = service.set("created", "2020-01-01T00:00:00Z").unwrap_err();
        assert!(err.to_string().contains("read-only"));
        assert!(service.get("created").is_ok());
    }

    #[test]
    fn test_unknown_key() {
        let (_temp, service) = service();
        assert!(matches!(
            service.get("mode"),
            Err(BitacoraError::Config(_))
        ));
        assert!(matches!(
            service.set("mode", "x"),
            Err(BitacoraError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_empty_store_name() {
        let (_temp, service) = service();
        assert!(service.set("bucket", "  ").is_err());
        assert_eq!(service.get("bucket").unwrap(), "journal-entries");
    }

    #[test]
    fn test_rejects_store_name_outside_data_dir() {
        let (_temp, service) = service();
        assert!(matches!(
            service.set("table", "../../x"),
            Err(BitacoraError::Config(_))
        ));
        assert_eq!(service.get("table").unwrap(), "JournalEntries");
    }
}
