//! Initialize workspace use case

use crate::application::entry_repository::{repository_for, SetupReport};
use crate::error::Result;
use crate::infrastructure::{Config, Workspace};
use std::fs;
use std::path::Path;

/// Storage names chosen at init time; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct StorageSettings {
    pub region: Option<String>,
    pub table: Option<String>,
    pub bucket: Option<String>,
}

impl StorageSettings {
    fn apply(&self, config: &mut Config) {
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(table) = &self.table {
            config.table = table.clone();
        }
        if let Some(bucket) = &self.bucket {
            config.bucket = bucket.clone();
        }
    }
}

#[derive(Debug, Clone)]
pub struct InitReport {
    pub config: Config,
    /// True when the workspace already existed
    pub reinitialized: bool,
    pub storage: SetupReport,
}

/// Initialize a workspace at `path` and provision its table and bucket.
///
/// Running it again keeps the existing config (apart from explicit settings)
/// and reports both stores as already existing.
pub fn init(path: &Path, settings: &StorageSettings) -> Result<InitReport> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let workspace = Workspace::new(path.to_path_buf());
    let reinitialized = workspace.is_initialized();

    let mut config = if reinitialized {
        workspace.load_config()?
    } else {
        Config::new()
    };
    settings.apply(&mut config);
    config.validate_storage_names()?;
    workspace.save_config(&config)?;

    let effective = config.clone().with_env_overrides();
    let storage = setup_storage(&workspace, &effective)?;
    tracing::info!(root = %path.display(), reinitialized, "workspace ready");

    Ok(InitReport {
        config,
        reinitialized,
        storage,
    })
}

/// Provision the stores named by `config`
pub fn setup_storage(workspace: &Workspace, config: &Config) -> Result<SetupReport> {
    repository_for(workspace, config)?.setup_storage()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::FileRepository;
    use crate::domain::NewEntry;
    use crate::error::BitacoraError;
    use crate::infrastructure::Provisioned;
    use tempfile::TempDir;

    fn open(workspace: &Workspace) -> FileRepository {
        let config = workspace.load_config().unwrap();
        repository_for(workspace, &config).unwrap()
    }

    #[test]
    fn test_init_creates_workspace_and_stores() {
        let temp = TempDir::new().unwrap();
        let report = init(temp.path(), &StorageSettings::default()).unwrap();

        assert!(!report.reinitialized);
        assert_eq!(report.storage.table, "JournalEntries");
        assert_eq!(report.storage.table_status, Provisioned::Created);
        assert_eq!(report.storage.bucket_status, Provisioned::Created);
        assert!(temp.path().join(".bitacora/config.toml").is_file());
        assert!(temp
            .path()
            .join(".bitacora/data/us-east-1/tables/JournalEntries")
            .is_dir());
        assert!(temp
            .path()
            .join(".bitacora/data/us-east-1/buckets/journal-entries")
            .is_dir());
    }

    #[test]
    fn test_init_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("nested/journal");

        init(&target, &StorageSettings::default()).unwrap();
        assert!(target.join(".bitacora").is_dir());
    }

    #[test]
    fn test_repository_after_init() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), &StorageSettings::default()).unwrap();

        let workspace = Workspace::new(temp.path().to_path_buf());
        let repo = open(&workspace);
        let entry = repo
            .create(NewEntry::new("Cena", "Sopa").with_tags("cena"))
            .unwrap();

        assert_eq!(repo.get_all().unwrap(), vec![entry.clone()]);
        assert_eq!(repo.documents("").unwrap(), vec![entry.document_path()]);
    }

    #[test]
    fn test_storage_missing_without_init() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::new(temp.path().to_path_buf());
        workspace.save_config(&Config::new()).unwrap();

        let repo = open(&workspace);
        assert!(matches!(
            repo.create(NewEntry::new("t", "c")),
            Err(BitacoraError::StorageRead(_) | BitacoraError::StorageWrite(_))
        ));
        assert!(matches!(repo.get_all(), Err(BitacoraError::StorageRead(_))));
    }

    #[test]
    fn test_init_twice_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let settings = StorageSettings {
            table: Some("Meals".to_string()),
            ..Default::default()
        };
        let first = init(temp.path(), &settings).unwrap();

        let second = init(temp.path(), &StorageSettings::default()).unwrap();
        assert!(second.reinitialized);
        assert_eq!(second.config.table, "Meals");
        assert_eq!(second.config.created, first.config.created);
        assert_eq!(second.storage.table_status, Provisioned::AlreadyExists);
        assert_eq!(second.storage.bucket_status, Provisioned::AlreadyExists);
    }

    #[test]
    fn test_init_rejects_unsafe_table_name() {
        let temp = TempDir::new().unwrap();
        let settings = StorageSettings {
            table: Some("../outside".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            init(temp.path(), &settings),
            Err(BitacoraError::Config(_))
        ));
        assert!(!temp.path().join(".bitacora/config.toml").exists());
        assert!(!temp.path().join(".bitacora/data/outside").exists());
    }
}
