//! Entry repository: CRUD over the table and the document bucket

use crate::domain::entry::entry_id;
use crate::domain::query::sort_newest_first;
use crate::domain::{DocumentTemplate, Entry, EntryPatch, NewEntry};
use crate::error::{BitacoraError, Result};
use crate::infrastructure::store::{decode_entry, encode_entry, FileBucket, FileTable};
use crate::infrastructure::{BlobStore, Config, KeyValueStore, Provision, Provisioned, Workspace};
use chrono::{DateTime, Utc};
use tracing::instrument;

/// Provisioning outcome for both stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub table: String,
    pub table_status: Provisioned,
    pub bucket: String,
    pub bucket_status: Provisioned,
}

/// Entries persisted as a table record plus a rendered document.
///
/// Writes go to the table first and the bucket second. The pair is not
/// atomic: if the document write fails the record stays in place and the
/// call reports `StorageWrite`.
pub struct EntryRepository<K, B> {
    table: K,
    bucket: B,
    template: DocumentTemplate,
}

impl<K, B> EntryRepository<K, B>
where
    K: KeyValueStore,
    B: BlobStore,
{
    pub fn new(table: K, bucket: B) -> Self {
        EntryRepository {
            table,
            bucket,
            template: DocumentTemplate::default(),
        }
    }

    pub fn with_template(mut self, template: DocumentTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn table(&self) -> &K {
        &self.table
    }

    pub fn bucket(&self) -> &B {
        &self.bucket
    }

    /// Create an entry stamped with the current time
    pub fn create(&self, new: NewEntry) -> Result<Entry> {
        self.create_at(new, Utc::now())
    }

    #[instrument(skip(self, new), fields(title = %new.title))]
    pub fn create_at(&self, new: NewEntry, now: DateTime<Utc>) -> Result<Entry> {
        new.validate()?;

        let id = self.next_id(now)?;
        let entry = Entry::new(id, new.title, new.content, new.tags.normalize(), now);

        self.table.put(&entry.id, &encode_entry(&entry))?;
        self.write_document(&entry)?;

        tracing::info!(id = %entry.id, date = %entry.date, "created entry");
        Ok(entry)
    }

    /// Every entry, newest first
    pub fn get_all(&self) -> Result<Vec<Entry>> {
        let mut entries: Vec<Entry> = self.table.scan()?.iter().map(decode_entry).collect();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Entry> {
        self.table
            .get(id)?
            .map(|record| decode_entry(&record))
            .ok_or_else(|| BitacoraError::NotFound(id.to_string()))
    }

    /// Merge the supplied fields into a stored entry
    pub fn update(&self, id: &str, patch: EntryPatch) -> Result<Entry> {
        self.update_at(id, patch, Utc::now())
    }

    #[instrument(skip(self, patch))]
    pub fn update_at(&self, id: &str, patch: EntryPatch, now: DateTime<Utc>) -> Result<Entry> {
        let mut entry = self.get_by_id(id)?;
        entry.apply(patch, now)?;

        self.table.put(&entry.id, &encode_entry(&entry))?;
        self.write_document(&entry)?;

        tracing::info!(id = %entry.id, "updated entry");
        Ok(entry)
    }

    /// Remove the record; deleting an unknown id succeeds.
    /// The rendered document stays in the bucket.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id)?;
        tracing::info!(id, "deleted entry");
        Ok(())
    }

    /// Store entries exported elsewhere, keeping their ids and timestamps
    pub fn import(&self, entries: &[Entry]) -> Result<usize> {
        for entry in entries {
            if entry.id.trim().is_empty() {
                return Err(BitacoraError::Validation(format!(
                    "cannot import entry without id (title: '{}')",
                    entry.title
                )));
            }
            self.table.put(&entry.id, &encode_entry(entry))?;
            self.write_document(entry)?;
        }
        tracing::info!(count = entries.len(), "imported entries");
        Ok(entries.len())
    }

    /// Rendered document paths under `prefix`
    pub fn documents(&self, prefix: &str) -> Result<Vec<String>> {
        self.bucket.list(prefix)
    }

    fn write_document(&self, entry: &Entry) -> Result<()> {
        let path = entry.document_path();
        self.bucket
            .put(&path, &self.template.render(entry))
            .inspect_err(|e| {
                tracing::warn!(
                    id = %entry.id,
                    path = %path,
                    error = %e,
                    "record stored without document"
                );
            })
    }

    /// First free timestamp-derived id at or after `now`
    fn next_id(&self, now: DateTime<Utc>) -> Result<String> {
        let mut millis = now.timestamp_millis();
        loop {
            let id = entry_id(millis);
            if self.table.get(&id)?.is_none() {
                return Ok(id);
            }
            millis += 1;
        }
    }
}

impl<K, B> EntryRepository<K, B>
where
    K: KeyValueStore + Provision,
    B: BlobStore + Provision,
{
    /// Create the table and the bucket if they do not exist yet
    pub fn setup_storage(&self) -> Result<SetupReport> {
        let table_status = self.table.provision()?;
        let bucket_status = self.bucket.provision()?;
        tracing::info!(
            table = self.table.resource_name(),
            bucket = self.bucket.resource_name(),
            "storage ready"
        );

        Ok(SetupReport {
            table: self.table.resource_name().to_string(),
            table_status,
            bucket: self.bucket.resource_name().to_string(),
            bucket_status,
        })
    }
}

/// Repository over the on-disk stores of a workspace
pub type FileRepository = EntryRepository<FileTable, FileBucket>;

/// Repository over the stores named by `config`, with the workspace's
/// document template applied
pub fn repository_for(workspace: &Workspace, config: &Config) -> Result<FileRepository> {
    config.validate_storage_names()?;
    let template = DocumentTemplate::load_or_default(&workspace.template_path())?;
    tracing::debug!(
        region = %config.region,
        table = %config.table,
        bucket = %config.bucket,
        "opening stores"
    );
    Ok(
        EntryRepository::new(workspace.table(config), workspace.bucket(config))
            .with_template(template),
    )
}
