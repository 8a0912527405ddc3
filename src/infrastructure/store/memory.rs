//! In-memory table and bucket
//!
//! Backing stores for the local mirror and for tests. Single-threaded:
//! interior mutability through `RefCell`.

use super::{BlobStore, KeyValueStore, Provision, Provisioned, Record};
use crate::error::Result;
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryTable {
    records: RefCell<BTreeMap<String, Record>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryTable {
    fn put(&self, key: &str, record: &Record) -> Result<()> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), record.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Record>> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.records.borrow_mut().remove(key);
        Ok(())
    }

    fn scan(&self) -> Result<Vec<Record>> {
        Ok(self.records.borrow().values().cloned().collect())
    }
}

impl Provision for MemoryTable {
    fn resource_name(&self) -> &str {
        "memory"
    }

    fn provision(&self) -> Result<Provisioned> {
        Ok(Provisioned::AlreadyExists)
    }
}

#[derive(Debug, Default)]
pub struct MemoryBucket {
    blobs: RefCell<BTreeMap<String, String>>,
}

impl MemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body of the blob at `path`
    pub fn read(&self, path: &str) -> Option<String> {
        self.blobs.borrow().get(path).cloned()
    }
}

impl BlobStore for MemoryBucket {
    fn put(&self, path: &str, body: &str) -> Result<()> {
        self.blobs
            .borrow_mut()
            .insert(path.to_string(), body.to_string());
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .blobs
            .borrow()
            .keys()
            .filter(|path| path.starts_with(prefix))
            .cloned()
            .collect())
    }
}

impl Provision for MemoryBucket {
    fn resource_name(&self) -> &str {
        "memory"
    }

    fn provision(&self) -> Result<Provisioned> {
        Ok(Provisioned::AlreadyExists)
    }
}
