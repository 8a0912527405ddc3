//! Storage collaborators
//!
//! The entry repository talks to two opaque stores: a key-value table that
//! holds one structured record per entry, and a blob store that holds the
//! rendered documents. Both are traits so the same repository runs against
//! the filesystem backend, the in-memory mirror, or anything else.

pub mod filesystem;
pub mod memory;
pub mod record;

pub use filesystem::{FileBucket, FileTable};
pub use memory::{MemoryBucket, MemoryTable};
pub use record::{decode_entry, encode_entry, AttributeValue, Record};

use crate::error::Result;

/// Key-value table keyed by entry id
pub trait KeyValueStore {
    /// Insert or replace the record stored under `key`
    fn put(&self, key: &str, record: &Record) -> Result<()>;

    /// Fetch the record stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<Record>>;

    /// Remove the record under `key`; removing a missing key succeeds
    fn delete(&self, key: &str) -> Result<()>;

    /// Read every record in the table
    fn scan(&self) -> Result<Vec<Record>>;
}

/// Object storage for text blobs addressed by `/`-separated paths
pub trait BlobStore {
    /// Insert or replace the blob at `path`
    fn put(&self, path: &str, body: &str) -> Result<()>;

    /// Paths starting with `prefix`, sorted
    fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Outcome of provisioning a table or bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

/// Stores that can create their backing resource on demand
pub trait Provision {
    /// Resource name as shown to the user
    fn resource_name(&self) -> &str;

    /// Create the backing resource; succeeds if it already exists
    fn provision(&self) -> Result<Provisioned>;
}
