//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod editor;
pub mod store;
pub mod workspace;

pub use config::Config;
pub use editor::EditorSession;
pub use store::{BlobStore, KeyValueStore, Provision, Provisioned};
pub use workspace::{Draft, Workspace};
