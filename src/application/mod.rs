//! Application layer - Use cases and orchestration

pub mod entry_repository;
pub mod init;
pub mod manage_config;
pub mod query_service;

pub use entry_repository::{repository_for, EntryRepository, FileRepository, SetupReport};
pub use init::{init, InitReport, StorageSettings};
pub use manage_config::ConfigService;
pub use query_service::EntryQueryService;
