//! Domain layer - Entry model and pure transforms

pub mod date_ref;
pub mod entry;
pub mod preview;
pub mod query;
pub mod stats;
pub mod tags;
pub mod template;

pub use date_ref::DateReference;
pub use entry::{Entry, EntryPatch, NewEntry, TagsInput};
pub use query::{DateBucket, SearchCriteria};
pub use stats::JournalStats;
pub use template::DocumentTemplate;
