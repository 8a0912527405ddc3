//! Read-side queries over the entry repository

use crate::application::EntryRepository;
use crate::domain::query::{self, SearchCriteria};
use crate::domain::tags::collect_tags;
use crate::domain::{Entry, JournalStats};
use crate::error::Result;
use crate::infrastructure::{BlobStore, KeyValueStore};
use chrono::{NaiveDate, Utc};

/// Filters a fresh snapshot of every entry on each call
pub struct EntryQueryService<'a, K, B> {
    repository: &'a EntryRepository<K, B>,
}

impl<'a, K, B> EntryQueryService<'a, K, B>
where
    K: KeyValueStore,
    B: BlobStore,
{
    pub fn new(repository: &'a EntryRepository<K, B>) -> Self {
        EntryQueryService { repository }
    }

    /// Entries whose date is exactly `date` (`YYYY-MM-DD`)
    pub fn by_date(&self, date: &str) -> Result<Vec<Entry>> {
        Ok(query::by_date(&self.repository.get_all()?, date))
    }

    /// Entries carrying `tag`; matching is case-sensitive
    pub fn by_tag(&self, tag: &str) -> Result<Vec<Entry>> {
        Ok(query::by_tag(&self.repository.get_all()?, tag))
    }

    /// Search relative to the current UTC date
    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Entry>> {
        self.search_on(criteria, today())
    }

    pub fn search_on(&self, criteria: &SearchCriteria, today: NaiveDate) -> Result<Vec<Entry>> {
        Ok(query::search(&self.repository.get_all()?, criteria, today))
    }

    /// Every distinct tag in use, sorted
    pub fn tags(&self) -> Result<Vec<String>> {
        Ok(collect_tags(&self.repository.get_all()?))
    }

    pub fn stats(&self) -> Result<JournalStats> {
        self.stats_on(today())
    }

    pub fn stats_on(&self, today: NaiveDate) -> Result<JournalStats> {
        Ok(JournalStats::compute(&self.repository.get_all()?, today))
    }
}

/// Reference date for relative filters; entry dates are UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
