//! Entry filtering
//!
//! Pure transforms over a snapshot of entries. Everything that depends on
//! the wall clock takes the reference date explicitly.

use crate::domain::Entry;
use crate::error::{BitacoraError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Relative date window used by search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateBucket {
    /// Same calendar date as the reference date
    Today,
    /// Dated after `today - 7 days`
    ThisWeek,
    /// Dated after `today - 30 days`
    ThisMonth,
}

impl DateBucket {
    /// Whether `date` falls in this bucket relative to `today`
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateBucket::Today => date == today,
            DateBucket::ThisWeek => date > today - Duration::days(7),
            DateBucket::ThisMonth => date > today - Duration::days(30),
        }
    }
}

impl FromStr for DateBucket {
    type Err = BitacoraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "today" => Ok(DateBucket::Today),
            "week" | "thisweek" => Ok(DateBucket::ThisWeek),
            "month" | "thismonth" => Ok(DateBucket::ThisMonth),
            _ => Err(BitacoraError::Validation(format!(
                "Invalid date filter: '{}'. Valid filters are: today, week, month",
                s
            ))),
        }
    }
}

/// Conjunctive search filters; unset filters match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub text: Option<String>,
    pub bucket: Option<DateBucket>,
    pub tag: Option<String>,
}

impl SearchCriteria {
    pub fn text(text: impl Into<String>) -> Self {
        SearchCriteria {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_bucket(mut self, bucket: DateBucket) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Evaluate every filter against one entry
    pub fn matches(&self, entry: &Entry, today: NaiveDate) -> bool {
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            if !entry.title.to_lowercase().contains(&needle)
                && !entry.content.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(bucket) = self.bucket {
            match entry.parsed_date() {
                Some(date) if bucket.contains(date, today) => {}
                _ => return false,
            }
        }

        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            if !has_tag(entry, tag) {
                return false;
            }
        }

        true
    }
}

/// Entries whose `date` equals `date` exactly
pub fn by_date(entries: &[Entry], date: &str) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.date == date)
        .cloned()
        .collect()
}

/// Entries carrying `tag` (case-sensitive)
pub fn by_tag(entries: &[Entry], tag: &str) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| has_tag(entry, tag))
        .cloned()
        .collect()
}

pub fn search(entries: &[Entry], criteria: &SearchCriteria, today: NaiveDate) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| criteria.matches(entry, today))
        .cloned()
        .collect()
}

/// Order newest first by `createdAt`
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn has_tag(entry: &Entry, tag: &str) -> bool {
    entry.tags.iter().any(|t| t == tag)
}
