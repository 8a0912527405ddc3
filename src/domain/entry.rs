//! Journal entry model

use crate::domain::tags::normalize_tags;
use crate::error::{BitacoraError, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const ID_PREFIX: &str = "entry-";
const UNDATED_PREFIX: &str = "undated";
const REQUIRED_FIELDS: &str = "Title and content are required";

/// A journal or food-log record.
///
/// Timestamps are kept in their ISO-8601 wire form so that records written by
/// other clients decode losslessly, including ones with missing attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entry {
    /// Build a fresh entry stamped with `now`
    pub fn new(
        id: String,
        title: String,
        content: String,
        tags: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let stamp = format_timestamp(now);
        Entry {
            id,
            title,
            content,
            tags,
            date: format_date(now.date_naive()),
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }

    /// Calendar date of the entry, if the stored value is well formed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Creation timestamp, if the stored value is well formed
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Blob path of the rendered document: `{date}/{id}.md`.
    ///
    /// Records without a well-formed `date` are filed under the date of
    /// `createdAt`, or under `undated/` when that is missing too.
    pub fn document_path(&self) -> String {
        let prefix = match (self.parsed_date(), self.created_time()) {
            (Some(_), _) => self.date.clone(),
            (None, Some(created)) => format_date(created.date_naive()),
            (None, None) => UNDATED_PREFIX.to_string(),
        };
        format!("{}/{}.md", prefix, self.id)
    }

    /// Merge the supplied fields of `patch` and refresh `updated_at`.
    ///
    /// Fields are validated before anything is modified, so a rejected
    /// patch leaves the entry untouched.
    pub fn apply(&mut self, patch: EntryPatch, now: DateTime<Utc>) -> Result<()> {
        if let Some(title) = &patch.title {
            require_text("title", title)?;
        }
        if let Some(content) = &patch.content {
            require_text("content", content)?;
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        // An empty tag string keeps the stored tags; an empty list clears them
        if let Some(tags) = patch.tags.filter(|tags| !tags.is_empty_string()) {
            self.tags = tags.normalize();
        }

        // updatedAt never precedes createdAt, even with a skewed clock
        let now = match self.created_time() {
            Some(created) if created > now => created,
            _ => now,
        };
        self.updated_at = format_timestamp(now);
        Ok(())
    }
}

/// Input of a create call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub tags: TagsInput,
}

impl NewEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        NewEntry {
            title: title.into(),
            content: content.into(),
            tags: TagsInput::default(),
        }
    }

    pub fn with_tags(mut self, tags: impl Into<TagsInput>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(BitacoraError::Validation(REQUIRED_FIELDS.to_string()));
        }
        Ok(())
    }
}

/// Partial update: `None` fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<TagsInput>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}

/// Tags as supplied by a caller: either a list or one comma-separated string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    /// Trimmed, non-empty tags in input order
    pub fn normalize(&self) -> Vec<String> {
        match self {
            TagsInput::List(tags) => normalize_tags(tags.iter().map(String::as_str)),
            TagsInput::Csv(raw) => normalize_tags(raw.split(',')),
        }
    }

    fn is_empty_string(&self) -> bool {
        matches!(self, TagsInput::Csv(raw) if raw.is_empty())
    }
}

impl Default for TagsInput {
    fn default() -> Self {
        TagsInput::List(Vec::new())
    }
}

impl From<Vec<String>> for TagsInput {
    fn from(tags: Vec<String>) -> Self {
        TagsInput::List(tags)
    }
}

impl From<&str> for TagsInput {
    fn from(raw: &str) -> Self {
        TagsInput::Csv(raw.to_string())
    }
}

impl From<String> for TagsInput {
    fn from(raw: String) -> Self {
        TagsInput::Csv(raw)
    }
}

/// Entry id derived from a timestamp, e.g. `entry-1737102600000`
pub fn entry_id(millis: i64) -> String {
    format!("{}{}", ID_PREFIX, millis)
}

/// ISO-8601 UTC with millisecond precision: `2025-01-17T08:30:00.000Z`
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BitacoraError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
