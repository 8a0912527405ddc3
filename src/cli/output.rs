//! Output formatting utilities

use crate::application::SetupReport;
use crate::domain::preview::preview;
use crate::domain::{Entry, JournalStats};
use crate::infrastructure::{Config, Draft, Provisioned};

/// Characters of content shown under each search result
pub const PREVIEW_CHARS: usize = 100;
/// Characters of content shown in the recent entries listing
pub const RECENT_PREVIEW_CHARS: usize = 150;

/// Format a list of entries for display
pub fn format_entry_list(entries: &[Entry]) -> String {
    format_entries(entries, PREVIEW_CHARS)
}

/// Format the recent entries listing, which shows longer previews
pub fn format_recent_list(entries: &[Entry]) -> String {
    format_entries(entries, RECENT_PREVIEW_CHARS)
}

fn format_entries(entries: &[Entry], preview_chars: usize) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!("{}  {}  {}", entry.date, entry.id, entry.title));
        if !entry.tags.is_empty() {
            output.push_str(&format!("  [{}]", entry.tags.join(", ")));
        }
        output.push('\n');

        let text = preview(&entry.content, preview_chars);
        if !text.is_empty() {
            output.push_str(&format!("    {}\n", text));
        }
    }
    output
}

/// Format one entry in full
pub fn format_entry(entry: &Entry) -> String {
    let tags = if entry.tags.is_empty() {
        "none".to_string()
    } else {
        entry.tags.join(", ")
    };

    format!(
        "{}\n\
        id:      {}\n\
        date:    {}\n\
        created: {}\n\
        updated: {}\n\
        tags:    {}\n\n\
        {}\n",
        entry.title, entry.id, entry.date, entry.created_at, entry.updated_at, tags, entry.content
    )
}

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        output.push_str(&format!("#{}\n", tag));
    }

    output
}

pub fn format_stats(stats: &JournalStats) -> String {
    format!(
        "Total entries: {}\n\
        This week:     {}\n\
        Unique tags:   {}\n\
        Streak:        {} day(s)\n",
        stats.total_entries, stats.this_week, stats.unique_tags, stats.streak_days
    )
}

/// One line per store: created or already present
pub fn format_setup_report(report: &SetupReport) -> String {
    fn status(provisioned: Provisioned) -> &'static str {
        match provisioned {
            Provisioned::Created => "created",
            Provisioned::AlreadyExists => "already exists",
        }
    }

    format!(
        "Table '{}': {}\nBucket '{}': {}\n",
        report.table,
        status(report.table_status),
        report.bucket,
        status(report.bucket_status)
    )
}

pub fn format_config(config: &Config) -> String {
    format!(
        "region = {}\n\
        table = {}\n\
        bucket = {}\n\
        editor = {}\n\
        created = {}\n",
        config.region,
        config.table,
        config.bucket,
        config.editor,
        config.created.to_rfc3339()
    )
}

pub fn format_draft(draft: &Draft) -> String {
    format!(
        "title: {}\ntags:  {}\n\n{}\n",
        draft.title, draft.tags, draft.content
    )
}
