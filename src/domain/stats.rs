//! Journal statistics

use crate::domain::{tags::collect_tags, DateBucket, Entry};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

/// Dashboard counters for a set of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_entries: usize,
    pub this_week: usize,
    pub unique_tags: usize,
    /// Consecutive days with at least one entry, ending today
    pub streak_days: usize,
}

impl JournalStats {
    pub fn compute(entries: &[Entry], today: NaiveDate) -> Self {
        let dates: HashSet<NaiveDate> = entries.iter().filter_map(Entry::parsed_date).collect();

        let this_week = entries
            .iter()
            .filter_map(Entry::parsed_date)
            .filter(|date| DateBucket::ThisWeek.contains(*date, today))
            .count();

        let mut streak_days = 0;
        let mut day = today;
        while dates.contains(&day) {
            streak_days += 1;
            day -= Duration::days(1);
        }

        JournalStats {
            total_entries: entries.len(),
            this_week,
            unique_tags: collect_tags(entries).len(),
            streak_days,
        }
    }
}
