//! Tag normalization and catalogue

use crate::domain::Entry;
use std::collections::BTreeSet;

/// Trim each segment and drop the empty ones, keeping order and duplicates
pub fn normalize_tags<'a, I>(segments: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    segments
        .into_iter()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// All distinct tags across `entries`, sorted
pub fn collect_tags(entries: &[Entry]) -> Vec<String> {
    let tags: BTreeSet<&str> = entries
        .iter()
        .flat_map(|entry| entry.tags.iter().map(String::as_str))
        .collect();
    tags.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tags: &[&str]) -> Entry {
        Entry {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn normalize_trims_and_drops_empty_segments() {
        assert_eq!(normalize_tags("a, b ,,c".split(',')), vec!["a", "b", "c"]);
        assert!(normalize_tags(" , ,".split(',')).is_empty());
    }

    #[test]
    fn collect_tags_is_sorted_and_distinct() {
        let entries = vec![tagged(&["lunch", "B"]), tagged(&["b", "lunch"]), tagged(&[])];
        assert_eq!(collect_tags(&entries), vec!["B", "b", "lunch"]);
    }
}
