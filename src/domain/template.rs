//! Document template for the rendered copy of an entry

use crate::domain::Entry;
use crate::error::{BitacoraError, Result};
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const ENTRY_TEMPLATE: &str = "# {TITLE}\n\n\
**Date:** {DATE}\n\
**Created:** {CREATED}\n\
**Tags:** {TAGS}\n\n\
---\n\n\
{CONTENT}\n\n\
---\n\n\
*Entry ID: {ID}*\n";

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{([A-Z_]+)\}").unwrap())
}

/// Template for the markdown document stored next to each record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
    content: String,
}

impl DocumentTemplate {
    /// Create template from custom template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| BitacoraError::Template(format!("Failed to read template file: {}", e)))?;

        if !content.contains("{CONTENT}") {
            return Err(BitacoraError::Template(format!(
                "Template {} has no {{CONTENT}} placeholder",
                path.display()
            )));
        }

        Ok(DocumentTemplate { content })
    }

    /// Use the custom template at `path` if present, the built-in one otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Substitute entry fields in a single pass.
    ///
    /// Placeholders appearing inside substituted values are left as they are,
    /// and unknown placeholders are kept verbatim.
    pub fn render(&self, entry: &Entry) -> String {
        placeholder_regex()
            .replace_all(&self.content, |caps: &Captures| match &caps[1] {
                "TITLE" => entry.title.clone(),
                "DATE" => entry.date.clone(),
                "CREATED" => entry.created_at.clone(),
                "UPDATED" => entry.updated_at.clone(),
                "TAGS" if entry.tags.is_empty() => "none".to_string(),
                "TAGS" => entry.tags.join(", "),
                "CONTENT" => entry.content.clone(),
                "ID" => entry.id.clone(),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        DocumentTemplate {
            content: ENTRY_TEMPLATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Entry {
        Entry {
            id: "entry-1737102600000".to_string(),
            title: "Desayuno".to_string(),
            content: "Avena con plátano".to_string(),
            tags: vec!["desayuno".to_string(), "fibra".to_string()],
            date: "2025-01-17".to_string(),
            created_at: "2025-01-17T08:30:00.000Z".to_string(),
            updated_at: "2025-01-17T08:30:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_render_builtin() {
        let doc = DocumentTemplate::default().render(&sample());
        assert!(doc.starts_with("# Desayuno\n\n"));
        assert!(doc.contains("**Date:** 2025-01-17\n"));
        assert!(doc.contains("**Created:** 2025-01-17T08:30:00.000Z\n"));
        assert!(doc.contains("**Tags:** desayuno, fibra\n"));
        assert!(doc.contains("---\n\nAvena con plátano\n\n---"));
        assert!(doc.ends_with("*Entry ID: entry-1737102600000*\n"));
    }

    #[test]
    fn test_render_without_tags() {
        let mut entry = sample();
        entry.tags.clear();
        let doc = DocumentTemplate::default().render(&entry);
        assert!(doc.contains("**Tags:** none\n"));
    }

    #[test]
    fn test_placeholders_in_values_are_not_expanded() {
        let mut entry = sample();
        entry.content = "literal {ID} and {TITLE}".to_string();
        let doc = DocumentTemplate::default().render(&entry);
        assert!(doc.contains("literal {ID} and {TITLE}"));
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("entry.md");
        fs::write(&path, "{TITLE} {MOOD}\n{CONTENT}").unwrap();

        let template = DocumentTemplate::from_file(&path).unwrap();
        assert_eq!(template.render(&sample()), "Desayuno {MOOD}\nAvena con plátano");
    }

    #[test]
    fn test_custom_template_requires_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("entry.md");
        fs::write(&path, "# {TITLE}").unwrap();

        assert!(matches!(
            DocumentTemplate::from_file(&path),
            Err(BitacoraError::Template(_))
        ));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let template = DocumentTemplate::load_or_default(&temp.path().join("missing.md")).unwrap();
        assert_eq!(template, DocumentTemplate::default());
    }
}
