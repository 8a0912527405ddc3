//! Plain-text previews of entry content

use pulldown_cmark::{Event, Parser as MdParser, TagEnd};

/// Content flattened to one line of plain text, markdown syntax removed
pub fn plain_text(content: &str) -> String {
    let mut text = String::new();

    for event in MdParser::new(content) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `max_chars` characters of the plain text, with `...` when cut
pub fn preview(content: &str, max_chars: usize) -> String {
    let text = plain_text(content);
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_markdown() {
        let content = "# Lunch\n\n**Quinoa** bowl with `tofu`\n- rice\n- beans";
        assert_eq!(plain_text(content), "Lunch Quinoa bowl with tofu rice beans");
    }

    #[test]
    fn test_preview_short_content_untouched() {
        assert_eq!(preview("Avena con plátano", 100), "Avena con plátano");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let content = "ñ".repeat(120);
        let short = preview(&content, 100);
        assert_eq!(short.chars().count(), 103);
        assert!(short.ends_with("..."));
    }
}
