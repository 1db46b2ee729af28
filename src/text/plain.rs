//! Markup-to-plain-text conversion.

use regex::Regex;

/// Converts marked-up text into plain prose.
///
/// Injected into the humanizer and tweet composer so alternative
/// renderers can be swapped in.
pub trait MarkupStripper: Send + Sync {
    /// Remove markdown syntax and collapse whitespace. HTML is left
    /// literal; escaping is the caller's concern.
    fn to_plain_text(&self, markup: &str) -> String;
}

/// Regex-based stripper covering the markdown constructs that show up in
/// registry descriptions: blockquotes, headings, emphasis and inline links.
pub struct DefaultStripper {
    blockquote: Regex,
    heading: Regex,
    bold: Regex,
    italic: Regex,
    underscore: Regex,
    link: Regex,
    whitespace: Regex,
}

impl DefaultStripper {
    pub fn new() -> Self {
        Self {
            blockquote: Regex::new(r"(?m)^[ \t]*>[ \t]?").unwrap(),
            heading: Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").unwrap(),
            bold: Regex::new(r"\*\*([^*]+)\*\*").unwrap(),
            italic: Regex::new(r"\*([^*\s][^*]*)\*").unwrap(),
            underscore: Regex::new(r"\b_([^_]+)_\b").unwrap(),
            // Images (leading '!') and empty link texts are deliberately not
            // matched so that badge boilerplate stays detectable downstream.
            link: Regex::new(r"\[([^!\]][^\]]*)\]\(([^)]*)\)").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }
}

impl Default for DefaultStripper {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupStripper for DefaultStripper {
    fn to_plain_text(&self, markup: &str) -> String {
        let text = self.blockquote.replace_all(markup, "");
        let text = self.heading.replace_all(&text, "");
        let text = self.link.replace_all(&text, "$1");
        let text = self.bold.replace_all(&text, "$1");
        let text = self.italic.replace_all(&text, "$1");
        let text = self.underscore.replace_all(&text, "$1");
        let text = self.whitespace.replace_all(&text, " ");
        text.trim().to_string()
    }
}
