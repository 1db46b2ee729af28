//! Description cleanup for display.

use super::plain::MarkupStripper;

/// Placeholder shown when neither the package nor its repository carries a
/// usable description.
pub const DESCRIPTION_UNAVAILABLE: &str = "No description available.";

/// Substrings that betray malformed or boilerplate content surviving the
/// markup strip: badge images, empty links, setext underlines and fenced
/// code blocks.
const MALFORMED_MARKERS: [&str; 4] = ["[!", "[](", "===", "```"];

/// Clean up a description for display.
///
/// The primary text is converted to plain prose; if the result is empty or
/// still contains malformed-content markers, the fallback (typically the
/// repository description) is substituted, without a second marker check.
/// The returned string is HTML-escaped, capitalized, ends in punctuation
/// and is never empty, so it can be embedded in markup verbatim.
pub fn humanize(
    description: Option<&str>,
    fallback: Option<&str>,
    stripper: &dyn MarkupStripper,
) -> String {
    let mut text = description
        .map(|d| stripper.to_plain_text(d))
        .unwrap_or_default();

    if text.is_empty() || MALFORMED_MARKERS.iter().any(|m| text.contains(m)) {
        text = fallback
            .map(|f| stripper.to_plain_text(f))
            .unwrap_or_default();
    }

    if text.is_empty() {
        return format!("<em>{}</em>", DESCRIPTION_UNAVAILABLE);
    }

    let mut text = escape_html(&text);

    // Add a trailing dot
    if text
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        text.push('.');
    }

    // Capitalize the first letter
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => text,
    }
}

/// Escape characters that would otherwise be interpreted as markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::plain::DefaultStripper;

    fn humanized(description: Option<&str>, fallback: Option<&str>) -> String {
        humanize(description, fallback, &DefaultStripper::new())
    }

    #[test]
    fn test_adds_ending_dot_when_appropriate() {
        assert_eq!(humanized(Some("Description"), None), "Description.");
        assert_eq!(humanized(Some("Description!"), None), "Description!");
        assert_eq!(humanized(Some("Is it a description?"), None), "Is it a description?");
    }

    #[test]
    fn test_capitalizes_first_letter() {
        assert_eq!(humanized(Some("helloWORLD."), None), "HelloWORLD.");
    }

    #[test]
    fn test_escapes_html_and_removes_markdown() {
        assert_eq!(
            humanized(
                Some("> Hello _World_! This is about <Form /> elements and <a>link</a>."),
                None
            ),
            "Hello World! This is about &lt;Form /&gt; elements and &lt;a&gt;link&lt;/a&gt;."
        );

        assert_eq!(
            humanized(Some("## What is it? - a react render"), None),
            "What is it? - a react render."
        );
    }

    #[test]
    fn test_malformed_content_falls_back() {
        for input in [
            "[![Build Status](https://img.shields.io/x.svg)](https://ci.example.com) tool",
            "see []() for docs",
            "Title\n===\nbody",
            "```js\nrequire('x')\n```",
        ] {
            assert_eq!(
                humanized(Some(input), Some("A solid fallback")),
                "A solid fallback.",
                "input {:?} should fall back",
                input
            );
        }
    }

    #[test]
    fn test_fallback_is_not_checked_for_markers() {
        // The fallback is substituted as-is even when it carries markers
        let result = humanized(Some("```"), Some("uses ``` fences"));
        assert!(result.contains("```"));
    }

    #[test]
    fn test_empty_description_uses_fallback() {
        assert_eq!(humanized(None, Some("from the repo")), "From the repo.");
        assert_eq!(humanized(Some("   "), Some("from the repo")), "From the repo.");
    }

    #[test]
    fn test_placeholder_when_nothing_available() {
        let placeholder = format!("<em>{}</em>", DESCRIPTION_UNAVAILABLE);
        assert_eq!(humanized(None, None), placeholder);
        assert_eq!(humanized(Some(""), Some("")), placeholder);
        assert_eq!(humanized(Some("```"), None), placeholder);
    }

    #[test]
    fn test_output_never_empty() {
        for (description, fallback) in [
            (None, None),
            (Some("x"), None),
            (None, Some("y")),
            (Some("==="), Some("")),
        ] {
            assert!(!humanized(description, fallback).is_empty());
        }
    }

    #[test]
    fn test_no_dot_after_escaped_entity() {
        // Ends with ';' after escaping, which is already punctuation
        assert_eq!(humanized(Some("renders <br>"), None), "Renders &lt;br&gt;");
    }
}
