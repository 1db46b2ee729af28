//! Donation link extraction from readmes.

use regex::Regex;

/// Finds links to known donation platforms in readme text.
pub struct DonationFinder {
    pattern: Regex,
}

impl DonationFinder {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"https?://(?:www\.)?(?:patreon\.com|opencollective\.com|ko-fi\.com|liberapay\.com|paypal\.me|github\.com/sponsors|buymeacoffee\.com)/[A-Za-z0-9._/-]+",
            )
            .unwrap(),
        }
    }

    /// Return the first donation platform link in the text, if any.
    pub fn find_link(&self, text: &str) -> Option<String> {
        self.pattern
            .find(text)
            .map(|m| m.as_str().trim_end_matches(['.', ',', ')']).to_string())
    }
}

impl Default for DonationFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(text: &str) -> Option<String> {
        DonationFinder::new().find_link(text)
    }

    #[test]
    fn test_finds_known_platforms() {
        assert_eq!(
            find("Support me on https://www.patreon.com/jane"),
            Some("https://www.patreon.com/jane".into())
        );
        assert_eq!(
            find("Backers: https://opencollective.com/webpack#support"),
            Some("https://opencollective.com/webpack".into())
        );
        assert_eq!(
            find("See https://github.com/sponsors/octocat for sponsoring"),
            Some("https://github.com/sponsors/octocat".into())
        );
    }

    #[test]
    fn test_returns_first_of_several() {
        let readme = "Donate at https://ko-fi.com/dev or https://liberapay.com/dev";
        assert_eq!(find(readme), Some("https://ko-fi.com/dev".into()));
    }

    #[test]
    fn test_trims_trailing_punctuation() {
        assert_eq!(
            find("(see https://paypal.me/someone)."),
            Some("https://paypal.me/someone".into())
        );
    }

    #[test]
    fn test_no_link() {
        assert!(find("Just a readme with no funding section").is_none());
        assert!(find("https://example.com/donate").is_none());
        assert!(find("").is_none());
    }
}
