//! Announcement tweet composition.

/// Platform character limit for a tweet.
pub const TWEET_LIMIT: usize = 280;

/// Characters the platform's link shortener counts a URL as, regardless of
/// its real length.
pub const SHORT_URL_LEN: usize = 23;

/// Composes announcement tweets of the form `name: description url` that
/// fit the platform limit.
pub struct TweetComposer {
    limit: usize,
    short_url_len: usize,
}

impl TweetComposer {
    pub fn new(limit: usize, short_url_len: usize) -> Self {
        Self {
            limit,
            short_url_len,
        }
    }

    /// Compose a tweet announcing a package.
    ///
    /// Returns `None` when there is no description to announce. The text
    /// portion is truncated with an ellipsis so that text, separator and
    /// shortened URL stay within the limit.
    pub fn compose(&self, name: &str, description: Option<&str>, url: &str) -> Option<String> {
        let description = description.map(str::trim).filter(|d| !d.is_empty())?;

        let mut text = format!("{}: {}", name, description);
        let budget = self.limit.saturating_sub(self.short_url_len + 1);
        if text.chars().count() > budget {
            text = text.chars().take(budget.saturating_sub(1)).collect();
            text.push('…');
        }

        Some(format!("{} {}", text, url))
    }
}

impl Default for TweetComposer {
    fn default() -> Self {
        Self::new(TWEET_LIMIT, SHORT_URL_LEN)
    }
}
