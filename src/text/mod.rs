//! Text processing: markup stripping, description humanizing, tweet
//! composition and donation link extraction.

mod donation;
mod humanize;
pub mod plain;
mod tweet;

pub use donation::DonationFinder;
pub use humanize::{DESCRIPTION_UNAVAILABLE, humanize};
pub use plain::{DefaultStripper, MarkupStripper};
pub use tweet::{SHORT_URL_LEN, TWEET_LIMIT, TweetComposer};
