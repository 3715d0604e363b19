// Screenshot-chrome filter.
//
// OCR output from a social screenshot is the message text buried in UI
// chrome: action labels, timestamps, handles, engagement counters. The
// filter applies a fixed, ordered list of removals and hands back only
// what is worth scoring. Pure and total: never fails, and already-clean
// or empty input comes back trimmed.

use std::sync::OnceLock;

use regex_lite::Regex;

/// UI action labels and navigation words that OCR picks up around a post.
const CHROME_WORDS: &[&str] = &[
    "like", "likes", "liked", "reply", "replies", "retweet", "retweets", "repost", "reposts",
    "quote", "quotes", "share", "shares", "comment", "comments", "view", "views", "follow",
    "following", "followers", "subscribe", "home", "search", "explore", "notifications",
    "messages", "bookmark", "bookmarks", "profile", "more",
];

/// Month names and abbreviations as they appear in post datelines.
const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec",
];

/// The removal passes, in the order they are applied.
fn removal_passes() -> &'static [Regex] {
    static PASSES: OnceLock<Vec<Regex>> = OnceLock::new();
    PASSES.get_or_init(|| {
        let chrome = format!(r"(?i)\b(?:{})\b", CHROME_WORDS.join("|"));
        let months = format!(r"(?i)\b(?:{})\b", MONTHS.join("|"));
        [
            // UI chrome words
            chrome.as_str(),
            // Clock timestamps: 12:34, 9:05:07, 3:15 pm
            r"(?i)\b\d{1,2}:\d{2}(?::\d{2})?(?:\s?[ap]m)?\b",
            // Month names in datelines
            months.as_str(),
            // Handles: everything from an '@' to the next whitespace
            r"@\S+",
            // Engagement counters: 12k, 3.4M, 1,2B
            r"(?i)\b\d+(?:[.,]\d+)?\s?[kmb]\b",
            // Relative-time phrases
            r"(?i)\b\d+\s?(?:s|secs?|seconds?|m|mins?|minutes?|h|hrs?|hours?|d|days?|w|weeks?|months?|y|years?)\s*ago\b",
            r"(?i)\byesterday\b",
            // Remaining digits
            r"\d",
            // Punctuation: the ASCII ranges plus the marks OCR commonly
            // emits for screenshot separators and smart quotes
            r"[!-/:-@\x5B-\x60\x7B-\x7E·•…“”‘’—–]",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("static pattern compiles"))
        .collect()
    })
}

/// Strip screenshot chrome from OCR output, leaving the message text.
///
/// Deterministic: the passes run in a fixed order, each deleting its
/// matches, followed by whitespace collapse and trim. Running the filter
/// on its own output changes nothing.
pub fn strip_screenshot_chrome(text: &str) -> String {
    let mut cleaned = text.to_string();
    for pass in removal_passes() {
        cleaned = pass.replace_all(&cleaned, "").into_owned();
    }

    static SPACES: OnceLock<Regex> = OnceLock::new();
    let spaces = SPACES.get_or_init(|| Regex::new(r"\s+").expect("static pattern compiles"));
    spaces.replace_all(&cleaned, " ").trim().to_string()
}
