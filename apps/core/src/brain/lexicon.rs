//! Lexical analysis of child utterances.
//!
//! Tokenizes transcripts into lowercase word tokens and detects coarse topics
//! against a fixed keyword table. Topic matching is a plain substring test on the
//! lowercased utterance, so a keyword embedded in a longer word ("cat" in
//! "catch") still counts. Session statistics depend on that exact rule.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]+\b").expect("Invalid regex: word pattern"));

/// Built-in topic vocabulary
const DEFAULT_TOPICS: &[(&str, &[&str])] = &[
    (
        "animals",
        &[
            "dog", "cat", "cow", "duck", "pig", "horse", "sheep", "bird", "fish", "lion",
            "bear", "monkey", "puppy", "kitty", "moo", "woof", "meow", "quack",
        ],
    ),
    (
        "colors",
        &[
            "red", "blue", "green", "yellow", "orange", "purple", "pink", "black", "white",
            "brown",
        ],
    ),
    (
        "toys",
        &[
            "ball", "car", "truck", "doll", "teddy", "block", "train", "puzzle", "bubble",
            "book",
        ],
    ),
    (
        "food",
        &[
            "apple", "banana", "milk", "juice", "cookie", "bread", "cheese", "water", "eat",
            "yum",
        ],
    ),
    (
        "family",
        &[
            "mama", "mommy", "mom", "dada", "daddy", "dad", "baby", "brother", "sister",
            "grandma", "grandpa", "nana",
        ],
    ),
    (
        "actions",
        &[
            "go", "run", "jump", "dance", "clap", "sleep", "walk", "sit", "stop", "open",
            "push", "throw",
        ],
    ),
    (
        "body_parts",
        &[
            "nose", "eye", "ear", "mouth", "hand", "foot", "feet", "head", "tummy", "toe",
            "hair",
        ],
    ),
    (
        "emotions",
        &["happy", "sad", "mad", "scared", "love", "cry", "laugh", "smile", "hug"],
    ),
];

/// Whether `c` separates words in a transcript.
///
/// Unicode White_Space plus the ASCII information separators U+001C..=U+001F,
/// which some transcription front ends emit between segments.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// True when `text` holds nothing but separators.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_separator)
}

/// `text` without leading and trailing separators.
pub fn trim_separators(text: &str) -> &str {
    text.trim_matches(is_separator)
}

/// Number of separator-delimited tokens in `text`.
///
/// This is the only word counter in the crate; the turn classifier and the
/// analytics aggregator both go through it.
pub fn word_count(text: &str) -> usize {
    text.split(is_separator).filter(|token| !token.is_empty()).count()
}

/// Extract the set of lowercase alphabetic word tokens from `text`
pub fn extract_words(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Topic label → keyword list used by [`TopicTable::detect_topics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicTable {
    topics: BTreeMap<String, Vec<String>>,
}

impl Default for TopicTable {
    fn default() -> Self {
        let topics = DEFAULT_TOPICS
            .iter()
            .map(|(label, keywords)| {
                (
                    label.to_string(),
                    keywords.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect();
        Self { topics }
    }
}

impl TopicTable {
    /// Build a table from explicit entries. Keywords are lowercased so matching
    /// against the lowercased utterance stays consistent.
    pub fn new(topics: BTreeMap<String, Vec<String>>) -> Self {
        let topics = topics
            .into_iter()
            .map(|(label, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (label, keywords)
            })
            .collect();
        Self { topics }
    }

    /// Labels of all topics whose keywords occur anywhere in `text`
    pub fn detect_topics(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        self.topics
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|(label, _)| label.clone())
            .collect()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_splits_on_whitespace_runs() {
        assert_eq!(word_count("go  car\tgo\ncar"), 4);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("car"), 1);
    }

    #[test]
    fn test_information_separators_split_and_trim() {
        assert_eq!(word_count("go\u{1f}car"), 2);
        assert_eq!(word_count("\u{1c}ball\u{1d}"), 1);
        assert!(is_blank("\u{1c}\u{1e} \t"));
        assert!(!is_blank("\u{1c}a"));
        assert_eq!(trim_separators("\u{1f} Dog \u{1c}"), "Dog");
    }

    #[test]
    fn test_extract_words_lowercases_and_dedups() {
        let words = extract_words("Ball! ball, RED ball");
        let expected: BTreeSet<String> = ["ball", "red"].iter().map(|s| s.to_string()).collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_extract_words_skips_digits_and_punctuation() {
        let words = extract_words("123 ... !!");
        assert!(words.is_empty());
    }

    #[test]
    fn test_detect_topics_substring_rule() {
        let table = TopicTable::default();
        // "cat" inside "catch", "go" inside "good"
        let topics = table.detect_topics("catch");
        assert!(topics.contains("animals"));

        let topics = table.detect_topics("Good");
        assert!(topics.contains("actions"));
    }

    #[test]
    fn test_detect_topics_multiple() {
        let table = TopicTable::default();
        let topics = table.detect_topics("big red ball");
        assert!(topics.contains("colors"));
        assert!(topics.contains("toys"));
    }

    #[test]
    fn test_detect_topics_empty_text() {
        let table = TopicTable::default();
        assert!(table.detect_topics("").is_empty());
    }

    #[test]
    fn test_default_table_labels() {
        let table = TopicTable::default();
        let labels: Vec<&str> = table.labels().collect();
        for expected in [
            "animals", "colors", "toys", "food", "family", "actions", "body_parts", "emotions",
        ] {
            assert!(labels.contains(&expected), "missing topic {}", expected);
        }
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_custom_table_lowercases_keywords() {
        let mut topics = BTreeMap::new();
        topics.insert("vehicles".to_string(), vec!["BUS".to_string(), String::new()]);
        let table = TopicTable::new(topics);
        assert!(table.detect_topics("the bus").contains("vehicles"));
        assert!(!table.is_empty());
    }
}
