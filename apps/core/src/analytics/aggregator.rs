//! Session analytics aggregator.
//!
//! Per-session, append-only state. Every count only grows; nothing is ever
//! removed. One instance lives for exactly one session.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::debug;

use super::stats::{round2, AssistantResponse, ChildUtterance, HistoryEntry, SessionStatistics};
use crate::brain::{extract_words, trim_separators, word_count, TopicTable};
use crate::memory::Speaker;

/// Incrementally maintained statistics for one session
#[derive(Debug, Clone)]
pub struct SessionAnalytics {
    session_start: DateTime<Utc>,
    child_utterances: Vec<ChildUtterance>,
    assistant_responses: Vec<AssistantResponse>,
    child_word_set: BTreeSet<String>,
    topics_mentioned: BTreeSet<String>,
    encouragements_given: u64,
    history: Vec<HistoryEntry>,
    topics: TopicTable,
}

impl Default for SessionAnalytics {
    fn default() -> Self {
        Self::new(TopicTable::default())
    }
}

impl SessionAnalytics {
    /// Start a session now
    pub fn new(topics: TopicTable) -> Self {
        Self::starting_at(Utc::now(), topics)
    }

    pub fn starting_at(session_start: DateTime<Utc>, topics: TopicTable) -> Self {
        Self {
            session_start,
            child_utterances: Vec::new(),
            assistant_responses: Vec::new(),
            child_word_set: BTreeSet::new(),
            topics_mentioned: BTreeSet::new(),
            encouragements_given: 0,
            history: Vec::new(),
            topics,
        }
    }

    pub fn session_start(&self) -> DateTime<Utc> {
        self.session_start
    }

    pub fn record_child_utterance(&mut self, text: &str) {
        self.record_child_utterance_at(text, Utc::now());
    }

    /// Record a child utterance; whitespace-only text is ignored.
    pub fn record_child_utterance_at(&mut self, text: &str, timestamp: DateTime<Utc>) {
        let normalized = trim_separators(text).to_lowercase();
        if normalized.is_empty() {
            return;
        }

        let count = word_count(&normalized);
        self.child_word_set.extend(extract_words(&normalized));
        self.topics_mentioned
            .extend(self.topics.detect_topics(&normalized));

        self.child_utterances.push(ChildUtterance {
            text: normalized.clone(),
            timestamp,
            word_count: count,
        });
        self.history.push(HistoryEntry {
            role: Speaker::Child,
            content: normalized,
            timestamp,
        });

        debug!(
            utterances = self.child_utterances.len(),
            unique_words = self.child_word_set.len(),
            "Child utterance recorded"
        );
    }

    pub fn record_assistant_response(&mut self, text: &str) {
        self.record_assistant_response_at(text, Utc::now());
    }

    pub fn record_assistant_response_at(&mut self, text: &str, timestamp: DateTime<Utc>) {
        self.assistant_responses.push(AssistantResponse {
            text: text.to_string(),
            timestamp,
        });
        self.history.push(HistoryEntry {
            role: Speaker::Assistant,
            content: text.to_string(),
            timestamp,
        });
    }

    pub fn record_encouragement(&mut self) {
        self.encouragements_given += 1;
    }

    /// Interleaved child/assistant log, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn child_utterances(&self) -> &[ChildUtterance] {
        &self.child_utterances
    }

    pub fn child_word_set(&self) -> &BTreeSet<String> {
        &self.child_word_set
    }

    pub fn topics_mentioned(&self) -> &BTreeSet<String> {
        &self.topics_mentioned
    }

    pub fn snapshot(&self) -> SessionStatistics {
        self.snapshot_at(Utc::now())
    }

    /// Statistics as of `now`. Pure read.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> SessionStatistics {
        let elapsed = now - self.session_start;
        let duration = elapsed
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or_else(|| elapsed.num_seconds() as f64);

        let child_vocalizations = self.child_utterances.len();
        let assistant_responses_count = self.assistant_responses.len();
        let total_child_words_spoken: usize =
            self.child_utterances.iter().map(|u| u.word_count).sum();

        let avg_child_utterance_length = if child_vocalizations == 0 {
            0.0
        } else {
            total_child_words_spoken as f64 / child_vocalizations as f64
        };

        // Strictly-greater comparison keeps the first of equally long utterances
        let best_utterance = self
            .child_utterances
            .iter()
            .fold(None::<&ChildUtterance>, |best, u| match best {
                Some(b) if b.word_count >= u.word_count => Some(b),
                _ => Some(u),
            })
            .map(|u| u.text.clone())
            .unwrap_or_default();

        let child_to_ai_ratio = if assistant_responses_count == 0 {
            0.0
        } else {
            child_vocalizations as f64 / assistant_responses_count as f64
        };

        SessionStatistics {
            session_duration_seconds: round2(duration),
            child_vocalizations,
            assistant_responses_count,
            avg_child_utterance_length: round2(avg_child_utterance_length),
            best_utterance,
            child_to_ai_ratio: round2(child_to_ai_ratio),
            unique_child_words: self.child_word_set.len(),
            vocabulary: self.child_word_set.iter().cloned().collect(),
            topics_detected: self.topics_mentioned.iter().cloned().collect(),
            total_child_words_spoken,
            encouragements_given: self.encouragements_given,
        }
    }
}
