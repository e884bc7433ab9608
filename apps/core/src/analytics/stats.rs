//! Value types produced by the analytics aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::memory::Speaker;

/// One entry of the unbounded conversation log kept for the session summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A recorded child utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildUtterance {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub word_count: usize,
}

/// A recorded assistant response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Point-in-time session statistics.
///
/// Field names are part of the persistence contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub session_duration_seconds: f64,
    pub child_vocalizations: usize,
    pub assistant_responses_count: usize,
    pub avg_child_utterance_length: f64,
    pub best_utterance: String,
    pub child_to_ai_ratio: f64,
    pub unique_child_words: usize,
    pub vocabulary: Vec<String>,
    pub topics_detected: Vec<String>,
    pub total_child_words_spoken: usize,
    pub encouragements_given: u64,
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
