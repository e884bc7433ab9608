//! Turn Packet - output of analysing one transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::affect::AffectDecision;
use super::turn::{AchievementLevel, TurnClass};

/// Everything the brain derived from one incoming transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnPacket {
    /// Transcript as received (empty for a missing transcript)
    pub transcript: String,

    /// Verbal / non-verbal classification
    pub class: TurnClass,

    /// Lowercase word tokens
    pub words: BTreeSet<String>,

    /// Topic labels detected in the transcript
    pub topics: BTreeSet<String>,

    /// Emotion and gesture for the companion's reply
    pub affect: AffectDecision,

    /// Timestamp of analysis
    pub timestamp: DateTime<Utc>,
}

impl TurnPacket {
    pub fn is_verbal(&self) -> bool {
        self.class.is_verbal()
    }

    pub fn achievement(&self) -> Option<AchievementLevel> {
        self.class.achievement()
    }

    /// One-line description for logs; never includes the transcript itself
    pub fn summary(&self) -> String {
        let kind = match self.class {
            TurnClass::NonVerbal => "non_verbal".to_string(),
            TurnClass::Verbal {
                word_count,
                achievement,
            } => format!("verbal({} words, {})", word_count, achievement),
        };
        format!(
            "Turn: {}, Topics: {}, Emotion: {}, Gesture: {}",
            kind,
            self.topics.len(),
            self.affect.emotion,
            self.affect.gesture
        )
    }
}
