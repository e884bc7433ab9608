//! Turn Analyzer - runs one transcript through the brain.
//!
//! Lexical analysis → turn classification → affect selection. Pure and
//! synchronous; the session actor owns all state.

use chrono::Utc;
use std::collections::BTreeSet;
use tracing::debug;

use super::affect::{AffectDecision, AffectSelector};
use super::lexicon::{extract_words, TopicTable};
use super::turn::{AchievementLevel, TurnClass, TurnClassifier};
use super::turn_packet::TurnPacket;

/// Orchestrates the lexical, classification and affect components
#[derive(Debug, Clone, Default)]
pub struct TurnAnalyzer {
    classifier: TurnClassifier,
    selector: AffectSelector,
    topics: TopicTable,
}

impl TurnAnalyzer {
    pub fn new(topics: TopicTable) -> Self {
        Self {
            classifier: TurnClassifier::new(),
            selector: AffectSelector::new(),
            topics,
        }
    }

    pub fn topics(&self) -> &TopicTable {
        &self.topics
    }

    pub fn selector(&self) -> &AffectSelector {
        &self.selector
    }

    /// Affect for a turn of the given class.
    ///
    /// A non-verbal turn is answered like a good attempt with participation unset,
    /// i.e. encouraging + thumbs up.
    fn affect_for(&self, text: &str, class: &TurnClass) -> AffectDecision {
        match class {
            TurnClass::NonVerbal => {
                self.selector
                    .decide(text, false, Some(AchievementLevel::GoodAttempt))
            }
            TurnClass::Verbal { achievement, .. } => {
                self.selector.decide(text, true, Some(*achievement))
            }
        }
    }

    /// Analyze a transcript and produce a turn packet
    pub fn analyze(&self, transcript: Option<&str>) -> TurnPacket {
        let text = transcript.unwrap_or_default();
        let class = self.classifier.classify(transcript);

        let (words, topics) = if class.is_verbal() {
            (extract_words(text), self.topics.detect_topics(text))
        } else {
            (BTreeSet::new(), BTreeSet::new())
        };

        let affect = self.affect_for(text, &class);

        let packet = TurnPacket {
            transcript: text.to_string(),
            class,
            words,
            topics,
            affect,
            timestamp: Utc::now(),
        };
        debug!("{}", packet.summary());
        packet
    }
}
