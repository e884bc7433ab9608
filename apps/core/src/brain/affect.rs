//! Affect selection.
//!
//! Maps an utterance to the (emotion, gesture) pair attached to the companion's
//! next spoken response. Emotions come from an ordered rule table evaluated
//! first-match-wins; gestures come from an exhaustive map over achievement levels.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::turn::AchievementLevel;

/// Emotion tag understood by the avatar renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Encouraging,
    Excited,
    Neutral,
    Thinking,
    Celebrating,
    Gentle,
}

impl Emotion {
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Encouraging => "encouraging",
            Emotion::Excited => "excited",
            Emotion::Neutral => "neutral",
            Emotion::Thinking => "thinking",
            Emotion::Celebrating => "celebrating",
            Emotion::Gentle => "gentle",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Gesture tag understood by the avatar renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Wave,
    Clap,
    ThumbsUp,
    Nod,
    Point,
    HeartHands,
    Dance,
}

impl Gesture {
    pub fn label(&self) -> &'static str {
        match self {
            Gesture::Wave => "wave",
            Gesture::Clap => "clap",
            Gesture::ThumbsUp => "thumbs_up",
            Gesture::Nod => "nod",
            Gesture::Point => "point",
            Gesture::HeartHands => "heart_hands",
            Gesture::Dance => "dance",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The pair attached to one spoken response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectDecision {
    pub emotion: Emotion,
    pub gesture: Gesture,
}

/// Condition checked by an [`EmotionRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionTrigger {
    /// The child did not produce a verbal turn
    NoParticipation,
    /// Any of the keywords occurs as a substring of the lowercased context
    AnyKeyword(&'static [&'static str]),
    /// Always matches
    Always,
}

/// One `(predicate, result)` entry of the emotion ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionRule {
    pub trigger: EmotionTrigger,
    pub emotion: Emotion,
}

impl EmotionRule {
    fn matches(&self, lowered_context: &str, child_participated: bool) -> bool {
        match self.trigger {
            EmotionTrigger::NoParticipation => !child_participated,
            EmotionTrigger::AnyKeyword(keywords) => {
                keywords.iter().any(|k| lowered_context.contains(k))
            }
            EmotionTrigger::Always => true,
        }
    }
}

/// Emotion rules in priority order. The last rule always matches.
pub const EMOTION_RULES: &[EmotionRule] = &[
    EmotionRule {
        trigger: EmotionTrigger::NoParticipation,
        emotion: Emotion::Encouraging,
    },
    EmotionRule {
        trigger: EmotionTrigger::AnyKeyword(&["great", "good", "perfect", "wonderful"]),
        emotion: Emotion::Celebrating,
    },
    EmotionRule {
        trigger: EmotionTrigger::AnyKeyword(&["try", "attempt", "practice"]),
        emotion: Emotion::Encouraging,
    },
    EmotionRule {
        trigger: EmotionTrigger::AnyKeyword(&["thinking", "hmm", "let me"]),
        emotion: Emotion::Thinking,
    },
    EmotionRule {
        trigger: EmotionTrigger::AnyKeyword(&["excited", "fun", "play", "yay"]),
        emotion: Emotion::Excited,
    },
    EmotionRule {
        trigger: EmotionTrigger::Always,
        emotion: Emotion::Happy,
    },
];

/// Stateless selector over a rule table
#[derive(Debug, Clone, Copy)]
pub struct AffectSelector {
    rules: &'static [EmotionRule],
}

impl Default for AffectSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl AffectSelector {
    pub fn new() -> Self {
        Self {
            rules: EMOTION_RULES,
        }
    }

    /// Index of the rule that decides `context_text`; exposed so the priority
    /// order can be checked on its own.
    pub fn matching_rule(&self, context_text: &str, child_participated: bool) -> Option<usize> {
        let lowered = context_text.to_lowercase();
        self.rules
            .iter()
            .position(|rule| rule.matches(&lowered, child_participated))
    }

    pub fn select_emotion(&self, context_text: &str, child_participated: bool) -> Emotion {
        self.matching_rule(context_text, child_participated)
            .map(|i| self.rules[i].emotion)
            .unwrap_or(Emotion::Happy)
    }

    /// `None` stands for any level outside the known set and yields `Wave`.
    pub fn select_gesture(&self, achievement: Option<AchievementLevel>) -> Gesture {
        match achievement {
            Some(AchievementLevel::FirstWord) => Gesture::Clap,
            Some(AchievementLevel::GoodAttempt) => Gesture::ThumbsUp,
            Some(AchievementLevel::Participation) => Gesture::Nod,
            Some(AchievementLevel::Breakthrough) => Gesture::Dance,
            None => Gesture::Wave,
        }
    }

    /// Gesture for a raw achievement label as produced by external callers
    pub fn select_gesture_for_label(&self, label: &str) -> Gesture {
        self.select_gesture(AchievementLevel::from_label(label))
    }

    pub fn decide(
        &self,
        context_text: &str,
        child_participated: bool,
        achievement: Option<AchievementLevel>,
    ) -> AffectDecision {
        AffectDecision {
            emotion: self.select_emotion(context_text, child_participated),
            gesture: self.select_gesture(achievement),
        }
    }
}
