//! # Brain Module
//!
//! Fast, rule-based analysis of child transcripts.
//! Runs on every transcript BEFORE the reply generator is called.
//!
//! ## Components
//! - `lexicon`: tokenization, word counting and topic detection
//! - `turn`: verbal / non-verbal classification and achievement level
//! - `affect`: emotion and gesture selection
//! - `turn_packet`: output data structure
//! - `analyzer`: main orchestrator

pub mod affect;
pub mod analyzer;
pub mod lexicon;
pub mod turn;
pub mod turn_packet;

pub use affect::{AffectDecision, AffectSelector, Emotion, EmotionRule, EmotionTrigger, Gesture};
pub use analyzer::TurnAnalyzer;
pub use lexicon::{extract_words, is_blank, is_separator, trim_separators, word_count, TopicTable};
pub use turn::{AchievementLevel, TurnClass, TurnClassifier};
pub use turn_packet::TurnPacket;
