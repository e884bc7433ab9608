//! Fixed texts sent to the reply generator, plus the local encouragement bank.

use rand::seq::SliceRandom;

use crate::brain::{trim_separators, Emotion};

/// System instructions describing the companion
pub const COMPANION_INSTRUCTIONS: &str = "You are CHAT, a warm talking friend for a young child \
(18-36 months) who is still learning to speak.
- Use very short phrases of 1-4 words, spoken slowly and clearly.
- Repeat and expand what the child says: if the child says \"go car\", answer \"Yes! Car goes!\".
- Praise every attempt, even single sounds. Never correct the child directly.
- Ask simple choice questions (\"Ball or car?\") and leave room for the child to answer.
- Talk about everyday things: toys, food, animals, colors, family, actions, feelings.";

/// Instructions for the opening turn of a session
pub const GREETING_INSTRUCTIONS: &str = "Greet the child warmly and invite them to answer. \
For example: \"Hi there! I'm CHAT! Can you say hi?\" Keep it natural and playful.";

/// System instructions for the end-of-session summary
pub const SUMMARY_INSTRUCTIONS: &str = "You are a documentation assistant for a \
speech-language pathologist. Write a 2-3 sentence synopsis of a therapy-play session in \
a neutral clinical tone. Report only what the conversation log and statistics show; do \
not address the child and do not use baby talk.";

/// Replies used for silent turns and when the reply generator is unavailable
pub const ENCOURAGEMENTS: &[&str] = &[
    "I heard you! Keep talking!",
    "Great sounds! Tell me more!",
    "You're doing so well! What else?",
    "I love hearing your voice!",
    "Nice try! Keep going!",
];

/// Instructions attached to every reply request
pub fn reply_instructions(emotion: Emotion) -> String {
    format!(
        "{}\nKeep your reply to 1-5 words. Sound {}.",
        COMPANION_INSTRUCTIONS, emotion
    )
}

/// The single user message used when there is no conversation history yet
pub fn single_turn_message(utterance: &str, emotion: Emotion) -> String {
    let said = trim_separators(utterance);
    let said = if said.is_empty() {
        "(a sound, no clear words)"
    } else {
        said
    };
    format!(
        "The child said: \"{}\". Reply in 1-5 words with a {} tone.",
        said, emotion
    )
}

/// Pick one encouragement at random
pub fn random_encouragement() -> &'static str {
    ENCOURAGEMENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Nice try! Keep going!")
}
