//! Bounded dialogue memory.
//!
//! Keeps the last `N` turns of the conversation and turns them into the
//! role-tagged history handed to the reply generator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::brain::{word_count, Emotion};
use crate::prompts;

/// Default capacity of the conversation window
pub const DEFAULT_WINDOW_SIZE: usize = 6;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Child,
    Assistant,
}

/// Role tag of a message sent to the reply generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl From<Speaker> for ChatRole {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::Child => ChatRole::User,
            Speaker::Assistant => ChatRole::Assistant,
        }
    }
}

/// One utterance instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Whitespace token count; only set for child turns
    pub word_count: Option<usize>,
}

impl Turn {
    pub fn child(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let text = text.into();
        let count = word_count(&text);
        Self {
            speaker: Speaker::Child,
            text,
            timestamp,
            word_count: Some(count),
        }
    }

    pub fn assistant(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            timestamp,
            word_count: None,
        }
    }
}

/// A role-tagged message for the reply generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Payload for one reply generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRequest {
    /// Free-text instructions (persona and tone)
    pub instructions: String,
    /// Role-tagged history, oldest first
    pub messages: Vec<ChatMessage>,
}

/// FIFO window over the most recent turns
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Default for ConversationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl ConversationWindow {
    /// A window of `capacity` turns; a zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, turn: Turn) {
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// The retained turns, oldest first
    pub fn window(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Role-tagged history of the window
    pub fn history(&self) -> Vec<ChatMessage> {
        self.turns
            .iter()
            .map(|t| ChatMessage::new(t.speaker.into(), t.text.clone()))
            .collect()
    }

    /// Build the reply request for the current utterance.
    ///
    /// With an empty window the history is replaced by a single user message
    /// carrying the utterance and the length/tone instruction.
    pub fn reply_request(&self, utterance: &str, emotion: Emotion) -> ReplyRequest {
        let messages = if self.is_empty() {
            vec![ChatMessage::new(
                ChatRole::User,
                prompts::single_turn_message(utterance, emotion),
            )]
        } else {
            self.history()
        };

        ReplyRequest {
            instructions: prompts::reply_instructions(emotion),
            messages,
        }
    }

    /// Push the child's turn and build the reply request for it.
    ///
    /// Emptiness is checked before the turn joins the window, so the opening
    /// turn of a session goes out as the single synthetic user message.
    pub fn admit_child_turn(&mut self, turn: Turn, emotion: Emotion) -> ReplyRequest {
        let opening = self
            .is_empty()
            .then(|| self.reply_request(&turn.text, emotion));
        let utterance = turn.text.clone();
        self.push(turn);
        opening.unwrap_or_else(|| self.reply_request(&utterance, emotion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(text: &str) -> Turn {
        Turn::child(text, Utc::now())
    }

    #[test]
    fn test_window_evicts_oldest_first() {
        let mut window = ConversationWindow::new(3);
        for i in 0..5 {
            window.push(child(&format!("word{}", i)));
        }

        assert_eq!(window.len(), 3);
        let texts: Vec<&str> = window.window().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["word2", "word3", "word4"]);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut window = ConversationWindow::new(0);
        window.push(child("a"));
        window.push(child("b"));
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_history_roles() {
        let mut window = ConversationWindow::default();
        window.push(child("ball"));
        window.push(Turn::assistant("Ball! Big ball!", Utc::now()));

        let history = window.history();
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(history[1].content, "Ball! Big ball!");
    }

    #[test]
    fn test_child_turn_counts_words() {
        assert_eq!(child("go car go").word_count, Some(3));
        assert_eq!(Turn::assistant("hi there", Utc::now()).word_count, None);
    }

    #[test]
    fn test_empty_window_falls_back_to_single_message() {
        let window = ConversationWindow::default();
        let request = window.reply_request("car", Emotion::Happy);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, ChatRole::User);
        assert!(request.messages[0].content.contains("car"));
        assert!(request.messages[0].content.contains("1-5 words"));
        assert!(request.messages[0].content.contains("happy"));
    }

    #[test]
    fn test_non_empty_window_uses_history() {
        let mut window = ConversationWindow::default();
        window.push(child("dog"));
        let request = window.reply_request("dog", Emotion::Excited);

        assert_eq!(request.messages, vec![ChatMessage::new(ChatRole::User, "dog")]);
        assert!(request.instructions.contains("excited"));
    }
}
