//! Memory Module Tests

use crate::brain::Emotion;
use crate::memory::{ChatRole, ConversationWindow, Speaker, Turn};
use chrono::Utc;

#[test]
fn test_window_keeps_last_n_in_order() {
    let n = 6;
    for k in 1..=4 {
        let mut window = ConversationWindow::new(n);
        for i in 0..(n + k) {
            window.push(Turn::child(format!("turn {}", i), Utc::now()));
        }

        assert_eq!(window.len(), n);
        let texts: Vec<String> = window.window().map(|t| t.text.clone()).collect();
        let expected: Vec<String> = (k..n + k).map(|i| format!("turn {}", i)).collect();
        assert_eq!(texts, expected);
    }
}

#[test]
fn test_history_is_role_tagged() {
    let mut window = ConversationWindow::default();
    window.push(Turn::child("dog", Utc::now()));
    window.push(Turn::assistant("Dog! Woof woof!", Utc::now()));

    let history = window.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[1].role, ChatRole::Assistant);
    assert_eq!(history[1].content, "Dog! Woof woof!");
}

#[test]
fn test_child_turn_carries_word_count() {
    let turn = Turn::child("big red ball", Utc::now());
    assert_eq!(turn.speaker, Speaker::Child);
    assert_eq!(turn.word_count, Some(3));
    assert_eq!(Turn::assistant("Yes!", Utc::now()).word_count, None);
}

#[test]
fn test_first_request_is_a_single_user_message() {
    let window = ConversationWindow::default();
    let request = window.reply_request("car", Emotion::Happy);

    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, ChatRole::User);
    assert!(request.messages[0].content.contains("car"));
    assert!(request.messages[0].content.contains("1-5 words"));
    assert!(request.instructions.starts_with("You are CHAT"));
}

#[test]
fn test_request_uses_window_when_not_empty() {
    let mut window = ConversationWindow::new(2);
    window.push(Turn::child("ball", Utc::now()));
    window.push(Turn::assistant("Ball! Round ball!", Utc::now()));
    window.push(Turn::child("red", Utc::now()));

    let request = window.reply_request("red", Emotion::Celebrating);
    let contents: Vec<&str> = request.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Ball! Round ball!", "red"]);
    assert!(request.instructions.contains("celebrating"));
}

#[test]
fn test_opening_turn_is_admitted_as_single_message() {
    let mut window = ConversationWindow::default();
    let request = window.admit_child_turn(Turn::child("car", Utc::now()), Emotion::Happy);

    assert_eq!(window.len(), 1);
    assert_eq!(request.messages.len(), 1);
    assert!(request.messages[0].content.contains("The child said: \"car\""));
    assert!(request.messages[0].content.contains("1-5 words"));
}

#[test]
fn test_later_turns_are_admitted_with_history() {
    let mut window = ConversationWindow::default();
    window.admit_child_turn(Turn::child("car", Utc::now()), Emotion::Happy);
    window.push(Turn::assistant("Car! Vroom!", Utc::now()));

    let request = window.admit_child_turn(Turn::child("red car", Utc::now()), Emotion::Happy);
    let contents: Vec<&str> = request.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["car", "Car! Vroom!", "red car"]);
    assert_eq!(request.messages[2].role, ChatRole::User);
}
