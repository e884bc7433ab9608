//! Session summary requests.
//!
//! Formats the full conversation log and the statistics snapshot into an
//! instruction for the narrative summary generator, and guarantees a summary
//! string even when the generator is missing or fails.

use std::fmt::Write;
use tracing::{info, warn};

use super::stats::{HistoryEntry, SessionStatistics};
use crate::actors::traits::SummaryGenerator;
use crate::memory::Speaker;

/// Returned without calling the generator when nothing was said
pub const NO_CONVERSATION_SUMMARY: &str = "No conversation occurred during this session.";

/// Build the summary prompt, or `None` when the history is empty.
pub fn build_summary_prompt(history: &[HistoryEntry], stats: &SessionStatistics) -> Option<String> {
    if history.is_empty() {
        return None;
    }

    let mut prompt = String::from(
        "You are assisting a speech-language pathologist. Summarize the following session \
between a young child with late language emergence and the CHAT companion in 2-3 \
sentences, using a neutral clinical tone. Mention participation, vocabulary and any \
notable utterances.\n\nConversation:\n",
    );

    for entry in history {
        let speaker = match entry.role {
            Speaker::Child => "Child",
            Speaker::Assistant => "CHAT",
        };
        // Writing into a String cannot fail
        let _ = writeln!(prompt, "{}: {}", speaker, entry.content);
    }

    let topics = if stats.topics_detected.is_empty() {
        "none".to_string()
    } else {
        stats.topics_detected.join(", ")
    };

    let _ = write!(
        prompt,
        "\nStatistics:\n\
- Session duration: {:.2} seconds\n\
- Child vocalizations: {}\n\
- Assistant responses: {}\n\
- Average utterance length: {:.2} words\n\
- Unique words: {}\n\
- Total words spoken: {}\n\
- Longest utterance: \"{}\"\n\
- Child-to-assistant ratio: {:.2}\n\
- Encouragements given: {}\n\
- Topics: {}\n",
        stats.session_duration_seconds,
        stats.child_vocalizations,
        stats.assistant_responses_count,
        stats.avg_child_utterance_length,
        stats.unique_child_words,
        stats.total_child_words_spoken,
        stats.best_utterance,
        stats.child_to_ai_ratio,
        stats.encouragements_given,
        topics,
    );

    Some(prompt)
}

/// Templated summary built only from the vocalization and vocabulary counts
pub fn fallback_summary(stats: &SessionStatistics) -> String {
    format!(
        "The child made {} vocalizations and used {} unique words during this session.",
        stats.child_vocalizations, stats.unique_child_words
    )
}

/// Produce the session summary. Never fails.
pub async fn summarize<G>(
    generator: Option<&G>,
    history: &[HistoryEntry],
    stats: &SessionStatistics,
) -> String
where
    G: SummaryGenerator + ?Sized,
{
    let Some(prompt) = build_summary_prompt(history, stats) else {
        return NO_CONVERSATION_SUMMARY.to_string();
    };

    let Some(generator) = generator else {
        info!("No summary generator configured, using templated summary");
        return fallback_summary(stats);
    };

    match generator.generate_summary(prompt).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            warn!("Summary generator returned empty text, using templated summary");
            fallback_summary(stats)
        }
        Err(e) => {
            warn!("Summary generation failed: {}", e);
            fallback_summary(stats)
        }
    }
}
