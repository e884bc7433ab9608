use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::analytics::SessionStatistics;
use crate::brain::TurnPacket;
use crate::error::AppError;
use crate::models::{SessionRecord, SpeechPayload};

/// One transcription event delivered by the real-time session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEvent {
    /// The transcribed text. `None` is treated as an empty transcript.
    pub transcript: Option<String>,
    /// Identity of the participant who spoke.
    pub speaker_identity: String,
}

impl TranscriptEvent {
    pub fn new(transcript: Option<String>, speaker_identity: impl Into<String>) -> Self {
        Self {
            transcript,
            speaker_identity: speaker_identity.into(),
        }
    }
}

/// What the session did with one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// True when the transcript came from the companion itself and was skipped.
    pub ignored: bool,
    /// Analysis of the transcript; absent for ignored events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packet: Option<TurnPacket>,
    /// The response handed to the speech output; absent for ignored events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<SpeechPayload>,
    /// True when the reply generator was unavailable and a stock encouragement was used.
    pub fallback_used: bool,
}

impl TurnOutcome {
    pub fn ignored() -> Self {
        Self {
            ignored: true,
            packet: None,
            response: None,
            fallback_used: false,
        }
    }
}

/// Messages that can be sent to the session actor.
#[derive(Debug)]
pub enum SessionMessage {
    /// A transcript to classify, record and answer.
    Transcript {
        event: TranscriptEvent,
        /// A channel to send the turn outcome back.
        responder: oneshot::Sender<Result<TurnOutcome, AppError>>,
    },
    /// Produce and speak the opening greeting.
    Greet {
        responder: oneshot::Sender<Result<SpeechPayload, AppError>>,
    },
    /// A read-only statistics snapshot.
    Snapshot {
        responder: oneshot::Sender<SessionStatistics>,
    },
    /// Summarize, persist and stop the session.
    Finalize {
        responder: oneshot::Sender<Result<SessionRecord, AppError>>,
    },
    /// Stop the session without persisting it.
    Shutdown,
}
