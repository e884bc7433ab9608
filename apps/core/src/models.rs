use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::analytics::SessionStatistics;
use crate::brain::AffectDecision;

/// Metadata key carrying the emotion label for the avatar renderer.
pub const EMOTION_METADATA_KEY: &str = "tavus_emotion";
/// Metadata key carrying the gesture label for the avatar renderer.
pub const GESTURE_METADATA_KEY: &str = "tavus_gesture";

/// Represents one response handed to the speech-output service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechPayload {
    /// The text to speak.
    pub text: String,
    /// Opaque metadata for the speech/avatar service.
    pub metadata: BTreeMap<String, String>,
}

impl SpeechPayload {
    /// Creates a payload tagged with exactly the emotion and gesture keys.
    pub fn tagged(text: impl Into<String>, affect: AffectDecision) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            EMOTION_METADATA_KEY.to_string(),
            affect.emotion.label().to_string(),
        );
        metadata.insert(
            GESTURE_METADATA_KEY.to_string(),
            affect.gesture.label().to_string(),
        );
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// Represents the flat analytics row archived when a session ends.
///
/// Statistics fields are flattened so the serialized names match the
/// relational schema verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The unique identifier for the session; also the idempotency key.
    pub session_id: Uuid,
    /// The name of the real-time room the session ran in.
    pub room: String,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// When the session was finalized.
    pub ended_at: DateTime<Utc>,
    #[serde(flatten)]
    pub statistics: SessionStatistics,
    /// Short narrative summary of the session.
    pub conversation_summary: String,
}
