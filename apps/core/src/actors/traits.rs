use crate::error::AppError;
use crate::memory::ReplyRequest;
use crate::models::{SessionRecord, SpeechPayload};
use async_trait::async_trait;

/// Defines the public interface for the reply generator (a language-model service).
///
/// The session actor only builds the request; how the text is produced (remote API,
/// local model, scripted replies) is up to the implementation.
#[async_trait]
pub trait ReplyGenerator: Send + Sync + 'static {
    /// Generates the companion's next reply from role-tagged history and instructions.
    async fn generate_reply(&self, request: ReplyRequest) -> Result<String, AppError>;
}

/// Defines the interface for the narrative summary generator used at session end.
#[async_trait]
pub trait SummaryGenerator: Send + Sync + 'static {
    /// Turns a fully formatted summary prompt into a short synopsis.
    async fn generate_summary(&self, prompt: String) -> Result<String, AppError>;
}

/// Defines the interface for the speech-output service (TTS + avatar).
#[async_trait]
pub trait SpeechOutput: Send + Sync + 'static {
    /// Speaks `payload.text`, rendering the avatar with the attached metadata.
    async fn speak(&self, payload: SpeechPayload) -> Result<(), AppError>;
}

/// Defines the interface for the persistence backend that archives finished sessions.
#[async_trait]
pub trait PersistenceBackend: Send + Sync + 'static {
    /// Stores one session record. Submitting the same `session_id` twice must
    /// overwrite rather than duplicate.
    async fn submit(&self, record: &SessionRecord) -> Result<(), AppError>;
}
