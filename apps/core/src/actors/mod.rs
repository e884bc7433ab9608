//! Session actors and the collaborator seams they call.

pub mod llm;
pub mod messages;
pub mod session;
pub mod traits;

pub use llm::OpenAiCompatClient;
pub use messages::{SessionMessage, TranscriptEvent, TurnOutcome};
pub use session::{SessionCollaborators, SessionHandle};
pub use traits::{PersistenceBackend, ReplyGenerator, SpeechOutput, SummaryGenerator};
