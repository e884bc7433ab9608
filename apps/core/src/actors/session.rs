use crate::actors::messages::{SessionMessage, TranscriptEvent, TurnOutcome};
use crate::actors::traits::{PersistenceBackend, ReplyGenerator, SpeechOutput, SummaryGenerator};
use crate::analytics::{fallback_summary, summarize, SessionAnalytics, SessionStatistics};
use crate::brain::{trim_separators, AffectDecision, Emotion, TurnAnalyzer};
use crate::config::{EngineConfig, SessionConfig};
use crate::error::AppError;
use crate::memory::{ChatMessage, ChatRole, ConversationWindow, ReplyRequest, Turn};
use crate::models::{SessionRecord, SpeechPayload};
use crate::prompts::{self, GREETING_INSTRUCTIONS};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

const MAILBOX_SIZE: usize = 32;
const PERSIST_BACKOFF: Duration = Duration::from_millis(100);

/// Everything a session actor talks to.
///
/// The generators are optional: without a reply generator every turn is answered
/// from the encouragement bank, without a summary generator the templated summary
/// is archived.
pub struct SessionCollaborators<S, P>
where
    S: SpeechOutput,
    P: PersistenceBackend,
{
    pub reply_generator: Option<Arc<dyn ReplyGenerator>>,
    pub summary_generator: Option<Arc<dyn SummaryGenerator>>,
    pub speech: Arc<S>,
    pub persistence: Arc<P>,
}

impl<S, P> SessionCollaborators<S, P>
where
    S: SpeechOutput,
    P: PersistenceBackend,
{
    pub fn new(speech: Arc<S>, persistence: Arc<P>) -> Self {
        Self {
            reply_generator: None,
            summary_generator: None,
            speech,
            persistence,
        }
    }

    pub fn with_reply_generator(mut self, generator: Arc<dyn ReplyGenerator>) -> Self {
        self.reply_generator = Some(generator);
        self
    }

    pub fn with_summary_generator(mut self, generator: Arc<dyn SummaryGenerator>) -> Self {
        self.summary_generator = Some(generator);
        self
    }
}

/// A handle to one session actor.
///
/// Each session owns its analyzer, conversation window and analytics; the actor
/// mailbox serializes every event of the session so transcript handling and
/// finalization never interleave.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
    session_id: Uuid,
    turn_timeout: Duration,
    finalize_timeout: Duration,
}

impl SessionHandle {
    /// Spawns a new session actor for `room` and returns a handle to it.
    pub fn spawn<S, P>(
        room: impl Into<String>,
        engine: &EngineConfig,
        config: SessionConfig,
        collaborators: SessionCollaborators<S, P>,
    ) -> Self
    where
        S: SpeechOutput,
        P: PersistenceBackend,
    {
        let (sender, receiver) = mpsc::channel(MAILBOX_SIZE);
        let session_id = Uuid::new_v4();
        let reply_timeout = config.reply_timeout();
        // generator + speech, plus slack
        let turn_timeout = reply_timeout * 3;
        // summary + every persistence attempt with its backoff
        let finalize_timeout = reply_timeout * (config.persist_attempts + 2)
            + PERSIST_BACKOFF * config.persist_attempts;

        let runner = SessionRunner::new(receiver, session_id, room.into(), engine, config, collaborators);
        tokio::spawn(async move { runner.run().await });

        Self {
            sender,
            session_id,
            turn_timeout,
            finalize_timeout,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    async fn request<T>(
        &self,
        msg: SessionMessage,
        recv: oneshot::Receiver<T>,
        limit: Duration,
    ) -> Result<T, AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(format!("Session mailbox closed: {}", e)))?;
        timeout(limit, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))
    }

    /// Handles one transcript: classify, record, reply and speak.
    #[instrument(skip(self, event), fields(session_id = %self.session_id, speaker = %event.speaker_identity))]
    pub async fn handle_transcript(&self, event: TranscriptEvent) -> Result<TurnOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SessionMessage::Transcript {
            event,
            responder: send,
        };
        self.request(msg, recv, self.turn_timeout).await?
    }

    /// Produces and speaks the opening greeting.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn greet(&self) -> Result<SpeechPayload, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SessionMessage::Greet { responder: send };
        self.request(msg, recv, self.turn_timeout).await?
    }

    /// Returns the current statistics without ending the session.
    pub async fn snapshot(&self) -> Result<SessionStatistics, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SessionMessage::Snapshot { responder: send };
        self.request(msg, recv, self.turn_timeout).await
    }

    /// Ends the session: summarizes it, persists the record and stops the actor.
    ///
    /// The record is returned even when persistence ultimately failed.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn finalize(&self) -> Result<SessionRecord, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SessionMessage::Finalize { responder: send };
        self.request(msg, recv, self.finalize_timeout).await?
    }

    /// Stops the actor without persisting anything.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(SessionMessage::Shutdown)
            .await
            .map_err(|e| AppError::Actor(format!("Session mailbox closed: {}", e)))
    }
}

// --- Actor Runner ---
struct SessionRunner<S, P>
where
    S: SpeechOutput,
    P: PersistenceBackend,
{
    receiver: mpsc::Receiver<SessionMessage>,
    session_id: Uuid,
    room: String,
    config: SessionConfig,
    analyzer: TurnAnalyzer,
    memory: ConversationWindow,
    analytics: SessionAnalytics,
    collaborators: SessionCollaborators<S, P>,
}

impl<S, P> SessionRunner<S, P>
where
    S: SpeechOutput,
    P: PersistenceBackend,
{
    fn new(
        receiver: mpsc::Receiver<SessionMessage>,
        session_id: Uuid,
        room: String,
        engine: &EngineConfig,
        config: SessionConfig,
        collaborators: SessionCollaborators<S, P>,
    ) -> Self {
        Self {
            receiver,
            session_id,
            room,
            config,
            analyzer: TurnAnalyzer::new(engine.topics.clone()),
            memory: ConversationWindow::new(engine.memory_window),
            analytics: SessionAnalytics::new(engine.topics.clone()),
            collaborators,
        }
    }

    async fn run(mut self) {
        info!(session_id = %self.session_id, room = %self.room, "Session started");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SessionMessage::Transcript { event, responder } => {
                    let result = self.handle_transcript(event).await;
                    if let Err(e) = &result {
                        error!("Error handling transcript: {:?}", e);
                    }
                    let _ = responder.send(result);
                }
                SessionMessage::Greet { responder } => {
                    let result = self.greet().await;
                    let _ = responder.send(result);
                }
                SessionMessage::Snapshot { responder } => {
                    let _ = responder.send(self.analytics.snapshot());
                }
                SessionMessage::Finalize { responder } => {
                    let record = self.finalize().await;
                    let _ = responder.send(Ok(record));
                    break;
                }
                SessionMessage::Shutdown => {
                    info!("Session shutting down without persisting");
                    break;
                }
            }
        }
        info!(session_id = %self.session_id, "Session stopped");
    }

    #[instrument(skip(self, event), fields(session_id = %self.session_id))]
    async fn handle_transcript(&mut self, event: TranscriptEvent) -> Result<TurnOutcome, AppError> {
        if event.speaker_identity == self.config.agent_identity {
            debug!("Ignoring transcript from the agent itself");
            return Ok(TurnOutcome::ignored());
        }

        let packet = self.analyzer.analyze(event.transcript.as_deref());
        debug!(transcript = %packet.transcript, "Child transcript received");

        if !packet.is_verbal() {
            // Silence is answered from the encouragement bank and leaves the
            // session state untouched.
            let text = prompts::random_encouragement().to_string();
            let response = self.speak(SpeechPayload::tagged(text, packet.affect)).await;
            return Ok(TurnOutcome {
                ignored: false,
                packet: Some(packet),
                response: Some(response),
                fallback_used: false,
            });
        }

        self.analytics
            .record_child_utterance_at(&packet.transcript, packet.timestamp);
        let turn = Turn::child(trim_separators(&packet.transcript), packet.timestamp);
        let request = self.memory.admit_child_turn(turn, packet.affect.emotion);
        let (text, fallback_used) = self.generate_reply(request).await;

        let response = self.respond(text, packet.affect).await;
        Ok(TurnOutcome {
            ignored: false,
            packet: Some(packet),
            response: Some(response),
            fallback_used,
        })
    }

    #[instrument(skip(self), fields(session_id = %self.session_id))]
    async fn greet(&mut self) -> Result<SpeechPayload, AppError> {
        let request = ReplyRequest {
            instructions: format!("{}\n{}", prompts::COMPANION_INSTRUCTIONS, GREETING_INSTRUCTIONS),
            messages: vec![ChatMessage::new(ChatRole::User, GREETING_INSTRUCTIONS)],
        };
        let (text, _) = self.generate_reply(request).await;
        let affect = AffectDecision {
            emotion: Emotion::Happy,
            gesture: self.analyzer.selector().select_gesture(None),
        };
        Ok(self.respond(text, affect).await)
    }

    /// Ask the reply generator, falling back to a stock encouragement.
    async fn generate_reply(&self, request: ReplyRequest) -> (String, bool) {
        let Some(generator) = &self.collaborators.reply_generator else {
            return (prompts::random_encouragement().to_string(), true);
        };

        match timeout(self.config.reply_timeout(), generator.generate_reply(request)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => (text.trim().to_string(), false),
            Ok(Ok(_)) => {
                warn!("Reply generator returned empty text, using encouragement");
                (prompts::random_encouragement().to_string(), true)
            }
            Ok(Err(e)) => {
                warn!("Reply generation failed: {}", e);
                (prompts::random_encouragement().to_string(), true)
            }
            Err(_) => {
                warn!(
                    "Reply generation timed out after {}s",
                    self.config.reply_timeout_secs
                );
                (prompts::random_encouragement().to_string(), true)
            }
        }
    }

    /// Record and speak one assistant response.
    async fn respond(&mut self, text: String, affect: AffectDecision) -> SpeechPayload {
        let now = Utc::now();
        self.analytics.record_assistant_response_at(&text, now);
        self.memory.push(Turn::assistant(text.clone(), now));
        if affect.emotion == Emotion::Encouraging {
            self.analytics.record_encouragement();
        }

        self.speak(SpeechPayload::tagged(text, affect)).await
    }

    async fn speak(&self, payload: SpeechPayload) -> SpeechPayload {
        match timeout(
            self.config.reply_timeout(),
            self.collaborators.speech.speak(payload.clone()),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Speech output failed: {}", e),
            Err(_) => warn!("Speech output timed out"),
        }
        payload
    }

    #[instrument(skip(self), fields(session_id = %self.session_id))]
    async fn finalize(&mut self) -> SessionRecord {
        let ended_at = Utc::now();
        let statistics = self.analytics.snapshot_at(ended_at);

        let summary_generator = self.collaborators.summary_generator.as_deref();
        let conversation_summary = match timeout(
            self.config.reply_timeout(),
            summarize(summary_generator, self.analytics.history(), &statistics),
        )
        .await
        {
            Ok(summary) => summary,
            Err(_) => {
                warn!("Summary generation timed out, using templated summary");
                fallback_summary(&statistics)
            }
        };

        let record = SessionRecord {
            session_id: self.session_id,
            room: self.room.clone(),
            started_at: self.analytics.session_start(),
            ended_at,
            statistics,
            conversation_summary,
        };

        self.persist(&record).await;
        info!(
            vocalizations = record.statistics.child_vocalizations,
            responses = record.statistics.assistant_responses_count,
            "Session finalized"
        );
        record
    }

    /// Submit the record with bounded retry; the last failure is logged and dropped.
    async fn persist(&self, record: &SessionRecord) {
        let attempts = self.config.persist_attempts.max(1);
        for attempt in 1..=attempts {
            let result = timeout(
                self.config.reply_timeout(),
                self.collaborators.persistence.submit(record),
            )
            .await
            .map_err(AppError::from)
            .and_then(|r| r);

            match result {
                Ok(()) => {
                    info!(attempt, "Session record persisted");
                    return;
                }
                Err(e) if attempt < attempts => {
                    warn!(attempt, "Persisting session record failed: {}", e);
                    sleep(PERSIST_BACKOFF * attempt).await;
                }
                Err(e) => {
                    error!(attempt, "Dropping session record after failed submission: {}", e);
                }
            }
        }
    }
}
