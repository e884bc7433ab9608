// CHAT replay entry point
// Reads one child transcript per stdin line, prints each turn outcome as JSON.

use anyhow::Context;
use async_trait::async_trait;
use chat_core::actors::{
    OpenAiCompatClient, SessionCollaborators, SessionHandle, SpeechOutput, TranscriptEvent,
};
use chat_core::config::AppConfig;
use chat_core::models::SpeechPayload;
use chat_core::persistence::JsonFileStore;
use chat_core::telemetry::init_tracing;
use chat_core::AppError;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const CHILD_IDENTITY: &str = "child";

/// Speech output that only logs what would be spoken.
struct LoggedSpeech;

#[async_trait]
impl SpeechOutput for LoggedSpeech {
    async fn speak(&self, payload: SpeechPayload) -> Result<(), AppError> {
        info!(metadata = ?payload.metadata, "Speaking: {}", payload.text);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format)?;

    let room = std::env::args().nth(1).unwrap_or_else(|| "replay".to_string());

    let mut collaborators = SessionCollaborators::new(
        Arc::new(LoggedSpeech),
        Arc::new(JsonFileStore::new(&config.records_dir)),
    );
    match &config.generator {
        Some(generator) => {
            let client = Arc::new(OpenAiCompatClient::new(generator));
            info!(model = client.model(), "Using HTTP reply generator");
            collaborators = collaborators
                .with_reply_generator(client.clone())
                .with_summary_generator(client);
        }
        None => info!("No reply generator configured, answering with encouragements"),
    }

    let session = SessionHandle::spawn(room, &config.engine, config.session.clone(), collaborators);

    let greeting = session.greet().await?;
    println!("{}", serde_json::to_string(&greeting)?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = TranscriptEvent::new(Some(line), CHILD_IDENTITY);
        let outcome = session.handle_transcript(event).await?;
        println!("{}", serde_json::to_string(&outcome)?);
    }

    let record = session.finalize().await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    info!(
        session_id = %record.session_id,
        dir = %config.records_dir.display(),
        "Replay finished"
    );
    Ok(())
}
