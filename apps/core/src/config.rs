//! Static configuration loaded from the environment (and `.env`).
//!
//! | Env | Default |
//! |-----|---------|
//! | CHAT_MEMORY_WINDOW | 6 |
//! | CHAT_TOPICS_FILE | built-in table |
//! | CHAT_AGENT_IDENTITY | chat-agent |
//! | CHAT_REPLY_TIMEOUT_SECS | 30 |
//! | CHAT_PERSIST_ATTEMPTS | 3 |
//! | CHAT_LLM_BASE_URL | https://openrouter.ai/api/v1 |
//! | CHAT_LLM_API_KEY | unset (no HTTP generator) |
//! | CHAT_LLM_MODEL | deepseek/deepseek-r1-0528:free |
//! | CHAT_LLM_TEMPERATURE | 0.3 |
//! | CHAT_RECORDS_DIR | records |
//! | CHAT_LOG_FORMAT | pretty |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::brain::TopicTable;
use crate::error::AppError;
use crate::memory::DEFAULT_WINDOW_SIZE;
use crate::telemetry::LogFormat;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-0528:free";

/// Tunables of the turn engine itself.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    /// Capacity of the conversation window.
    #[validate(range(min = 1, max = 64))]
    pub memory_window: usize,
    /// Topic label → keyword list.
    #[serde(default)]
    pub topics: TopicTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memory_window: DEFAULT_WINDOW_SIZE,
            topics: TopicTable::default(),
        }
    }
}

/// Settings of the session actor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionConfig {
    /// Identity of the companion's own participant; its transcripts are ignored.
    #[validate(length(min = 1))]
    pub agent_identity: String,
    /// Timeout of one reply or summary generator call, in seconds.
    #[validate(range(min = 1, max = 600))]
    pub reply_timeout_secs: u64,
    /// How many times a session record is submitted before it is dropped.
    #[validate(range(min = 1, max = 5))]
    pub persist_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            agent_identity: "chat-agent".to_string(),
            reply_timeout_secs: 30,
            persist_attempts: 3,
        }
    }
}

impl SessionConfig {
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }
}

/// Connection settings of an OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeneratorConfig {
    #[validate(url)]
    pub base_url: String,
    #[validate(length(min = 1))]
    pub api_key: String,
    #[validate(length(min = 1))]
    pub model: String,
    /// Controls the creativity of the model's responses. Value between 0.0 and 2.0.
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
}

/// Full application configuration.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub engine: EngineConfig,
    #[validate(nested)]
    pub session: SessionConfig,
    #[validate(nested)]
    pub generator: Option<GeneratorConfig>,
    pub records_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            session: SessionConfig::default(),
            generator: None,
            records_dir: PathBuf::from("records"),
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}

fn string_var(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Load a topic table from a JSON object of label → keyword list.
pub fn load_topics(path: &std::path::Path) -> Result<TopicTable, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let topics: BTreeMap<String, Vec<String>> = serde_json::from_str(&raw)?;
    if topics.is_empty() {
        return Err(AppError::Config(format!(
            "topic table {:?} defines no topics",
            path
        )));
    }
    Ok(TopicTable::new(topics))
}

impl AppConfig {
    /// Reads the configuration from environment variables and validates it.
    pub fn from_env() -> Result<Self, AppError> {
        let topics = match env::var("CHAT_TOPICS_FILE") {
            Ok(path) if !path.trim().is_empty() => load_topics(path.trim().as_ref())?,
            _ => TopicTable::default(),
        };

        let engine = EngineConfig {
            memory_window: parse_var("CHAT_MEMORY_WINDOW", DEFAULT_WINDOW_SIZE)?,
            topics,
        };

        let defaults = SessionConfig::default();
        let session = SessionConfig {
            agent_identity: string_var("CHAT_AGENT_IDENTITY", &defaults.agent_identity),
            reply_timeout_secs: parse_var("CHAT_REPLY_TIMEOUT_SECS", defaults.reply_timeout_secs)?,
            persist_attempts: parse_var("CHAT_PERSIST_ATTEMPTS", defaults.persist_attempts)?,
        };

        let generator = match env::var("CHAT_LLM_API_KEY") {
            Ok(api_key) if !api_key.trim().is_empty() => Some(GeneratorConfig {
                base_url: string_var("CHAT_LLM_BASE_URL", DEFAULT_BASE_URL),
                api_key: api_key.trim().to_string(),
                model: string_var("CHAT_LLM_MODEL", DEFAULT_MODEL),
                temperature: parse_var("CHAT_LLM_TEMPERATURE", 0.3)?,
            }),
            _ => None,
        };

        let config = Self {
            engine,
            session,
            generator,
            records_dir: PathBuf::from(string_var("CHAT_RECORDS_DIR", "records")),
            log_format: parse_var("CHAT_LOG_FORMAT", LogFormat::Pretty)?,
        };
        config.validate()?;
        Ok(config)
    }
}
