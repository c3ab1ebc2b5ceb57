//! # Application State
//!
//! The shared state holds the assistant client, the database session, and
//! the chat session for this process. The mutex around the chat session is
//! the submission state machine: the lock is held while a submission is in
//! flight, so exactly one question is processed at a time.

use crate::config::Config;
use sqltutor::{
    providers::{ai::groq::GroqProvider, db::MySqlSession},
    AssistantClient, SqlBackend, Transcript,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The chat state for one interactive session.
///
/// Lives for the lifetime of the process; nothing is persisted.
#[derive(Debug)]
pub struct ChatSession {
    pub transcript: Transcript,
}

impl ChatSession {
    /// Creates a session with a freshly seeded transcript.
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<AssistantClient>,
    pub db: Arc<dyn SqlBackend>,
    pub chat: Arc<Mutex<ChatSession>>,
}

impl AppState {
    /// Assembles the state from already-built parts. Used directly by tests.
    pub fn new(assistant: AssistantClient, db: Arc<dyn SqlBackend>) -> Self {
        Self {
            assistant: Arc::new(assistant),
            db,
            chat: Arc::new(Mutex::new(ChatSession::new())),
        }
    }
}

/// Builds the shared application state from the configuration.
///
/// The database connection is established here; a failure is fatal, since
/// the assistant cannot operate without its database.
pub async fn build_app_state(config: &Config) -> anyhow::Result<AppState> {
    let provider = GroqProvider::new(
        config.ai_api_url.clone(),
        config.ai_api_key.clone(),
        Some(config.ai_model.clone()),
    )?;
    let assistant = AssistantClient::builder()
        .ai_provider(Box::new(provider))
        .build()?;

    let db = MySqlSession::connect(&config.database_url()).await?;
    tracing::info!(
        host = %config.db_host,
        database = %config.db_name,
        "Connected to MySQL"
    );

    Ok(AppState::new(assistant, Arc::new(db)))
}
