use thiserror::Error;

/// Custom error types for the assistant library.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to the completion API: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize completion API response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("Completion API returned an error: {0}")]
    AiApi(String),
    #[error("Database connection error: {0}")]
    DbConnection(String),
    #[error("Failed to read database schema: {0}")]
    Schema(String),
    #[error("An AI provider is required to build the client")]
    MissingAiProvider,
}
