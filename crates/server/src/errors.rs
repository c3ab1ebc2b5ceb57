use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqltutor::AssistantError;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates the kinds of errors a handler can produce,
/// allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors originating from the assistant pipeline.
    Assistant(AssistantError),
    /// The submitted question was empty or whitespace-only.
    EmptyQuestion,
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<AssistantError> for AppError {
    fn from(err: AssistantError) -> Self {
        AppError::Assistant(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Assistant(err) => {
                error!("AssistantError: {:?}", err);
                match err {
                    AssistantError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to the completion API failed: {e}"),
                    ),
                    AssistantError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize completion API response: {e}"),
                    ),
                    AssistantError::AiApi(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Completion API error: {e}"),
                    ),
                    AssistantError::Schema(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to read the database schema: {e}"),
                    ),
                    AssistantError::DbConnection(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Database connection error: {e}"),
                    ),
                    AssistantError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                    AssistantError::MissingAiProvider => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                }
            }
            AppError::EmptyQuestion => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Question must not be empty.".to_string(),
            ),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
