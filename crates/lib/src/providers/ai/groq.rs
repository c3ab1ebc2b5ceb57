use crate::{errors::AssistantError, providers::ai::AiProvider};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Default chat-completions endpoint for the Groq API.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

// --- Groq Provider implementation ---

/// A provider for the Groq API, or any OpenAI-compatible endpoint.
#[derive(Clone, Debug)]
pub struct GroqProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl GroqProvider {
    /// Creates a new `GroqProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, AssistantError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(AssistantError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl AiProvider for GroqProvider {
    /// Sends a system/user prompt pair and returns the model's text output.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AssistantError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            },
        ];

        // Temperature is pinned to zero: every stage of the pipeline expects
        // the most-likely completion.
        let request_body = ChatRequest {
            messages,
            model: self.model.as_deref(),
            temperature: 0.0,
            stream: false,
        };

        let mut request_builder = self.client.post(&self.api_url);

        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(AssistantError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::AiApi(error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(AssistantError::AiDeserialization)?;

        let raw_response = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(raw_response)
    }
}
