use crate::{errors::AssistantError, providers::ai::AiProvider};
use serde::Serialize;

/// A client that turns natural-language questions into executed SQL and a
/// plain-language answer.
///
/// Construction goes through [`AssistantClientBuilder`]; the database session
/// is passed per call rather than held here, so one client can serve any
/// backend.
#[derive(Clone, Debug)]
pub struct AssistantClient {
    pub(crate) ai_provider: Box<dyn AiProvider>,
}

impl AssistantClient {
    /// Creates a new builder.
    pub fn builder() -> AssistantClientBuilder {
        AssistantClientBuilder::new()
    }
}

/// A builder for creating `AssistantClient` instances.
#[derive(Default)]
pub struct AssistantClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
}

impl AssistantClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the completion provider.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Builds the `AssistantClient`.
    ///
    /// Fails with [`AssistantError::MissingAiProvider`] if no provider was
    /// configured.
    pub fn build(self) -> Result<AssistantClient, AssistantError> {
        let ai_provider = self.ai_provider.ok_or(AssistantError::MissingAiProvider)?;
        Ok(AssistantClient { ai_provider })
    }
}

/// The structured result of one user submission.
///
/// Created once per question by the pipeline, then handed to the UI for
/// rendering and folded into the transcript as a single assistant message.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// The generated SQL, verbatim as the model produced it.
    pub query: String,
    /// A plain-language explanation of the query.
    pub explanation: String,
    /// The final answer synthesized from the execution result.
    pub answer: String,
}

impl QueryResult {
    /// The text stored in the transcript for this result.
    ///
    /// Prefers the answer, falling back to the explanation and then the
    /// query if earlier stages produced empty output.
    pub fn transcript_text(&self) -> &str {
        if !self.answer.trim().is_empty() {
            &self.answer
        } else if !self.explanation.trim().is_empty() {
            &self.explanation
        } else {
            &self.query
        }
    }
}
