pub mod groq;

use crate::errors::AssistantError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a hosted text-completion model.
///
/// This defines a common interface for the three model calls the assistant
/// makes (SQL generation, SQL explanation, answer synthesis), independent of
/// the provider behind it.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result is the model's raw text output.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, AssistantError>;
}

dyn_clone::clone_trait_object!(AiProvider);
