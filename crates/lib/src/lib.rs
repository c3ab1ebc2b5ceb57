//! # Natural Language to SQL Chat
//!
//! This crate turns a natural-language question into an executed SQL query
//! and a plain-language answer, using a configurable completion provider and
//! a relational database session. It also provides the chat transcript state
//! for an interactive session.

pub mod errors;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod types;

pub use errors::AssistantError;
pub use providers::db::{QueryOutcome, SqlBackend};
pub use session::{Message, Role, Transcript, GREETING};
pub use types::{AssistantClient, AssistantClientBuilder, QueryResult};

use prompts::{
    fill, truncate_chars, ANSWER_SCHEMA_LIMIT, ANSWER_SYNTHESIS_SYSTEM_PROMPT,
    ANSWER_SYNTHESIS_USER_PROMPT, GENERATION_SCHEMA_LIMIT, RESULT_LIMIT,
    SQL_EXPLANATION_SYSTEM_PROMPT, SQL_EXPLANATION_USER_PROMPT, SQL_GENERATION_SYSTEM_PROMPT,
    SQL_GENERATION_USER_PROMPT,
};
use tracing::{debug, info};

impl AssistantClient {
    /// Answers a question against the given database session.
    ///
    /// Four strictly sequential steps, each depending on the previous one:
    ///
    /// 1. Generate a SQL query from the schema and the question. The model's
    ///    raw output is taken verbatim as the query; no parsing or validation
    ///    is applied before execution.
    /// 2. Ask the model to explain the generated query.
    /// 3. Execute the query. A failing query does not abort the pipeline; the
    ///    error text becomes the execution result.
    /// 4. Synthesize a short answer from the schema, question, query, and
    ///    (truncated) execution result.
    ///
    /// There are no retries: a completion-provider failure at any step
    /// propagates to the caller.
    pub async fn answer(
        &self,
        question: &str,
        db: &dyn SqlBackend,
    ) -> Result<QueryResult, AssistantError> {
        info!("[answer] received question: {question:?}");

        // Step 1: generate the SQL query.
        let schema = db.describe_schema().await?;
        let generation_prompt = fill(
            SQL_GENERATION_USER_PROMPT,
            &[
                ("{schema}", truncate_chars(&schema, GENERATION_SCHEMA_LIMIT)),
                ("{question}", question),
            ],
        );
        let query = self
            .ai_provider
            .generate(SQL_GENERATION_SYSTEM_PROMPT, &generation_prompt)
            .await?;
        debug!("<-- Query from AI: {}", &query);

        // Step 2: explain the query.
        let explanation_prompt = fill(SQL_EXPLANATION_USER_PROMPT, &[("{query}", &query)]);
        let explanation = self
            .ai_provider
            .generate(SQL_EXPLANATION_SYSTEM_PROMPT, &explanation_prompt)
            .await?;

        // Step 3: execute the query. Failure is data, not an error.
        let outcome = db.run(&query).await;
        if let QueryOutcome::Failed(e) = &outcome {
            info!("[answer] query execution failed: {e}");
        }

        // Step 4: synthesize the final answer. The schema snapshot is taken
        // fresh, with a tighter budget than step 1.
        let schema = db.describe_schema().await?;
        let synthesis_prompt = fill(
            ANSWER_SYNTHESIS_USER_PROMPT,
            &[
                ("{schema}", truncate_chars(&schema, ANSWER_SCHEMA_LIMIT)),
                ("{question}", question),
                ("{query}", &query),
                ("{response}", truncate_chars(outcome.text(), RESULT_LIMIT)),
            ],
        );
        let answer = self
            .ai_provider
            .generate(ANSWER_SYNTHESIS_SYSTEM_PROMPT, &synthesis_prompt)
            .await?;

        Ok(QueryResult {
            query,
            explanation,
            answer,
        })
    }
}
