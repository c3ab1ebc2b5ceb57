use crate::errors::AssistantError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Marker prefixed to the payload of a failed query execution.
pub const QUERY_ERROR_PREFIX: &str = "Error running query: ";

/// The outcome of executing a generated SQL query.
///
/// Execution failure is data, not an error: a malformed query produces a
/// `Failed` payload that flows into the answer-synthesis prompt so the model
/// can acknowledge it, instead of aborting the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The textual rendering of the result rows.
    Rows(String),
    /// An error description, prefixed with [`QUERY_ERROR_PREFIX`].
    Failed(String),
}

impl QueryOutcome {
    /// Builds a `Failed` outcome from an execution error message.
    pub fn failure(error: impl std::fmt::Display) -> Self {
        QueryOutcome::Failed(format!("{QUERY_ERROR_PREFIX}{error}"))
    }

    /// The textual payload, for either variant.
    pub fn text(&self) -> &str {
        match self {
            QueryOutcome::Rows(s) | QueryOutcome::Failed(s) => s,
        }
    }
}

/// A trait for interacting with a relational database session.
///
/// This defines the two operations the assistant needs from a database:
/// describing the schema as text and executing generated SQL.
#[async_trait]
pub trait SqlBackend: Send + Sync + Debug + DynClone {
    /// Returns the name of the backend (e.g., "MySQL").
    fn name(&self) -> &str;

    /// Produces a fresh textual description of the database schema.
    ///
    /// The snapshot is regenerated on every call; callers truncate it to
    /// their own prompt budget.
    async fn describe_schema(&self) -> Result<String, AssistantError>;

    /// Executes a SQL statement and returns its outcome.
    ///
    /// Query-execution failures never surface as `Err`; they become a
    /// [`QueryOutcome::Failed`] payload.
    async fn run(&self, sql: &str) -> QueryOutcome;
}

dyn_clone::clone_trait_object!(SqlBackend);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_outcome_carries_the_marker() {
        let outcome = QueryOutcome::failure("table `Nope` doesn't exist");
        assert_eq!(
            outcome.text(),
            "Error running query: table `Nope` doesn't exist"
        );
    }

    #[test]
    fn text_returns_the_payload_for_both_variants() {
        assert_eq!(QueryOutcome::Rows("{ a: 1 }".into()).text(), "{ a: 1 }");
        assert!(QueryOutcome::failure("boom").text().starts_with(QUERY_ERROR_PREFIX));
    }
}
