//! # Prompt Templates
//!
//! The three fixed templates used by the assistant pipeline, with their
//! `{placeholder}` names and the character budgets applied to what gets
//! substituted into them. Schema snapshots and query results are truncated
//! before substitution to bound prompt size.

/// Character budget for the schema snapshot in the SQL-generation prompt.
pub const GENERATION_SCHEMA_LIMIT: usize = 6000;

/// Character budget for the schema snapshot in the answer-synthesis prompt.
pub const ANSWER_SCHEMA_LIMIT: usize = 4000;

/// Character budget for the query execution result in the answer-synthesis prompt.
pub const RESULT_LIMIT: usize = 3000;

// --- SQL Generation ---

pub const SQL_GENERATION_SYSTEM_PROMPT: &str = "You are a data analyst at a company. You are interacting with a user who is asking you questions about the company's database. Based on the table schema below, write a SQL query that would answer the user's question. Write only the SQL query and nothing else. Do not wrap the SQL query in any other text, not even backticks.";

pub const SQL_GENERATION_USER_PROMPT: &str = r#"<SCHEMA>{schema}</SCHEMA>

For example:
Question: which 3 artists have the most tracks?
SQL Query: SELECT ArtistId, COUNT(*) as track_count FROM Track GROUP BY ArtistId ORDER BY track_count DESC LIMIT 3;
Question: Name 10 artists
SQL Query: SELECT Name FROM Artist LIMIT 10;

Your turn:

Question: {question}
SQL Query:"#;

// --- SQL Explanation ---

pub const SQL_EXPLANATION_SYSTEM_PROMPT: &str = "Explain clearly and simply what the following SQL query does and what data it returns.";

pub const SQL_EXPLANATION_USER_PROMPT: &str = r#"{query}"#;

// --- Answer Synthesis ---

pub const ANSWER_SYNTHESIS_SYSTEM_PROMPT: &str = "You are a helpful SQL assistant. Based on the schema, question, SQL query, and SQL response, write a short, factual answer to the user's question. Do not add explanations, speculations, or troubleshooting. Only return the direct answer.";

pub const ANSWER_SYNTHESIS_USER_PROMPT: &str = r#"<SCHEMA>{schema}</SCHEMA>
Question: {question}
SQL Query: {query}
SQL Response: {response}"#;

/// Substitutes named placeholders into a template.
pub fn fill(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut prompt = template.to_string();
    for (placeholder, value) in substitutions {
        prompt = prompt.replace(placeholder, value);
    }
    prompt
}

/// Truncates a string to at most `limit` characters, on a char boundary.
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
