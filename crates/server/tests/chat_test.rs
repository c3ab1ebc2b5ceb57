//! # Chat API Tests
//!
//! These tests spawn the real server on a random port with a mocked
//! completion endpoint (`httpmock`) and an in-test database backend, then
//! drive it over HTTP the way the chat page does.

use async_trait::async_trait;
use httpmock::prelude::*;
use sqltutor::{
    providers::ai::groq::GroqProvider, AssistantClient, AssistantError, QueryOutcome, SqlBackend,
    GREETING,
};
use sqltutor_server::{router::create_router, state::AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

const ARTIST_SCHEMA: &str = "Table: Artist, Columns: [\"Name varchar\"]\n\
                             Table: Track, Columns: [\"TrackId int\", \"Name varchar\"]";

/// A backend with a fixed schema that either returns rows or fails every query.
#[derive(Clone, Debug)]
struct FakeBackend {
    fail: bool,
}

#[async_trait]
impl SqlBackend for FakeBackend {
    fn name(&self) -> &str {
        "Fake"
    }

    async fn describe_schema(&self) -> Result<String, AssistantError> {
        Ok(ARTIST_SCHEMA.to_string())
    }

    async fn run(&self, _sql: &str) -> QueryOutcome {
        if self.fail {
            QueryOutcome::failure("Table 'chinook.Nope' doesn't exist")
        } else {
            QueryOutcome::Rows("{ Name: Some(\"AC/DC\") }\n{ Name: Some(\"Accept\") }".to_string())
        }
    }
}

/// Spawns the application server against the given mock completion endpoint.
async fn spawn_app(completions_url: String, backend: FakeBackend) -> String {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();

    let provider = GroqProvider::new(completions_url, None, Some("mock-chat-model".to_string()))
        .expect("Failed to build provider");
    let assistant = AssistantClient::builder()
        .ai_provider(Box::new(provider))
        .build()
        .expect("Failed to build assistant client");
    let app = create_router(AppState::new(assistant, Arc::new(backend)));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("Server error: {e}");
        }
    });

    // Give the server a moment to start
    sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

/// Registers the three stage mocks on the server, keyed on distinctive text
/// in each stage's prompt.
fn mock_pipeline(server: &MockServer, query: &str, explanation: &str, answer: &str) {
    let query = query.to_string();
    let explanation = explanation.to_string();
    let answer = answer.to_string();

    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Your turn:");
        then.status(200).json_body(completion_body(&query));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Explain clearly and simply");
        then.status(200).json_body(completion_body(&explanation));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("SQL Response:");
        then.status(200).json_body(completion_body(&answer));
    });
}

#[tokio::test]
async fn health_check_works() {
    let mock_server = MockServer::start();
    let address = spawn_app(
        mock_server.url("/v1/chat/completions"),
        FakeBackend { fail: false },
    )
    .await;

    let response = reqwest::get(format!("{address}/health"))
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn fresh_transcript_contains_only_the_greeting() {
    let mock_server = MockServer::start();
    let address = spawn_app(
        mock_server.url("/v1/chat/completions"),
        FakeBackend { fail: false },
    )
    .await;

    let body: serde_json::Value = reqwest::get(format!("{address}/transcript"))
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse transcript");

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "ai");
    assert_eq!(messages[0]["content"], GREETING);
}

#[tokio::test]
async fn whitespace_question_is_a_no_op() {
    let mock_server = MockServer::start();
    let any_call = mock_server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(completion_body("unexpected"));
    });
    let address = spawn_app(
        mock_server.url("/v1/chat/completions"),
        FakeBackend { fail: false },
    )
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/chat"))
        .json(&serde_json::json!({ "question": "   \n " }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 422);

    // No model call was made and the transcript did not change.
    assert_eq!(any_call.hits(), 0);
    let body: serde_json::Value = reqwest::get(format!("{address}/transcript"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn chat_round_trip_grows_the_transcript_by_two() {
    let mock_server = MockServer::start();
    mock_pipeline(
        &mock_server,
        "SELECT Name FROM Artist LIMIT 10;",
        "This query lists the names of ten artists.",
        "The first ten artists include AC/DC and Accept.",
    );
    let address = spawn_app(
        mock_server.url("/v1/chat/completions"),
        FakeBackend { fail: false },
    )
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/chat"))
        .json(&serde_json::json!({ "question": "Name 10 artists" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");

    // Structural assertions only: the exact SQL text is model-dependent.
    let query = body["query"].as_str().unwrap();
    assert!(query.contains("FROM Artist"));
    assert!(query.contains("LIMIT 10"));
    assert!(!body["explanation"].as_str().unwrap().is_empty());
    let answer = body["answer"].as_str().unwrap();
    assert!(!answer.is_empty());

    // Greeting, then human, then assistant: grown by exactly two.
    let transcript: serde_json::Value = reqwest::get(format!("{address}/transcript"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let messages = transcript["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["role"], "human");
    assert_eq!(messages[1]["content"], "Name 10 artists");
    assert_eq!(messages[2]["role"], "ai");
    assert_eq!(messages[2]["content"], answer);
}

#[tokio::test]
async fn failing_query_still_produces_an_answer() {
    let mock_server = MockServer::start();
    mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Your turn:");
        then.status(200)
            .json_body(completion_body("SELECT Name FROM Nope;"));
    });
    mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Explain clearly and simply");
        then.status(200)
            .json_body(completion_body("This query reads from a table called Nope."));
    });
    // The synthesis mock only matches once the execution error reached the
    // prompt, so this mock doubles as an assertion on the failure payload.
    let error_reached_prompt = mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Error running query:");
        then.status(200)
            .json_body(completion_body(
                "I could not run that query: the table Nope does not exist.",
            ));
    });
    let address = spawn_app(
        mock_server.url("/v1/chat/completions"),
        FakeBackend { fail: true },
    )
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/chat"))
        .json(&serde_json::json!({ "question": "Name everything in Nope" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(!body["query"].as_str().unwrap().is_empty());
    assert!(!body["explanation"].as_str().unwrap().is_empty());
    assert!(!body["answer"].as_str().unwrap().is_empty());
    error_reached_prompt.assert();
}

#[tokio::test]
async fn completion_failure_leaves_no_assistant_message() {
    let mock_server = MockServer::start();
    mock_server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500).body("upstream exploded");
    });
    let address = spawn_app(
        mock_server.url("/v1/chat/completions"),
        FakeBackend { fail: false },
    )
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/chat"))
        .json(&serde_json::json!({ "question": "Name 10 artists" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 502);

    // The human message stays; no assistant message was appended.
    let transcript: serde_json::Value = reqwest::get(format!("{address}/transcript"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let messages = transcript["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "ai");
    assert_eq!(messages[1]["role"], "human");
}
