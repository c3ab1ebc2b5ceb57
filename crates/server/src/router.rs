use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/transcript", get(handlers::transcript_handler))
        .route("/chat", post(handlers::chat_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
