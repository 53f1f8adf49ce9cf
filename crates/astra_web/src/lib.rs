use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/api/llm", post(handlers::llm_response))
        .route("/api/news", post(handlers::news_response))
        .route("/api/news-summary", post(handlers::news_summary_response))
        .route("/health", get(handlers::health))
        .layer(middleware)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use astra_core::{Error, Result};
    pub use crate::AppState;
}
