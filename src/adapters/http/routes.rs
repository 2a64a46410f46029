//! HTTP routes for the pipeline endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{convert_export, generate_cases, generate_diagram, health, CasegenHandlers};

/// Creates the router with all endpoints.
pub fn casegen_routes(handlers: CasegenHandlers) -> Router {
    Router::new()
        .route("/api/generate", post(generate_cases))
        .route("/api/convert", post(convert_export))
        .route("/api/diagram", post(generate_diagram))
        .route("/health", get(health))
        .with_state(handlers)
}
