use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    cancel_handler, delete_document_handler, document_status_handler, health_handler,
    list_documents_handler, reconcile_handler, search_handler, upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/documents", post(upload_handler))
        .route("/api/v1/documents", get(list_documents_handler))
        .route(
            "/api/v1/documents/{document_id}",
            get(document_status_handler).delete(delete_document_handler),
        )
        .route(
            "/api/v1/documents/{document_id}/reconcile",
            post(reconcile_handler),
        )
        .route(
            "/api/v1/documents/{document_id}/cancel",
            post(cancel_handler),
        )
        .route("/api/v1/search", post(search_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
