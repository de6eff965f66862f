use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::SearchError;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub document_id: String,
    pub chunk_index: usize,
    pub text: String,
    pub score: f32,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    if request.query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Query must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    match state.search_service.search(&request.query).await {
        Ok(results) => {
            let hits = results
                .into_iter()
                .map(|r| SearchHit {
                    document_id: r.document_id.as_uuid().to_string(),
                    chunk_index: r.chunk_index,
                    text: r.text,
                    score: r.score,
                })
                .collect();
            (StatusCode::OK, Json(SearchResponse { results: hits })).into_response()
        }
        Err(e) => {
            let status = match &e {
                SearchError::Embedding(_) => StatusCode::BAD_GATEWAY,
                SearchError::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!(error = %e, "search failed");
            (
                status,
                Json(ErrorResponse {
                    error: format!("Search failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
