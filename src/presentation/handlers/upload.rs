use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::IngestionMessage;
use crate::domain::{Document, StoragePath};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub document_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("upload request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = field.file_name().unwrap_or("unknown.pdf").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    tracing::debug!(filename = %filename, content_type = %content_type, "processing upload");

    if content_type != "application/pdf" && !filename.to_lowercase().ends_with(".pdf") {
        tracing::warn!(content_type = %content_type, "rejected non-PDF upload");
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(ErrorResponse {
                error: format!("Only PDF uploads are accepted, got: {}", content_type),
            }),
        )
            .into_response();
    }

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    if data.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Uploaded file is empty".to_string(),
            }),
        )
            .into_response();
    }

    // The storage path embeds the document id, so the id is minted first.
    let mut document = Document::new(filename.clone(), StoragePath::from_raw(""));
    document.storage_path = StoragePath::new(&document.id, &filename);
    let storage_path = document.storage_path.clone();

    if let Err(e) = state.file_store.store(&storage_path, &data).await {
        tracing::error!(error = %e, "failed to store uploaded file");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to store file: {}", e),
            }),
        )
            .into_response();
    }

    if let Err(e) = state.document_repository.create(&document).await {
        tracing::error!(error = %e, "failed to create document record");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to create document: {}", e),
            }),
        )
            .into_response();
    }

    let msg = IngestionMessage {
        document_id: document.id,
    };

    if let Err(e) = state.ingestion_sender.send(msg).await {
        tracing::error!(error = %e, "failed to enqueue ingestion job");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Ingestion queue full or worker unavailable".to_string(),
            }),
        )
            .into_response();
    }

    tracing::info!(
        document_id = %document.id,
        filename = %filename,
        bytes = data.len(),
        "document ingestion enqueued"
    );

    (
        StatusCode::ACCEPTED,
        Json(UploadResponse {
            document_id: document.id.as_uuid().to_string(),
            status: document.status.as_str().to_string(),
            message: "Document ingestion started".to_string(),
        }),
    )
        .into_response()
}
