use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Document, DocumentId, EntityCounts};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub pdf_name: String,
    pub pdf_type: String,
    pub status: String,
    pub cost_items: u64,
    pub tasks: u64,
    pub rules: u64,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentSummary>,
}

#[derive(Serialize)]
pub struct DocumentStatusResponse {
    pub id: String,
    pub pdf_name: String,
    pub pdf_type: String,
    pub status: String,
    pub error_detail: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct ReconcileResponse {
    pub document_id: String,
    pub status: String,
    pub stage_reached: String,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub document_id: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn summarize(document: &Document, counts: EntityCounts) -> DocumentSummary {
    DocumentSummary {
        id: document.id.as_uuid().to_string(),
        pdf_name: document.pdf_name.clone(),
        pdf_type: document.pdf_type.as_str().to_string(),
        status: document.status.as_str().to_string(),
        cost_items: counts.cost_items,
        tasks: counts.tasks,
        rules: counts.rules,
        created_at: document.created_at.to_rfc3339(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn list_documents_handler(State(state): State<AppState>) -> impl IntoResponse {
    let documents = match state.document_repository.list().await {
        Ok(docs) => docs,
        Err(e) => {
            tracing::error!(error = %e, "failed to list documents");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list documents: {}", e),
                }),
            )
                .into_response();
        }
    };

    let mut summaries = Vec::with_capacity(documents.len());
    for document in &documents {
        let counts = match state.entity_repository.counts(document.id).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, document_id = %document.id, "failed to count entities");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to count entities: {}", e),
                    }),
                )
                    .into_response();
            }
        };
        summaries.push(summarize(document, counts));
    }

    (
        StatusCode::OK,
        Json(ListDocumentsResponse {
            documents: summaries,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn document_status_handler(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.document_repository.get(id).await {
        Ok(Some(document)) => {
            let response = DocumentStatusResponse {
                id: document.id.as_uuid().to_string(),
                pdf_name: document.pdf_name,
                pdf_type: document.pdf_type.as_str().to_string(),
                status: document.status.as_str().to_string(),
                error_detail: document.error_detail,
                created_at: document.created_at.to_rfc3339(),
                updated_at: document.updated_at.to_rfc3339(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Document not found: {}", document_id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch document");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch document: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// Removes a document and everything derived from it: vector points, the
/// stored PDF, and the database rows. Entity rows cascade with the document.
#[tracing::instrument(skip(state))]
pub async fn delete_document_handler(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let document = match state.document_repository.get(id).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Document not found: {}", document_id),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch document");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch document: {}", e),
                }),
            )
                .into_response();
        }
    };

    if let Err(e) = state.vector_store.delete_for_document(id).await {
        tracing::error!(error = %e, document_id = %id, "failed to delete vector points");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to delete vector points: {}", e),
            }),
        )
            .into_response();
    }

    // A missing file is fine; the upload may have failed before the write.
    match state.file_store.delete(&document.storage_path).await {
        Ok(()) | Err(crate::application::ports::FileStoreError::NotFound(_)) => {}
        Err(e) => {
            tracing::error!(error = %e, document_id = %id, "failed to delete stored file");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to delete stored file: {}", e),
                }),
            )
                .into_response();
        }
    }

    if let Err(e) = state.document_repository.delete(id).await {
        tracing::error!(error = %e, document_id = %id, "failed to delete document");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to delete document: {}", e),
            }),
        )
            .into_response();
    }

    tracing::info!(document_id = %id, "document deleted");
    StatusCode::NO_CONTENT.into_response()
}

/// Repairs a document whose ingestion stopped partway: already persisted
/// text and entity rows are kept and only the missing stages run again.
#[tracing::instrument(skip(state))]
pub async fn reconcile_handler(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.orchestrator.reconcile(id).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ReconcileResponse {
                document_id: outcome.document_id.as_uuid().to_string(),
                status: outcome.status.as_str().to_string(),
                stage_reached: outcome.stage_reached.as_str().to_string(),
                error: outcome.error.map(|e| e.to_string()),
            }),
        )
            .into_response(),
        Err(e) => {
            use crate::application::services::OrchestratorError;
            let status = match e {
                OrchestratorError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
                OrchestratorError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!(error = %e, "reconcile failed");
            (
                status,
                Json(ErrorResponse {
                    error: format!("Reconcile failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// Flags a document for cancellation. The running pipeline observes the flag
/// at its next stage boundary; work already done is not rolled back.
#[tracing::instrument(skip(state))]
pub async fn cancel_handler(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    state.orchestrator.cancellations().request(id);
    tracing::info!(document_id = %id, "cancellation requested");

    (
        StatusCode::ACCEPTED,
        Json(CancelResponse {
            document_id: id.as_uuid().to_string(),
            message: "Cancellation requested; takes effect at the next stage boundary".to_string(),
        }),
    )
        .into_response()
}

fn parse_document_id(raw: &str) -> Result<DocumentId, axum::response::Response> {
    Uuid::parse_str(raw).map(DocumentId::from_uuid).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid document ID: {}", raw),
            }),
        )
            .into_response()
    })
}
