use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tokio::sync::mpsc;
use tower::ServiceExt;

use kallang::application::ports::{FileStore, FileStoreError, TextExtractor, TextExtractorError};
use kallang::application::services::{
    CancellationRegistry, IngestionMessage, IngestionOrchestrator, RetryPolicy, SearchService,
};
use kallang::domain::StoragePath;
use kallang::infrastructure::classification::KeywordClassifier;
use kallang::infrastructure::embeddings::MockEmbedder;
use kallang::infrastructure::extraction::default_registry;
use kallang::infrastructure::persistence::{
    InMemoryDocumentRepository, InMemoryEntityRepository, InMemoryVectorStore,
};
use kallang::infrastructure::text_processing::SlidingWindowSplitter;
use kallang::presentation::config::{
    ChunkingSettings, DatabaseSettings, EmbeddingProvider, EmbeddingsSettings, Environment,
    IngestionSettings, QdrantSettings, SearchSettings, ServerSettings, Settings,
};
use kallang::presentation::{AppState, create_router};

const BOUNDARY: &str = "kallang-test-boundary";

#[derive(Default)]
struct FakeFileStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl FileStore for FakeFileStore {
    async fn store(&self, path: &StoragePath, data: &[u8]) -> Result<(), FileStoreError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), data.to_vec());
        Ok(())
    }

    async fn read(&self, path: &StoragePath) -> Result<Vec<u8>, FileStoreError> {
        self.files
            .lock()
            .unwrap()
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| FileStoreError::NotFound(path.as_str().to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), FileStoreError> {
        self.files.lock().unwrap().remove(path.as_str());
        Ok(())
    }
}

struct PassthroughExtractor;

#[async_trait]
impl TextExtractor for PassthroughExtractor {
    async fn extract_text(&self, data: &[u8]) -> Result<String, TextExtractorError> {
        String::from_utf8(data.to_vec())
            .map_err(|e| TextExtractorError::UnreadablePdf(e.to_string()))
    }
}

fn test_settings() -> Settings {
    Settings {
        environment: Environment::Test,
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://unused".to_string(),
            max_connections: 1,
        },
        qdrant: QdrantSettings {
            url: "http://unused:6334".to_string(),
            collection_name: "pdf_chunks".to_string(),
        },
        embeddings: EmbeddingsSettings {
            provider: EmbeddingProvider::Mock,
            api_key: String::new(),
            model: "mock".to_string(),
            dimensions: 32,
            timeout: Duration::from_secs(5),
        },
        chunking: ChunkingSettings {
            chunk_size: 200,
            overlap: 20,
        },
        ingestion: IngestionSettings {
            workers: 1,
            queue_depth: 8,
        },
        search: SearchSettings { top_k: 5 },
        storage_dir: "documents".to_string(),
    }
}

fn create_test_app() -> (axum::Router, mpsc::Receiver<IngestionMessage>) {
    let documents = Arc::new(InMemoryDocumentRepository::new());
    let entities = Arc::new(InMemoryEntityRepository::new());
    let vectors = Arc::new(InMemoryVectorStore::new());
    let files = Arc::new(FakeFileStore::default());
    let embedder = Arc::new(MockEmbedder::new(32));

    let orchestrator = Arc::new(IngestionOrchestrator::new(
        files.clone(),
        Arc::new(PassthroughExtractor),
        Arc::new(KeywordClassifier::default()),
        default_registry(),
        Arc::new(SlidingWindowSplitter::new(200, 20).unwrap()),
        embedder.clone(),
        documents.clone(),
        entities.clone(),
        vectors.clone(),
        CancellationRegistry::new(),
        RetryPolicy::default(),
    ));

    let search_service = Arc::new(SearchService::new(embedder, vectors.clone(), 5));
    let (sender, receiver) = mpsc::channel(8);

    let state = AppState {
        document_repository: documents,
        entity_repository: entities,
        file_store: files,
        vector_store: vectors,
        orchestrator,
        search_service,
        ingestion_sender: sender,
        settings: test_settings(),
    };

    (create_router(state), receiver)
}

fn multipart_pdf_body(filename: &str, content: &str) -> Body {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Body::from(body)
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_pdf_upload_when_posting_document_then_returns_accepted_and_enqueues_job() {
    let (app, mut receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/documents")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(multipart_pdf_body("costing.pdf", "| Item | Quantity |"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let message = receiver.try_recv().expect("an ingestion job was enqueued");
    let _ = message.document_id;
}

#[tokio::test]
async fn given_empty_multipart_when_posting_document_then_returns_bad_request() {
    let (app, _receiver) = create_test_app();

    let body = format!("--{BOUNDARY}--\r\n");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/documents")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_non_pdf_upload_when_posting_document_then_returns_unsupported_media_type() {
    let (app, _receiver) = create_test_app();

    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         plain text\r\n\
         --{BOUNDARY}--\r\n"
    );
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/documents")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn given_no_documents_when_listing_then_returns_empty_list() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/documents")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_unknown_document_id_when_fetching_status_then_returns_not_found() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/documents/00000000-0000-0000-0000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_malformed_document_id_when_fetching_status_then_returns_bad_request() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/documents/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_unknown_document_id_when_reconciling_then_returns_not_found() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/documents/00000000-0000-0000-0000-000000000000/reconcile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_any_document_id_when_cancelling_then_returns_accepted() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/documents/11111111-2222-3333-4444-555555555555/cancel")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn given_unknown_document_id_when_deleting_then_returns_not_found() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/documents/00000000-0000-0000-0000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_uploaded_document_when_deleting_then_document_is_gone() {
    let (app, _receiver) = create_test_app();

    let upload = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/documents")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(multipart_pdf_body("costing.pdf", "| Item | Quantity |"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(upload.status(), StatusCode::ACCEPTED);

    let bytes = axum::body::to_bytes(upload.into_body(), 64 * 1024)
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let document_id = payload["document_id"].as_str().unwrap().to_string();

    let delete = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/documents/{document_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);

    let fetch = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/documents/{document_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(fetch.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_valid_query_when_searching_then_returns_ok() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/search")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query": "balcony gfa exemption"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_blank_query_when_searching_then_returns_bad_request() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/search")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query": "   "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_request_when_responding_then_request_id_header_is_echoed() {
    let (app, _receiver) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "trace-me-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-me-123"
    );
}
