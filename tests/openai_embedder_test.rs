use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use kallang::application::ports::{Embedder, EmbedderError};
use kallang::infrastructure::embeddings::{MockEmbedder, OpenAiEmbedder};

const TIMEOUT: Duration = Duration::from_secs(5);

fn embedder_for(server: &MockServer) -> OpenAiEmbedder {
    OpenAiEmbedder::new(
        "sk-test".to_string(),
        "text-embedding-3-small".to_string(),
        3,
        TIMEOUT,
    )
    .unwrap()
    .with_base_url(server.base_url())
}

#[tokio::test]
async fn given_successful_response_when_embedding_batch_then_returns_one_vector_per_input() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/embeddings")
            .header("authorization", "Bearer sk-test");
        then.status(200).json_body(json!({
            "data": [
                { "embedding": [0.1, 0.2, 0.3] },
                { "embedding": [0.4, 0.5, 0.6] }
            ]
        }));
    });

    let embeddings = embedder_for(&server)
        .embed_batch(&["first", "second"])
        .await
        .unwrap();

    mock.assert();
    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0].values, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn given_rate_limit_response_when_embedding_then_returns_rate_limited() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/embeddings");
        then.status(429);
    });

    let result = embedder_for(&server).embed("text").await;
    assert!(matches!(result, Err(EmbedderError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_when_embedding_then_returns_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/embeddings");
        then.status(503);
    });

    let result = embedder_for(&server).embed("text").await;
    assert!(matches!(result, Err(EmbedderError::Unavailable(_))));
}

#[tokio::test]
async fn given_auth_failure_when_embedding_then_returns_invalid_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/embeddings");
        then.status(401).body("{\"error\": \"invalid key\"}");
    });

    let result = embedder_for(&server).embed("text").await;
    assert!(matches!(result, Err(EmbedderError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_mismatched_vector_count_when_embedding_batch_then_returns_invalid_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/embeddings");
        then.status(200)
            .json_body(json!({ "data": [ { "embedding": [0.1] } ] }));
    });

    let result = embedder_for(&server).embed_batch(&["one", "two"]).await;
    assert!(matches!(result, Err(EmbedderError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_same_text_when_mock_embedding_twice_then_vectors_are_identical() {
    let embedder = MockEmbedder::new(16);

    let first = embedder.embed("deterministic").await.unwrap();
    let second = embedder.embed("deterministic").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.dimensions(), 16);
}

#[tokio::test]
async fn given_different_texts_when_mock_embedding_then_vectors_differ() {
    let embedder = MockEmbedder::new(16);

    let first = embedder.embed("alpha").await.unwrap();
    let second = embedder.embed("beta").await.unwrap();

    assert_ne!(first, second);
}
