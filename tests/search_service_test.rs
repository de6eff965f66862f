use std::sync::Arc;

use kallang::application::ports::VectorStore;
use kallang::application::services::SearchService;
use kallang::domain::{Chunk, DocumentId};
use kallang::infrastructure::embeddings::MockEmbedder;
use kallang::infrastructure::persistence::InMemoryVectorStore;

const TOP_K: usize = 5;

async fn store_chunk(
    store: &InMemoryVectorStore,
    embedder: &MockEmbedder,
    document_id: DocumentId,
    index: usize,
    text: &str,
) {
    use kallang::application::ports::Embedder;
    let embedding = embedder.embed(text).await.unwrap();
    let chunk = Chunk::new(document_id, index, 0, text.to_string());
    store.upsert(&[chunk], &[embedding]).await.unwrap();
}

#[tokio::test]
async fn given_indexed_chunks_when_searching_then_exact_text_ranks_first() {
    let embedder = Arc::new(MockEmbedder::new(64));
    let store = Arc::new(InMemoryVectorStore::new());
    let doc = DocumentId::new();

    store_chunk(&store, &embedder, doc, 0, "concrete unit prices").await;
    store_chunk(&store, &embedder, doc, 1, "piling schedule milestones").await;
    store_chunk(&store, &embedder, doc, 2, "balcony gfa exemption").await;

    let service = SearchService::new(embedder, store, TOP_K);
    let results = service.search("concrete unit prices").await.unwrap();

    assert!(!results.is_empty());
    // The query embeds to the identical vector, so cosine similarity is 1.
    assert_eq!(results[0].text, "concrete unit prices");
    assert_eq!(results[0].chunk_index, 0);
    assert!(results[0].score > 0.99);
}

#[tokio::test]
async fn given_more_chunks_than_top_k_when_searching_then_results_are_capped() {
    let embedder = Arc::new(MockEmbedder::new(64));
    let store = Arc::new(InMemoryVectorStore::new());
    let doc = DocumentId::new();

    for i in 0..10 {
        store_chunk(&store, &embedder, doc, i, &format!("chunk number {}", i)).await;
    }

    let service = SearchService::new(embedder, store, TOP_K);
    let results = service.search("chunk number 4").await.unwrap();

    assert_eq!(results.len(), TOP_K);
}

#[tokio::test]
async fn given_results_when_searching_then_scores_are_descending() {
    let embedder = Arc::new(MockEmbedder::new(64));
    let store = Arc::new(InMemoryVectorStore::new());
    let doc = DocumentId::new();

    for i in 0..6 {
        store_chunk(&store, &embedder, doc, i, &format!("passage {}", i)).await;
    }

    let service = SearchService::new(embedder, store, TOP_K);
    let results = service.search("passage 2").await.unwrap();

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn given_empty_store_when_searching_then_returns_no_results() {
    let embedder = Arc::new(MockEmbedder::new(64));
    let store = Arc::new(InMemoryVectorStore::new());

    let service = SearchService::new(embedder, store, TOP_K);
    let results = service.search("anything").await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn given_deleted_document_when_counting_then_its_points_are_gone() {
    let embedder = MockEmbedder::new(64);
    let store = InMemoryVectorStore::new();
    let kept = DocumentId::new();
    let dropped = DocumentId::new();

    store_chunk(&store, &embedder, kept, 0, "kept chunk").await;
    store_chunk(&store, &embedder, dropped, 0, "dropped chunk").await;
    store_chunk(&store, &embedder, dropped, 1, "another dropped chunk").await;

    store.delete_for_document(dropped).await.unwrap();

    assert_eq!(store.count_for_document(kept).await.unwrap(), 1);
    assert_eq!(store.count_for_document(dropped).await.unwrap(), 0);
}
