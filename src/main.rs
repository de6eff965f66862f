use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use kallang::application::ports::{CollectionConfig, Embedder, VectorStore};
use kallang::application::services::{
    CancellationRegistry, IngestionOrchestrator, IngestionWorkerPool, RetryPolicy, SearchService,
};
use kallang::infrastructure::classification::KeywordClassifier;
use kallang::infrastructure::embeddings::{MockEmbedder, OpenAiEmbedder};
use kallang::infrastructure::extraction::default_registry;
use kallang::infrastructure::observability::{TracingConfig, init_tracing};
use kallang::infrastructure::persistence::{
    PgDocumentRepository, PgEntityRepository, QdrantAdapter, create_pool,
};
use kallang::infrastructure::storage::LocalFileStore;
use kallang::infrastructure::text_processing::{PdfAdapter, SlidingWindowSplitter};
use kallang::presentation::{AppState, EmbeddingProvider, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let tracing_config = TracingConfig {
        environment: settings.environment.to_string(),
        ..TracingConfig::default()
    };
    init_tracing(tracing_config);

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let document_repository = Arc::new(PgDocumentRepository::new(pool.clone()));
    let entity_repository = Arc::new(PgEntityRepository::new(pool));

    let embedder: Arc<dyn Embedder> = match settings.embeddings.provider {
        EmbeddingProvider::Mock => Arc::new(MockEmbedder::new(settings.embeddings.dimensions)),
        EmbeddingProvider::OpenAi => Arc::new(OpenAiEmbedder::new(
            settings.embeddings.api_key.clone(),
            settings.embeddings.model.clone(),
            settings.embeddings.dimensions,
            settings.embeddings.timeout,
        )?),
    };

    let vector_store = Arc::new(
        QdrantAdapter::new(&settings.qdrant.url, settings.qdrant.collection_name.clone()).await?,
    );
    let created = vector_store
        .ensure_collection(&CollectionConfig::new(embedder.dimensions() as u64))
        .await?;
    if created {
        tracing::info!(collection = %settings.qdrant.collection_name, "created vector collection");
    }

    let file_store = Arc::new(LocalFileStore::new(PathBuf::from(&settings.storage_dir))?);
    let splitter = Arc::new(SlidingWindowSplitter::new(
        settings.chunking.chunk_size,
        settings.chunking.overlap,
    )?);

    let orchestrator = Arc::new(IngestionOrchestrator::new(
        file_store.clone(),
        Arc::new(PdfAdapter::new()),
        Arc::new(KeywordClassifier::default()),
        default_registry(),
        splitter,
        Arc::clone(&embedder),
        document_repository.clone(),
        entity_repository.clone(),
        vector_store.clone(),
        CancellationRegistry::new(),
        RetryPolicy::default(),
    ));

    let search_service = Arc::new(SearchService::new(
        Arc::clone(&embedder),
        vector_store.clone(),
        settings.search.top_k,
    ));

    let (ingestion_sender, ingestion_receiver) = mpsc::channel(settings.ingestion.queue_depth);
    let worker_pool = IngestionWorkerPool::new(
        ingestion_receiver,
        Arc::clone(&orchestrator),
        settings.ingestion.workers,
    );
    worker_pool.spawn();

    let state = AppState {
        document_repository,
        entity_repository,
        file_store,
        vector_store,
        orchestrator,
        search_service,
        ingestion_sender,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(%addr, "listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
