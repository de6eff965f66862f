mod cancellation;
mod extractor_registry;
mod ingestion_orchestrator;
mod ingestion_worker;
mod search_service;

pub use cancellation::CancellationRegistry;
pub use extractor_registry::ExtractorRegistry;
pub use ingestion_orchestrator::{
    ErrorKind, IngestionOrchestrator, IngestionOutcome, OrchestratorError, RetryPolicy, StageError,
};
pub use ingestion_worker::{IngestionMessage, IngestionWorkerPool};
pub use search_service::{SearchError, SearchService};
