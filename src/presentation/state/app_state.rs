use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{DocumentRepository, EntityRepository, FileStore, VectorStore};
use crate::application::services::{IngestionMessage, IngestionOrchestrator, SearchService};
use crate::presentation::config::Settings;

pub struct AppState {
    pub document_repository: Arc<dyn DocumentRepository>,
    pub entity_repository: Arc<dyn EntityRepository>,
    pub file_store: Arc<dyn FileStore>,
    pub vector_store: Arc<dyn VectorStore>,
    pub orchestrator: Arc<IngestionOrchestrator>,
    pub search_service: Arc<SearchService>,
    pub ingestion_sender: mpsc::Sender<IngestionMessage>,
    pub settings: Settings,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            document_repository: Arc::clone(&self.document_repository),
            entity_repository: Arc::clone(&self.entity_repository),
            file_store: Arc::clone(&self.file_store),
            vector_store: Arc::clone(&self.vector_store),
            orchestrator: Arc::clone(&self.orchestrator),
            search_service: Arc::clone(&self.search_service),
            ingestion_sender: self.ingestion_sender.clone(),
            settings: self.settings.clone(),
        }
    }
}
