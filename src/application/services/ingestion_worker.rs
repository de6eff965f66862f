use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::Instrument;

use super::IngestionOrchestrator;
use crate::domain::{DocumentId, DocumentStatus};

/// Unit of work for the pool: all pipeline state lives on the persisted
/// document row, so the message only needs to say which document.
#[derive(Debug, Clone, Copy)]
pub struct IngestionMessage {
    pub document_id: DocumentId,
}

/// Pool of workers pulling ingestion jobs off a shared queue. Documents are
/// independent flow instances: one failing never aborts its siblings, and no
/// ordering holds between different documents.
pub struct IngestionWorkerPool {
    receiver: Arc<Mutex<mpsc::Receiver<IngestionMessage>>>,
    orchestrator: Arc<IngestionOrchestrator>,
    workers: usize,
}

impl IngestionWorkerPool {
    pub fn new(
        receiver: mpsc::Receiver<IngestionMessage>,
        orchestrator: Arc<IngestionOrchestrator>,
        workers: usize,
    ) -> Self {
        Self {
            receiver: Arc::new(Mutex::new(receiver)),
            orchestrator,
            workers: workers.max(1),
        }
    }

    pub fn spawn(self) -> Vec<JoinHandle<()>> {
        (0..self.workers)
            .map(|worker| {
                let receiver = Arc::clone(&self.receiver);
                let orchestrator = Arc::clone(&self.orchestrator);
                tokio::spawn(worker_loop(worker, receiver, orchestrator))
            })
            .collect()
    }
}

async fn worker_loop(
    worker: usize,
    receiver: Arc<Mutex<mpsc::Receiver<IngestionMessage>>>,
    orchestrator: Arc<IngestionOrchestrator>,
) {
    tracing::info!(worker, "ingestion worker started");
    loop {
        let msg = { receiver.lock().await.recv().await };
        let Some(msg) = msg else {
            break;
        };

        let span = tracing::info_span!(
            "ingestion_job",
            worker,
            document_id = %msg.document_id,
        );

        async {
            match orchestrator.start_ingestion(msg.document_id).await {
                Ok(outcome) => {
                    if outcome.status == DocumentStatus::Failed {
                        tracing::warn!(
                            stage = %outcome.stage_reached,
                            error = outcome.error.as_ref().map(|e| e.to_string()),
                            "ingestion job failed"
                        );
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "ingestion job could not run");
                }
            }
        }
        .instrument(span)
        .await;
    }
    tracing::info!(worker, "ingestion worker stopped: channel closed");
}
