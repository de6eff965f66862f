mod documents;
mod health;
mod search;
mod upload;

pub use documents::{
    cancel_handler, delete_document_handler, document_status_handler, list_documents_handler,
    reconcile_handler,
};
pub use health::health_handler;
pub use search::search_handler;
pub use upload::upload_handler;
