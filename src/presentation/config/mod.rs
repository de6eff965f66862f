mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, DatabaseSettings, EmbeddingProvider, EmbeddingsSettings, IngestionSettings,
    QdrantSettings, SearchSettings, ServerSettings, Settings, SettingsError,
};
