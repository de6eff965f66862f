use std::time::Duration;

use super::Environment;

/// Runtime configuration, sourced from the environment. Chunking parameters
/// are validated later by the splitter constructor; everything else is
/// checked here at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub qdrant: QdrantSettings,
    pub embeddings: EmbeddingsSettings,
    pub chunking: ChunkingSettings,
    pub ingestion: IngestionSettings,
    pub search: SearchSettings,
    pub storage_dir: String,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct QdrantSettings {
    pub url: String,
    pub collection_name: String,
}

#[derive(Debug, Clone)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub api_key: String,
    pub model: String,
    pub dimensions: usize,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// Deterministic offline embedder, for local runs without an API key.
    Mock,
    OpenAi,
}

#[derive(Debug, Clone)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub overlap: usize,
}

#[derive(Debug, Clone)]
pub struct IngestionSettings {
    pub workers: usize,
    pub queue_depth: usize,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub top_k: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let provider = match optional("EMBEDDINGS_PROVIDER")
            .unwrap_or_else(|| "openai".to_string())
            .to_lowercase()
            .as_str()
        {
            "mock" => EmbeddingProvider::Mock,
            "openai" => EmbeddingProvider::OpenAi,
            other => {
                return Err(SettingsError::Invalid {
                    name: "EMBEDDINGS_PROVIDER",
                    value: other.to_string(),
                });
            }
        };

        let api_key = match provider {
            EmbeddingProvider::OpenAi => required("OPENAI_API_KEY")?,
            EmbeddingProvider::Mock => String::new(),
        };

        let raw_env = optional("APP_ENV").unwrap_or_else(|| "local".to_string());
        let environment = raw_env
            .parse::<Environment>()
            .map_err(|_| SettingsError::Invalid {
                name: "APP_ENV",
                value: raw_env,
            })?;

        Ok(Self {
            environment,
            server: ServerSettings {
                host: optional("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parsed("SERVER_PORT", 3000)?,
            },
            database: DatabaseSettings {
                url: required("DATABASE_URL")?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS", 10)?,
            },
            qdrant: QdrantSettings {
                url: optional("QDRANT_URL").unwrap_or_else(|| "http://localhost:6334".to_string()),
                collection_name: optional("QDRANT_COLLECTION")
                    .unwrap_or_else(|| "pdf_chunks".to_string()),
            },
            embeddings: EmbeddingsSettings {
                provider,
                api_key,
                model: optional("EMBEDDINGS_MODEL")
                    .unwrap_or_else(|| "text-embedding-3-small".to_string()),
                dimensions: parsed("EMBEDDINGS_DIMENSIONS", 1536)?,
                timeout: Duration::from_secs(parsed("EMBEDDINGS_TIMEOUT_SECS", 30)?),
            },
            chunking: ChunkingSettings {
                chunk_size: parsed("CHUNK_SIZE", 1600)?,
                overlap: parsed("CHUNK_OVERLAP", 200)?,
            },
            ingestion: IngestionSettings {
                workers: parsed("INGESTION_WORKERS", 4)?,
                queue_depth: parsed("INGESTION_QUEUE_DEPTH", 64)?,
            },
            search: SearchSettings {
                top_k: parsed("SEARCH_TOP_K", 5)?,
            },
            storage_dir: optional("STORAGE_DIR").unwrap_or_else(|| "documents".to_string()),
        })
    }
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    optional(name).ok_or(SettingsError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, SettingsError> {
    match optional(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| SettingsError::Invalid {
            name,
            value: raw.clone(),
        }),
    }
}
