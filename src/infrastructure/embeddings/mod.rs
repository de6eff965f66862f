mod mock_embedder;
mod openai_embedder;

pub use mock_embedder::MockEmbedder;
pub use openai_embedder::OpenAiEmbedder;
