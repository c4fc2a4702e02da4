mod gemini_client;
mod gemini_embedder;

pub use gemini_client::GeminiClient;
pub use gemini_embedder::GeminiEmbedder;
