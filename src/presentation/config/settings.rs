use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub gemini: GeminiSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Static bearer token guarding the run endpoint; unset disables auth.
    pub bearer_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: String,
    pub api_base_url: String,
    pub embedding_model: String,
    pub completion_model: String,
    pub temperature: f32,
    pub max_output_tokens: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub similarity_threshold: f32,
    pub max_context_chars: usize,
    pub fallback_answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    pub request_timeout_secs: u64,
    pub question_timeout_secs: u64,
    pub max_concurrent_questions: usize,
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

const DEFAULT_FALLBACK_ANSWER: &str =
    "Unable to answer this question from the provided document.";

impl Settings {
    /// Builds settings from environment variables with workable defaults
    /// for everything except the provider API key.
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0".to_string())?,
                port: env_or("SERVER_PORT", 3000)?,
            },
            auth: AuthSettings {
                bearer_token: std::env::var("API_BEARER_TOKEN").ok(),
            },
            gemini: GeminiSettings {
                api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
                api_base_url: env_or(
                    "GEMINI_API_BASE_URL",
                    "https://generativelanguage.googleapis.com".to_string(),
                )?,
                embedding_model: env_or("GEMINI_EMBEDDING_MODEL", "text-embedding-004".to_string())?,
                completion_model: env_or("GEMINI_COMPLETION_MODEL", "gemini-2.0-flash".to_string())?,
                temperature: env_or("GEMINI_TEMPERATURE", 0.2)?,
                max_output_tokens: env_or("GEMINI_MAX_OUTPUT_TOKENS", 1024)?,
            },
            chunking: ChunkingSettings {
                chunk_size: env_or("CHUNK_SIZE", 1000)?,
                chunk_overlap: env_or("CHUNK_OVERLAP", 200)?,
            },
            retrieval: RetrievalSettings {
                top_k: env_or("RETRIEVAL_TOP_K", 3)?,
                similarity_threshold: env_or("SIMILARITY_THRESHOLD", 0.5)?,
                max_context_chars: env_or("MAX_CONTEXT_CHARS", 6000)?,
                fallback_answer: env_or("FALLBACK_ANSWER", DEFAULT_FALLBACK_ANSWER.to_string())?,
            },
            pipeline: PipelineSettings {
                request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 120)?,
                question_timeout_secs: env_or("QUESTION_TIMEOUT_SECS", 30)?,
                max_concurrent_questions: env_or("MAX_CONCURRENT_QUESTIONS", 8)?,
                fetch_timeout_secs: env_or("FETCH_TIMEOUT_SECS", 30)?,
            },
            logging: LoggingSettings {
                level: env_or("LOG_LEVEL", "info".to_string())?,
                enable_json: env_or("LOG_JSON", false)?,
            },
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T, SettingsError>
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| SettingsError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
