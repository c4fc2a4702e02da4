mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AuthSettings, ChunkingSettings, GeminiSettings, LoggingSettings, PipelineSettings,
    RetrievalSettings, ServerSettings, Settings, SettingsError,
};
