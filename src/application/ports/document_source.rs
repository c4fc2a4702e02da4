use std::time::Duration;

use async_trait::async_trait;

/// Raw download result before content-type detection.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, DocumentSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentSourceError {
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),
}
