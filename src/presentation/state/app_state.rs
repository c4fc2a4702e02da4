use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{DocumentSource, FileLoader, LlmClient};
use crate::application::services::QueryPipeline;

pub struct AppState<S, F, L>
where
    S: DocumentSource,
    F: FileLoader,
    L: LlmClient,
{
    pub pipeline: Arc<QueryPipeline<S, F, L>>,
    pub request_timeout: Duration,
}

impl<S, F, L> Clone for AppState<S, F, L>
where
    S: DocumentSource,
    F: FileLoader,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            request_timeout: self.request_timeout,
        }
    }
}
