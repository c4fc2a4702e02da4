use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::application::ports::{
    DocumentSource, DocumentSourceError, Embedder, EmbedderError, FileLoader, FileLoaderError,
    LlmClient, TextSplitter, TextSplitterError,
};
use crate::application::services::AnswerService;
use crate::domain::{ContentType, Document, IndexError, VectorIndex};

/// One-shot orchestrator for a document/questions batch.
///
/// The document is fetched, extracted, chunked, embedded, and indexed
/// before any question is answered. Questions then run concurrently
/// against the shared read-only index, bounded by a semaphore so provider
/// rate limits are respected. A failed or timed-out question degrades to
/// the fallback answer; the batch always yields one answer per question,
/// in input order.
pub struct QueryPipeline<S, F, L>
where
    S: DocumentSource,
    F: FileLoader,
    L: LlmClient,
{
    document_source: Arc<S>,
    file_loader: Arc<F>,
    text_splitter: Arc<dyn TextSplitter>,
    embedder: Arc<dyn Embedder>,
    answer_service: Arc<AnswerService<L>>,
    max_concurrent_questions: usize,
    question_timeout: Duration,
    fallback_answer: String,
}

impl<S, F, L> QueryPipeline<S, F, L>
where
    S: DocumentSource,
    F: FileLoader,
    L: LlmClient,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        document_source: Arc<S>,
        file_loader: Arc<F>,
        text_splitter: Arc<dyn TextSplitter>,
        embedder: Arc<dyn Embedder>,
        answer_service: Arc<AnswerService<L>>,
        max_concurrent_questions: usize,
        question_timeout: Duration,
        fallback_answer: String,
    ) -> Self {
        Self {
            document_source,
            file_loader,
            text_splitter,
            embedder,
            answer_service,
            max_concurrent_questions: max_concurrent_questions.max(1),
            question_timeout,
            fallback_answer,
        }
    }

    #[tracing::instrument(skip(self, questions), fields(question_count = questions.len()))]
    pub async fn run(
        &self,
        document_url: &str,
        questions: &[String],
    ) -> Result<Vec<String>, PipelineError> {
        let index = Arc::new(self.build_index(document_url).await?);

        tracing::info!(chunks = index.len(), "Index built, answering questions");

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_questions));
        let tasks = questions.iter().enumerate().map(|(position, question)| {
            let index = Arc::clone(&index);
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return self.fallback_answer.clone(),
                };

                match tokio::time::timeout(
                    self.question_timeout,
                    self.answer_service.answer(&index, question),
                )
                .await
                {
                    Ok(Ok(answer)) => answer,
                    Ok(Err(e)) => {
                        tracing::warn!(position, error = %e, "Answer synthesis failed");
                        self.fallback_answer.clone()
                    }
                    Err(_) => {
                        tracing::warn!(position, "Question timed out");
                        self.fallback_answer.clone()
                    }
                }
            }
        });

        let answers = futures::future::join_all(tasks).await;

        Ok(answers)
    }

    async fn build_index(&self, document_url: &str) -> Result<VectorIndex, PipelineError> {
        let payload = self.document_source.fetch(document_url).await?;

        let content_type = ContentType::detect(payload.content_type.as_deref(), document_url);
        let document = Document::new(
            document_url.to_string(),
            content_type,
            payload.data.len() as u64,
        );

        tracing::debug!(
            document_id = %document.id.as_uuid(),
            content_type = ?content_type,
            bytes = document.size_bytes,
            "Document fetched"
        );

        let text = self
            .file_loader
            .extract_text(&payload.data, &document)
            .await?;
        drop(payload);

        if text.trim().is_empty() {
            return Err(PipelineError::EmptyDocument);
        }

        let chunks = self.text_splitter.split(&text, document.id).await?;
        if chunks.is_empty() {
            return Err(PipelineError::EmptyDocument);
        }

        let embeddings = {
            let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
            self.embedder.embed_batch(&texts).await?
        };

        Ok(VectorIndex::build(chunks, embeddings)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("document fetch: {0}")]
    Fetch(#[from] DocumentSourceError),
    #[error("text extraction: {0}")]
    Extraction(#[from] FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
    #[error("document produced no indexable text")]
    EmptyDocument,
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("index build: {0}")]
    Index(#[from] IndexError),
}
