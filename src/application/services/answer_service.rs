use std::sync::Arc;

use crate::application::ports::{Embedder, EmbedderError, LlmClient, LlmClientError};
use crate::application::services::ContextAssembler;
use crate::domain::VectorIndex;

pub const DEFAULT_INSTRUCTIONS: &str = "You are an assistant answering questions about a single document (policy, \
contract, or manual). Answer only from the provided context. If the context \
does not contain the answer, say so clearly. Be concise, and quote \
conditions, amounts, and durations verbatim where the context states them.";

/// Answers one question against an already-built index: embed the question,
/// retrieve the most relevant chunks, assemble a bounded context, and ask
/// the LLM for a grounded answer.
pub struct AnswerService<L>
where
    L: LlmClient,
{
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<L>,
    assembler: ContextAssembler,
    top_k: usize,
    similarity_threshold: f32,
    instructions: String,
    fallback_answer: String,
}

impl<L> AnswerService<L>
where
    L: LlmClient,
{
    pub fn new(
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<L>,
        assembler: ContextAssembler,
        top_k: usize,
        similarity_threshold: f32,
        instructions: String,
        fallback_answer: String,
    ) -> Self {
        Self {
            embedder,
            llm_client,
            assembler,
            top_k,
            similarity_threshold,
            instructions,
            fallback_answer,
        }
    }

    pub async fn answer(
        &self,
        index: &VectorIndex,
        question: &str,
    ) -> Result<String, AnswerError> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(AnswerError::Embedding)?;

        let mut results = index.search(&query_embedding, self.top_k);
        results.retain(|r| r.score >= self.similarity_threshold);

        let context = self.assembler.assemble(&results);
        if context.is_empty() {
            tracing::debug!("No context above threshold, returning fallback answer");
            return Ok(self.fallback_answer.clone());
        }

        let prompt = self.build_prompt(question, &context);
        let completion = self
            .llm_client
            .complete(&prompt)
            .await
            .map_err(AnswerError::Completion)?;

        Ok(sanitize_completion(&completion))
    }

    fn build_prompt(&self, question: &str, context: &str) -> String {
        format!(
            "{}\n\nContext from the document:\n{}\n\nQuestion: {}\n\nAnswer based on the context above.",
            self.instructions, context, question
        )
    }
}

/// Strips surrounding whitespace and any wrapping markdown code fence the
/// provider may add around the completion.
fn sanitize_completion(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    {
        // Drop an optional language tag on the opening fence line.
        let inner = match inner.split_once('\n') {
            Some((first_line, body)) if !first_line.trim().contains(' ') => body,
            _ => inner,
        };
        return inner.trim().to_string();
    }

    trimmed.to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("completion: {0}")]
    Completion(LlmClientError),
}
