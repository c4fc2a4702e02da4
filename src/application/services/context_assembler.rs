use crate::domain::ScoredChunk;

const CHUNK_DELIMITER: &str = "\n\n";

/// Concatenates retrieved chunks into a bounded context string.
///
/// Chunks are taken in the order given (descending relevance from search).
/// The budget is counted in chars; a chunk that would push the context past
/// the budget is omitted whole, never truncated, and assembly stops there.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    max_context_chars: usize,
}

impl ContextAssembler {
    pub fn new(max_context_chars: usize) -> Self {
        Self { max_context_chars }
    }

    pub fn assemble(&self, results: &[ScoredChunk]) -> String {
        let mut context = String::new();
        let mut used_chars = 0usize;

        for result in results {
            let chunk_chars = result.chunk.text.chars().count();
            let delimiter_chars = if context.is_empty() {
                0
            } else {
                CHUNK_DELIMITER.len()
            };

            if used_chars + delimiter_chars + chunk_chars > self.max_context_chars {
                break;
            }

            if !context.is_empty() {
                context.push_str(CHUNK_DELIMITER);
            }
            context.push_str(&result.chunk.text);
            used_chars += delimiter_chars + chunk_chars;
        }

        context
    }
}
