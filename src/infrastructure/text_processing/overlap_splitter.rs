use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, ChunkId, DocumentId};

/// Fixed-size character chunker with an overlap window between
/// consecutive chunks, so spans near a boundary always appear whole in at
/// least one chunk.
pub struct OverlapSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl OverlapSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        if chunk_size == 0 {
            return Err(TextSplitterError::InvalidConfiguration(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(TextSplitterError::InvalidConfiguration(format!(
                "overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }
}

#[async_trait]
impl TextSplitter for OverlapSplitter {
    async fn split(
        &self,
        text: &str,
        document_id: DocumentId,
    ) -> Result<Vec<Chunk>, TextSplitterError> {
        let chars: Vec<char> = text.chars().collect();
        let total_len = chars.len();

        let mut chunks = Vec::new();
        if total_len == 0 {
            return Ok(chunks);
        }

        let step = self.chunk_size - self.chunk_overlap;
        let mut offset = 0;
        let mut next_id = 0u64;

        while offset < total_len {
            let end = (offset + self.chunk_size).min(total_len);
            let chunk_text: String = chars[offset..end].iter().collect();

            chunks.push(Chunk::new(
                ChunkId::new(next_id),
                chunk_text,
                document_id,
                offset,
            ));
            next_id += 1;

            if end == total_len {
                break;
            }
            offset += step;
        }

        Ok(chunks)
    }
}
