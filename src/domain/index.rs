use super::{Chunk, Embedding};

/// In-memory similarity index over one document's chunks.
///
/// Built once per request and read-only afterwards; concurrent readers
/// need no locking. Search is exact brute-force cosine similarity, which
/// is plenty for the hundreds-to-low-thousands of chunks a single
/// document produces.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

#[derive(Debug)]
struct IndexEntry {
    chunk: Chunk,
    embedding: Embedding,
}

#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

impl VectorIndex {
    pub fn build(chunks: Vec<Chunk>, embeddings: Vec<Embedding>) -> Result<Self, IndexError> {
        if chunks.is_empty() {
            return Err(IndexError::EmptyDocument);
        }
        if chunks.len() != embeddings.len() {
            return Err(IndexError::SizeMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        let dimensions = embeddings[0].dimensions();
        if let Some(odd) = embeddings.iter().find(|e| e.dimensions() != dimensions) {
            return Err(IndexError::DimensionMismatch {
                expected: dimensions,
                found: odd.dimensions(),
            });
        }

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-k chunks by cosine similarity, sorted by descending score with
    /// ties broken by the lower chunk id. `k` is clamped to the number of
    /// indexed chunks; the result never holds duplicate ids.
    pub fn search(&self, query: &Embedding, k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: query.cosine_similarity(&entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });
        scored.dedup_by_key(|s| s.chunk.id);
        scored.truncate(k.min(self.entries.len()));
        scored
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("document produced no indexable chunks")]
    EmptyDocument,
    #[error("chunk/embedding count mismatch: {chunks} chunks, {embeddings} embeddings")]
    SizeMismatch { chunks: usize, embeddings: usize },
    #[error("inconsistent embedding dimensions: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}
