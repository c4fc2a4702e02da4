mod chunk;
mod document;
mod embedding;
mod index;

pub use chunk::{Chunk, ChunkId, DocumentId};
pub use document::{ContentType, Document};
pub use embedding::Embedding;
pub use index::{IndexError, ScoredChunk, VectorIndex};
