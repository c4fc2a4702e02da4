pub mod document_source;
pub mod llm;
pub mod observability;
pub mod text_processing;
