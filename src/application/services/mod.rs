mod answer_service;
mod context_assembler;
mod query_pipeline;

pub use answer_service::{AnswerError, AnswerService, DEFAULT_INSTRUCTIONS};
pub use context_assembler::ContextAssembler;
pub use query_pipeline::{PipelineError, QueryPipeline};
