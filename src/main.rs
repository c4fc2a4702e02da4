use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use docquery::application::services::{
    AnswerService, ContextAssembler, DEFAULT_INSTRUCTIONS, QueryPipeline,
};
use docquery::application::ports::FileLoader;
use docquery::domain::ContentType;
use docquery::infrastructure::document_source::HttpDocumentSource;
use docquery::infrastructure::llm::{GeminiClient, GeminiEmbedder};
use docquery::infrastructure::observability::{TracingConfig, init_tracing};
use docquery::infrastructure::text_processing::{
    CompositeFileLoader, OverlapSplitter, PdfAdapter, PlainTextAdapter,
};
use docquery::presentation::{AppState, AuthConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(
        TracingConfig {
            json_format: settings.logging.enable_json,
            default_level: settings.logging.level.clone(),
            ..TracingConfig::default()
        },
        settings.server.port,
    );

    if settings.gemini.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; provider calls will fail");
    }

    let document_source = Arc::new(HttpDocumentSource::new(Duration::from_secs(
        settings.pipeline.fetch_timeout_secs,
    ))?);

    let file_loader = Arc::new(CompositeFileLoader::new(vec![
        (
            ContentType::Pdf,
            Arc::new(PdfAdapter::new()) as Arc<dyn FileLoader>,
        ),
        (
            ContentType::Text,
            Arc::new(PlainTextAdapter) as Arc<dyn FileLoader>,
        ),
    ]));

    let text_splitter = Arc::new(OverlapSplitter::new(
        settings.chunking.chunk_size,
        settings.chunking.chunk_overlap,
    )?);

    let embedder = Arc::new(GeminiEmbedder::new(
        settings.gemini.api_base_url.clone(),
        settings.gemini.api_key.clone(),
        settings.gemini.embedding_model.clone(),
    ));

    let llm_client = Arc::new(GeminiClient::new(
        settings.gemini.api_base_url.clone(),
        settings.gemini.api_key.clone(),
        settings.gemini.completion_model.clone(),
        settings.gemini.temperature,
        settings.gemini.max_output_tokens,
    ));

    let answer_service = Arc::new(AnswerService::new(
        embedder.clone(),
        Arc::clone(&llm_client),
        ContextAssembler::new(settings.retrieval.max_context_chars),
        settings.retrieval.top_k,
        settings.retrieval.similarity_threshold,
        DEFAULT_INSTRUCTIONS.to_string(),
        settings.retrieval.fallback_answer.clone(),
    ));

    let pipeline = Arc::new(QueryPipeline::new(
        document_source,
        file_loader,
        text_splitter,
        embedder,
        answer_service,
        settings.pipeline.max_concurrent_questions,
        Duration::from_secs(settings.pipeline.question_timeout_secs),
        settings.retrieval.fallback_answer.clone(),
    ));

    let state = AppState {
        pipeline,
        request_timeout: Duration::from_secs(settings.pipeline.request_timeout_secs),
    };

    let auth = AuthConfig {
        bearer_token: settings.auth.bearer_token.clone(),
    };

    let router = create_router(state, auth);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
