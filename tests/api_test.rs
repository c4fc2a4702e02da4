use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use docquery::application::ports::{
    DocumentSource, DocumentSourceError, Embedder, EmbedderError, FetchedDocument, FileLoader,
    FileLoaderError, LlmClient, LlmClientError,
};
use docquery::application::services::{AnswerService, ContextAssembler, QueryPipeline};
use docquery::domain::{Document, Embedding};
use docquery::infrastructure::text_processing::OverlapSplitter;
use docquery::presentation::{AppState, AuthConfig, create_router};

const TEST_CHUNK_SIZE: usize = 1000;
const TEST_CHUNK_OVERLAP: usize = 100;
const TEST_TOP_K: usize = 3;
const TEST_MAX_CONTEXT_CHARS: usize = 10_000;
const TEST_BEARER_TOKEN: &str = "test-token-123";
const TEST_FALLBACK: &str = "Unable to answer this question from the provided document.";

struct MockDocumentSource {
    data: Vec<u8>,
}

#[async_trait::async_trait]
impl DocumentSource for MockDocumentSource {
    async fn fetch(&self, _url: &str) -> Result<FetchedDocument, DocumentSourceError> {
        Ok(FetchedDocument {
            data: self.data.clone(),
            content_type: Some("text/plain".to_string()),
        })
    }
}

struct Utf8FileLoader;

#[async_trait::async_trait]
impl FileLoader for Utf8FileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        _document: &Document,
    ) -> Result<String, FileLoaderError> {
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}

struct MockEmbedder;

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Ok(Embedding::new(vec![0.1; 64]))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts.iter().map(|_| Embedding::new(vec![0.1; 64])).collect())
    }
}

struct MockLlmClient;

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok("Mock answer".to_string())
    }
}

fn build_router(
    document_data: &[u8],
    bearer_token: Option<&str>,
) -> axum::Router {
    let embedder = Arc::new(MockEmbedder);
    let llm_client = Arc::new(MockLlmClient);

    let answer_service = Arc::new(AnswerService::new(
        embedder.clone(),
        llm_client,
        ContextAssembler::new(TEST_MAX_CONTEXT_CHARS),
        TEST_TOP_K,
        0.0,
        "Answer only from the provided context.".to_string(),
        TEST_FALLBACK.to_string(),
    ));

    let pipeline = Arc::new(QueryPipeline::new(
        Arc::new(MockDocumentSource {
            data: document_data.to_vec(),
        }),
        Arc::new(Utf8FileLoader),
        Arc::new(OverlapSplitter::new(TEST_CHUNK_SIZE, TEST_CHUNK_OVERLAP).unwrap()),
        embedder,
        answer_service,
        4,
        Duration::from_secs(5),
        TEST_FALLBACK.to_string(),
    ));

    let state = AppState {
        pipeline,
        request_timeout: Duration::from_secs(10),
    };

    let auth = AuthConfig {
        bearer_token: bearer_token.map(String::from),
    };

    create_router(state, auth)
}

fn run_request(body: serde_json::Value, bearer_token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/v1/run")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = bearer_token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_healthy_service_when_get_health_then_returns_ok() {
    let router = build_router(b"Some policy text.", None);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_valid_request_when_posting_run_then_returns_one_answer_per_question() {
    let router = build_router(b"The grace period is thirty days.", None);

    let body = serde_json::json!({
        "documents": "https://example.com/policy.txt",
        "questions": ["What is the grace period?", "Who is covered?"]
    });
    let response = router.oneshot(run_request(body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let answers = json["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0], "Mock answer");
    assert_eq!(answers[1], "Mock answer");
}

#[tokio::test]
async fn given_configured_token_when_posting_without_it_then_returns_unauthorized() {
    let router = build_router(b"Some policy text.", Some(TEST_BEARER_TOKEN));

    let body = serde_json::json!({
        "documents": "https://example.com/policy.txt",
        "questions": ["Anything?"]
    });
    let response = router.oneshot(run_request(body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_configured_token_when_posting_with_wrong_token_then_returns_unauthorized() {
    let router = build_router(b"Some policy text.", Some(TEST_BEARER_TOKEN));

    let body = serde_json::json!({
        "documents": "https://example.com/policy.txt",
        "questions": ["Anything?"]
    });
    let response = router
        .oneshot(run_request(body, Some("wrong-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_configured_token_when_posting_with_it_then_request_succeeds() {
    let router = build_router(b"Some policy text.", Some(TEST_BEARER_TOKEN));

    let body = serde_json::json!({
        "documents": "https://example.com/policy.txt",
        "questions": ["Anything?"]
    });
    let response = router
        .oneshot(run_request(body, Some(TEST_BEARER_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_token_configured_when_get_health_then_no_auth_is_required() {
    let router = build_router(b"Some policy text.", Some(TEST_BEARER_TOKEN));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_empty_document_when_posting_run_then_returns_unprocessable_entity() {
    let router = build_router(b"", None);

    let body = serde_json::json!({
        "documents": "https://example.com/empty.txt",
        "questions": ["Anything?"]
    });
    let response = router.oneshot(run_request(body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = response_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("no indexable text"));
}

#[tokio::test]
async fn given_response_when_any_request_then_request_id_header_is_set() {
    let router = build_router(b"Some policy text.", None);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
