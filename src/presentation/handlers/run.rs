use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{DocumentSource, FileLoader, LlmClient};
use crate::application::services::PipelineError;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct RunRequest {
    /// URL of the document to answer against.
    pub documents: String,
    pub questions: Vec<String>,
}

#[derive(Serialize)]
pub struct RunResponse {
    pub answers: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request), fields(question_count = request.questions.len()))]
pub async fn run_handler<S, F, L>(
    State(state): State<AppState<S, F, L>>,
    Json(request): Json<RunRequest>,
) -> impl IntoResponse
where
    S: DocumentSource + 'static,
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    tracing::debug!(document = %sanitize_prompt(&request.documents), "Processing run request");

    let outcome = tokio::time::timeout(
        state.request_timeout,
        state.pipeline.run(&request.documents, &request.questions),
    )
    .await;

    match outcome {
        Ok(Ok(answers)) => {
            tracing::info!(answer_count = answers.len(), "Request completed");
            (StatusCode::OK, Json(RunResponse { answers })).into_response()
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Request failed");
            (
                status_for(&e),
                Json(ErrorResponse {
                    error: format!("Failed to process request: {}", e),
                }),
            )
                .into_response()
        }
        Err(_) => {
            tracing::error!("Request timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                Json(ErrorResponse {
                    error: "Request timed out".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn status_for(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::Fetch(_) | PipelineError::Embedding(_) => StatusCode::BAD_GATEWAY,
        PipelineError::Extraction(_) | PipelineError::Splitting(_) | PipelineError::EmptyDocument => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PipelineError::Index(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
