use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{DocumentSource, FileLoader, LlmClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::auth::{AuthConfig, bearer_auth_middleware};
use crate::presentation::handlers::{health_handler, run_handler};
use crate::presentation::state::AppState;

pub fn create_router<S, F, L>(state: AppState<S, F, L>, auth: AuthConfig) -> Router
where
    S: DocumentSource + 'static,
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let api = Router::new()
        .route("/api/v1/run", post(run_handler::<S, F, L>))
        .route_layer(middleware::from_fn_with_state(auth, bearer_auth_middleware));

    Router::new()
        .route("/health", get(health_handler))
        .merge(api)
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
}
