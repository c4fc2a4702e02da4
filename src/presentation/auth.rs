use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Static bearer-token guard for the answering endpoint. With no token
/// configured the middleware is a pass-through.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub bearer_token: Option<String>,
}

#[derive(Serialize)]
struct AuthErrorResponse {
    error: String,
}

pub async fn bearer_auth_middleware(
    State(config): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = config.bearer_token.as_deref() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == expected => next.run(request).await,
        _ => {
            tracing::warn!("Rejected request with missing or invalid bearer token");
            (
                StatusCode::UNAUTHORIZED,
                Json(AuthErrorResponse {
                    error: "Invalid authentication token".to_string(),
                }),
            )
                .into_response()
        }
    }
}
