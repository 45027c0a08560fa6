use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use civic_core::RepositoryError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::state::AppState;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested collection has no rows.
    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Marks a response produced by an unexpected failure. Carries the raw
/// message for [`handle_internal_errors`].
#[derive(Debug, Clone)]
pub struct InternalFailure(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Repository(err) => {
                let message = err.to_string();
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response();
                response.extensions_mut().insert(InternalFailure(message));
                response
            }
        }
    }
}

/// Logs every unexpected failure once and, in production, swaps its body
/// for a generic message.
pub async fn handle_internal_errors(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let Some(InternalFailure(message)) = response.extensions().get::<InternalFailure>().cloned()
    else {
        return response;
    };

    error!(%method, %uri, error = %message, "Unhandled error");

    if state.settings.is_production() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": INTERNAL_SERVER_ERROR_MESSAGE })),
        )
            .into_response();
    }

    response
}
