//! Mapping of workflow failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::common::WorkflowError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Workflow(WorkflowError::Unauthenticated) => {
                debug!("Unauthenticated request, redirecting to index");
                Redirect::to("/").into_response()
            }
            ApiError::Workflow(WorkflowError::TokenStore(e)) => {
                error!(error = %e, "Session store failure");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::Workflow(ref workflow) => match workflow.gateway_error() {
                Some(gateway) if gateway.is_not_found() => {
                    error_response(StatusCode::NOT_FOUND, "Blog or post not found.")
                }
                Some(gateway) => {
                    error_response(StatusCode::BAD_GATEWAY, gateway.operation.user_message())
                }
                None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            },
            ApiError::BadRequest(message) => error_response(StatusCode::BAD_REQUEST, message),
            ApiError::AuthenticationFailed => error_response(
                StatusCode::UNAUTHORIZED,
                "Authentication failed. Please try again.",
            ),
            ApiError::Internal(e) => {
                error!(error = %e, "Internal error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
