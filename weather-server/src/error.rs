//! Translation of lookup failures into HTTP responses.

use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cep_weather_core::LookupError;
use serde::Serialize;
use std::error::Error as _;
use utoipa::ToSchema;

/// Body of every non-200 response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failure.
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// The `{cep}` segment could not be extracted, e.g. it is not valid UTF-8.
    InvalidPath(PathRejection),
    Lookup(LookupError),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self::Lookup(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPath(rejection)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Lookup(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            ApiError::InvalidPath(rejection) => {
                tracing::info!(%status, %rejection, "rejected malformed CEP");
                "Invalid CEP in request path.".to_string()
            }
            ApiError::Lookup(err) => {
                match err.source() {
                    Some(cause) => {
                        tracing::warn!(kind = err.kind(), %status, %cause, "upstream service failed")
                    }
                    None => {
                        tracing::info!(kind = err.kind(), %status, "lookup ended without result")
                    }
                }
                err.to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
