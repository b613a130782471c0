//! Error types for patoweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use patoweb_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No data: {0}")]
    NoData(#[from] CoreError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized")]
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NoData(core) => (
                StatusCode::SERVICE_UNAVAILABLE,
                serde_json::to_string(&core.details()).unwrap_or_default(),
            ),
            ApiError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                format!(r#"{{"code":"BAD_REQUEST","message":"{}"}}"#, message),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                r#"{"code":"UNAUTHORIZED","message":"Unauthorized"}"#.to_string(),
            ),
        };

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
