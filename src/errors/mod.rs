use std::io;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Custom error types for the wiki application
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("page not found")]
    NotFound,
    #[error("invalid page title")]
    InvalidTitle,
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Render(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for WikiError {
    fn from(err: serde_json::Error) -> Self {
        WikiError::Render(err.to_string())
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::NotFound | WikiError::InvalidTitle => {
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            WikiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=Restricted")],
                "Unauthorized",
            )
                .into_response(),
            WikiError::BadRequest(e) => (StatusCode::BAD_REQUEST, e).into_response(),
            WikiError::Io(e) => {
                log::error!("I/O failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
            WikiError::Render(e) => {
                log::error!("Render failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
            }
            WikiError::Config(e) => (StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
        }
    }
}
