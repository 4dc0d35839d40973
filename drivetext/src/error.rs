use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriveTextError {
    /// Classification landed on a category with no extraction strategy, or
    /// the extension is on the binary deny-list. Deterministic for a given
    /// buffer; not worth retrying.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Every fallback method for the matched category produced invalid or
    /// empty text. Deterministic for a given buffer; not worth retrying.
    #[error("Not vectorizable: {0}")]
    NotVectorizable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Graph API error ({status}): {message}")]
    Graph { status: u16, message: String },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for DriveTextError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DriveTextError::UnsupportedFormat(msg) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg.clone())
            }
            DriveTextError::NotVectorizable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            DriveTextError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DriveTextError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            DriveTextError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            DriveTextError::Graph { .. } => (StatusCode::BAD_GATEWAY, self.to_string()),
            DriveTextError::Processing(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            DriveTextError::Http(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            DriveTextError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            DriveTextError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, DriveTextError>;
