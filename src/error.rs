use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("execution failed: {0}")]
    ExecFailure(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            Error::InvalidArgument(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
            Error::ExecFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Error::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Error::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Error::Yaml(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Json(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = json!({ "ok": false, "error": message });
        (status, Json(body)).into_response()
    }
}
