use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{action}: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Attaches the failing operation to a store error. Client errors pass through unchanged.
    #[must_use]
    pub fn during(self, action: &'static str) -> Self {
        match self {
            Self::Database(source) => Self::Store { action, source },
            other => other,
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Database(e) | Self::Store { source: e, .. } => {
                tracing::error!(error = ?e, "{self}");
            }
            Self::NotFound(msg) => {
                tracing::debug!(message = %msg, "Resource not found");
            }
            Self::BadRequest(msg) => {
                tracing::debug!(message = %msg, "Bad request");
            }
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Database(sqlx::Error::RowNotFound).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).during("Error sending message").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_during_wraps_store_errors_only() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut).during("Error retrieving messages");
        assert!(matches!(err, AppError::Store { action: "Error retrieving messages", .. }));
        assert!(err.to_string().starts_with("Error retrieving messages: "));

        let err = AppError::NotFound("Message not found".into()).during("Error deleting message");
        assert_eq!(err.to_string(), "Message not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_response_carries_error_field() {
        let response = AppError::BadRequest("Provide either sender and receiver, or user".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
