// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request: missing required field, duplicate name, referential block,
    // structurally invalid body
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized,

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error: storage or upstream failure caught at the
    // handler boundary
    Internal { error: String, message: String },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::BadRequest(message) => json!({ "error": message }),
            ApiError::Unauthorized => json!({ "error": "Unauthorized" }),
            ApiError::NotFound(message) => json!({ "error": message }),
            ApiError::Internal { error, message } => json!({
                "error": error,
                "message": message,
            }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized
    }

    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(format!("{} not found", entity))
    }

    /// Wrap an unexpected failure as a generic 500. The original error detail
    /// is logged and attached to the body for diagnostics.
    pub fn internal(verb: &str, entity: &str, err: impl std::fmt::Display) -> Self {
        let error = format!("Failed to {} {}", verb, entity);
        let message = err.to_string();
        tracing::error!("{}: {}", error, message);
        ApiError::Internal { error, message }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(message) => write!(f, "{}", message),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::NotFound(message) => write!(f, "{}", message),
            ApiError::Internal { error, message } => write!(f, "{}: {}", error, message),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_body_is_exact() {
        let err = ApiError::unauthorized();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_json(), json!({ "error": "Unauthorized" }));
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = ApiError::not_found("Application");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_json(), json!({ "error": "Application not found" }));
    }

    #[test]
    fn internal_carries_summary_and_detail() {
        let err = ApiError::internal("create", "application", "connection refused");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_json(),
            json!({
                "error": "Failed to create application",
                "message": "connection refused",
            })
        );
    }
}
