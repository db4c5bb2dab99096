use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::utils::error::{CatalogueError, ErrorCategory};

impl IntoResponse for CatalogueError {
    fn into_response(self) -> Response {
        let status = match self.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Storage | ErrorCategory::Configuration => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        tracing::debug!("Responding {}: {}", status, self);

        let body = serde_json::json!({ "error": self.user_friendly_message() });
        (status, Json(body)).into_response()
    }
}
