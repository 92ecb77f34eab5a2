//! Application error type and its HTTP rendering.
//!
//! Every fallible service and repository call returns [`AppError`]. Handlers
//! propagate it with `?`; [`IntoResponse`] turns it into a status code plus an
//! [`ErrorPage`] extension that [`crate::web::middleware::error_page`] renders
//! as the HTML error view.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Forbidden { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

/// Error view data attached to error responses.
///
/// The requested URL is not known here; the error page middleware fills it in
/// from the incoming request.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub status_message: &'static str,
    pub detailed_message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the view data shown to the client.
    ///
    /// Internal errors never leak their message; the detail goes to the log.
    pub fn to_error_page(&self) -> ErrorPage {
        let (status_message, detailed_message) = match self {
            AppError::Validation { message, .. } => ("Bad request", message.clone()),
            AppError::Unauthorized { .. } => (
                "Unauthorized",
                "You have to be logged in to access that URL.".to_string(),
            ),
            AppError::Forbidden { .. } => (
                "Forbidden",
                "You don't have permission to access that URL.".to_string(),
            ),
            AppError::NotFound { .. } => ("Not found", String::new()),
            AppError::Internal { .. } => (
                "Internal server error",
                "Something went wrong on our side. Please try again later.".to_string(),
            ),
        };

        ErrorPage {
            status: self.status(),
            status_message,
            detailed_message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Internal error");
            }
            other => {
                tracing::debug!(error = %other, "Request failed");
            }
        }

        let page = self.to_error_page();
        let mut response = (page.status, page.status_message).into_response();
        response.extensions_mut().insert(page);
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());

        AppError::bad_request(message, json!({ "fields": errors.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("x", json!({})).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("x", json!({})).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_hides_message() {
        let page = AppError::internal("connection refused on 10.0.0.3", json!({})).to_error_page();

        assert_eq!(page.status_message, "Internal server error");
        assert!(!page.detailed_message.contains("10.0.0.3"));
    }

    #[test]
    fn test_into_response_attaches_error_page() {
        let response = AppError::forbidden("nope", json!({})).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.status_message, "Forbidden");
        assert_eq!(
            page.detailed_message,
            "You don't have permission to access that URL."
        );
    }
}
