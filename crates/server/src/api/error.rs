//! JSON error responses and the mapping from core errors to HTTP status.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use tracing::error;
use tradeshelf_core::{AuditError, BrowseError, SelectionError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn internal_error() -> ApiError {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// No catalog provider configured.
pub fn provider_not_ready() -> ApiError {
    error_response(StatusCode::SERVICE_UNAVAILABLE, "Catalog provider not ready")
}

pub fn browse_error(err: BrowseError) -> ApiError {
    match err {
        BrowseError::AuthenticationRequired => error_response(
            StatusCode::UNAUTHORIZED,
            "Upstream authentication required",
        ),
        BrowseError::UpstreamNotImplemented(_) => provider_not_ready(),
        // Already logged by the façade; upstream detail stays server-side.
        BrowseError::Upstream(_) => {
            error_response(StatusCode::BAD_GATEWAY, "Catalog provider error")
        }
    }
}

pub fn selection_error(err: SelectionError) -> ApiError {
    match err {
        SelectionError::PreconditionFailed(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        SelectionError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
        SelectionError::Persistence(detail) => {
            error!("Persistence failure: {}", detail);
            internal_error()
        }
    }
}

pub fn audit_error(err: AuditError) -> ApiError {
    error!("Audit query failed: {}", err);
    internal_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradeshelf_core::ProviderError;

    #[test]
    fn test_browse_error_statuses() {
        let (status, _) = browse_error(BrowseError::AuthenticationRequired);
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = browse_error(BrowseError::UpstreamNotImplemented("x".into()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, Json(body)) = browse_error(BrowseError::Upstream(ProviderError::ApiError {
            status: 500,
            message: "secret detail".into(),
        }));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.error.contains("secret"));
    }

    #[test]
    fn test_selection_error_statuses() {
        let (status, Json(body)) =
            selection_error(SelectionError::PreconditionFailed("Cart is empty".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Cart is empty");

        let (status, _) = selection_error(SelectionError::NotFound("p".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, Json(body)) =
            selection_error(SelectionError::Persistence("disk I/O error".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
    }
}
