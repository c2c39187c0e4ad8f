//! Error types for the HTTP server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use sb_site::{RenderError, SiteError};
use serde_json::json;

use crate::templates;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Nothing is served at the given path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Document rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Subject listing failed.
    #[error("Site error: {0}")]
    Site(#[from] SiteError),

    /// Diagram submission without a usable `diagram` field.
    #[error("No diagram provided")]
    NoDiagram,
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::Site(SiteError::SubjectNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Render(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::NoDiagram => StatusCode::BAD_REQUEST,
            Self::Render(_) | Self::Site(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        if matches!(self, Self::NoDiagram) {
            return (status, Json(json!({"error": self.to_string()}))).into_response();
        }

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
            "The document could not be rendered.".to_owned()
        } else {
            self.to_string()
        };

        (status, Html(templates::error_page(status, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use sb_renderer::ConvertError;
    use sb_storage::{StorageError, StorageErrorKind};

    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(
            ServerError::NotFound("/x".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::Render(RenderError::NotFound("a.md".to_owned())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::Site(SiteError::SubjectNotFound("physics".to_owned())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_status() {
        let read = RenderError::Read(StorageError::new(StorageErrorKind::PermissionDenied));
        let convert = RenderError::Convert(ConvertError::InputTooLarge { size: 2, limit: 1 });
        let site = SiteError::Storage(StorageError::new(StorageErrorKind::Other));

        assert_eq!(
            ServerError::Render(read).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Render(convert).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Site(site).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let err = ServerError::Render(RenderError::Convert(ConvertError::InputTooLarge {
            size: 2,
            limit: 1,
        }));

        let response = err.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();

        assert!(body.contains("500 Internal Server Error"));
        assert!(!body.contains("limit is"));
    }

    #[tokio::test]
    async fn test_no_diagram_is_json() {
        let response = ServerError::NoDiagram.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"error":"No diagram provided"}"#);
    }
}
