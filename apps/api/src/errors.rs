use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Text extraction did not finish within {0:?}")]
    Timeout(Duration),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!("File size exceeds the {limit} byte limit"),
            ),
            // Extraction failures and timeouts are logged where they happen, with format context.
            AppError::Extraction(e) => {
                let (status, code) = match e {
                    ExtractionError::UnsupportedFormat(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "UNSUPPORTED_FORMAT")
                    }
                    ExtractionError::Extraction { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED")
                    }
                    ExtractionError::WorkerInit(_) => {
                        (StatusCode::SERVICE_UNAVAILABLE, "WORKER_INIT_FAILED")
                    }
                };
                (status, code, e.user_message().to_string())
            }
            AppError::Timeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                "EXTRACTION_TIMEOUT",
                "The file took too long to read. Please try a different file.".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::DocumentFormat;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("no file".into()), StatusCode::BAD_REQUEST),
            (
                AppError::PayloadTooLarge { limit: 10 },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                AppError::Extraction(ExtractionError::Extraction {
                    format: DocumentFormat::Pdf,
                    cause: "bad xref".into(),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Extraction(ExtractionError::WorkerInit("cancelled".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Timeout(Duration::from_secs(30)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
