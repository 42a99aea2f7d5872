//! Axum route handlers for the résumé import API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::ingest::{parse_resume_file, MediaHint, ParsedUpload};
use crate::models::ResumeRecord;
use crate::segment::segment_with;
use crate::state::AppState;

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct SegmentRequest {
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub record: ResumeRecord,
}

/// POST /api/v1/resumes/parse
///
/// Multipart upload; the `file` part's content type and file name select the extractor.
pub async fn handle_parse(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsedUpload>, AppError> {
    let limit = state.config.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let hint = MediaHint::new(field.content_type(), field.file_name());
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        if bytes.len() > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }

        info!(
            content_type = ?hint.content_type,
            file_name = ?hint.file_name,
            bytes = bytes.len(),
            "Resume upload received"
        );

        let parsed = parse_resume_file(
            bytes.to_vec(),
            &hint,
            state.config.extraction_timeout,
            state.experience_heuristic.as_ref(),
        )
        .await?;
        return Ok(Json(parsed));
    }

    Err(AppError::Validation(format!(
        "Multipart body must include a '{FILE_FIELD}' field"
    )))
}

/// POST /api/v1/resumes/segment
pub async fn handle_segment(
    State(state): State<AppState>,
    Json(req): Json<SegmentRequest>,
) -> Json<SegmentResponse> {
    let record = segment_with(&req.raw_text, state.experience_heuristic.as_ref());
    Json(SegmentResponse { record })
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
