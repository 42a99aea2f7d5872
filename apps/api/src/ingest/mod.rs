// Résumé import pipeline: uploaded bytes → plain text → ResumeRecord.
// Extraction may block (worker thread) and is bounded by a deadline; segmentation is pure.

pub mod error;
pub mod extract;
pub mod handlers;

use std::time::Duration;

use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::segment::{segment_with, ExperienceHeuristic};

pub use error::ExtractionError;
pub use extract::{DocumentFormat, MediaHint};

/// Describes the upload the record came from.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub format: DocumentFormat,
    pub bytes: usize,
    pub characters: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedUpload {
    pub record: ResumeRecord,
    pub source: SourceInfo,
}

/// Runs extraction then segmentation for one uploaded file.
///
/// Extraction errors abort the run. A deadline hit discards whatever the
/// worker was doing; nothing needs rolling back.
pub async fn parse_resume_file(
    bytes: Vec<u8>,
    hint: &MediaHint,
    deadline: Duration,
    heuristic: &dyn ExperienceHeuristic,
) -> Result<ParsedUpload, AppError> {
    let format = DocumentFormat::detect(hint);
    let byte_count = bytes.len();

    let text = tokio::time::timeout(deadline, extract::extract_offloaded(bytes, format))
        .await
        .map_err(|_| {
            error!(%format, bytes = byte_count, ?deadline, "Text extraction timed out");
            AppError::Timeout(deadline)
        })?
        .map_err(|e| {
            error!(%format, bytes = byte_count, "Text extraction failed: {e}");
            AppError::Extraction(e)
        })?;

    let characters = text.chars().count();
    info!(%format, bytes = byte_count, characters, "Text extracted from upload");

    Ok(ParsedUpload {
        record: segment_with(&text, heuristic),
        source: SourceInfo {
            format,
            bytes: byte_count,
            characters,
        },
    })
}
