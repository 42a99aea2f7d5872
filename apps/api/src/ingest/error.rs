use thiserror::Error;

use crate::ingest::extract::DocumentFormat;

/// Failures of the text extraction stage.
///
/// Every variant is one the user can act on by supplying another file or
/// retrying elsewhere. Empty or unrecognizable content is never an error.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// A plain-text upload was not valid UTF-8.
    #[error("Unsupported file encoding: {0}")]
    UnsupportedFormat(#[from] std::string::FromUtf8Error),

    /// The PDF or DOCX container could not be read by its parser.
    #[error("Failed to parse {format} document: {cause}")]
    Extraction {
        format: DocumentFormat,
        cause: String,
    },

    /// The blocking worker that decodes the document never ran to completion.
    #[error("Document worker failed to initialize: {0}")]
    WorkerInit(String),
}

impl ExtractionError {
    /// Message shown to the person who uploaded the file.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractionError::UnsupportedFormat(_) => {
                "Unsupported file encoding. Please try a different file."
            }
            ExtractionError::Extraction { .. } => {
                "Failed to parse file. Please try a different format."
            }
            ExtractionError::WorkerInit(_) => {
                "Could not initialize the document worker. Please try a different file type."
            }
        }
    }
}
