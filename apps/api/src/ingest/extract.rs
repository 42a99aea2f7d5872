//! Text extraction: turns an uploaded blob into one plain-text string.
//!
//! Dispatch order: PDF by media type, DOCX by media type or `.docx` name,
//! everything else decoded as UTF-8. PDF and DOCX parsing is CPU-bound and
//! runs inside `tokio::task::spawn_blocking` via [`extract_offloaded`].

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::ingest::error::ExtractionError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Top-level MIME types a hint string may start with.
const MIME_TOP_LEVEL: &[&str] = &[
    "application",
    "audio",
    "font",
    "image",
    "message",
    "model",
    "multipart",
    "text",
    "video",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::PlainText => "plain_text",
        };
        f.write_str(name)
    }
}

/// What the uploader told us about the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaHint {
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl MediaHint {
    pub fn new(content_type: Option<&str>, file_name: Option<&str>) -> Self {
        Self {
            content_type: content_type.map(String::from),
            file_name: file_name.map(String::from),
        }
    }

    /// Accepts either a MIME type (`text/plain`) or a file name (`cv.docx`).
    pub fn from_hint(hint: &str) -> Self {
        let hint = hint.trim();
        if looks_like_mime(hint) {
            Self::new(Some(hint), None)
        } else {
            Self::new(None, Some(hint))
        }
    }

    /// Lowercased media type without parameters (`; charset=...`).
    fn essence(&self) -> Option<String> {
        self.content_type.as_deref().map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    fn has_extension(&self, ext: &str) -> bool {
        self.file_name.as_deref().is_some_and(|name| {
            name.rsplit_once('.')
                .is_some_and(|(_, found)| found.eq_ignore_ascii_case(ext))
        })
    }
}

fn looks_like_mime(hint: &str) -> bool {
    match hint.split_once('/') {
        Some((top, sub)) => {
            MIME_TOP_LEVEL.contains(&top.to_ascii_lowercase().as_str())
                && !sub.is_empty()
                && !sub.contains('/')
        }
        None => false,
    }
}

impl DocumentFormat {
    /// First match wins: PDF media type, DOCX media type or extension, then plain text.
    pub fn detect(hint: &MediaHint) -> Self {
        let essence = hint.essence();
        if essence.as_deref() == Some(PDF_MIME) {
            DocumentFormat::Pdf
        } else if essence.as_deref() == Some(DOCX_MIME) || hint.has_extension("docx") {
            DocumentFormat::Docx
        } else {
            DocumentFormat::PlainText
        }
    }
}

/// Extracts text synchronously. Empty documents produce an empty string.
pub fn extract(bytes: &[u8], hint: &MediaHint) -> Result<String, ExtractionError> {
    extract_as(bytes, DocumentFormat::detect(hint))
}

pub fn extract_as(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    match format {
        DocumentFormat::Pdf => extract_pdf(bytes),
        DocumentFormat::Docx => extract_docx(bytes),
        DocumentFormat::PlainText => Ok(String::from_utf8(bytes.to_vec())?),
    }
}

/// Same as [`extract`], with container parsing moved off the async executor.
///
/// A parser panic inside the worker is reported as a parse failure of the
/// file; a worker that never completed is [`ExtractionError::WorkerInit`].
pub async fn extract_offloaded(
    bytes: Vec<u8>,
    format: DocumentFormat,
) -> Result<String, ExtractionError> {
    if format == DocumentFormat::PlainText {
        return extract_as(&bytes, format);
    }

    tokio::task::spawn_blocking(move || extract_as(&bytes, format))
        .await
        .map_err(|e| {
            if e.is_panic() {
                let cause = panic_message(e.into_panic());
                warn!(%format, %cause, "Document parser panicked");
                ExtractionError::Extraction { format, cause }
            } else {
                ExtractionError::WorkerInit(e.to_string())
            }
        })?
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "parser panicked".to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PDF
// ────────────────────────────────────────────────────────────────────────────

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
        ExtractionError::Extraction {
            format: DocumentFormat::Pdf,
            cause: e.to_string(),
        }
    })?;
    debug!(pages = pages.len(), "PDF text layer extracted");
    Ok(join_pages(&pages))
}

/// One output line per page; each page's fragments joined by a single space.
///
/// Image-only documents (no fragments on any page) yield an empty string.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let joined: Vec<String> = pages
        .iter()
        .map(|page| {
            page.as_ref()
                .split('\n')
                .map(str::trim)
                .filter(|fragment| !fragment.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    if joined.iter().all(String::is_empty) {
        return String::new();
    }
    joined.join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// DOCX
// ────────────────────────────────────────────────────────────────────────────

/// Raw paragraph text, one paragraph per line, in document order.
///
/// Hyperlink and tracked-insert runs keep their text. Table cells contribute
/// their paragraphs row by row. Styling is dropped.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    use docx_rs::DocumentChild;

    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Extraction {
        format: DocumentFormat::Docx,
        cause: e.to_string(),
    })?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => paragraphs.push(paragraph_text(paragraph)),
            DocumentChild::Table(table) => collect_table(table, &mut paragraphs),
            _ => {}
        }
    }

    debug!(paragraphs = paragraphs.len(), "DOCX paragraphs extracted");
    Ok(paragraphs.join("\n"))
}

fn collect_table(table: &docx_rs::Table, out: &mut Vec<String>) {
    use docx_rs::{TableCellContent, TableChild, TableRowChild};

    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => out.push(paragraph_text(paragraph)),
                    TableCellContent::Table(nested) => collect_table(nested, out),
                    _ => {}
                }
            }
        }
    }
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    push_paragraph_children(&paragraph.children, &mut text);
    text
}

fn push_paragraph_children(children: &[docx_rs::ParagraphChild], text: &mut String) {
    use docx_rs::{InsertChild, ParagraphChild};

    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        push_run(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &docx_rs::Run, text: &mut String) {
    use docx_rs::RunChild;

    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        use docx_rs::{Docx, Paragraph, Run};

        let docx = paragraphs.iter().fold(Docx::new(), |doc, text| {
            doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
        });
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_detect_pdf_by_media_type_only() {
        assert_eq!(
            DocumentFormat::detect(&MediaHint::from_hint("application/pdf")),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect(&MediaHint::new(Some("Application/PDF; charset=binary"), None)),
            DocumentFormat::Pdf
        );
        // A .pdf name without the media type is decoded as text.
        assert_eq!(
            DocumentFormat::detect(&MediaHint::from_hint("resume.pdf")),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_detect_docx_by_media_type_or_extension() {
        assert_eq!(
            DocumentFormat::detect(&MediaHint::from_hint(DOCX_MIME)),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::detect(&MediaHint::from_hint("My CV.DOCX")),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::detect(&MediaHint::new(
                Some("application/octet-stream"),
                Some("cv.docx")
            )),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_pdf_media_type_wins_over_docx_name() {
        let hint = MediaHint::new(Some(PDF_MIME), Some("cv.docx"));
        assert_eq!(DocumentFormat::detect(&hint), DocumentFormat::Pdf);
    }

    #[test]
    fn test_detect_falls_back_to_plain_text() {
        assert_eq!(DocumentFormat::detect(&MediaHint::default()), DocumentFormat::PlainText);
        assert_eq!(
            DocumentFormat::detect(&MediaHint::from_hint("text/markdown")),
            DocumentFormat::PlainText
        );
        assert_eq!(
            DocumentFormat::detect(&MediaHint::from_hint("notes")),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_from_hint_classifies_mime_and_names() {
        assert_eq!(
            MediaHint::from_hint("text/plain"),
            MediaHint::new(Some("text/plain"), None)
        );
        assert_eq!(
            MediaHint::from_hint("uploads/cv.docx"),
            MediaHint::new(None, Some("uploads/cv.docx"))
        );
    }

    #[test]
    fn test_plain_text_round_trip() {
        let text = extract(b"Hello\nWorld", &MediaHint::from_hint("text/plain")).unwrap();
        assert_eq!(text, "Hello\nWorld");
    }

    #[test]
    fn test_plain_text_keeps_carriage_returns() {
        let text = extract(b"a\r\nb", &MediaHint::default()).unwrap();
        assert_eq!(text, "a\r\nb");
    }

    #[test]
    fn test_invalid_utf8_is_unsupported_format() {
        let err = extract(&[0x48, 0xff, 0xfe], &MediaHint::from_hint("text/plain")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_empty_plain_text_is_not_an_error() {
        assert_eq!(extract(b"", &MediaHint::default()).unwrap(), "");
    }

    #[test]
    fn test_join_pages_preserves_order() {
        let pages = vec!["Jane Doe\nEngineer\n", "  Experience \n\nAcme"];
        assert_eq!(join_pages(&pages), "Jane Doe Engineer\nExperience Acme");
    }

    #[test]
    fn test_join_pages_image_only_document_is_empty() {
        let pages = vec!["", "  \n ", "\n"];
        assert_eq!(join_pages(&pages), "");
        assert_eq!(join_pages::<&str>(&[]), "");
    }

    #[test]
    fn test_docx_paragraphs_in_order() {
        let bytes = build_docx(&["Jane Doe", "Skills", "Rust, Go"]);
        let text = extract(&bytes, &MediaHint::from_hint("cv.docx")).unwrap();
        assert_eq!(text, "Jane Doe\nSkills\nRust, Go");
    }

    #[test]
    fn test_docx_keeps_hyperlink_and_table_text() {
        use docx_rs::{
            Docx, Hyperlink, HyperlinkType, Paragraph, Run, Table, TableCell, TableRow,
        };

        let contact = Paragraph::new()
            .add_run(Run::new().add_text("Email: "))
            .add_hyperlink(
                Hyperlink::new("mailto:jane@doe.dev", HyperlinkType::External)
                    .add_run(Run::new().add_text("jane@doe.dev")),
            );
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Phone"))),
            TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("555-0100"))),
        ])]);
        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Jane Doe")))
            .add_paragraph(contact)
            .add_table(table)
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Skills")));
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();

        let text = extract(&buf.into_inner(), &MediaHint::from_hint("cv.docx")).unwrap();
        assert_eq!(text, "Jane Doe\nEmail: jane@doe.dev\nPhone\n555-0100\nSkills");
        assert_eq!(crate::segment::segment(&text).email, "jane@doe.dev");
    }

    #[test]
    fn test_corrupt_docx_is_extraction_error() {
        let err = extract(b"definitely not a zip", &MediaHint::from_hint(DOCX_MIME)).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Extraction {
                format: DocumentFormat::Docx,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_extraction_error_even_if_parser_panics() {
        let err = extract_offloaded(b"%PDF-1.7 garbage".to_vec(), DocumentFormat::Pdf)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Extraction {
                format: DocumentFormat::Pdf,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_offloaded_docx_matches_sync_path() {
        let bytes = build_docx(&["Resume", "John Smith"]);
        let sync = extract_as(&bytes, DocumentFormat::Docx).unwrap();
        let offloaded = extract_offloaded(bytes, DocumentFormat::Docx).await.unwrap();
        assert_eq!(sync, offloaded);
    }
}
