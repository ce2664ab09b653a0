//! Document extraction: turns an uploaded resume into plain text.
//!
//! PDFs are read page by page and joined with `\n` in page order.
//! Anything else is treated as text; invalid UTF-8 is dropped, never an error.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub mod pdf;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Could not read PDF '{filename}': {message}")]
    Pdf { filename: String, message: String },

    #[error("PDF extraction of '{filename}' aborted unexpectedly")]
    Aborted { filename: String },
}

/// A file uploaded with the request. Dropped once its text is extracted.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.filename.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// Extraction output. `empty_pages` lists 1-based PDF pages that produced no text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub empty_pages: Vec<usize>,
}

/// Extracts the text of an uploaded document.
///
/// PDF parsing runs on the blocking pool. A panic inside the PDF library is
/// reported as `ExtractError::Aborted`.
pub async fn extract_text(document: UploadedDocument) -> Result<ExtractedText, ExtractError> {
    if !document.is_pdf() {
        debug!(
            "Decoding '{}' as text ({} bytes)",
            document.filename,
            document.bytes.len()
        );
        return Ok(ExtractedText {
            text: decode_lossy(&document.bytes),
            empty_pages: Vec::new(),
        });
    }

    let filename = document.filename.clone();
    tokio::task::spawn_blocking(move || pdf::extract_pages(&document))
        .await
        .map_err(|_| ExtractError::Aborted { filename })?
}

/// Decodes UTF-8, silently dropping every invalid byte sequence.
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_drops_invalid_sequences() {
        let bytes = b"Jane \xff\xfeDoe\xc3";
        assert_eq!(decode_lossy(bytes), "Jane Doe");
    }

    #[test]
    fn test_decode_keeps_multibyte_characters() {
        let text = "Zürich — 東京";
        assert_eq!(decode_lossy(text.as_bytes()), text);
    }

    #[test]
    fn test_is_pdf_ignores_case() {
        assert!(UploadedDocument::new("resume.pdf", Bytes::new()).is_pdf());
        assert!(UploadedDocument::new("RESUME.PDF", Bytes::new()).is_pdf());
        assert!(!UploadedDocument::new("resume.txt", Bytes::new()).is_pdf());
        assert!(!UploadedDocument::new("pdf", Bytes::new()).is_pdf());
    }

    #[tokio::test]
    async fn test_text_file_is_decoded() {
        let doc = UploadedDocument::new("resume.txt", &b"Experienced software engineer\xff..."[..]);
        let extracted = extract_text(doc).await.unwrap();
        assert_eq!(extracted.text, "Experienced software engineer...");
        assert!(extracted.empty_pages.is_empty());
    }

    #[tokio::test]
    async fn test_text_extraction_is_idempotent() {
        let doc = UploadedDocument::new("notes.md", &b"line one\nline two"[..]);
        let first = extract_text(doc.clone()).await.unwrap();
        let second = extract_text(doc).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_pdf_pages_joined_in_page_order() {
        let doc = UploadedDocument::new(
            "cv.PDF",
            &include_bytes!("../../fixtures/three_pages_blank_middle.pdf")[..],
        );
        let extracted = extract_text(doc).await.unwrap();

        let first = extracted.text.find("Work history").unwrap();
        let last = extracted.text.find("Education").unwrap();
        assert!(first < last);
        // Two separators and an empty page between the texts.
        assert!(extracted.text[first..last].matches('\n').count() >= 2);
        assert_eq!(extracted.empty_pages, vec![2]);
    }

    #[tokio::test]
    async fn test_pdf_extraction_is_idempotent() {
        let doc = UploadedDocument::new(
            "resume.pdf",
            &include_bytes!("../../fixtures/one_page.pdf")[..],
        );
        let first = extract_text(doc.clone()).await.unwrap();
        let second = extract_text(doc).await.unwrap();
        assert_eq!(first, second);
        assert!(first.text.contains("Experienced software engineer..."));
        assert!(first.empty_pages.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_pdf_propagates_error() {
        let doc = UploadedDocument::new("resume.pdf", &b"definitely not a pdf"[..]);
        let err = extract_text(doc).await.unwrap_err();
        assert!(err.to_string().contains("resume.pdf"));
    }
}
