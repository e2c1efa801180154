//! Obtaining raw text from offer and template files.
//!
//! The comparison engine only ever sees text. Anything that turns a file into
//! text (a PDF text layer, an OCR service, a plain read) sits behind
//! [`TextSource`].

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "pdf")]
pub use pdf::PdfTextReader;

use std::path::Path;

use tracing::debug;

use crate::error::{ExtractionError, Result};

/// Produces raw text for a document.
pub trait TextSource: Send + Sync {
    /// Extract the text of the document at `path`.
    ///
    /// `language` is a hint for sources that need one ("deu", "eng").
    fn extract_text(&self, path: &Path, language: &str) -> Result<String>;
}

/// Reads text files directly and PDFs through their embedded text layer.
#[derive(Debug, Clone, Default)]
pub struct FileTextSource;

impl FileTextSource {
    pub fn new() -> Self {
        Self
    }

    fn is_pdf(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
    }

    #[cfg(feature = "pdf")]
    fn read_pdf(path: &Path, data: &[u8]) -> Result<String> {
        let reader = PdfTextReader::load(data).map_err(|e| ExtractionError::failed(path, e))?;
        let text = reader.text().map_err(|e| ExtractionError::failed(path, e))?;
        if text.trim().is_empty() {
            tracing::warn!(
                "{} has no text layer on {} pages",
                path.display(),
                reader.page_count()
            );
        }
        Ok(text)
    }

    #[cfg(not(feature = "pdf"))]
    fn read_pdf(path: &Path, _data: &[u8]) -> Result<String> {
        Err(ExtractionError::Unsupported(format!(
            "{} (built without PDF support)",
            path.display()
        ))
        .into())
    }
}

impl TextSource for FileTextSource {
    fn extract_text(&self, path: &Path, language: &str) -> Result<String> {
        let data = std::fs::read(path).map_err(|e| ExtractionError::failed(path, e))?;
        debug!(
            "Read {} bytes from {} (language hint {})",
            data.len(),
            path.display(),
            language
        );

        if Self::is_pdf(path) {
            return Self::read_pdf(path, &data);
        }

        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OfferMatchError;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_reads_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "1. Excavation").unwrap();
        writeln!(file, "Quantity: 50 m³").unwrap();

        let text = FileTextSource::new().extract_text(file.path(), "deu").unwrap();
        assert_eq!(text, "1. Excavation\nQuantity: 50 m³\n");
    }

    #[test]
    fn test_missing_file_is_extraction_failure() {
        let err = FileTextSource::new()
            .extract_text(Path::new("/nonexistent/offer.txt"), "deu")
            .unwrap_err();
        assert!(matches!(
            err,
            OfferMatchError::Extraction(ExtractionError::Failed { .. })
        ));
        assert!(err.to_string().starts_with("extraction failed for /nonexistent/offer.txt"));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_broken_pdf_is_extraction_failure() {
        let mut file = tempfile::Builder::new().suffix(".PDF").tempfile().unwrap();
        file.write_all(b"not a pdf at all").unwrap();

        let err = FileTextSource::new().extract_text(file.path(), "deu").unwrap_err();
        match err {
            OfferMatchError::Extraction(ExtractionError::Failed { path, reason }) => {
                assert_eq!(path, file.path());
                assert!(reason.starts_with("failed to parse PDF"));
            }
            other => panic!("expected extraction failure, got {other:?}"),
        }
    }
}
