//! Text layer extraction for PDF offers using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use crate::error::PdfError;

/// Reads the embedded text of a PDF.
///
/// Scanned PDFs without a text layer come back with little or no text; the
/// caller decides what to do with that.
#[derive(Debug, Default)]
pub struct PdfTextReader {
    raw_data: Vec<u8>,
    page_count: usize,
}

impl PdfTextReader {
    /// Load a PDF from bytes. Documents encrypted with an empty user
    /// password are decrypted in memory.
    pub fn load(data: &[u8]) -> Result<Self, PdfError> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {e}")))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self {
            raw_data,
            page_count,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Text of every page, in reading order.
    pub fn text(&self) -> Result<String, PdfError> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
