//! Error types for the offermatch-core library.
//!
//! The matching engine itself is infallible: extraction, parsing, scoring and
//! comparison degrade gracefully on odd input. Errors only arise at the edges,
//! when text has to be obtained from files or when a pipeline input exceeds
//! the configured size limits.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the offermatch library.
#[derive(Error, Debug)]
pub enum OfferMatchError {
    /// Text could not be obtained from an input document.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// One side of a comparison has more items than the configured limit.
    #[error("{side} document has {items} items, limit is {limit}")]
    InputTooLarge {
        side: &'static str,
        items: usize,
        limit: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failures of the text source collaborator (OCR, PDF text layer, file read).
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The underlying source failed; carries the reason it reported.
    #[error("extraction failed for {}: {reason}", path.display())]
    Failed { path: PathBuf, reason: String },

    /// The file type is not handled by this source.
    #[error("unsupported document type: {0}")]
    Unsupported(String),
}

impl ExtractionError {
    pub fn failed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Failed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors related to PDF processing.
///
/// Raised by the PDF reader only; file sources report them to callers as
/// [`ExtractionError::Failed`] with this error as the reason.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the offermatch library.
pub type Result<T> = std::result::Result<T, OfferMatchError>;
