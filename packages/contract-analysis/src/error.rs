//! Typed errors for the contract analysis library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during contract analysis operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Text extraction failed upstream
    #[error("text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// Model invocation failed (network, auth, quota)
    #[error("AI service error: {0}")]
    Invocation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Build an `Invocation` error from a message.
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation(message.into().into())
    }
}

/// Errors that can occur while extracting text from an uploaded document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Document not found in the transient blob store
    #[error("document not found: {key}")]
    DocumentNotFound { key: String },

    /// Uploaded bytes are not a parseable PDF
    #[error("not a valid PDF document")]
    InvalidDocument,

    /// Document parsed but contained no extractable text
    #[error("document contains no extractable text")]
    EmptyDocument,

    /// Underlying PDF library failure
    #[error("PDF parse error: {0}")]
    Parse(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for text extraction operations.
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_error_converts_to_analysis_error() {
        let err: AnalysisError = ExtractionError::EmptyDocument.into();
        assert!(matches!(err, AnalysisError::Extraction(_)));
        assert!(err.to_string().contains("no extractable text"));
    }

    #[test]
    fn invocation_error_from_message() {
        let err = AnalysisError::invocation("quota exceeded");
        assert_eq!(err.to_string(), "AI service error: quota exceeded");
    }
}
